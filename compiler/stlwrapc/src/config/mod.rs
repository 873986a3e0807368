//! Generation manifests.
//!
//! A manifest is a JSON document naming the requests of a batch and where
//! the artifacts go:
//!
//! ```json
//! {
//!   "module": "stlconverters",
//!   "output": "stlconverters",
//!   "insertion_check": "permissive",
//!   "headers": { "tests": "test_header.py" },
//!   "requests": [["set", "int32"], ["map", "str", "vector<float64>"]]
//! }
//! ```
//!
//! Every field is optional. Relative paths resolve against the directory
//! holding the manifest.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use stlwrap_codegen::{CodegenOptions, InsertionCheck};

use crate::{ArtifactPaths, ConfigError, Headers, RawRequest, Unit, DEFAULT_MODULE};

/// Header override files, one per unit.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeaderPaths {
    pub implementation: Option<PathBuf>,
    pub interface: Option<PathBuf>,
    pub tests: Option<PathBuf>,
}

impl HeaderPaths {
    fn get(&self, unit: Unit) -> Option<&Path> {
        match unit {
            Unit::Implementation => self.implementation.as_deref(),
            Unit::Interface => self.interface.as_deref(),
            Unit::Tests => self.tests.as_deref(),
        }
    }
}

/// A parsed manifest.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenConfig {
    /// Module the generated tests import.
    pub module: String,
    /// Artifact base name.
    pub output: String,
    /// Interface file name; defaults to the base name.
    pub interface: Option<String>,
    /// Test file name; defaults to `test_` plus the base name.
    pub tests: Option<String>,
    pub headers: HeaderPaths,
    pub insertion_check: InsertionCheck,
    pub requests: Vec<RawRequest>,
    #[serde(skip)]
    base_dir: PathBuf,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            module: DEFAULT_MODULE.to_string(),
            output: DEFAULT_MODULE.to_string(),
            interface: None,
            tests: None,
            headers: HeaderPaths::default(),
            insertion_check: InsertionCheck::default(),
            requests: Vec::new(),
            base_dir: PathBuf::new(),
        }
    }
}

impl GenConfig {
    /// Read and parse the manifest at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = read(path)?;
        let mut config = Self::parse(&text, path)?;
        config.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        tracing::debug!(
            path = %path.display(),
            requests = config.requests.len(),
            "loaded manifest"
        );
        Ok(config)
    }

    /// Parse manifest text. `origin` only labels errors; relative paths
    /// resolve against the current directory.
    pub fn parse(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn options(&self) -> CodegenOptions {
        CodegenOptions::default().with_insertion_check(self.insertion_check)
    }

    /// Read the header override files the manifest names.
    pub fn headers(&self) -> Result<Headers, ConfigError> {
        let mut headers = Headers::default();
        for unit in Unit::ALL {
            if let Some(path) = self.headers.get(unit) {
                headers = headers.with(unit, read(&self.base_dir.join(path))?);
            }
        }
        Ok(headers)
    }

    /// Artifact paths for the manifest's own output settings.
    pub fn artifact_paths(&self) -> ArtifactPaths {
        let interface = self.interface.as_ref().map(|name| self.base_dir.join(name));
        let tests = self.tests.as_ref().map(|name| self.base_dir.join(name));
        ArtifactPaths::from_base(
            &self.base_dir.join(&self.output),
            interface.as_deref(),
            tests.as_deref(),
        )
    }
}

fn read(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests;
