//! Artifact paths and file emission.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::{Artifacts, EmitError, Unit};

const IMPLEMENTATION_EXT: &str = "pyx";
const INTERFACE_EXT: &str = "pxd";
const TESTS_EXT: &str = "py";

/// Where each unit is written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub implementation: PathBuf,
    pub interface: PathBuf,
    pub tests: PathBuf,
}

impl ArtifactPaths {
    /// Derive the three paths from a base name.
    ///
    /// A trailing `.pyx` on `base` is dropped first. The interface defaults
    /// to the base name and the tests to the base name with its file name
    /// prefixed by `test_`. Missing suffixes are appended.
    pub fn from_base(base: &Path, interface: Option<&Path>, tests: Option<&Path>) -> Self {
        let base = if has_ext(base, IMPLEMENTATION_EXT) {
            base.with_extension("")
        } else {
            base.to_path_buf()
        };
        let tests = match tests {
            Some(tests) => tests.to_path_buf(),
            None => test_name(&base),
        };
        Self {
            implementation: with_ext(&base, IMPLEMENTATION_EXT),
            interface: with_ext(interface.unwrap_or(&base), INTERFACE_EXT),
            tests: with_ext(&tests, TESTS_EXT),
        }
    }

    pub fn path(&self, unit: Unit) -> &Path {
        match unit {
            Unit::Implementation => &self.implementation,
            Unit::Interface => &self.interface,
            Unit::Tests => &self.tests,
        }
    }
}

fn has_ext(path: &Path, ext: &str) -> bool {
    path.extension().is_some_and(|e| e == ext)
}

fn with_ext(path: &Path, ext: &str) -> PathBuf {
    if has_ext(path, ext) {
        return path.to_path_buf();
    }
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}

fn test_name(base: &Path) -> PathBuf {
    match base.file_name() {
        Some(file) => {
            let mut name = OsString::from("test_");
            name.push(file);
            base.with_file_name(name)
        }
        None => {
            let mut name = OsString::from("test_");
            name.push(base.as_os_str());
            PathBuf::from(name)
        }
    }
}

/// Write the units in order: implementation, interface, tests.
///
/// Stops at the first failure. Files already written are left in place.
#[tracing::instrument(level = "debug", skip_all, fields(base = %paths.implementation.display()))]
pub fn write_artifacts(artifacts: &Artifacts, paths: &ArtifactPaths) -> Result<(), EmitError> {
    for unit in Unit::ALL {
        let path = paths.path(unit);
        std::fs::write(path, artifacts.unit(unit)).map_err(|source| EmitError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(%unit, path = %path.display(), "wrote artifact");
    }
    Ok(())
}

#[cfg(test)]
mod tests;
