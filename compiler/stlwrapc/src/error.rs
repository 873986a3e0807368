//! Driver error types.
//!
//! Generation errors abort the whole batch. Emission errors name the path
//! that failed; artifacts written before the failure stay on disk.

use std::path::PathBuf;

use stlwrap_types::DescriptorError;
use thiserror::Error;

/// A request could not be turned into fragments.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The shape tag names no known generator.
    #[error("unknown instantiation shape `{tag}`")]
    Dispatch { tag: String },

    #[error("`{shape}` takes {expected} type argument(s), found {found}")]
    RequestArity {
        shape: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("empty instantiation request")]
    EmptyRequest,

    #[error(transparent)]
    Type(#[from] DescriptorError),
}

/// Writing an artifact failed.
#[derive(Debug, Error)]
pub enum EmitError {
    #[error("cannot write `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A manifest or one of the header files it names could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read `{}`: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid manifest `{}`: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
