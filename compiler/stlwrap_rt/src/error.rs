//! Errors raised by wrapper operations.

use stlwrap_types::DescriptorError;

use crate::NativeValue;

/// A wrapper operation failed.
///
/// Iterator exhaustion is not an error: iterators return `None`.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum WrapperError {
    /// A value of the wrong native type was passed where the wrapper checks
    /// types up front.
    #[error("only {expected} {role} are valid, found `{found}`")]
    Type {
        expected: String,
        role: &'static str,
        found: &'static str,
    },

    /// Lookup of an absent map key.
    #[error("key not found: {0}")]
    Key(NativeValue),

    /// The value cannot be converted to the storage type.
    #[error("cannot convert `{found}` to {target}")]
    Conversion {
        target: &'static str,
        found: &'static str,
    },

    /// An integer does not fit the storage type.
    #[error("{value} is out of range for {target}")]
    Overflow { value: i128, target: &'static str },

    /// An aliasing wrapper outlived the wrapper that owns its storage.
    #[error("the wrapped storage was released by its owner")]
    Dangling,

    #[error(transparent)]
    Descriptor(#[from] DescriptorError),
}
