//! Descriptor resolution errors.

/// A type descriptor could not be resolved against the registry.
///
/// Raised eagerly when a request is canonicalized or composed, never
/// deferred to emission.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DescriptorError {
    /// The token is not registered.
    #[error("unknown type `{0}`")]
    UnknownType(String),

    /// A container head was applied to the wrong number of arguments.
    #[error("`{head}` expects {expected} type argument(s), found {found}")]
    Arity {
        head: String,
        expected: usize,
        found: usize,
    },

    /// Set elements and map keys must be ordered primitives.
    #[error("`{0}` cannot be a set element or map key: only ordered primitive types are allowed")]
    UnorderedKey(String),

    /// The descriptor text does not parse.
    #[error("malformed type descriptor `{text}`: {reason}")]
    Malformed { text: String, reason: &'static str },
}
