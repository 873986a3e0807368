//! Element Types for Container Wrapper Generation
//!
//! This crate is the lookup service the generator consults for everything
//! type-specific:
//!
//! - **Descriptors** - what requests name (`int`, `map<str, vector<double>>`)
//! - **Canonical types** - the normal form every lookup is keyed by
//! - **Registry** - names, storage types, accepted native types and the
//!   per-primitive conversion templates
//! - **Test values** - representative literals per type for generated tests
//!
//! Canonicalization is idempotent: canonicalizing the descriptor of a
//! canonical type yields the same canonical type.

mod canon;
mod descriptor;
mod error;
mod native;
mod primitive;
mod registry;
mod samples;

pub use canon::{CanonicalType, ContainerHead};
pub use descriptor::{TypeDescriptor, MAX_NESTING};
pub use error::DescriptorError;
pub use native::NativeType;
pub use primitive::Primitive;
pub use registry::{PrimitiveEntry, Registry};
pub use samples::{BuiltinSamples, Comparison, TestValues};
