//! Runtime Model of Generated Container Wrappers
//!
//! Executable semantics for the wrappers the code generator emits: value
//! conversion, ownership of the wrapped storage, aliasing and iteration.
//! Generated scenario tests check the same behavior against the real
//! target.
//!
//! # Ownership
//!
//! ```text
//! SetWrapper::new(.., Init::Empty)            Handle::Owned   (Rc)
//! SetWrapper::new(.., Init::FromNative(v))    Handle::Owned   (Rc)
//! SetWrapper::new(.., Init::FromAlias { .. }) Handle::Aliased (Weak)
//!                                              └─ liveness checked on every access
//! ```
//!
//! Storage is released when the last owning handle is dropped. An alias
//! that outlives every owner fails with [`WrapperError::Dangling`].

mod convert;
mod error;
mod handle;
mod iter;
mod map;
mod native;
mod set;
mod storage;

pub use convert::Converter;
pub use error::WrapperError;
pub use handle::Init;
pub use iter::StorageIter;
pub use map::{MapKeys, MapStorage, MapWrapper};
pub use native::NativeValue;
pub use set::{SetIter, SetStorage, SetWrapper};
pub use storage::{OrderedStorage, StorageValue};
