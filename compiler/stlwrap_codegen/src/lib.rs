//! Container Wrapper Code Generation
//!
//! Turns canonical set/map instantiations into Cython wrapper classes,
//! free converter functions, interface declarations and nose-style tests.
//!
//! # Architecture
//!
//! ```text
//! CanonicalType(s)  (stlwrap_types)
//!        ↓
//! InstantiationEngine ── Composer ── Registry templates
//!        ↓
//! Instantiation { implementation, interface, tests }   (stlwrap_ir fragments)
//!        ↓
//! Backend::render_fragment  (CythonBackend)
//!        ↓
//!      text
//! ```
//!
//! The engine and composer only build IR; every piece of target syntax
//! lives in the back-end.

mod backend;
mod composer;
mod emitter;
mod engine;
mod options;

pub use backend::{Backend, CythonBackend};
pub use composer::Composer;
pub use emitter::{Emitter, StringEmitter};
pub use engine::{ConverterNames, Instantiation, InstantiationEngine, MapNames, SetNames};
pub use options::{CodegenOptions, InsertionCheck};
