//! Intermediate Representation for Generated Wrappers
//!
//! Generated code is never assembled from strings. The composer and the
//! instantiation engine build a small statement/expression tree, and a
//! back-end renders it for a concrete target language.
//!
//! # Architecture
//!
//! ```text
//! Registry templates (ConversionTemplate)
//!        ↓  instantiate(source, prefix)
//!   ConversionTriple (decl / body / ret)
//!        ↓  composed into methods
//!   Fragment (classes, functions, comments)
//!        ↓
//!   Back-end renderer (text)
//! ```

mod expr;
mod item;
mod stmt;
mod template;

pub use expr::{BinaryOp, Expr, Literal};
pub use item::{Class, ClassKind, Field, Fragment, Function, FunctionKind, Item, Param};
pub use stmt::Stmt;
pub use template::{ConversionTemplate, ConversionTriple};
