//! Back-ends render IR fragments as target-language text.
//!
//! Composition never formats text; everything target-specific lives behind
//! the [`Backend`] trait so another target can be swapped in without
//! touching the composer or the instantiation engine.

mod cython;

pub use cython::CythonBackend;

use stlwrap_ir::{Expr, Fragment, Literal};

/// A target-language renderer.
pub trait Backend {
    /// Render one fragment. An empty fragment renders as the empty string.
    fn render_fragment(&self, fragment: &Fragment) -> String;

    /// Render a single expression.
    fn render_expr(&self, expr: &Expr) -> String;

    /// Render a literal in the target's literal syntax.
    fn render_literal(&self, literal: &Literal) -> String;
}

#[cfg(test)]
mod tests;
