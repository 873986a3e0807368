//! Conversion templates and the triples they instantiate to.
//!
//! A template describes how to convert one value of a primitive element
//! type. It references the value through [`Expr::Hole`] and any temporaries
//! through [`Expr::Scratch`]; instantiation binds both to concrete names.

use crate::{Expr, Stmt};

/// The `(declaration, body, return)` triple for one converted value.
///
/// `body` must be valid to execute immediately before evaluating `ret`.
/// `decl` holds typed declarations that the caller hoists to the top of
/// the enclosing function.
#[derive(Clone, Debug, PartialEq)]
pub struct ConversionTriple {
    pub decl: Vec<Stmt>,
    pub body: Vec<Stmt>,
    pub ret: Expr,
}

/// Registry-provided conversion recipe for a primitive type.
#[derive(Clone, Debug, PartialEq)]
pub struct ConversionTemplate {
    pub decl: Vec<Stmt>,
    pub body: Vec<Stmt>,
    pub ret: Expr,
}

impl ConversionTemplate {
    /// A template that needs neither declarations nor setup statements.
    pub fn expr(ret: Expr) -> Self {
        Self {
            decl: Vec::new(),
            body: Vec::new(),
            ret,
        }
    }

    pub fn new(decl: Vec<Stmt>, body: Vec<Stmt>, ret: Expr) -> Self {
        Self { decl, body, ret }
    }

    /// Bind the template to `source`, naming temporaries `{prefix}_{suffix}`.
    pub fn instantiate(&self, source: &Expr, prefix: &str) -> ConversionTriple {
        let bind = |e: &Expr| match e {
            Expr::Hole => Some(source.clone()),
            Expr::Scratch(suffix) => Some(Expr::Name(format!("{prefix}_{suffix}"))),
            _ => None,
        };
        ConversionTriple {
            decl: self.decl.iter().map(|s| s.rewrite(&bind)).collect(),
            body: self.body.iter().map(|s| s.rewrite(&bind)).collect(),
            ret: self.ret.rewrite(&bind),
        }
    }
}

#[cfg(test)]
mod tests;
