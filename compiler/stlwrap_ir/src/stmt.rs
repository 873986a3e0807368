//! Statements.

use crate::Expr;

/// A statement node.
///
/// Declarations are kept separate from the statements that fill them
/// because typed declarations must precede all other statements of a
/// function body in the target language.
#[derive(Clone, Debug, PartialEq)]
pub enum Stmt {
    /// Typed storage declaration: `cdef ty target`.
    Decl { ty: String, target: Expr },
    Assign { target: Expr, value: Expr },
    Expr(Expr),
    If {
        /// `if`/`elif` arms in order.
        branches: Vec<(Expr, Vec<Stmt>)>,
        otherwise: Option<Vec<Stmt>>,
    },
    For {
        targets: Vec<String>,
        iter: Expr,
        body: Vec<Stmt>,
    },
    While { cond: Expr, body: Vec<Stmt> },
    Return(Option<Expr>),
    Raise(Expr),
    /// `try` block with a single `except` clause.
    Try {
        body: Vec<Stmt>,
        exception: String,
        handler: Vec<Stmt>,
    },
    /// Release heap storage: `del target`.
    Delete(Expr),
    Comment(String),
    Blank,
}

impl Stmt {
    pub fn assign(target: Expr, value: Expr) -> Self {
        Stmt::Assign { target, value }
    }

    pub fn decl(ty: impl Into<String>, target: Expr) -> Self {
        Stmt::Decl {
            ty: ty.into(),
            target,
        }
    }

    pub fn when(cond: Expr, then: Vec<Stmt>) -> Self {
        Stmt::If {
            branches: vec![(cond, then)],
            otherwise: None,
        }
    }

    pub fn if_else(cond: Expr, then: Vec<Stmt>, otherwise: Vec<Stmt>) -> Self {
        Stmt::If {
            branches: vec![(cond, then)],
            otherwise: Some(otherwise),
        }
    }

    pub fn for_each(targets: &[&str], iter: Expr, body: Vec<Stmt>) -> Self {
        Stmt::For {
            targets: targets.iter().map(|t| (*t).to_string()).collect(),
            iter,
            body,
        }
    }

    pub fn try_except(body: Vec<Stmt>, exception: impl Into<String>, handler: Vec<Stmt>) -> Self {
        Stmt::Try {
            body,
            exception: exception.into(),
            handler,
        }
    }

    pub fn ret(value: Expr) -> Self {
        Stmt::Return(Some(value))
    }

    /// Apply [`Expr::rewrite`] to every expression in this statement.
    #[must_use]
    pub fn rewrite(&self, f: &dyn Fn(&Expr) -> Option<Expr>) -> Stmt {
        let block = |stmts: &[Stmt]| stmts.iter().map(|s| s.rewrite(f)).collect::<Vec<_>>();
        match self {
            Stmt::Decl { ty, target } => Stmt::Decl {
                ty: ty.clone(),
                target: target.rewrite(f),
            },
            Stmt::Assign { target, value } => Stmt::Assign {
                target: target.rewrite(f),
                value: value.rewrite(f),
            },
            Stmt::Expr(e) => Stmt::Expr(e.rewrite(f)),
            Stmt::If {
                branches,
                otherwise,
            } => Stmt::If {
                branches: branches
                    .iter()
                    .map(|(cond, body)| (cond.rewrite(f), block(body)))
                    .collect(),
                otherwise: otherwise.as_deref().map(block),
            },
            Stmt::For {
                targets,
                iter,
                body,
            } => Stmt::For {
                targets: targets.clone(),
                iter: iter.rewrite(f),
                body: block(body),
            },
            Stmt::While { cond, body } => Stmt::While {
                cond: cond.rewrite(f),
                body: block(body),
            },
            Stmt::Return(value) => Stmt::Return(value.as_ref().map(|e| e.rewrite(f))),
            Stmt::Raise(e) => Stmt::Raise(e.rewrite(f)),
            Stmt::Try {
                body,
                exception,
                handler,
            } => Stmt::Try {
                body: block(body),
                exception: exception.clone(),
                handler: block(handler),
            },
            Stmt::Delete(e) => Stmt::Delete(e.rewrite(f)),
            Stmt::Comment(_) | Stmt::Blank => self.clone(),
        }
    }
}
