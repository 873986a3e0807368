//! Expressions and literals.

/// A literal value appearing in generated code.
///
/// Test-value providers produce literals; back-ends render them in the
/// target language's literal syntax.
#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Complex { re: f64, im: f64 },
    Str(String),
    List(Vec<Literal>),
    Set(Vec<Literal>),
    Dict(Vec<(Literal, Literal)>),
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Literal::Str(s.to_string())
    }
}

impl From<String> for Literal {
    fn from(s: String) -> Self {
        Literal::Str(s)
    }
}

impl From<i64> for Literal {
    fn from(n: i64) -> Self {
        Literal::Int(n)
    }
}

impl From<f64> for Literal {
    fn from(f: f64) -> Self {
        Literal::Float(f)
    }
}

/// Binary operators used by generated code.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Eq,
    NotEq,
    Lt,
    And,
    Or,
    In,
    NotIn,
    Is,
    IsNot,
}

/// An expression node.
///
/// `Hole` and `Scratch` only appear inside registry templates and are
/// replaced during [`crate::ConversionTemplate::instantiate`].
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// The value being converted.
    Hole,
    /// A template-local temporary, named `{prefix}_{suffix}` once instantiated.
    Scratch(String),
    Name(String),
    Literal(Literal),
    Attr {
        receiver: Box<Expr>,
        name: String,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    Index {
        receiver: Box<Expr>,
        index: Box<Expr>,
    },
    /// Storage-level cast: `<ty> expr`.
    Cast {
        ty: String,
        expr: Box<Expr>,
    },
    /// Pointer or iterator dereference.
    Deref(Box<Expr>),
    /// Pre-increment of an iterator.
    Inc(Box<Expr>),
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Not(Box<Expr>),
    /// Native type test against one or more host type names.
    IsInstance {
        expr: Box<Expr>,
        types: Vec<String>,
    },
    HasAttr {
        expr: Box<Expr>,
        attr: String,
    },
    /// Value construction of a storage type: `ty(args)`.
    Construct {
        ty: String,
        args: Vec<Expr>,
    },
    /// Heap allocation of a storage type: `new ty()`.
    New(String),
    List(Vec<Expr>),
    Dict(Vec<(Expr, Expr)>),
}

impl Expr {
    pub fn name(name: impl Into<String>) -> Self {
        Expr::Name(name.into())
    }

    pub fn scratch(suffix: impl Into<String>) -> Self {
        Expr::Scratch(suffix.into())
    }

    pub fn lit(literal: impl Into<Literal>) -> Self {
        Expr::Literal(literal.into())
    }

    #[must_use]
    pub fn attr(self, name: impl Into<String>) -> Self {
        Expr::Attr {
            receiver: Box::new(self),
            name: name.into(),
        }
    }

    #[must_use]
    pub fn call(self, args: Vec<Expr>) -> Self {
        Expr::Call {
            callee: Box::new(self),
            args,
        }
    }

    /// `self.name(args)`.
    #[must_use]
    pub fn method(self, name: impl Into<String>, args: Vec<Expr>) -> Self {
        self.attr(name).call(args)
    }

    #[must_use]
    pub fn index(self, index: Expr) -> Self {
        Expr::Index {
            receiver: Box::new(self),
            index: Box::new(index),
        }
    }

    #[must_use]
    pub fn cast(ty: impl Into<String>, expr: Expr) -> Self {
        Expr::Cast {
            ty: ty.into(),
            expr: Box::new(expr),
        }
    }

    #[must_use]
    pub fn deref(self) -> Self {
        Expr::Deref(Box::new(self))
    }

    #[must_use]
    pub fn inc(self) -> Self {
        Expr::Inc(Box::new(self))
    }

    #[must_use]
    pub fn binary(self, op: BinaryOp, rhs: Expr) -> Self {
        Expr::Binary {
            op,
            lhs: Box::new(self),
            rhs: Box::new(rhs),
        }
    }

    #[must_use]
    pub fn negate(self) -> Self {
        Expr::Not(Box::new(self))
    }

    #[must_use]
    pub fn is_instance(self, types: Vec<String>) -> Self {
        Expr::IsInstance {
            expr: Box::new(self),
            types,
        }
    }

    #[must_use]
    pub fn has_attr(self, attr: impl Into<String>) -> Self {
        Expr::HasAttr {
            expr: Box::new(self),
            attr: attr.into(),
        }
    }

    pub fn construct(ty: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Construct {
            ty: ty.into(),
            args,
        }
    }

    /// Rebuild this expression bottom-up, letting `f` replace any node.
    ///
    /// When `f` returns `Some`, the replacement is used as-is and its
    /// children are not visited.
    #[must_use]
    pub fn rewrite(&self, f: &dyn Fn(&Expr) -> Option<Expr>) -> Expr {
        if let Some(replaced) = f(self) {
            return replaced;
        }
        let boxed = |e: &Expr| Box::new(e.rewrite(f));
        let all = |es: &[Expr]| es.iter().map(|e| e.rewrite(f)).collect::<Vec<_>>();
        match self {
            Expr::Hole | Expr::Scratch(_) | Expr::Name(_) | Expr::Literal(_) | Expr::New(_) => {
                self.clone()
            }
            Expr::Attr { receiver, name } => Expr::Attr {
                receiver: boxed(receiver),
                name: name.clone(),
            },
            Expr::Call { callee, args } => Expr::Call {
                callee: boxed(callee),
                args: all(args),
            },
            Expr::Index { receiver, index } => Expr::Index {
                receiver: boxed(receiver),
                index: boxed(index),
            },
            Expr::Cast { ty, expr } => Expr::Cast {
                ty: ty.clone(),
                expr: boxed(expr),
            },
            Expr::Deref(inner) => Expr::Deref(boxed(inner)),
            Expr::Inc(inner) => Expr::Inc(boxed(inner)),
            Expr::Binary { op, lhs, rhs } => Expr::Binary {
                op: *op,
                lhs: boxed(lhs),
                rhs: boxed(rhs),
            },
            Expr::Not(inner) => Expr::Not(boxed(inner)),
            Expr::IsInstance { expr, types } => Expr::IsInstance {
                expr: boxed(expr),
                types: types.clone(),
            },
            Expr::HasAttr { expr, attr } => Expr::HasAttr {
                expr: boxed(expr),
                attr: attr.clone(),
            },
            Expr::Construct { ty, args } => Expr::Construct {
                ty: ty.clone(),
                args: all(args),
            },
            Expr::List(items) => Expr::List(all(items)),
            Expr::Dict(pairs) => Expr::Dict(
                pairs
                    .iter()
                    .map(|(k, v)| (k.rewrite(f), v.rewrite(f)))
                    .collect(),
            ),
        }
    }

    /// Derive an identifier stem from this expression.
    ///
    /// Used to name temporaries so that conversions of different sources in
    /// one scope never collide: `deref(inow).first` becomes `inow_first`.
    pub fn ident_hint(&self) -> String {
        match self {
            Expr::Name(name) | Expr::Scratch(name) => sanitize(name),
            Expr::Attr { receiver, name } => {
                format!("{}_{}", receiver.ident_hint(), sanitize(name))
            }
            Expr::Deref(inner) | Expr::Inc(inner) | Expr::Not(inner) => inner.ident_hint(),
            Expr::Cast { expr, .. } => expr.ident_hint(),
            Expr::Call { callee, .. } => callee.ident_hint(),
            Expr::Index { receiver, .. } => format!("{}_at", receiver.ident_hint()),
            _ => "tmp".to_string(),
        }
    }
}

fn sanitize(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c);
        } else if !out.ends_with('_') {
            out.push('_');
        }
    }
    let trimmed = out.trim_matches('_');
    if trimmed.is_empty() {
        "tmp".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests;
