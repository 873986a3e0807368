//! Native (host-language) values.
//!
//! Equality follows host semantics: integers and floats compare
//! numerically, sets and dicts compare without regard to order.

use std::fmt;

use stlwrap_ir::Literal;
use stlwrap_types::NativeType;

/// A host-language value as seen by a wrapper.
#[derive(Clone, Debug)]
pub enum NativeValue {
    None,
    /// Host integers are unbounded; `i128` covers every storage range.
    Int(i128),
    Float(f64),
    Complex { re: f64, im: f64 },
    Str(String),
    List(Vec<NativeValue>),
    Tuple(Vec<NativeValue>),
    Set(Vec<NativeValue>),
    Dict(Vec<(NativeValue, NativeValue)>),
}

impl NativeValue {
    /// The registry tag of this value's type, if it has one.
    pub fn native_type(&self) -> Option<NativeType> {
        match self {
            NativeValue::None => None,
            NativeValue::Int(_) => Some(NativeType::Int),
            NativeValue::Float(_) => Some(NativeType::Float),
            NativeValue::Complex { .. } => Some(NativeType::Complex),
            NativeValue::Str(_) => Some(NativeType::Str),
            NativeValue::List(_) => Some(NativeType::List),
            NativeValue::Tuple(_) => Some(NativeType::Tuple),
            NativeValue::Set(_) => Some(NativeType::Set),
            NativeValue::Dict(_) => Some(NativeType::Dict),
        }
    }

    /// Host name of this value's type, for error messages.
    pub fn type_name(&self) -> &'static str {
        self.native_type().map_or("NoneType", NativeType::host_name)
    }

    pub fn str(s: impl Into<String>) -> Self {
        NativeValue::Str(s.into())
    }
}

impl From<i64> for NativeValue {
    fn from(n: i64) -> Self {
        NativeValue::Int(i128::from(n))
    }
}

impl From<f64> for NativeValue {
    fn from(f: f64) -> Self {
        NativeValue::Float(f)
    }
}

impl From<&str> for NativeValue {
    fn from(s: &str) -> Self {
        NativeValue::Str(s.to_string())
    }
}

impl From<&Literal> for NativeValue {
    fn from(literal: &Literal) -> Self {
        let all = |items: &[Literal]| -> Vec<NativeValue> {
            items.iter().map(NativeValue::from).collect()
        };
        match literal {
            Literal::None => NativeValue::None,
            Literal::Bool(b) => NativeValue::Int(i128::from(*b)),
            Literal::Int(n) => NativeValue::Int(i128::from(*n)),
            Literal::Float(f) => NativeValue::Float(*f),
            Literal::Complex { re, im } => NativeValue::Complex { re: *re, im: *im },
            Literal::Str(s) => NativeValue::Str(s.clone()),
            Literal::List(items) => NativeValue::List(all(items)),
            Literal::Set(items) => NativeValue::Set(all(items)),
            Literal::Dict(pairs) => NativeValue::Dict(
                pairs
                    .iter()
                    .map(|(k, v)| (NativeValue::from(k), NativeValue::from(v)))
                    .collect(),
            ),
        }
    }
}

#[allow(clippy::cast_precision_loss, reason = "host int/float comparison is numeric")]
fn int_eq_float(n: i128, f: f64) -> bool {
    n as f64 == f
}

impl PartialEq for NativeValue {
    fn eq(&self, other: &Self) -> bool {
        use NativeValue as V;
        match (self, other) {
            (V::None, V::None) => true,
            (V::Int(a), V::Int(b)) => a == b,
            (V::Float(a), V::Float(b)) => a == b,
            (V::Int(n), V::Float(f)) | (V::Float(f), V::Int(n)) => int_eq_float(*n, *f),
            (V::Complex { re: a, im: b }, V::Complex { re: c, im: d }) => a == c && b == d,
            (V::Str(a), V::Str(b)) => a == b,
            (V::List(a), V::List(b)) | (V::Tuple(a), V::Tuple(b)) => a == b,
            (V::Set(a), V::Set(b)) => a.len() == b.len() && a.iter().all(|x| b.contains(x)),
            (V::Dict(a), V::Dict(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .all(|(k, v)| b.iter().any(|(k2, v2)| k == k2 && v == v2))
            }
            _ => false,
        }
    }
}

fn join(f: &mut fmt::Formatter<'_>, items: &[NativeValue]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

/// Host `repr` syntax.
impl fmt::Display for NativeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NativeValue::None => f.write_str("None"),
            NativeValue::Int(n) => write!(f, "{n}"),
            NativeValue::Float(x) => write!(f, "{x:?}"),
            NativeValue::Complex { re, im } => {
                let sign = if im.is_sign_negative() { '-' } else { '+' };
                write!(f, "({re:?}{sign}{:?}j)", im.abs())
            }
            NativeValue::Str(s) => write!(f, "'{}'", s.replace('\\', "\\\\").replace('\'', "\\'")),
            NativeValue::List(items) => {
                f.write_str("[")?;
                join(f, items)?;
                f.write_str("]")
            }
            NativeValue::Tuple(items) => {
                f.write_str("(")?;
                join(f, items)?;
                if items.len() == 1 {
                    f.write_str(",")?;
                }
                f.write_str(")")
            }
            NativeValue::Set(items) if items.is_empty() => f.write_str("set()"),
            NativeValue::Set(items) => {
                f.write_str("{")?;
                join(f, items)?;
                f.write_str("}")
            }
            NativeValue::Dict(pairs) => {
                f.write_str("{")?;
                for (i, (k, v)) in pairs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                f.write_str("}")
            }
        }
    }
}
