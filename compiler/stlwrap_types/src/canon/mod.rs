//! Canonical types.
//!
//! Every registry lookup, generated name and generated fragment is keyed by
//! a [`CanonicalType`]. Two descriptors that resolve to the same canonical
//! type produce byte-identical output.

use std::fmt;

use crate::{Primitive, TypeDescriptor};

/// A container head usable inside element types.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ContainerHead {
    Vector,
    Set,
    Map,
}

impl ContainerHead {
    pub fn token(self) -> &'static str {
        match self {
            ContainerHead::Vector => "vector",
            ContainerHead::Set => "set",
            ContainerHead::Map => "map",
        }
    }

    /// Number of type arguments the head takes.
    pub fn arity(self) -> usize {
        match self {
            ContainerHead::Vector | ContainerHead::Set => 1,
            ContainerHead::Map => 2,
        }
    }
}

/// A resolved, normal-form element type.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CanonicalType {
    Primitive(Primitive),
    Vector(Box<CanonicalType>),
    Set(Box<CanonicalType>),
    Map(Box<CanonicalType>, Box<CanonicalType>),
}

impl CanonicalType {
    pub fn vector(elem: CanonicalType) -> Self {
        CanonicalType::Vector(Box::new(elem))
    }

    pub fn set(elem: CanonicalType) -> Self {
        CanonicalType::Set(Box::new(elem))
    }

    pub fn map(key: CanonicalType, value: CanonicalType) -> Self {
        CanonicalType::Map(Box::new(key), Box::new(value))
    }

    pub fn as_primitive(&self) -> Option<Primitive> {
        match self {
            CanonicalType::Primitive(p) => Some(*p),
            _ => None,
        }
    }

    /// Whether this type may be a set element or a map key.
    pub fn is_ordered_key(&self) -> bool {
        self.as_primitive().is_some_and(Primitive::is_ordered)
    }

    /// The descriptor that canonicalizes back to this type.
    pub fn to_descriptor(&self) -> TypeDescriptor {
        match self {
            CanonicalType::Primitive(p) => TypeDescriptor::token(p.token()),
            CanonicalType::Vector(e) => {
                TypeDescriptor::applied(ContainerHead::Vector.token(), vec![e.to_descriptor()])
            }
            CanonicalType::Set(e) => {
                TypeDescriptor::applied(ContainerHead::Set.token(), vec![e.to_descriptor()])
            }
            CanonicalType::Map(k, v) => TypeDescriptor::applied(
                ContainerHead::Map.token(),
                vec![k.to_descriptor(), v.to_descriptor()],
            ),
        }
    }

    /// Identifier-safe spelling of the canonical token, used in generated
    /// test names: `int32`, `vector_float64`, `map_str_int32`.
    pub fn ident(&self) -> String {
        match self {
            CanonicalType::Primitive(p) => p.token().to_string(),
            CanonicalType::Vector(e) => format!("vector_{}", e.ident()),
            CanonicalType::Set(e) => format!("set_{}", e.ident()),
            CanonicalType::Map(k, v) => format!("map_{}_{}", k.ident(), v.ident()),
        }
    }
}

impl From<Primitive> for CanonicalType {
    fn from(p: Primitive) -> Self {
        CanonicalType::Primitive(p)
    }
}

impl fmt::Display for CanonicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_descriptor())
    }
}

#[cfg(test)]
mod tests;
