//! Instantiation requests.
//!
//! A request is written as a shape tag followed by type tokens, e.g.
//! `["map", "str", "vector<float64>"]`. [`Request::resolve`] checks the tag
//! and arity and canonicalizes every token before any code is composed.

use std::fmt;

use serde::{Deserialize, Serialize};
use stlwrap_codegen::{Instantiation, InstantiationEngine};
use stlwrap_types::{CanonicalType, Registry};

use crate::GenerateError;

/// The generator a request dispatches to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    Set,
    Map,
    Py2cSet,
    Py2cMap,
}

impl Shape {
    pub const ALL: [Shape; 4] = [Shape::Set, Shape::Map, Shape::Py2cSet, Shape::Py2cMap];

    pub fn from_tag(tag: &str) -> Result<Self, GenerateError> {
        Self::ALL
            .into_iter()
            .find(|shape| shape.tag() == tag)
            .ok_or_else(|| GenerateError::Dispatch {
                tag: tag.to_string(),
            })
    }

    pub fn tag(self) -> &'static str {
        match self {
            Shape::Set => "set",
            Shape::Map => "map",
            Shape::Py2cSet => "py2c_set",
            Shape::Py2cMap => "py2c_map",
        }
    }

    /// Number of type arguments the shape takes.
    pub fn arity(self) -> usize {
        match self {
            Shape::Set | Shape::Py2cSet => 1,
            Shape::Map | Shape::Py2cMap => 2,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A request as written in a manifest: shape tag, then type tokens.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRequest(pub Vec<String>);

impl RawRequest {
    pub fn new<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RawRequest(parts.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for RawRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.0.join(", "))
    }
}

/// A request with its shape known and its types canonical.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Request {
    Set(CanonicalType),
    Map(CanonicalType, CanonicalType),
    Py2cSet(CanonicalType),
    Py2cMap(CanonicalType, CanonicalType),
}

impl Request {
    pub fn resolve(raw: &RawRequest, registry: &Registry) -> Result<Self, GenerateError> {
        let (tag, tokens) = raw.0.split_first().ok_or(GenerateError::EmptyRequest)?;
        let shape = Shape::from_tag(tag)?;
        let arity = GenerateError::RequestArity {
            shape: shape.tag(),
            expected: shape.arity(),
            found: tokens.len(),
        };
        if tokens.len() != shape.arity() {
            return Err(arity);
        }
        let types = tokens
            .iter()
            .map(|token| registry.canonicalize_str(token))
            .collect::<Result<Vec<_>, _>>()?;
        match (shape, types.as_slice()) {
            (Shape::Set, [elem]) => Ok(Request::Set(elem.clone())),
            (Shape::Py2cSet, [elem]) => Ok(Request::Py2cSet(elem.clone())),
            (Shape::Map, [key, value]) => Ok(Request::Map(key.clone(), value.clone())),
            (Shape::Py2cMap, [key, value]) => Ok(Request::Py2cMap(key.clone(), value.clone())),
            _ => Err(arity),
        }
    }

    pub fn shape(&self) -> Shape {
        match self {
            Request::Set(_) => Shape::Set,
            Request::Map(..) => Shape::Map,
            Request::Py2cSet(_) => Shape::Py2cSet,
            Request::Py2cMap(..) => Shape::Py2cMap,
        }
    }

    /// Run the generator for this shape.
    pub fn instantiate(
        &self,
        engine: &InstantiationEngine<'_>,
    ) -> Result<Instantiation, GenerateError> {
        let out = match self {
            Request::Set(elem) => engine.set(elem)?,
            Request::Map(key, value) => engine.map(key, value)?,
            Request::Py2cSet(elem) => engine.set_converters(elem)?,
            Request::Py2cMap(key, value) => engine.map_converters(key, value)?,
        };
        Ok(out)
    }
}
