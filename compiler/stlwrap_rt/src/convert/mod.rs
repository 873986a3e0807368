//! Value conversion between native and storage representation.
//!
//! The runtime counterpart of the generated conversion code: primitives
//! convert directly, composites recurse element by element.

use std::collections::{BTreeMap, BTreeSet};

use stlwrap_types::{CanonicalType, DescriptorError, Primitive, Registry};

use crate::{NativeValue, StorageValue, WrapperError};

/// Converts values of registered types.
#[derive(Clone, Copy, Debug)]
pub struct Converter<'r> {
    registry: &'r Registry,
}

impl<'r> Converter<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// Whether `value`'s native type is accepted for `ty`.
    pub fn accepts(
        &self,
        value: &NativeValue,
        ty: &CanonicalType,
    ) -> Result<bool, DescriptorError> {
        let accepted = self.registry.accepted_native_types(ty)?;
        Ok(value
            .native_type()
            .is_some_and(|native| accepted.contains(&native)))
    }

    /// Storage form of a lookup key, or `None` when `value` cannot equal
    /// any stored element: its type is not accepted, or it lies outside
    /// the storage range.
    pub fn lookup(
        &self,
        value: &NativeValue,
        ty: &CanonicalType,
    ) -> Result<Option<StorageValue>, WrapperError> {
        if !self.accepts(value, ty)? {
            return Ok(None);
        }
        match self.to_storage(value, ty) {
            Ok(stored) => Ok(Some(stored)),
            Err(WrapperError::Overflow { .. } | WrapperError::Conversion { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Fail with [`WrapperError::Type`] unless `value` is accepted for `ty`.
    pub fn check(
        &self,
        value: &NativeValue,
        ty: &CanonicalType,
        role: &'static str,
    ) -> Result<(), WrapperError> {
        if self.accepts(value, ty)? {
            Ok(())
        } else {
            Err(WrapperError::Type {
                expected: self.registry.human_name(ty)?,
                role,
                found: value.type_name(),
            })
        }
    }

    pub fn to_storage(
        &self,
        value: &NativeValue,
        ty: &CanonicalType,
    ) -> Result<StorageValue, WrapperError> {
        tracing::trace!(%ty, found = value.type_name(), "native to storage");
        let mismatch = || WrapperError::Conversion {
            target: head_name(ty),
            found: value.type_name(),
        };
        match ty {
            CanonicalType::Primitive(p) => primitive_to_storage(value, *p),
            CanonicalType::Vector(elem) => match value {
                NativeValue::List(items) | NativeValue::Tuple(items) => Ok(StorageValue::Vector(
                    items
                        .iter()
                        .map(|item| self.to_storage(item, elem))
                        .collect::<Result<_, _>>()?,
                )),
                _ => Err(mismatch()),
            },
            CanonicalType::Set(elem) => match value {
                NativeValue::Set(items) => Ok(StorageValue::Set(
                    items
                        .iter()
                        .map(|item| self.to_storage(item, elem))
                        .collect::<Result<BTreeSet<_>, _>>()?,
                )),
                _ => Err(mismatch()),
            },
            CanonicalType::Map(key, val) => match value {
                NativeValue::Dict(pairs) => Ok(StorageValue::Map(
                    pairs
                        .iter()
                        .map(|(k, v)| -> Result<_, WrapperError> {
                            Ok((self.to_storage(k, key)?, self.to_storage(v, val)?))
                        })
                        .collect::<Result<BTreeMap<_, _>, _>>()?,
                )),
                _ => Err(mismatch()),
            },
        }
    }

    pub fn to_native(
        &self,
        value: &StorageValue,
        ty: &CanonicalType,
    ) -> Result<NativeValue, WrapperError> {
        Ok(match (value, ty) {
            (StorageValue::Str(s), _) => NativeValue::Str(s.clone()),
            (StorageValue::I32(n), _) => NativeValue::Int(i128::from(*n)),
            (StorageValue::U32(n), _) => NativeValue::Int(i128::from(*n)),
            (StorageValue::I64(n), _) => NativeValue::Int(i128::from(*n)),
            (StorageValue::U64(n), _) => NativeValue::Int(i128::from(*n)),
            (StorageValue::F32(x), _) => NativeValue::Float(f64::from(*x)),
            (StorageValue::F64(x), _) => NativeValue::Float(*x),
            (StorageValue::Complex { re, im }, _) => NativeValue::Complex { re: *re, im: *im },
            (StorageValue::Vector(items), CanonicalType::Vector(elem)) => {
                NativeValue::List(self.elements(items.iter(), elem)?)
            }
            (StorageValue::Set(items), CanonicalType::Set(elem)) => {
                NativeValue::Set(self.elements(items.iter(), elem)?)
            }
            (StorageValue::Map(pairs), CanonicalType::Map(key, val)) => NativeValue::Dict(
                pairs
                    .iter()
                    .map(|(k, v)| -> Result<_, WrapperError> {
                        Ok((self.to_native(k, key)?, self.to_native(v, val)?))
                    })
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            _ => {
                return Err(WrapperError::Conversion {
                    target: head_name(ty),
                    found: "storage value",
                })
            }
        })
    }

    fn elements<'v>(
        &self,
        items: impl Iterator<Item = &'v StorageValue>,
        elem: &CanonicalType,
    ) -> Result<Vec<NativeValue>, WrapperError> {
        items.map(|item| self.to_native(item, elem)).collect()
    }
}

fn head_name(ty: &CanonicalType) -> &'static str {
    match ty {
        CanonicalType::Primitive(p) => p.token(),
        CanonicalType::Vector(_) => "vector",
        CanonicalType::Set(_) => "set",
        CanonicalType::Map(..) => "map",
    }
}

fn integer<T: TryFrom<i128>>(
    n: i128,
    target: Primitive,
    wrap: fn(T) -> StorageValue,
) -> Result<StorageValue, WrapperError> {
    T::try_from(n).map(wrap).map_err(|_| WrapperError::Overflow {
        value: n,
        target: target.token(),
    })
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    reason = "narrowing to the storage float width is the conversion"
)]
fn primitive_to_storage(value: &NativeValue, p: Primitive) -> Result<StorageValue, WrapperError> {
    match (p, value) {
        (Primitive::Str, NativeValue::Str(s)) => Ok(StorageValue::Str(s.clone())),
        (Primitive::Int32, NativeValue::Int(n)) => integer(*n, p, StorageValue::I32),
        (Primitive::UInt32, NativeValue::Int(n)) => integer(*n, p, StorageValue::U32),
        (Primitive::Int64, NativeValue::Int(n)) => integer(*n, p, StorageValue::I64),
        (Primitive::UInt64, NativeValue::Int(n)) => integer(*n, p, StorageValue::U64),
        (Primitive::Float32, NativeValue::Float(x)) => Ok(StorageValue::F32(*x as f32)),
        (Primitive::Float32, NativeValue::Int(n)) => Ok(StorageValue::F32(*n as f32)),
        (Primitive::Float64, NativeValue::Float(x)) => Ok(StorageValue::F64(*x)),
        (Primitive::Float64, NativeValue::Int(n)) => Ok(StorageValue::F64(*n as f64)),
        (Primitive::Complex128, NativeValue::Complex { re, im }) => {
            Ok(StorageValue::Complex { re: *re, im: *im })
        }
        (Primitive::Complex128, NativeValue::Float(x)) => {
            Ok(StorageValue::Complex { re: *x, im: 0.0 })
        }
        (Primitive::Complex128, NativeValue::Int(n)) => Ok(StorageValue::Complex {
            re: *n as f64,
            im: 0.0,
        }),
        _ => Err(WrapperError::Conversion {
            target: p.token(),
            found: value.type_name(),
        }),
    }
}
