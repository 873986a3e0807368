//! Test-value providers.
//!
//! Generated scenario tests need a handful of distinct, representative
//! literal values per element type. Composite samples are built from the
//! samples of their elements, so every nesting depth has values.

use stlwrap_ir::Literal;

use crate::{CanonicalType, DescriptorError, Primitive};

/// How generated tests compare two values of a type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Comparison {
    /// Exact equality.
    Equal,
    /// Approximate scalar equality, for single-precision floats.
    Almost,
    /// Elementwise approximate equality, for vectors.
    ArrayAlmost,
}

/// Supplies representative values for generated tests.
pub trait TestValues {
    /// At least four distinct values of `ty`, in a stable order.
    fn sample_values(&self, ty: &CanonicalType) -> Result<Vec<Literal>, DescriptorError>;

    /// The comparison generated tests use for values of `ty`.
    ///
    /// Only flat numeric vectors compare elementwise; ragged or string
    /// vectors fall back to exact equality.
    fn comparison(&self, ty: &CanonicalType) -> Comparison {
        match ty {
            CanonicalType::Primitive(Primitive::Float32) => Comparison::Almost,
            CanonicalType::Vector(elem) => match elem.as_primitive() {
                Some(Primitive::Str) | None => Comparison::Equal,
                Some(_) => Comparison::ArrayAlmost,
            },
            _ => Comparison::Equal,
        }
    }
}

/// Samples for the built-in primitives.
#[derive(Copy, Clone, Debug, Default)]
pub struct BuiltinSamples;

impl BuiltinSamples {
    fn primitive(p: Primitive) -> Vec<Literal> {
        let ints = |xs: [i64; 4]| -> Vec<Literal> { xs.into_iter().map(Literal::Int).collect() };
        match p {
            Primitive::Str => ["Aha", "Take", "Me", "On"].map(Literal::from).to_vec(),
            Primitive::Int32 => ints([1, 42, -65, 18]),
            Primitive::UInt32 => ints([1, 65, 4_043_370_667, 42]),
            Primitive::Int64 => ints([1, 42, -6_500_000_000, 18]),
            Primitive::UInt64 => ints([1, 65, 9_000_000_000, 42]),
            // Exactly representable in single precision.
            Primitive::Float32 => [1.0, 42.5, -65.25, 18.0].map(Literal::Float).to_vec(),
            Primitive::Float64 => [1.0, 42.42, -65.5555, 18.0].map(Literal::Float).to_vec(),
            Primitive::Complex128 => vec![
                Literal::Complex { re: 1.0, im: 0.0 },
                Literal::Complex { re: 42.0, im: 42.0 },
                Literal::Complex { re: -65.55, im: -1.0 },
                Literal::Complex { re: 0.0, im: 0.18 },
            ],
        }
    }

    /// Pick elements of `base` by index.
    fn pick(base: &[Literal], idx: &[usize]) -> Vec<Literal> {
        idx.iter().map(|&i| base[i % base.len()].clone()).collect()
    }
}

impl TestValues for BuiltinSamples {
    fn sample_values(&self, ty: &CanonicalType) -> Result<Vec<Literal>, DescriptorError> {
        Ok(match ty {
            CanonicalType::Primitive(p) => Self::primitive(*p),
            CanonicalType::Vector(elem) => {
                let e = self.sample_values(elem)?;
                [&[0, 1][..], &[1, 2, 3], &[2], &[3, 0]]
                    .iter()
                    .map(|idx| Literal::List(Self::pick(&e, idx)))
                    .collect()
            }
            CanonicalType::Set(elem) => {
                let e = self.sample_values(elem)?;
                [&[0, 1][..], &[2], &[1, 3], &[0, 2, 3]]
                    .iter()
                    .map(|idx| Literal::Set(Self::pick(&e, idx)))
                    .collect()
            }
            CanonicalType::Map(key, value) => {
                let k = self.sample_values(key)?;
                let v = self.sample_values(value)?;
                [&[(0, 0)][..], &[(1, 1), (2, 2)], &[(3, 3)], &[(0, 3), (2, 1)]]
                    .iter()
                    .map(|pairs| {
                        Literal::Dict(
                            pairs
                                .iter()
                                .map(|&(ki, vi)| (k[ki % k.len()].clone(), v[vi % v.len()].clone()))
                                .collect(),
                        )
                    })
                    .collect()
            }
        })
    }
}

#[cfg(test)]
mod tests;
