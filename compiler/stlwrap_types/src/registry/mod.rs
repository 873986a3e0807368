//! Registry of element types.
//!
//! The `Registry` maps descriptor tokens to canonical types and answers
//! every type-specific question the generator asks: display names,
//! identifier fragments, storage types, accepted native types and the
//! conversion templates for primitives.
//!
//! # Design
//!
//! - Token and head aliases live in `FxHashMap`s; entries are keyed by
//!   `Primitive`
//! - Composite names are derived from their element entries, so only
//!   primitives are registered
//! - The registry is passed by reference; there is no global instance

mod builtin;

use rustc_hash::FxHashMap;
use stlwrap_ir::ConversionTemplate;

use crate::{
    CanonicalType, ContainerHead, DescriptorError, NativeType, Primitive, TypeDescriptor,
    MAX_NESTING,
};

/// Everything the registry knows about one primitive.
#[derive(Clone, Debug, PartialEq)]
pub struct PrimitiveEntry {
    /// Name used in user-facing messages and docstrings.
    pub human_name: String,
    /// CamelCase fragment used in generated class names.
    pub class_fragment: String,
    /// snake_case fragment used in generated function names.
    pub func_fragment: String,
    /// Storage-level type spelling.
    pub storage_type: String,
    /// Native types accepted before conversion is attempted.
    pub accepts: Vec<NativeType>,
    pub to_storage: ConversionTemplate,
    pub to_native: ConversionTemplate,
}

/// Element-type registry.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    /// Token -> primitive. Includes each primitive's canonical token.
    aliases: FxHashMap<String, Primitive>,
    /// Token -> container head.
    heads: FxHashMap<String, ContainerHead>,
    entries: FxHashMap<Primitive, PrimitiveEntry>,
}

impl Registry {
    /// Create an empty registry with the container heads registered.
    pub fn new() -> Self {
        let mut registry = Self::default();
        for (token, head) in [
            ("vector", ContainerHead::Vector),
            ("std::vector", ContainerHead::Vector),
            ("vec", ContainerHead::Vector),
            ("set", ContainerHead::Set),
            ("std::set", ContainerHead::Set),
            ("map", ContainerHead::Map),
            ("std::map", ContainerHead::Map),
            ("dict", ContainerHead::Map),
        ] {
            registry.heads.insert(token.to_string(), head);
        }
        registry
    }

    /// Register a primitive under its canonical token and `aliases`.
    pub fn register(&mut self, primitive: Primitive, aliases: &[&str], entry: PrimitiveEntry) {
        self.aliases
            .insert(primitive.token().to_string(), primitive);
        for alias in aliases {
            self.aliases.insert((*alias).to_string(), primitive);
        }
        self.entries.insert(primitive, entry);
    }

    /// Registered primitives in canonical order.
    pub fn primitives(&self) -> impl Iterator<Item = (Primitive, &PrimitiveEntry)> {
        Primitive::ALL
            .into_iter()
            .filter_map(|p| self.entries.get(&p).map(|e| (p, e)))
    }

    /// Look up the entry for a primitive.
    pub fn entry(&self, primitive: Primitive) -> Result<&PrimitiveEntry, DescriptorError> {
        self.entries
            .get(&primitive)
            .ok_or_else(|| DescriptorError::UnknownType(primitive.token().to_string()))
    }

    /// Resolve a descriptor to its canonical type.
    ///
    /// Descriptors built in code bypass the parser, so nesting is bounded
    /// here as well.
    pub fn canonicalize(&self, desc: &TypeDescriptor) -> Result<CanonicalType, DescriptorError> {
        self.canonicalize_at(desc, 0)
    }

    fn canonicalize_at(
        &self,
        desc: &TypeDescriptor,
        depth: usize,
    ) -> Result<CanonicalType, DescriptorError> {
        match desc {
            TypeDescriptor::Token(token) => {
                if let Some(p) = self.aliases.get(token.as_str()) {
                    return Ok(CanonicalType::Primitive(*p));
                }
                match self.heads.get(token.as_str()) {
                    Some(head) => Err(DescriptorError::Arity {
                        head: token.clone(),
                        expected: head.arity(),
                        found: 0,
                    }),
                    None => Err(DescriptorError::UnknownType(token.clone())),
                }
            }
            TypeDescriptor::Applied { head, args } => {
                let Some(container) = self.heads.get(head.as_str()).copied() else {
                    if self.aliases.contains_key(head.as_str()) {
                        return Err(DescriptorError::Arity {
                            head: head.clone(),
                            expected: 0,
                            found: args.len(),
                        });
                    }
                    return Err(DescriptorError::UnknownType(head.clone()));
                };
                if args.len() != container.arity() {
                    return Err(DescriptorError::Arity {
                        head: head.clone(),
                        expected: container.arity(),
                        found: args.len(),
                    });
                }
                if depth == MAX_NESTING {
                    return Err(DescriptorError::Malformed {
                        text: head.clone(),
                        reason: "nesting too deep",
                    });
                }
                let first = self.canonicalize_at(&args[0], depth + 1)?;
                match container {
                    ContainerHead::Vector => Ok(CanonicalType::vector(first)),
                    ContainerHead::Set => Ok(CanonicalType::set(Self::ordered_key(first)?)),
                    ContainerHead::Map => {
                        let value = self.canonicalize_at(&args[1], depth + 1)?;
                        Ok(CanonicalType::map(Self::ordered_key(first)?, value))
                    }
                }
            }
        }
    }

    /// Parse and canonicalize descriptor text.
    pub fn canonicalize_str(&self, text: &str) -> Result<CanonicalType, DescriptorError> {
        self.canonicalize(&TypeDescriptor::parse(text)?)
    }

    /// Reject types that cannot be set elements or map keys.
    pub fn ordered_key(ty: CanonicalType) -> Result<CanonicalType, DescriptorError> {
        if ty.is_ordered_key() {
            Ok(ty)
        } else {
            Err(DescriptorError::UnorderedKey(ty.to_string()))
        }
    }

    pub fn human_name(&self, ty: &CanonicalType) -> Result<String, DescriptorError> {
        Ok(match ty {
            CanonicalType::Primitive(p) => self.entry(*p)?.human_name.clone(),
            CanonicalType::Vector(e) => format!("vector [{}]", self.human_name(e)?),
            CanonicalType::Set(e) => format!("set [{}]", self.human_name(e)?),
            CanonicalType::Map(k, v) => {
                format!("map [{}, {}]", self.human_name(k)?, self.human_name(v)?)
            }
        })
    }

    pub fn class_name_fragment(&self, ty: &CanonicalType) -> Result<String, DescriptorError> {
        Ok(match ty {
            CanonicalType::Primitive(p) => self.entry(*p)?.class_fragment.clone(),
            CanonicalType::Vector(e) => format!("Vector{}", self.class_name_fragment(e)?),
            CanonicalType::Set(e) => format!("Set{}", self.class_name_fragment(e)?),
            CanonicalType::Map(k, v) => format!(
                "Map{}{}",
                self.class_name_fragment(k)?,
                self.class_name_fragment(v)?
            ),
        })
    }

    pub fn func_name_fragment(&self, ty: &CanonicalType) -> Result<String, DescriptorError> {
        Ok(match ty {
            CanonicalType::Primitive(p) => self.entry(*p)?.func_fragment.clone(),
            CanonicalType::Vector(e) => format!("vector_{}", self.func_name_fragment(e)?),
            CanonicalType::Set(e) => format!("set_{}", self.func_name_fragment(e)?),
            CanonicalType::Map(k, v) => format!(
                "map_{}_{}",
                self.func_name_fragment(k)?,
                self.func_name_fragment(v)?
            ),
        })
    }

    pub fn storage_type(&self, ty: &CanonicalType) -> Result<String, DescriptorError> {
        Ok(match ty {
            CanonicalType::Primitive(p) => self.entry(*p)?.storage_type.clone(),
            CanonicalType::Vector(e) => format!("cpp_vector[{}]", self.storage_type(e)?),
            CanonicalType::Set(e) => format!("cpp_set[{}]", self.storage_type(e)?),
            CanonicalType::Map(k, v) => {
                format!("cpp_map[{}, {}]", self.storage_type(k)?, self.storage_type(v)?)
            }
        })
    }

    pub fn accepted_native_types(
        &self,
        ty: &CanonicalType,
    ) -> Result<Vec<NativeType>, DescriptorError> {
        Ok(match ty {
            CanonicalType::Primitive(p) => self.entry(*p)?.accepts.clone(),
            CanonicalType::Vector(_) => {
                vec![NativeType::List, NativeType::Tuple, NativeType::NdArray]
            }
            CanonicalType::Set(_) => vec![NativeType::Set, NativeType::FrozenSet],
            CanonicalType::Map(..) => vec![NativeType::Dict],
        })
    }

    /// Conversion template from native to storage, or `None` for composites
    /// (which the composer builds recursively).
    pub fn native_to_storage_template(
        &self,
        ty: &CanonicalType,
    ) -> Result<Option<&ConversionTemplate>, DescriptorError> {
        match ty {
            CanonicalType::Primitive(p) => Ok(Some(&self.entry(*p)?.to_storage)),
            _ => Ok(None),
        }
    }

    /// Conversion template from storage to native, or `None` for composites.
    pub fn storage_to_native_template(
        &self,
        ty: &CanonicalType,
    ) -> Result<Option<&ConversionTemplate>, DescriptorError> {
        match ty {
            CanonicalType::Primitive(p) => Ok(Some(&self.entry(*p)?.to_native)),
            _ => Ok(None),
        }
    }
}
