//! Conversion Expression Composer
//!
//! Produces the `(decl, body, ret)` triple that converts one value between
//! its native and storage representations.
//!
//! # Design
//!
//! - Primitives instantiate the registry template with the source's
//!   identifier hint as the temporary prefix; no recursion
//! - Composites allocate a container temporary and an iteration variable,
//!   both named from the prefix, then recurse on the iteration variable.
//!   Each nesting level extends the prefix, so names never collide with
//!   an outer scope
//! - Inner declarations are hoisted into the outer `decl`; the generated
//!   language requires typed declarations at function level
//!
//! ```text
//! value : vector<set<str>>
//!   decl  cdef cpp_vector[cpp_set[std_string]] value_cpp
//!         cdef cpp_set[std_string] value_item_cpp
//!         cdef bytes value_item_item_bytes
//!   body  value_cpp = cpp_vector[...]()
//!         for value_item in value:
//!             value_item_cpp = cpp_set[std_string]()
//!             for value_item_item in value_item:
//!                 ...
//!             value_cpp.push_back(value_item_cpp)
//!   ret   value_cpp
//! ```

use stlwrap_ir::{BinaryOp, ConversionTriple, Expr, Stmt};
use stlwrap_types::{CanonicalType, DescriptorError, Registry};

/// Composes element-level conversions from registry templates.
#[derive(Clone, Copy, Debug)]
pub struct Composer<'a> {
    registry: &'a Registry,
}

impl<'a> Composer<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'a Registry {
        self.registry
    }

    /// Convert `source`, a native value of type `ty`, to storage.
    pub fn native_to_storage(
        &self,
        source: &Expr,
        ty: &CanonicalType,
    ) -> Result<ConversionTriple, DescriptorError> {
        let prefix = source.ident_hint();
        tracing::trace!(%ty, %prefix, "compose native to storage");
        if let Some(template) = self.registry.native_to_storage_template(ty)? {
            return Ok(template.instantiate(source, &prefix));
        }

        let target = Expr::name(format!("{prefix}_cpp"));
        let storage = self.registry.storage_type(ty)?;
        let mut decl = vec![Stmt::decl(storage.clone(), target.clone())];
        let init = Stmt::assign(target.clone(), Expr::name(storage).call(vec![]));

        let body = match ty {
            CanonicalType::Vector(elem) | CanonicalType::Set(elem) => {
                let item = format!("{prefix}_item");
                let inner = self.native_to_storage(&Expr::name(item.as_str()), elem)?;
                let push = if matches!(ty, CanonicalType::Vector(_)) {
                    "push_back"
                } else {
                    "insert"
                };
                decl.extend(inner.decl);
                let mut loop_body = inner.body;
                loop_body.push(Stmt::Expr(target.clone().method(push, vec![inner.ret])));
                vec![init, Stmt::for_each(&[item.as_str()], source.clone(), loop_body)]
            }
            CanonicalType::Map(key, value) => {
                let k = format!("{prefix}_key");
                let v = format!("{prefix}_val");
                let inner_key = self.native_to_storage(&Expr::name(k.as_str()), key)?;
                let inner_value = self.native_to_storage(&Expr::name(v.as_str()), value)?;
                decl.extend(inner_key.decl);
                decl.extend(inner_value.decl);
                let mut loop_body = inner_key.body;
                loop_body.extend(inner_value.body);
                loop_body.push(Stmt::assign(
                    target.clone().index(inner_key.ret),
                    inner_value.ret,
                ));
                vec![
                    init,
                    Stmt::for_each(
                        &[k.as_str(), v.as_str()],
                        source.clone().method("items", vec![]),
                        loop_body,
                    ),
                ]
            }
            CanonicalType::Primitive(p) => {
                return Err(DescriptorError::UnknownType(p.token().to_string()))
            }
        };

        Ok(ConversionTriple {
            decl,
            body,
            ret: target,
        })
    }

    /// Convert `source`, a storage value of type `ty`, to a native value.
    pub fn storage_to_native(
        &self,
        source: &Expr,
        ty: &CanonicalType,
    ) -> Result<ConversionTriple, DescriptorError> {
        let prefix = source.ident_hint();
        tracing::trace!(%ty, %prefix, "compose storage to native");
        if let Some(template) = self.registry.storage_to_native_template(ty)? {
            return Ok(template.instantiate(source, &prefix));
        }

        let target = Expr::name(format!("{prefix}_py"));
        let iter = Expr::name(format!("{prefix}_iter"));
        let storage = self.registry.storage_type(ty)?;
        let mut decl = vec![Stmt::decl(format!("{storage}.iterator"), iter.clone())];

        let (empty, mut loop_body) = match ty {
            CanonicalType::Vector(elem) | CanonicalType::Set(elem) => {
                let inner = self.storage_to_native(&iter.clone().deref(), elem)?;
                let (empty, add) = if matches!(ty, CanonicalType::Vector(_)) {
                    (Expr::List(Vec::new()), "append")
                } else {
                    (Expr::name("set").call(vec![]), "add")
                };
                decl.extend(inner.decl);
                let mut body = inner.body;
                body.push(Stmt::Expr(target.clone().method(add, vec![inner.ret])));
                (empty, body)
            }
            CanonicalType::Map(key, value) => {
                let inner_key = self.storage_to_native(&iter.clone().deref().attr("first"), key)?;
                let inner_value =
                    self.storage_to_native(&iter.clone().deref().attr("second"), value)?;
                decl.extend(inner_key.decl);
                decl.extend(inner_value.decl);
                let mut body = inner_key.body;
                body.extend(inner_value.body);
                body.push(Stmt::assign(
                    target.clone().index(inner_key.ret),
                    inner_value.ret,
                ));
                (Expr::Dict(Vec::new()), body)
            }
            CanonicalType::Primitive(p) => {
                return Err(DescriptorError::UnknownType(p.token().to_string()))
            }
        };
        loop_body.push(Stmt::Expr(iter.clone().inc()));

        let body = vec![
            Stmt::assign(target.clone(), empty),
            Stmt::assign(iter.clone(), source.clone().method("begin", vec![])),
            Stmt::While {
                cond: iter.binary(BinaryOp::NotEq, source.clone().method("end", vec![])),
                body: loop_body,
            },
        ];
        Ok(ConversionTriple {
            decl,
            body,
            ret: target,
        })
    }
}

#[cfg(test)]
mod tests;
