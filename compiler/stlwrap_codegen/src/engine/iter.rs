//! Iterator classes shared by set and map wrappers.
//!
//! An iterator holds heap-allocated `begin`/`end` positions of the wrapped
//! container and a back-reference to the wrapper that created it. Once the
//! positions meet, every further `__next__` raises `StopIteration`.

use stlwrap_ir::{BinaryOp, Class, ClassKind, Expr, Field, Function, Param, Stmt};
use stlwrap_types::{CanonicalType, DescriptorError};

use super::{method, self_param, this, InstantiationEngine};

/// What an iterator class is generated from.
pub(super) struct IteratorSpec<'s> {
    /// `_SetIterInt`
    pub class: &'s str,
    /// `cpp_set[int]`
    pub storage: &'s str,
    /// `set_ptr` or `map_ptr`
    pub pointer: &'s str,
    /// Type of the yielded value.
    pub item: &'s CanonicalType,
    /// Maps the dereferenced position to the stored item to yield.
    pub project: fn(Expr) -> Expr,
}

impl IteratorSpec<'_> {
    fn position_type(&self) -> String {
        format!("{}.iterator", self.storage)
    }

    fn init_declaration(&self) -> Function {
        Function::cdef(
            "void",
            "init",
            vec![
                Param::anonymous(self.class),
                Param::anonymous(format!("{} *", self.storage)),
            ],
            Vec::new(),
        )
        .declaration()
    }
}

impl InstantiationEngine<'_> {
    pub(super) fn iterator_class(&self, spec: &IteratorSpec<'_>) -> Result<Class, DescriptorError> {
        let position = spec.position_type();
        let position_ptr = format!("{position} *");
        let container = Expr::name(spec.pointer);

        let slots = [("itn", "iter_now", "begin"), ("ite", "iter_end", "end")];
        let mut init_body: Vec<Stmt> = slots
            .iter()
            .map(|(local, ..)| Stmt::decl(position_ptr.as_str(), Expr::name(*local)))
            .collect();
        for (local, field, start) in slots {
            let local = Expr::name(local);
            let size = Expr::name("sizeof").call(vec![Expr::name(position.as_str())]);
            init_body.push(Stmt::assign(
                local.clone(),
                Expr::cast(position_ptr.as_str(), Expr::name("malloc").call(vec![size])),
            ));
            init_body.push(Stmt::assign(
                local.clone().index(Expr::lit(0_i64)),
                container.clone().method(start, vec![]),
            ));
            init_body.push(Stmt::assign(this().attr(field), local));
        }
        let init = Function::cdef(
            "void",
            "init",
            vec![
                self_param(),
                Param::typed(format!("{} *", spec.storage), spec.pointer),
            ],
            init_body,
        );

        let dealloc = Function::def(
            "__dealloc__",
            vec![self_param()],
            vec![
                Stmt::Expr(Expr::name("free").call(vec![this().attr("iter_now")])),
                Stmt::Expr(Expr::name("free").call(vec![this().attr("iter_end")])),
            ],
        );
        let iter = Function::def("__iter__", vec![self_param()], vec![Stmt::ret(this())]);

        let inow = Expr::name("inow");
        let iend = Expr::name("iend");
        let value = self
            .composer
            .storage_to_native(&(spec.project)(inow.clone().deref()), spec.item)?;
        let mut decl = vec![
            Stmt::decl(position.as_str(), inow.clone()),
            Stmt::decl(position.as_str(), iend.clone()),
        ];
        decl.extend(value.decl);
        let mut advance = value.body;
        advance.push(Stmt::assign(Expr::name("pyval"), value.ret));
        let next = method(
            "__next__",
            vec![self_param()],
            decl,
            vec![
                Stmt::assign(inow.clone(), this().attr("iter_now").deref()),
                Stmt::assign(iend.clone(), this().attr("iter_end").deref()),
                Stmt::if_else(
                    inow.binary(BinaryOp::NotEq, iend),
                    advance,
                    vec![Stmt::Raise(Expr::name("StopIteration"))],
                ),
                Stmt::Expr(this().attr("iter_now").deref().inc()),
                Stmt::ret(Expr::name("pyval")),
            ],
        );

        Ok(Class::new(ClassKind::Extension, spec.class)
            .with_bases(&["object"])
            .with_method(init)
            .with_method(dealloc)
            .with_method(iter)
            .with_method(next))
    }
}

/// The interface declaration of an iterator class.
pub(super) fn iterator_interface(spec: &IteratorSpec<'_>) -> Class {
    let position_ptr = format!("{} *", spec.position_type());
    Class::new(ClassKind::Extension, spec.class)
        .with_bases(&["object"])
        .with_field(Field::private(position_ptr.as_str(), "iter_now"))
        .with_field(Field::private(position_ptr, "iter_end"))
        .with_field(Field::private("object", "_owner"))
        .with_method(spec.init_declaration())
}
