//! Set wrappers.

use stlwrap_ir::{
    BinaryOp, Class, ClassKind, Expr, Field, Fragment, Function, Item, Literal, Param, Stmt,
};
use stlwrap_types::{CanonicalType, DescriptorError, Registry};

use super::iter::{iterator_interface, IteratorSpec};
use super::{
    assert_len, call_stmt, count_positive, exhaustion_checks, is_iterable, method, range_guarded,
    sample, self_param, this, Instantiation, InstantiationEngine, SetNames,
};

const POINTER: &str = "set_ptr";
const FREE_FLAG: &str = "_free_set";

fn iterator_spec<'s>(names: &'s SetNames, elem: &'s CanonicalType) -> IteratorSpec<'s> {
    IteratorSpec {
        class: &names.iterator,
        storage: &names.storage,
        pointer: POINTER,
        item: elem,
        project: |position| position,
    }
}

impl InstantiationEngine<'_> {
    /// Generate the wrapper family for `set<elem>`.
    #[tracing::instrument(level = "debug", skip_all, fields(elem = %elem))]
    pub fn set(&self, elem: &CanonicalType) -> Result<Instantiation, DescriptorError> {
        let elem = Registry::ordered_key(elem.clone())?;
        let names = SetNames::derive(self.registry(), &elem)?;
        tracing::debug!(class = %names.public, "instantiating set");
        Ok(Instantiation {
            implementation: self.set_implementation(&names, &elem)?,
            interface: set_interface(&names, &elem),
            tests: self.set_tests(&names, &elem)?,
        })
    }

    fn set_implementation(
        &self,
        names: &SetNames,
        elem: &CanonicalType,
    ) -> Result<Fragment, DescriptorError> {
        let ptr = this().attr(POINTER);
        let value = Expr::name("value");
        let to_storage = self.composer.native_to_storage(&value, elem)?;
        let elem_decl = |name: &str| {
            let mut decl = vec![Stmt::decl(names.elem_storage.as_str(), Expr::name(name))];
            decl.extend(to_storage.decl.iter().cloned());
            decl
        };
        // Converts `value` into the local `name`.
        let convert_into = |name: &str| {
            let mut stmts = to_storage.body.clone();
            stmts.push(Stmt::assign(Expr::name(name), to_storage.ret.clone()));
            stmts
        };

        let new_set = Expr::name("new_set");
        let fresh = Expr::New(names.storage.clone());
        let owns =
            |flag: bool| Stmt::assign(this().attr(FREE_FLAG), Expr::Literal(Literal::Bool(flag)));
        let mut fill = convert_into("s");
        fill.push(Stmt::Expr(ptr.clone().method("insert", vec![Expr::name("s")])));
        let cinit = method(
            "__cinit__",
            vec![
                self_param(),
                Param::new("new_set").with_default(Expr::Literal(Literal::Bool(true))),
                Param::new("free_set").with_default(Expr::Literal(Literal::None)),
            ],
            elem_decl("s"),
            vec![
                Stmt::If {
                    branches: vec![
                        (
                            new_set.clone().is_instance(vec![names.wrapper.clone()]),
                            vec![
                                Stmt::assign(
                                    ptr.clone(),
                                    Expr::cast(names.wrapper.as_str(), new_set.clone())
                                        .attr(POINTER),
                                ),
                                Stmt::assign(this().attr("_owner"), new_set.clone()),
                                owns(false),
                            ],
                        ),
                        (
                            is_iterable(&new_set),
                            vec![
                                Stmt::assign(ptr.clone(), fresh.clone()),
                                Stmt::for_each(&["value"], new_set.clone(), fill),
                                owns(true),
                            ],
                        ),
                        (
                            Expr::name("bool").call(vec![new_set]),
                            vec![Stmt::assign(ptr.clone(), fresh), owns(true)],
                        ),
                    ],
                    otherwise: Some(vec![owns(false)]),
                },
                Stmt::when(
                    Expr::name("free_set").binary(BinaryOp::IsNot, Expr::Literal(Literal::None)),
                    vec![Stmt::assign(this().attr(FREE_FLAG), Expr::name("free_set"))],
                ),
            ],
        );

        let dealloc = Function::def(
            "__dealloc__",
            vec![self_param()],
            vec![Stmt::when(this().attr(FREE_FLAG), vec![Stmt::Delete(ptr.clone())])],
        );

        let contains = method(
            "__contains__",
            vec![self_param(), Param::new("value")],
            elem_decl("s"),
            [
                vec![Stmt::when(
                    self.type_check(value.clone(), elem)?.negate(),
                    vec![Stmt::ret(Expr::Literal(Literal::Bool(false)))],
                )],
                range_guarded(
                    elem,
                    convert_into("s"),
                    vec![Stmt::ret(Expr::Literal(Literal::Bool(false)))],
                ),
                vec![Stmt::ret(count_positive(ptr.clone(), Expr::name("s")))],
            ]
            .concat(),
        );

        let len = Function::def(
            "__len__",
            vec![self_param()],
            vec![Stmt::ret(ptr.clone().method("size", vec![]))],
        );

        let si = Expr::name("si");
        let iter = Function::def(
            "__iter__",
            vec![self_param()],
            vec![
                Stmt::decl(names.iterator.as_str(), si.clone()),
                Stmt::assign(si.clone(), Expr::name(names.iterator.as_str()).call(vec![])),
                Stmt::Expr(si.clone().method("init", vec![ptr.clone()])),
                Stmt::assign(si.clone().attr("_owner"), this()),
                Stmt::ret(si),
            ],
        );

        let add = method(
            "add",
            vec![self_param(), Param::new("value")],
            elem_decl("v"),
            [
                self.insertion_guard(&value, elem, "values")?,
                convert_into("v"),
                vec![Stmt::Expr(ptr.clone().method("insert", vec![Expr::name("v")]))],
            ]
            .concat(),
        );

        let mut erase = convert_into("v");
        erase.push(Stmt::Expr(ptr.method("erase", vec![Expr::name("v")])));
        let discard = method(
            "discard",
            vec![self_param(), Param::new("value")],
            elem_decl("v"),
            vec![Stmt::when(value.binary(BinaryOp::In, this()), erase)],
        );

        let wrapper = Class::new(ClassKind::Extension, names.wrapper.as_str())
            .with_method(cinit)
            .with_method(dealloc)
            .with_method(contains)
            .with_method(len)
            .with_method(iter)
            .with_method(add)
            .with_method(discard);

        let mut fragment = Fragment::new();
        fragment.push(Item::Comment(names.public.clone()));
        fragment.push(Item::Class(self.iterator_class(&iterator_spec(names, elem))?));
        fragment.push(Item::Class(wrapper));
        fragment.push(Item::Class(public_set_class(names)));
        Ok(fragment)
    }

    fn set_tests(
        &self,
        names: &SetNames,
        elem: &CanonicalType,
    ) -> Result<Fragment, DescriptorError> {
        let values = self.samples.sample_values(elem)?;
        let t = |i: usize| Expr::lit(sample(&values, i));
        let s = Expr::name("s");
        let class = Expr::name("conv").attr(names.public.as_str());
        let assert_true = |e: Expr| call_stmt("assert_true", vec![e]);

        let mut body = vec![
            Stmt::assign(s.clone(), class.clone().call(vec![])),
            Stmt::Expr(s.clone().method("add", vec![t(0)])),
            assert_true(t(0).binary(BinaryOp::In, s.clone())),
            assert_true(t(2).binary(BinaryOp::NotIn, s.clone())),
            Stmt::Expr(s.clone().method("add", vec![t(0)])),
            assert_len("s", 1),
            Stmt::Expr(s.clone().method("discard", vec![t(1)])),
            assert_len("s", 1),
            Stmt::Blank,
            Stmt::assign(s.clone(), class.call(vec![Expr::List(vec![t(0), t(1), t(2)])])),
            assert_true(t(1).binary(BinaryOp::In, s.clone())),
            assert_true(t(3).binary(BinaryOp::NotIn, s.clone())),
            call_stmt(
                "assert_false",
                vec![Expr::Literal(Literal::None).binary(BinaryOp::In, s.clone())],
            ),
            Stmt::Expr(s.method("discard", vec![t(2)])),
            assert_len("s", 2),
            Stmt::Blank,
        ];
        body.extend(exhaustion_checks("s", 2));

        let mut fragment = Fragment::new();
        fragment.push(Item::Comment(names.public.clone()));
        fragment.push(Item::Function(Function::def(names.test_fn.as_str(), vec![], body)));
        Ok(fragment)
    }
}

fn set_interface(names: &SetNames, elem: &CanonicalType) -> Fragment {
    let wrapper = Class::new(ClassKind::Extension, names.wrapper.as_str())
        .with_field(Field::private(format!("{} *", names.storage), POINTER))
        .with_field(Field::private("object", "_owner"))
        .with_field(Field::public("bint", FREE_FLAG));
    let mut fragment = Fragment::new();
    fragment.push(Item::Comment(names.public.clone()));
    fragment.push(Item::Class(iterator_interface(&iterator_spec(names, elem))));
    fragment.push(Item::Class(wrapper));
    fragment
}

fn public_set_class(names: &SetNames) -> Class {
    let doc = format!(
        "Wrapper class for C++ standard library sets of type <{}>.
Provides set like interface on the Python level.

Parameters
----------
new_set : bool or set-like
    Boolean on whether to make a new set or not, or set-like object
    with values which are castable to the appropriate type.
free_set : bool or None
    Flag for whether the pointer to the C++ set should be deallocated
    when the wrapper is dereferenced. Defaults to False when wrapping
    another set and True otherwise.

",
        names.elem_human
    );
    let items = Expr::lit(", ").method(
        "join",
        vec![Expr::name("map").call(vec![Expr::name("repr"), this()])],
    );
    Class::new(ClassKind::Host, names.public.as_str())
        .with_bases(&[names.wrapper.as_str(), "collections.abc.Set"])
        .with_doc(doc)
        .with_method(Function::def(
            "__str__",
            vec![self_param()],
            vec![Stmt::ret(this().method("__repr__", vec![]))],
        ))
        .with_method(Function::def(
            "__repr__",
            vec![self_param()],
            vec![Stmt::ret(Expr::lit("set([{0}])").method("format", vec![items]))],
        ))
}
