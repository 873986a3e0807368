//! Map wrappers.
//!
//! Iteration yields keys. Lookup of a mistyped key raises `TypeError`, of
//! an absent key `KeyError`; deletion of an absent key is a no-op.
//! Assignment replaces an existing value.

use stlwrap_ir::{
    BinaryOp, Class, ClassKind, Expr, Field, Fragment, Function, Item, Literal, Param, Stmt,
};
use stlwrap_types::{CanonicalType, DescriptorError, Registry};

use super::iter::{iterator_interface, IteratorSpec};
use super::{
    assert_len, call_stmt, count_positive, exhaustion_checks, method, range_guarded, sample,
    self_param, this, type_error, Instantiation, InstantiationEngine, MapNames,
};

const POINTER: &str = "map_ptr";
const FREE_FLAG: &str = "_free_map";

fn iterator_spec<'s>(names: &'s MapNames, key: &'s CanonicalType) -> IteratorSpec<'s> {
    IteratorSpec {
        class: &names.iterator,
        storage: &names.storage,
        pointer: POINTER,
        item: key,
        project: |position| position.attr("first"),
    }
}

impl InstantiationEngine<'_> {
    /// Generate the wrapper family for `map<key, value>`.
    #[tracing::instrument(level = "debug", skip_all, fields(key = %key, value = %value))]
    pub fn map(
        &self,
        key: &CanonicalType,
        value: &CanonicalType,
    ) -> Result<Instantiation, DescriptorError> {
        let key = Registry::ordered_key(key.clone())?;
        let names = MapNames::derive(self.registry(), &key, value)?;
        tracing::debug!(class = %names.public, "instantiating map");
        Ok(Instantiation {
            implementation: self.map_implementation(&names, &key, value)?,
            interface: map_interface(&names, &key),
            tests: self.map_tests(&names, &key, value)?,
        })
    }

    fn map_implementation(
        &self,
        names: &MapNames,
        key_ty: &CanonicalType,
        value_ty: &CanonicalType,
    ) -> Result<Fragment, DescriptorError> {
        let ptr = this().attr(POINTER);
        let key = Expr::name("key");
        let value = Expr::name("value");
        let key_in = self.composer.native_to_storage(&key, key_ty)?;
        let value_in = self.composer.native_to_storage(&value, value_ty)?;
        let value_out = self.composer.storage_to_native(&Expr::name("v"), value_ty)?;
        let key_decl = || {
            let mut decl = vec![Stmt::decl(names.key_storage.as_str(), Expr::name("k"))];
            decl.extend(key_in.decl.iter().cloned());
            decl
        };
        // Converts `key` into the local `k`.
        let convert_key = || {
            let mut stmts = key_in.body.clone();
            stmts.push(Stmt::assign(Expr::name("k"), key_in.ret.clone()));
            stmts
        };
        // Converts `key` and `value`, then inserts or replaces.
        let store = || {
            let mut stmts = key_in.body.clone();
            stmts.extend(value_in.body.iter().cloned());
            stmts.push(Stmt::assign(
                ptr.clone().deref().index(key_in.ret.clone()),
                value_in.ret.clone(),
            ));
            stmts
        };
        let pair_decls = || {
            let mut decl = key_in.decl.clone();
            decl.extend(value_in.decl.iter().cloned());
            decl
        };

        let new_map = Expr::name("new_map");
        let fresh = Expr::New(names.storage.clone());
        let owns =
            |flag: bool| Stmt::assign(this().attr(FREE_FLAG), Expr::Literal(Literal::Bool(flag)));
        let fill = |pairs: Expr| {
            vec![
                Stmt::assign(ptr.clone(), fresh.clone()),
                Stmt::for_each(&["key", "value"], pairs, store()),
                owns(true),
            ]
        };
        let cinit = method(
            "__cinit__",
            vec![
                self_param(),
                Param::new("new_map").with_default(Expr::Literal(Literal::Bool(true))),
                Param::new("free_map").with_default(Expr::Literal(Literal::None)),
            ],
            pair_decls(),
            vec![
                Stmt::If {
                    branches: vec![
                        (
                            new_map.clone().is_instance(vec![names.wrapper.clone()]),
                            vec![
                                Stmt::assign(
                                    ptr.clone(),
                                    Expr::cast(names.wrapper.as_str(), new_map.clone())
                                        .attr(POINTER),
                                ),
                                Stmt::assign(this().attr("_owner"), new_map.clone()),
                                owns(false),
                            ],
                        ),
                        (
                            new_map.clone().has_attr("items"),
                            fill(new_map.clone().method("items", vec![])),
                        ),
                        (new_map.clone().has_attr("__len__"), fill(new_map.clone())),
                        (
                            Expr::name("bool").call(vec![new_map]),
                            vec![Stmt::assign(ptr.clone(), fresh.clone()), owns(true)],
                        ),
                    ],
                    otherwise: Some(vec![owns(false)]),
                },
                Stmt::when(
                    Expr::name("free_map").binary(BinaryOp::IsNot, Expr::Literal(Literal::None)),
                    vec![Stmt::assign(this().attr(FREE_FLAG), Expr::name("free_map"))],
                ),
            ],
        );

        let dealloc = Function::def(
            "__dealloc__",
            vec![self_param()],
            vec![Stmt::when(this().attr(FREE_FLAG), vec![Stmt::Delete(ptr.clone())])],
        );

        let key_mismatch = self.type_check(key.clone(), key_ty)?.negate();
        let contains = method(
            "__contains__",
            vec![self_param(), Param::new("key")],
            key_decl(),
            [
                vec![Stmt::when(
                    key_mismatch.clone(),
                    vec![Stmt::ret(Expr::Literal(Literal::Bool(false)))],
                )],
                range_guarded(
                    key_ty,
                    convert_key(),
                    vec![Stmt::ret(Expr::Literal(Literal::Bool(false)))],
                ),
                vec![Stmt::ret(count_positive(ptr.clone(), Expr::name("k")))],
            ]
            .concat(),
        );

        let len = Function::def(
            "__len__",
            vec![self_param()],
            vec![Stmt::ret(ptr.clone().method("size", vec![]))],
        );

        let mi = Expr::name("mi");
        let iter = Function::def(
            "__iter__",
            vec![self_param()],
            vec![
                Stmt::decl(names.iterator.as_str(), mi.clone()),
                Stmt::assign(mi.clone(), Expr::name(names.iterator.as_str()).call(vec![])),
                Stmt::Expr(mi.clone().method("init", vec![ptr.clone()])),
                Stmt::assign(mi.clone().attr("_owner"), this()),
                Stmt::ret(mi),
            ],
        );

        let mut getitem_decl = key_decl();
        getitem_decl.push(Stmt::decl(names.value_storage.as_str(), Expr::name("v")));
        getitem_decl.extend(value_out.decl);
        let mut found = vec![Stmt::assign(
            Expr::name("v"),
            ptr.clone().deref().index(Expr::name("k")),
        )];
        found.extend(value_out.body);
        found.push(Stmt::ret(value_out.ret));
        let getitem = method(
            "__getitem__",
            vec![self_param(), Param::new("key")],
            getitem_decl,
            [
                vec![Stmt::when(
                    key_mismatch,
                    vec![type_error(&names.key_human, "keys")],
                )],
                range_guarded(
                    key_ty,
                    convert_key(),
                    vec![Stmt::Raise(Expr::name("KeyError").call(vec![key.clone()]))],
                ),
                vec![Stmt::if_else(
                    count_positive(ptr.clone(), Expr::name("k")),
                    found,
                    vec![Stmt::Raise(Expr::name("KeyError").call(vec![key.clone()]))],
                )],
            ]
            .concat(),
        );

        let setitem = method(
            "__setitem__",
            vec![self_param(), Param::new("key"), Param::new("value")],
            pair_decls(),
            [
                self.insertion_guard(&key, key_ty, "keys")?,
                self.insertion_guard(&value, value_ty, "values")?,
                store(),
            ]
            .concat(),
        );

        let mut erase = convert_key();
        erase.push(Stmt::Expr(ptr.clone().method("erase", vec![Expr::name("k")])));
        let delitem = method(
            "__delitem__",
            vec![self_param(), Param::new("key")],
            key_decl(),
            vec![Stmt::when(key.binary(BinaryOp::In, this()), erase)],
        );

        let wrapper = Class::new(ClassKind::Extension, names.wrapper.as_str())
            .with_method(cinit)
            .with_method(dealloc)
            .with_method(contains)
            .with_method(len)
            .with_method(iter)
            .with_method(getitem)
            .with_method(setitem)
            .with_method(delitem);

        let mut fragment = Fragment::new();
        fragment.push(Item::Comment(names.public.clone()));
        fragment.push(Item::Class(self.iterator_class(&iterator_spec(names, key_ty))?));
        fragment.push(Item::Class(wrapper));
        fragment.push(Item::Class(public_map_class(names)));
        Ok(fragment)
    }

    fn map_tests(
        &self,
        names: &MapNames,
        key_ty: &CanonicalType,
        value_ty: &CanonicalType,
    ) -> Result<Fragment, DescriptorError> {
        let keys = self.samples.sample_values(key_ty)?;
        let mut values = self.samples.sample_values(value_ty)?;
        values.reverse();
        let k = |i: usize| Expr::lit(sample(&keys, i));
        let v = |i: usize| sample(&values, i);
        let m = Expr::name("m");
        let n = Expr::name("n");
        let class = Expr::name("conv").attr(names.public.as_str());
        let same = |actual: Expr, i: usize| self.assert_same(value_ty, actual, &v(i));
        let raises = |error: &str, container: &Expr, arg: Expr| {
            call_stmt(
                "assert_raises",
                vec![
                    Expr::name(error),
                    container.clone().attr("__getitem__"),
                    arg,
                ],
            )
        };

        let mut body = vec![
            Stmt::assign(m.clone(), class.clone().call(vec![])),
            Stmt::assign(m.clone().index(k(0)), Expr::lit(v(0))),
            Stmt::assign(m.clone().index(k(1)), Expr::lit(v(1))),
            assert_len("m", 2),
            same(m.clone().index(k(1)), 1),
            raises("KeyError", &m, k(2)),
            raises("TypeError", &m, Expr::Literal(Literal::None)),
            call_stmt(
                "assert_false",
                vec![Expr::Literal(Literal::None).binary(BinaryOp::In, m.clone())],
            ),
            Stmt::Blank,
            Stmt::assign(
                m.clone(),
                class.clone().call(vec![Expr::Dict(vec![
                    (k(2), Expr::lit(v(2))),
                    (k(3), Expr::lit(v(3))),
                ])]),
            ),
            assert_len("m", 2),
            same(m.clone().index(k(2)), 2),
            Stmt::Blank,
            Stmt::assign(
                n.clone(),
                class.call(vec![m.clone(), Expr::Literal(Literal::Bool(false))]),
            ),
            assert_len("n", 2),
            same(n.clone().index(k(2)), 2),
            Stmt::Blank,
            Stmt::Comment("points to the same underlying map".to_string()),
            Stmt::assign(n.clone().index(k(2)), Expr::lit(v(3))),
            same(m.index(k(2)), 3),
            Stmt::Delete(n.clone().index(k(0))),
            assert_len("m", 2),
            Stmt::Delete(n.index(k(3))),
            assert_len("m", 1),
            Stmt::Blank,
        ];
        body.extend(exhaustion_checks("m", 1));

        let mut fragment = Fragment::new();
        fragment.push(Item::Comment(names.public.clone()));
        fragment.push(Item::Function(Function::def(names.test_fn.as_str(), vec![], body)));
        Ok(fragment)
    }
}

fn map_interface(names: &MapNames, key: &CanonicalType) -> Fragment {
    let wrapper = Class::new(ClassKind::Extension, names.wrapper.as_str())
        .with_field(Field::private(format!("{} *", names.storage), POINTER))
        .with_field(Field::private("object", "_owner"))
        .with_field(Field::public("bint", FREE_FLAG));
    let mut fragment = Fragment::new();
    fragment.push(Item::Comment(names.public.clone()));
    fragment.push(Item::Class(iterator_interface(&iterator_spec(names, key))));
    fragment.push(Item::Class(wrapper));
    fragment
}

fn public_map_class(names: &MapNames) -> Class {
    let doc = format!(
        "Wrapper class for C++ standard library maps of type <{}, {}>.
Provides dictionary like interface on the Python level.

Parameters
----------
new_map : bool or dict-like
    Boolean on whether to make a new map or not, or dict-like object
    with keys and values which are castable to the appropriate type.
free_map : bool or None
    Flag for whether the pointer to the C++ map should be deallocated
    when the wrapper is dereferenced. Defaults to False when wrapping
    another map and True otherwise.

",
        names.key_human, names.value_human
    );
    Class::new(ClassKind::Host, names.public.as_str())
        .with_bases(&[names.wrapper.as_str(), "collections.abc.MutableMapping"])
        .with_doc(doc)
        .with_method(Function::def(
            "__str__",
            vec![self_param()],
            vec![Stmt::ret(this().method("__repr__", vec![]))],
        ))
        .with_method(Function::def(
            "__repr__",
            vec![self_param()],
            vec![Stmt::ret(Expr::name("repr").call(vec![
                Expr::name("dict").call(vec![this().method("items", vec![])]),
            ]))],
        ))
}
