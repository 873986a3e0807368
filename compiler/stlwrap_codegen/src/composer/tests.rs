#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use pretty_assertions::assert_eq;

/// Test-only constructor for a triple with no declarations or setup statements.
trait TripleExt {
    fn expr(ret: Expr) -> Self;
}

impl TripleExt for ConversionTriple {
    fn expr(ret: Expr) -> Self {
        Self {
            decl: Vec::new(),
            body: Vec::new(),
            ret,
        }
    }
}

fn ty(registry: &Registry, text: &str) -> CanonicalType {
    registry.canonicalize_str(text).unwrap()
}

/// Every name a statement list binds, by assignment, declaration or loop.
fn bound_names(stmts: &[Stmt], out: &mut Vec<String>) {
    for stmt in stmts {
        match stmt {
            Stmt::Decl {
                target: Expr::Name(n),
                ..
            } => out.push(n.clone()),
            Stmt::For { targets, body, .. } => {
                out.extend(targets.iter().cloned());
                bound_names(body, out);
            }
            Stmt::While { body, .. } => bound_names(body, out),
            _ => {}
        }
    }
}

fn no_decls(stmts: &[Stmt]) -> bool {
    stmts.iter().all(|s| match s {
        Stmt::Decl { .. } => false,
        Stmt::For { body, .. } | Stmt::While { body, .. } => no_decls(body),
        _ => true,
    })
}

#[test]
fn primitive_uses_registry_template() {
    let registry = Registry::builtin();
    let composer = Composer::new(&registry);
    let triple = composer
        .native_to_storage(&Expr::name("value"), &ty(&registry, "int32"))
        .unwrap();
    assert_eq!(triple, ConversionTriple::expr(Expr::cast("int", Expr::name("value"))));
}

#[test]
fn primitive_prefix_follows_source() {
    let registry = Registry::builtin();
    let composer = Composer::new(&registry);
    let source = Expr::name("inow").deref().attr("first");
    let triple = composer
        .native_to_storage(&source, &ty(&registry, "str"))
        .unwrap();
    assert_eq!(
        triple.decl,
        vec![Stmt::decl("bytes", Expr::name("inow_first_bytes"))]
    );
}

#[test]
fn vector_builds_and_pushes() {
    let registry = Registry::builtin();
    let composer = Composer::new(&registry);
    let triple = composer
        .native_to_storage(&Expr::name("value"), &ty(&registry, "vector<double>"))
        .unwrap();
    assert_eq!(
        triple.decl,
        vec![Stmt::decl("cpp_vector[double]", Expr::name("value_cpp"))]
    );
    assert_eq!(
        triple.body,
        vec![
            Stmt::assign(
                Expr::name("value_cpp"),
                Expr::name("cpp_vector[double]").call(vec![])
            ),
            Stmt::for_each(
                &["value_item"],
                Expr::name("value"),
                vec![Stmt::Expr(Expr::name("value_cpp").method(
                    "push_back",
                    vec![Expr::cast("double", Expr::name("value_item"))]
                ))]
            ),
        ]
    );
    assert_eq!(triple.ret, Expr::name("value_cpp"));
}

#[test]
fn nested_declarations_are_hoisted() {
    let registry = Registry::builtin();
    let composer = Composer::new(&registry);
    let triple = composer
        .native_to_storage(&Expr::name("value"), &ty(&registry, "vector<set<str>>"))
        .unwrap();
    let decl_names: Vec<_> = triple
        .decl
        .iter()
        .map(|s| match s {
            Stmt::Decl {
                target: Expr::Name(n),
                ..
            } => n.as_str(),
            other => panic!("unexpected {other:?}"),
        })
        .collect();
    assert_eq!(
        decl_names,
        vec!["value_cpp", "value_item_cpp", "value_item_item_bytes"]
    );
    assert!(no_decls(&triple.body));
}

#[test]
fn nested_names_never_collide() {
    let registry = Registry::builtin();
    let composer = Composer::new(&registry);
    for text in [
        "map<str, map<str, vector<complex>>>",
        "vector<vector<vector<int>>>",
        "map<int, set<str>>",
    ] {
        let t = ty(&registry, text);
        for triple in [
            composer.native_to_storage(&Expr::name("value"), &t).unwrap(),
            composer.storage_to_native(&Expr::name("v"), &t).unwrap(),
        ] {
            let mut names = Vec::new();
            bound_names(&triple.decl, &mut names);
            bound_names(&triple.body, &mut names);
            let mut unique = names.clone();
            unique.sort();
            unique.dedup();
            assert_eq!(names.len(), unique.len(), "{text}: {names:?}");
        }
    }
}

#[test]
fn map_storage_to_native_walks_pairs() {
    let registry = Registry::builtin();
    let composer = Composer::new(&registry);
    let triple = composer
        .storage_to_native(&Expr::name("cppmap"), &ty(&registry, "map<int, double>"))
        .unwrap();
    assert_eq!(
        triple.decl,
        vec![Stmt::decl(
            "cpp_map[int, double].iterator",
            Expr::name("cppmap_iter")
        )]
    );
    let iter = Expr::name("cppmap_iter");
    assert_eq!(
        triple.body,
        vec![
            Stmt::assign(Expr::name("cppmap_py"), Expr::Dict(vec![])),
            Stmt::assign(iter.clone(), Expr::name("cppmap").method("begin", vec![])),
            Stmt::While {
                cond: iter.clone().binary(
                    BinaryOp::NotEq,
                    Expr::name("cppmap").method("end", vec![])
                ),
                body: vec![
                    Stmt::assign(
                        Expr::name("cppmap_py").index(
                            Expr::name("int").call(vec![iter.clone().deref().attr("first")])
                        ),
                        Expr::name("float").call(vec![iter.clone().deref().attr("second")]),
                    ),
                    Stmt::Expr(iter.inc()),
                ],
            },
        ]
    );
}

#[test]
fn composition_is_deterministic() {
    let registry = Registry::builtin();
    let composer = Composer::new(&registry);
    let t = ty(&registry, "map<str, vector<complex>>");
    let source = Expr::name("value");
    assert_eq!(
        composer.native_to_storage(&source, &t).unwrap(),
        composer.native_to_storage(&source, &t).unwrap()
    );
    assert_eq!(
        composer.storage_to_native(&source, &t).unwrap(),
        composer.storage_to_native(&source, &t).unwrap()
    );
}

#[test]
fn unregistered_primitive_fails_eagerly() {
    let registry = Registry::new();
    let composer = Composer::new(&registry);
    let t = CanonicalType::vector(stlwrap_types::Primitive::Int32.into());
    assert!(matches!(
        composer.native_to_storage(&Expr::name("value"), &t),
        Err(DescriptorError::UnknownType(_))
    ));
}
