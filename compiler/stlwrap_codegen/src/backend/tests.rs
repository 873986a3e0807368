use super::*;
use pretty_assertions::assert_eq;
use stlwrap_ir::{BinaryOp, Class, ClassKind, Field, Function, Item, Param, Stmt};

fn render(items: Vec<Item>) -> String {
    CythonBackend.render_fragment(&Fragment { items })
}

#[test]
fn empty_fragment_renders_nothing() {
    assert_eq!(render(vec![]), "");
}

#[test]
fn literals_use_host_syntax() {
    let b = CythonBackend;
    assert_eq!(b.render_literal(&Literal::from("Aha")), "\"Aha\"");
    assert_eq!(b.render_literal(&Literal::from("a\"b\\")), "\"a\\\"b\\\\\"");
    assert_eq!(b.render_literal(&Literal::Int(-65)), "-65");
    assert_eq!(b.render_literal(&Literal::Float(18.0)), "18.0");
    assert_eq!(b.render_literal(&Literal::Float(-65.5555)), "-65.5555");
    assert_eq!(b.render_literal(&Literal::Float(f64::NAN)), "float(\"nan\")");
    assert_eq!(b.render_literal(&Literal::Bool(false)), "False");
    assert_eq!(b.render_literal(&Literal::None), "None");
}

#[test]
fn complex_literals() {
    let b = CythonBackend;
    let c = |re, im| b.render_literal(&Literal::Complex { re, im });
    assert_eq!(c(1.0, 0.0), "(1.0+0.0j)");
    assert_eq!(c(-65.55, -1.0), "(-65.55-1.0j)");
    assert_eq!(c(0.0, 0.18), "0.18j");
}

#[test]
fn collection_literals() {
    let b = CythonBackend;
    assert_eq!(b.render_literal(&Literal::Set(vec![])), "set()");
    assert_eq!(
        b.render_literal(&Literal::Set(vec![Literal::Int(1), Literal::Int(2)])),
        "{1, 2}"
    );
    assert_eq!(
        b.render_literal(&Literal::Dict(vec![(Literal::from("a"), Literal::Int(1))])),
        "{\"a\": 1}"
    );
    assert_eq!(
        b.render_literal(&Literal::List(vec![Literal::Float(1.0)])),
        "[1.0]"
    );
}

#[test]
fn casts_are_parenthesized_as_receivers() {
    let e = Expr::cast("_SetInt", Expr::name("new_set")).attr("set_ptr");
    assert_eq!(CythonBackend.render_expr(&e), "(<_SetInt> new_set).set_ptr");
    let e = Expr::cast("char *", Expr::name("value").method("c_str", vec![]));
    assert_eq!(CythonBackend.render_expr(&e), "<char *> value.c_str()");
}

#[test]
fn boolean_operators_respect_precedence() {
    let a = Expr::name("a");
    let e = a
        .clone()
        .has_attr("__iter__")
        .binary(
            BinaryOp::Or,
            a.clone()
                .has_attr("__len__")
                .binary(BinaryOp::And, a.clone().has_attr("__getitem__")),
        );
    assert_eq!(
        CythonBackend.render_expr(&e),
        "hasattr(a, \"__iter__\") or hasattr(a, \"__len__\") and hasattr(a, \"__getitem__\")"
    );
    let e = a.clone().binary(BinaryOp::Or, Expr::name("b")).negate();
    assert_eq!(CythonBackend.render_expr(&e), "not (a or b)");
    let e = Expr::lit(0_i64)
        .binary(BinaryOp::Lt, Expr::name("n"))
        .binary(BinaryOp::Eq, Expr::Literal(Literal::Bool(true)));
    assert_eq!(CythonBackend.render_expr(&e), "(0 < n) == True");
}

#[test]
fn isinstance_uses_tuple_for_several_types() {
    let v = Expr::name("value");
    assert_eq!(
        CythonBackend.render_expr(&v.clone().is_instance(vec!["int".into()])),
        "isinstance(value, int)"
    );
    assert_eq!(
        CythonBackend.render_expr(&v.is_instance(vec!["float".into(), "int".into()])),
        "isinstance(value, (float, int))"
    );
}

#[test]
fn renders_function_with_blocks() {
    let f = Function::cdef(
        "cpp_set[int]",
        "py_to_cpp_set_int",
        vec![Param::typed("set", "pyset")],
        vec![
            Stmt::decl("cpp_set[int]", Expr::name("pyset_cpp")),
            Stmt::assign(Expr::name("pyset_cpp"), Expr::name("cpp_set[int]").call(vec![])),
            Stmt::for_each(
                &["pyset_item"],
                Expr::name("pyset"),
                vec![Stmt::Expr(Expr::name("pyset_cpp").method(
                    "insert",
                    vec![Expr::cast("int", Expr::name("pyset_item"))],
                ))],
            ),
            Stmt::ret(Expr::name("pyset_cpp")),
        ],
    );
    assert_eq!(
        render(vec![Item::Comment("int sets".into()), Item::Function(f)]),
        "\
# int sets
cdef cpp_set[int] py_to_cpp_set_int(set pyset):
    cdef cpp_set[int] pyset_cpp
    pyset_cpp = cpp_set[int]()
    for pyset_item in pyset:
        pyset_cpp.insert(<int> pyset_item)
    return pyset_cpp
"
    );
}

#[test]
fn declarations_are_grouped() {
    let decl = |name: &str| {
        Item::Function(
            Function::cdef("set", name, vec![Param::anonymous("cpp_set[int]")], vec![])
                .declaration(),
        )
    };
    assert_eq!(
        render(vec![Item::Comment("int sets".into()), decl("a"), decl("b")]),
        "# int sets\ncdef set a(cpp_set[int])\ncdef set b(cpp_set[int])\n"
    );
}

#[test]
fn renders_interface_class() {
    let class = Class::new(ClassKind::Extension, "_SetInt")
        .with_field(Field::private("cpp_set[int] *", "set_ptr"))
        .with_field(Field::public("bint", "_free_set"));
    let iter = Class::new(ClassKind::Extension, "_SetIterInt")
        .with_bases(&["object"])
        .with_method(
            Function::cdef(
                "void",
                "init",
                vec![
                    Param::anonymous("_SetIterInt"),
                    Param::anonymous("cpp_set[int] *"),
                ],
                vec![],
            )
            .declaration(),
        );
    assert_eq!(
        render(vec![Item::Class(iter), Item::Class(class)]),
        "\
cdef class _SetIterInt(object):
    cdef void init(_SetIterInt, cpp_set[int] *)

cdef class _SetInt:
    cdef cpp_set[int] * set_ptr
    cdef public bint _free_set
"
    );
}

#[test]
fn renders_class_with_doc_and_methods() {
    let class = Class::new(ClassKind::Host, "SetInt")
        .with_bases(&["_SetInt", "collections.abc.Set"])
        .with_doc("Wrapper.\n\nMore.\n")
        .with_method(Function::def(
            "__str__",
            vec![Param::new("self")],
            vec![Stmt::ret(Expr::name("self").method("__repr__", vec![]))],
        ))
        .with_method(Function::def(
            "__init__",
            vec![Param::new("self"), Param::new("flag").with_default(Expr::name("None"))],
            vec![],
        ));
    assert_eq!(
        render(vec![Item::Class(class)]),
        "\
class SetInt(_SetInt, collections.abc.Set):
    \"\"\"Wrapper.

    More.
    \"\"\"

    def __str__(self):
        return self.__repr__()

    def __init__(self, flag=None):
        pass
"
    );
}

#[test]
fn if_elif_else_chain() {
    let f = Function::def(
        "f",
        vec![Param::new("x")],
        vec![Stmt::If {
            branches: vec![
                (Expr::name("a"), vec![Stmt::Return(None)]),
                (Expr::name("b"), vec![Stmt::Raise(Expr::name("StopIteration"))]),
            ],
            otherwise: Some(vec![Stmt::Delete(Expr::name("x").index(Expr::lit(0_i64)))]),
        }],
    );
    assert_eq!(
        render(vec![Item::Function(f)]),
        "\
def f(x):
    if a:
        return
    elif b:
        raise StopIteration
    else:
        del x[0]
"
    );
}

#[test]
fn try_except_block() {
    let f = Function::def(
        "f",
        vec![Param::new("x")],
        vec![Stmt::try_except(
            vec![Stmt::assign(Expr::name("k"), Expr::cast("int", Expr::name("x")))],
            "OverflowError",
            vec![Stmt::ret(Expr::Literal(Literal::Bool(false)))],
        )],
    );
    assert_eq!(
        render(vec![Item::Function(f)]),
        "\
def f(x):
    try:
        k = <int> x
    except OverflowError:
        return False
"
    );
}
