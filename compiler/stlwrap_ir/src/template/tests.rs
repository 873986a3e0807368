use super::*;
use pretty_assertions::assert_eq;

fn complex_like() -> ConversionTemplate {
    ConversionTemplate::new(
        vec![Stmt::decl("complex_t", Expr::scratch("proxy"))],
        vec![
            Stmt::assign(Expr::scratch("proxy").attr("re"), Expr::Hole.attr("real")),
            Stmt::assign(Expr::scratch("proxy").attr("im"), Expr::Hole.attr("imag")),
        ],
        Expr::scratch("proxy"),
    )
}

#[test]
fn expression_template_has_no_setup() {
    let t = ConversionTemplate::expr(Expr::cast("int", Expr::Hole));
    let triple = t.instantiate(&Expr::name("value"), "value");
    assert!(triple.decl.is_empty());
    assert!(triple.body.is_empty());
    assert_eq!(triple.ret, Expr::cast("int", Expr::name("value")));
}

#[test]
fn scratch_names_take_the_prefix() {
    let triple = complex_like().instantiate(&Expr::name("key"), "key");
    assert_eq!(
        triple.decl,
        vec![Stmt::decl("complex_t", Expr::name("key_proxy"))]
    );
    assert_eq!(triple.ret, Expr::name("key_proxy"));
    assert_eq!(
        triple.body[0],
        Stmt::assign(
            Expr::name("key_proxy").attr("re"),
            Expr::name("key").attr("real")
        )
    );
}

#[test]
fn source_expression_is_substituted_verbatim() {
    let source = Expr::name("inow").deref().attr("first");
    let triple = complex_like().instantiate(&source, "inow_first");
    assert_eq!(
        triple.body[1],
        Stmt::assign(
            Expr::name("inow_first_proxy").attr("im"),
            source.attr("imag")
        )
    );
}

#[test]
fn instantiation_is_deterministic() {
    let t = complex_like();
    let a = t.instantiate(&Expr::name("v"), "v");
    let b = t.instantiate(&Expr::name("v"), "v");
    assert_eq!(a, b);
}
