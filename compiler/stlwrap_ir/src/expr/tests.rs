use super::*;
use pretty_assertions::assert_eq;

#[test]
fn ident_hint_from_member_of_deref() {
    let e = Expr::name("inow").deref().attr("first");
    assert_eq!(e.ident_hint(), "inow_first");
}

#[test]
fn ident_hint_sanitizes_names() {
    assert_eq!(Expr::name("self.map_ptr").ident_hint(), "self_map_ptr");
    assert_eq!(Expr::name("__x__").ident_hint(), "x");
    assert_eq!(Expr::lit(3_i64).ident_hint(), "tmp");
}

#[test]
fn rewrite_replaces_holes_everywhere() {
    let template = Expr::cast("int", Expr::Hole).binary(BinaryOp::Eq, Expr::Hole);
    let out = template.rewrite(&|e| match e {
        Expr::Hole => Some(Expr::name("v")),
        _ => None,
    });
    assert_eq!(
        out,
        Expr::cast("int", Expr::name("v")).binary(BinaryOp::Eq, Expr::name("v"))
    );
}

#[test]
fn rewrite_does_not_descend_into_replacements() {
    let template = Expr::Hole.attr("real");
    let out = template.rewrite(&|e| match e {
        Expr::Hole => Some(Expr::Hole.attr("inner")),
        _ => None,
    });
    assert_eq!(out, Expr::Hole.attr("inner").attr("real"));
}
