use super::*;
use pretty_assertions::assert_eq;

fn nested() -> CanonicalType {
    CanonicalType::map(
        Primitive::Str.into(),
        CanonicalType::vector(Primitive::Float64.into()),
    )
}

#[test]
fn display_uses_canonical_tokens() {
    assert_eq!(nested().to_string(), "map<str, vector<float64>>");
}

#[test]
fn ident_flattens_nesting() {
    assert_eq!(nested().ident(), "map_str_vector_float64");
    assert_eq!(CanonicalType::from(Primitive::UInt32).ident(), "uint32");
}

#[test]
fn only_ordered_primitives_are_keys() {
    assert!(CanonicalType::from(Primitive::Str).is_ordered_key());
    assert!(!CanonicalType::from(Primitive::Complex128).is_ordered_key());
    assert!(!CanonicalType::vector(Primitive::Int32.into()).is_ordered_key());
}
