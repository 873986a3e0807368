#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use pretty_assertions::assert_eq;

fn ty(text: &str) -> CanonicalType {
    crate::Registry::builtin().canonicalize_str(text).unwrap()
}

#[test]
fn int32_samples_match_scenario_values() {
    let values = BuiltinSamples.sample_values(&ty("int")).unwrap();
    assert_eq!(
        values,
        vec![
            Literal::Int(1),
            Literal::Int(42),
            Literal::Int(-65),
            Literal::Int(18)
        ]
    );
}

#[test]
fn every_type_has_four_distinct_samples() {
    for text in [
        "str",
        "int32",
        "uint32",
        "int64",
        "uint64",
        "float32",
        "float64",
        "complex128",
        "vector<int>",
        "set<str>",
        "map<int, vector<complex>>",
        "vector<map<str, set<double>>>",
    ] {
        let values = BuiltinSamples.sample_values(&ty(text)).unwrap();
        assert!(values.len() >= 4, "{text}: {} samples", values.len());
        for (i, a) in values.iter().enumerate() {
            for b in &values[i + 1..] {
                assert_ne!(a, b, "{text}: duplicate sample");
            }
        }
    }
}

#[test]
fn unsigned_samples_are_non_negative() {
    for text in ["uint32", "uint64"] {
        for value in BuiltinSamples.sample_values(&ty(text)).unwrap() {
            assert!(matches!(value, Literal::Int(n) if n >= 0), "{text}");
        }
    }
}

#[test]
fn composite_samples_are_built_from_elements() {
    let values = BuiltinSamples.sample_values(&ty("map<str, int>")).unwrap();
    assert_eq!(
        values[1],
        Literal::Dict(vec![
            (Literal::from("Take"), Literal::Int(42)),
            (Literal::from("Me"), Literal::Int(-65)),
        ])
    );
    let values = BuiltinSamples.sample_values(&ty("set<int>")).unwrap();
    assert_eq!(values[1], Literal::Set(vec![Literal::Int(-65)]));
}

#[test]
fn comparison_depends_on_precision() {
    assert_eq!(BuiltinSamples.comparison(&ty("float32")), Comparison::Almost);
    assert_eq!(BuiltinSamples.comparison(&ty("float64")), Comparison::Equal);
    assert_eq!(
        BuiltinSamples.comparison(&ty("vector<int>")),
        Comparison::ArrayAlmost
    );
    assert_eq!(BuiltinSamples.comparison(&ty("set<str>")), Comparison::Equal);
    assert_eq!(
        BuiltinSamples.comparison(&ty("vector<str>")),
        Comparison::Equal
    );
    assert_eq!(
        BuiltinSamples.comparison(&ty("vector<vector<int>>")),
        Comparison::Equal
    );
}
