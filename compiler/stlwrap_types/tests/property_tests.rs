//! Property-based tests for type canonicalization.
//!
//! Random nested descriptors are built from every registered alias and
//! checked for:
//! 1. Idempotence: canonicalize(descriptor(canonicalize(d))) == canonicalize(d)
//! 2. Display round-trip: parse(d.to_string()) == d
//! 3. Sample coverage: every canonical type has four distinct samples

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use proptest::prelude::*;
use stlwrap_types::{BuiltinSamples, Registry, TestValues, TypeDescriptor};

const KEY_TOKENS: &[&str] = &[
    "str",
    "string",
    "std::string",
    "int32",
    "int",
    "uint",
    "unsigned int",
    "int64",
    "long",
    "ulong",
    "float",
    "double",
    "f64",
];

const VALUE_ONLY_TOKENS: &[&str] = &["complex", "complex128"];

const VECTOR_HEADS: &[&str] = &["vector", "std::vector", "vec"];
const SET_HEADS: &[&str] = &["set", "std::set"];
const MAP_HEADS: &[&str] = &["map", "std::map", "dict"];

fn key_strategy() -> impl Strategy<Value = TypeDescriptor> {
    prop::sample::select(KEY_TOKENS).prop_map(TypeDescriptor::token)
}

fn element_strategy() -> impl Strategy<Value = TypeDescriptor> {
    let leaf = prop_oneof![
        key_strategy(),
        prop::sample::select(VALUE_ONLY_TOKENS).prop_map(TypeDescriptor::token),
    ];
    leaf.prop_recursive(4, 16, 2, |inner| {
        prop_oneof![
            (prop::sample::select(VECTOR_HEADS), inner.clone())
                .prop_map(|(head, e)| TypeDescriptor::applied(head, vec![e])),
            (prop::sample::select(SET_HEADS), key_strategy())
                .prop_map(|(head, e)| TypeDescriptor::applied(head, vec![e])),
            (prop::sample::select(MAP_HEADS), key_strategy(), inner)
                .prop_map(|(head, k, v)| TypeDescriptor::applied(head, vec![k, v])),
        ]
    })
}

proptest! {
    #[test]
    fn canonicalization_is_idempotent(desc in element_strategy()) {
        let registry = Registry::builtin();
        let once = registry.canonicalize(&desc).unwrap();
        let twice = registry.canonicalize(&once.to_descriptor()).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn display_reparses(desc in element_strategy()) {
        let reparsed = TypeDescriptor::parse(&desc.to_string()).unwrap();
        prop_assert_eq!(reparsed, desc);
    }

    #[test]
    fn every_canonical_type_has_samples(desc in element_strategy()) {
        let ty = Registry::builtin().canonicalize(&desc).unwrap();
        let values = BuiltinSamples.sample_values(&ty).unwrap();
        prop_assert!(values.len() >= 4);
    }
}
