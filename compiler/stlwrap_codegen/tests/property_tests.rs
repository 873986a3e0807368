//! Property-based tests for wrapper generation.
//!
//! For random key and value types:
//! 1. Rendering is a pure function of the canonical types
//! 2. Every rendered line is indented in whole levels
//! 3. Generated names depend only on canonical types, never on aliases

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use proptest::prelude::*;
use stlwrap_codegen::{Backend, CythonBackend, Instantiation, InstantiationEngine, MapNames};
use stlwrap_types::{BuiltinSamples, Registry, TypeDescriptor};

const KEY_TOKENS: &[&str] = &[
    "str", "string", "int", "int32", "uint", "long", "int64", "ulong", "float", "double",
];

const VALUE_ONLY_TOKENS: &[&str] = &["complex"];

fn key_strategy() -> impl Strategy<Value = TypeDescriptor> {
    prop::sample::select(KEY_TOKENS).prop_map(TypeDescriptor::token)
}

fn value_strategy() -> impl Strategy<Value = TypeDescriptor> {
    let leaf = prop_oneof![
        key_strategy(),
        prop::sample::select(VALUE_ONLY_TOKENS).prop_map(TypeDescriptor::token),
    ];
    leaf.prop_recursive(3, 8, 2, |inner| {
        prop_oneof![
            inner.clone().prop_map(|e| TypeDescriptor::applied("vector", vec![e])),
            key_strategy().prop_map(|e| TypeDescriptor::applied("set", vec![e])),
            (key_strategy(), inner).prop_map(|(k, v)| TypeDescriptor::applied("map", vec![k, v])),
        ]
    })
}

fn render_all(out: &Instantiation) -> String {
    let backend = CythonBackend;
    [&out.implementation, &out.interface, &out.tests]
        .map(|f| backend.render_fragment(f))
        .join("\n")
}

proptest! {
    #[test]
    fn map_rendering_is_deterministic(key in key_strategy(), value in value_strategy()) {
        let registry = Registry::builtin();
        let engine = InstantiationEngine::new(&registry, &BuiltinSamples);
        let key = registry.canonicalize(&key).unwrap();
        let value = registry.canonicalize(&value).unwrap();
        let first = render_all(&engine.map(&key, &value).unwrap());
        let second = render_all(&engine.map(&key, &value).unwrap());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn rendered_lines_use_whole_indent_levels(key in key_strategy(), value in value_strategy()) {
        let registry = Registry::builtin();
        let engine = InstantiationEngine::new(&registry, &BuiltinSamples);
        let key = registry.canonicalize(&key).unwrap();
        let value = registry.canonicalize(&value).unwrap();
        let text = render_all(&engine.map(&key, &value).unwrap());
        for line in text.lines() {
            let indent = line.len() - line.trim_start().len();
            prop_assert_eq!(indent % 4, 0, "line {:?}", line);
        }
    }

    #[test]
    fn names_ignore_aliases(value in value_strategy()) {
        let registry = Registry::builtin();
        let value = registry.canonicalize(&value).unwrap();
        let string = registry.canonicalize_str("string").unwrap();
        let std_string = registry.canonicalize_str("std::string").unwrap();
        let a = MapNames::derive(&registry, &string, &value).unwrap();
        let b = MapNames::derive(&registry, &std_string, &value).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn set_converters_render_for_every_key(key in key_strategy()) {
        let registry = Registry::builtin();
        let engine = InstantiationEngine::new(&registry, &BuiltinSamples);
        let key = registry.canonicalize(&key).unwrap();
        let out = engine.set_converters(&key).unwrap();
        prop_assert!(out.tests.is_empty());
        let text = CythonBackend.render_fragment(&out.implementation);
        prop_assert!(text.contains("py_to_cpp_set_"));
        prop_assert!(text.contains("cpp_to_py_set_"));
    }
}
