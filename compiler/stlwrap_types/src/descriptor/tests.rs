#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn parses_bare_token() {
    assert_eq!(
        TypeDescriptor::parse("int32").unwrap(),
        TypeDescriptor::token("int32")
    );
}

#[test]
fn collapses_whitespace_inside_tokens() {
    assert_eq!(
        TypeDescriptor::parse("  unsigned \t int ").unwrap(),
        TypeDescriptor::token("unsigned int")
    );
}

#[test]
fn parses_nested_application() {
    let desc = TypeDescriptor::parse("map<str, vector<float64>>").unwrap();
    assert_eq!(
        desc,
        TypeDescriptor::applied(
            "map",
            vec![
                TypeDescriptor::token("str"),
                TypeDescriptor::applied("vector", vec![TypeDescriptor::token("float64")]),
            ]
        )
    );
}

#[test]
fn display_is_reparseable() {
    let text = "map<std::string, vector<double>>";
    let desc = TypeDescriptor::parse(text).unwrap();
    assert_eq!(desc.to_string(), text);
    assert_eq!(TypeDescriptor::parse(&desc.to_string()).unwrap(), desc);
}

#[test]
fn rejects_unclosed_application() {
    let err = TypeDescriptor::parse("set<int").unwrap_err();
    assert!(matches!(err, DescriptorError::Malformed { .. }));
}

#[test]
fn rejects_empty_argument() {
    let err = TypeDescriptor::parse("map<, int>").unwrap_err();
    assert_eq!(
        err,
        DescriptorError::Malformed {
            text: "map<, int>".to_string(),
            reason: "expected a type name",
        }
    );
}

#[test]
fn rejects_trailing_input() {
    assert!(TypeDescriptor::parse("set<int> x").is_err());
    assert!(TypeDescriptor::parse("int>").is_err());
}

#[test]
fn deserializes_from_json_string() {
    let desc: TypeDescriptor = serde_json::from_str("\"vector<int>\"").unwrap();
    assert_eq!(
        desc,
        TypeDescriptor::applied("vector", vec![TypeDescriptor::token("int")])
    );
    assert_eq!(serde_json::to_string(&desc).unwrap(), "\"vector<int>\"");
}

fn nested_vectors(levels: usize) -> String {
    format!("{}int{}", "vector<".repeat(levels), ">".repeat(levels))
}

#[test]
fn accepts_nesting_up_to_the_limit() {
    assert!(TypeDescriptor::parse(&nested_vectors(MAX_NESTING)).is_ok());
}

#[test]
fn rejects_deep_nesting_without_recursing() {
    let text = nested_vectors(100_000);
    let err = TypeDescriptor::parse(&text).unwrap_err();
    assert_eq!(
        err,
        DescriptorError::Malformed {
            text,
            reason: "nesting too deep",
        }
    );
}
