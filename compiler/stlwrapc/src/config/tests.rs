#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use pretty_assertions::assert_eq;

fn parse(text: &str) -> Result<GenConfig, ConfigError> {
    GenConfig::parse(text, Path::new("manifest.json"))
}

#[test]
fn empty_manifest_takes_defaults() {
    let config = parse("{}").unwrap();
    assert_eq!(config, GenConfig::default());
    assert_eq!(config.module, "stlconverters");
    assert_eq!(config.options(), CodegenOptions::default());
    assert_eq!(
        config.artifact_paths(),
        ArtifactPaths {
            implementation: PathBuf::from("stlconverters.pyx"),
            interface: PathBuf::from("stlconverters.pxd"),
            tests: PathBuf::from("test_stlconverters.py"),
        }
    );
}

#[test]
fn full_manifest() {
    let config = parse(
        r#"{
            "module": "mylib.containers",
            "output": "stlcontainers.pyx",
            "interface": "stlcontainers_decl",
            "tests": "check_containers.py",
            "insertion_check": "strict",
            "requests": [["set", "int32"], ["map", "str", "vector<float64>"]]
        }"#,
    )
    .unwrap();
    assert_eq!(config.module, "mylib.containers");
    assert_eq!(
        config.requests,
        vec![
            RawRequest::new(["set", "int32"]),
            RawRequest::new(["map", "str", "vector<float64>"]),
        ]
    );
    assert_eq!(config.options().insertion_check, InsertionCheck::Strict);
    assert_eq!(
        config.artifact_paths(),
        ArtifactPaths {
            implementation: PathBuf::from("stlcontainers.pyx"),
            interface: PathBuf::from("stlcontainers_decl.pxd"),
            tests: PathBuf::from("check_containers.py"),
        }
    );
}

#[test]
fn unknown_fields_are_rejected() {
    let err = parse(r#"{ "requets": [] }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().starts_with("invalid manifest `manifest.json`"));
}

#[test]
fn bad_insertion_check() {
    assert!(parse(r#"{ "insertion_check": "lenient" }"#).is_err());
}

#[test]
fn missing_header_file_names_the_path() {
    let config = parse(r#"{ "headers": { "tests": "no_such_header.py" } }"#).unwrap();
    match config.headers().unwrap_err() {
        ConfigError::Read { path, .. } => assert_eq!(path, PathBuf::from("no_such_header.py")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn no_header_paths_means_no_overrides() {
    assert_eq!(parse("{}").unwrap().headers().unwrap(), Headers::default());
}
