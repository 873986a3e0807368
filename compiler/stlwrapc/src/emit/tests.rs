use super::*;
use pretty_assertions::assert_eq;

fn paths(base: &str, interface: Option<&str>, tests: Option<&str>) -> ArtifactPaths {
    ArtifactPaths::from_base(
        Path::new(base),
        interface.map(Path::new),
        tests.map(Path::new),
    )
}

#[test]
fn defaults_from_base() {
    assert_eq!(
        paths("stlconverters", None, None),
        ArtifactPaths {
            implementation: PathBuf::from("stlconverters.pyx"),
            interface: PathBuf::from("stlconverters.pxd"),
            tests: PathBuf::from("test_stlconverters.py"),
        }
    );
}

#[test]
fn implementation_suffix_is_stripped_from_base() {
    let p = paths("stlconverters.pyx", None, None);
    assert_eq!(p.implementation, PathBuf::from("stlconverters.pyx"));
    assert_eq!(p.interface, PathBuf::from("stlconverters.pxd"));
}

#[test]
fn test_prefix_applies_to_the_file_name() {
    let p = paths("build/gen/stlconverters", None, None);
    assert_eq!(p.tests, PathBuf::from("build/gen/test_stlconverters.py"));
    assert_eq!(p.implementation, PathBuf::from("build/gen/stlconverters.pyx"));
}

#[test]
fn explicit_names_keep_existing_suffixes() {
    let p = paths("conv", Some("decls.pxd"), Some("tests/test_conv.py"));
    assert_eq!(p.interface, PathBuf::from("decls.pxd"));
    assert_eq!(p.tests, PathBuf::from("tests/test_conv.py"));

    let p = paths("conv", Some("decls"), Some("checks"));
    assert_eq!(p.interface, PathBuf::from("decls.pxd"));
    assert_eq!(p.tests, PathBuf::from("checks.py"));
}

#[test]
fn paths_per_unit() {
    let p = paths("conv", None, None);
    assert_eq!(p.path(Unit::Implementation), Path::new("conv.pyx"));
    assert_eq!(p.path(Unit::Interface), Path::new("conv.pxd"));
    assert_eq!(p.path(Unit::Tests), Path::new("test_conv.py"));
}
