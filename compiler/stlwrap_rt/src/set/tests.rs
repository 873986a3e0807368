#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use pretty_assertions::assert_eq;
use stlwrap_types::DescriptorError;

fn int32(registry: &Registry) -> CanonicalType {
    registry.canonicalize_str("int32").unwrap()
}

fn ints(xs: &[i64]) -> NativeValue {
    NativeValue::List(xs.iter().copied().map(NativeValue::from).collect())
}

#[test]
fn int_scenario() {
    let registry = Registry::builtin();
    let s = SetWrapper::new(&registry, int32(&registry), Init::Empty).unwrap();
    s.add(&1_i64.into()).unwrap();
    assert!(s.contains(&1_i64.into()).unwrap());
    assert!(!s.contains(&(-65_i64).into()).unwrap());

    let ns = ints(&[1, 42, -65]);
    let s = SetWrapper::new(&registry, int32(&registry), Init::FromNative(&ns)).unwrap();
    assert!(s.contains(&42_i64.into()).unwrap());
    assert!(!s.contains(&18_i64.into()).unwrap());
    assert_eq!(s.len().unwrap(), 3);
    assert!(s.owns_storage());
}

#[test]
fn add_is_idempotent() {
    let registry = Registry::builtin();
    let s = SetWrapper::new(&registry, int32(&registry), Init::Empty).unwrap();
    s.add(&1_i64.into()).unwrap();
    s.add(&1_i64.into()).unwrap();
    assert_eq!(s.len().unwrap(), 1);
}

#[test]
fn discard_ignores_absent_and_mistyped_values() {
    let registry = Registry::builtin();
    let ns = ints(&[1, 2]);
    let s = SetWrapper::new(&registry, int32(&registry), Init::FromNative(&ns)).unwrap();
    s.discard(&3_i64.into()).unwrap();
    s.discard(&NativeValue::None).unwrap();
    s.discard(&"1".into()).unwrap();
    assert_eq!(s.len().unwrap(), 2);
    s.discard(&2_i64.into()).unwrap();
    assert_eq!(s.len().unwrap(), 1);
}

#[test]
fn mistyped_membership_is_false() {
    let registry = Registry::builtin();
    let s = SetWrapper::new(&registry, int32(&registry), Init::Empty).unwrap();
    assert!(!s.contains(&NativeValue::None).unwrap());
    assert!(!s.contains(&"Aha".into()).unwrap());
}

#[test]
fn insertion_check_policies() {
    let registry = Registry::builtin();
    let permissive = SetWrapper::new(&registry, int32(&registry), Init::Empty).unwrap();
    assert!(matches!(
        permissive.add(&"x".into()),
        Err(WrapperError::Conversion { .. })
    ));
    let strict = SetWrapper::new(&registry, int32(&registry), Init::Empty)
        .unwrap()
        .with_insertion_check(InsertionCheck::Strict);
    assert_eq!(
        strict.add(&"x".into()),
        Err(WrapperError::Type {
            expected: "int".to_string(),
            role: "values",
            found: "str",
        })
    );
    assert!(strict.is_empty().unwrap());
}

#[test]
fn aliases_share_storage() {
    let registry = Registry::builtin();
    let owner = SetWrapper::new(&registry, int32(&registry), Init::Empty).unwrap();
    let alias = SetWrapper::new(
        &registry,
        int32(&registry),
        Init::FromAlias {
            source: &owner,
            owns: None,
        },
    )
    .unwrap();
    assert!(!alias.owns_storage());
    alias.add(&7_i64.into()).unwrap();
    assert!(owner.contains(&7_i64.into()).unwrap());
    owner.discard(&7_i64.into()).unwrap();
    assert!(alias.is_empty().unwrap());
}

#[test]
fn alias_outliving_owner_is_dangling() {
    let registry = Registry::builtin();
    let owner = SetWrapper::new(&registry, int32(&registry), Init::Empty).unwrap();
    let alias = SetWrapper::new(
        &registry,
        int32(&registry),
        Init::FromAlias {
            source: &owner,
            owns: Some(false),
        },
    )
    .unwrap();
    drop(owner);
    assert_eq!(alias.len(), Err(WrapperError::Dangling));
    assert_eq!(alias.add(&1_i64.into()), Err(WrapperError::Dangling));
    assert!(alias.iter().is_err());
}

#[test]
fn owning_alias_keeps_storage_alive() {
    let registry = Registry::builtin();
    let owner =
        SetWrapper::new(&registry, int32(&registry), Init::FromNative(&ints(&[5]))).unwrap();
    let alias = SetWrapper::new(
        &registry,
        int32(&registry),
        Init::FromAlias {
            source: &owner,
            owns: Some(true),
        },
    )
    .unwrap();
    drop(owner);
    assert!(alias.owns_storage());
    assert!(alias.contains(&5_i64.into()).unwrap());
}

#[test]
fn alias_requires_matching_element_type() {
    let registry = Registry::builtin();
    let owner = SetWrapper::new(&registry, int32(&registry), Init::Empty).unwrap();
    let err = SetWrapper::new(
        &registry,
        registry.canonicalize_str("str").unwrap(),
        Init::FromAlias {
            source: &owner,
            owns: None,
        },
    )
    .unwrap_err();
    assert!(matches!(err, WrapperError::Type { role: "aliases", .. }));
}

#[test]
fn iteration_exhausts_once_and_stays_exhausted() {
    let registry = Registry::builtin();
    let s =
        SetWrapper::new(&registry, int32(&registry), Init::FromNative(&ints(&[18, 1]))).unwrap();
    let mut it = s.iter().unwrap();
    assert_eq!(it.next(), Some(Ok(1_i64.into())));
    assert_eq!(it.next(), Some(Ok(18_i64.into())));
    assert_eq!(it.next(), None);
    assert_eq!(it.next(), None);
}

#[test]
fn iterator_resumes_after_mutation() {
    let registry = Registry::builtin();
    let s =
        SetWrapper::new(&registry, int32(&registry), Init::FromNative(&ints(&[1, 2, 3]))).unwrap();
    let mut it = s.iter().unwrap();
    assert_eq!(it.next(), Some(Ok(1_i64.into())));
    s.discard(&2_i64.into()).unwrap();
    assert_eq!(it.next(), Some(Ok(3_i64.into())));
    assert_eq!(it.next(), None);
}

#[test]
fn unordered_elements_are_rejected() {
    let registry = Registry::builtin();
    let complex = registry.canonicalize_str("complex").unwrap();
    assert!(matches!(
        SetWrapper::new(&registry, complex, Init::Empty),
        Err(WrapperError::Descriptor(DescriptorError::UnorderedKey(_)))
    ));
}

#[test]
fn non_iterable_source_is_rejected() {
    let registry = Registry::builtin();
    let source = NativeValue::from(3_i64);
    assert!(matches!(
        SetWrapper::new(&registry, int32(&registry), Init::FromNative(&source)),
        Err(WrapperError::Conversion { target: "set", found: "int" })
    ));
}

#[test]
fn to_native_collects_members() {
    let registry = Registry::builtin();
    let str_ty = registry.canonicalize_str("str").unwrap();
    let source = NativeValue::Set(vec!["On".into(), "Me".into()]);
    let s = SetWrapper::new(&registry, str_ty, Init::FromNative(&source)).unwrap();
    assert_eq!(s.to_native().unwrap(), source);
}

#[test]
fn out_of_range_values_are_not_members() {
    let registry = Registry::builtin();
    let uint = registry.canonicalize_str("uint32").unwrap();
    let s = SetWrapper::new(&registry, uint, Init::Empty).unwrap();
    s.add(&1_i64.into()).unwrap();
    assert!(!s.contains(&(-1_i64).into()).unwrap());
    assert!(!s.contains(&(1_i64 << 40).into()).unwrap());
    s.discard(&(-1_i64).into()).unwrap();
    assert_eq!(s.len().unwrap(), 1);
    assert!(matches!(
        s.add(&(-1_i64).into()),
        Err(WrapperError::Overflow { value: -1, target: "uint32" })
    ));
}
