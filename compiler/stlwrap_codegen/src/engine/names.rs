//! Deterministic names for generated classes and functions.
//!
//! Every name is derived from registry fragments of canonical types, so
//! two requests that canonicalize alike get identical names.

use stlwrap_types::{CanonicalType, DescriptorError, Registry};

/// Names for one set instantiation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SetNames {
    /// `SetInt`, also the fragment comment.
    pub public: String,
    /// `_SetInt`
    pub wrapper: String,
    /// `_SetIterInt`
    pub iterator: String,
    /// `cpp_set[int]`
    pub storage: String,
    pub elem_storage: String,
    pub elem_human: String,
    /// `test_set_int32`
    pub test_fn: String,
}

impl SetNames {
    pub fn derive(registry: &Registry, elem: &CanonicalType) -> Result<Self, DescriptorError> {
        let class = registry.class_name_fragment(elem)?;
        let elem_storage = registry.storage_type(elem)?;
        Ok(Self {
            public: format!("Set{class}"),
            wrapper: format!("_Set{class}"),
            iterator: format!("_SetIter{class}"),
            storage: format!("cpp_set[{elem_storage}]"),
            elem_storage,
            elem_human: registry.human_name(elem)?,
            test_fn: format!("test_set_{}", elem.ident()),
        })
    }
}

/// Names for one map instantiation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapNames {
    /// `MapStrInt`, also the fragment comment.
    pub public: String,
    pub wrapper: String,
    pub iterator: String,
    /// `cpp_map[std_string, int]`
    pub storage: String,
    pub key_storage: String,
    pub value_storage: String,
    pub key_human: String,
    pub value_human: String,
    /// `test_map_str_int32`
    pub test_fn: String,
}

impl MapNames {
    pub fn derive(
        registry: &Registry,
        key: &CanonicalType,
        value: &CanonicalType,
    ) -> Result<Self, DescriptorError> {
        let class = format!(
            "{}{}",
            registry.class_name_fragment(key)?,
            registry.class_name_fragment(value)?
        );
        let key_storage = registry.storage_type(key)?;
        let value_storage = registry.storage_type(value)?;
        Ok(Self {
            public: format!("Map{class}"),
            wrapper: format!("_Map{class}"),
            iterator: format!("_MapIter{class}"),
            storage: format!("cpp_map[{key_storage}, {value_storage}]"),
            key_storage,
            value_storage,
            key_human: registry.human_name(key)?,
            value_human: registry.human_name(value)?,
            test_fn: format!("test_map_{}_{}", key.ident(), value.ident()),
        })
    }
}

/// Names for a pair of free conversion functions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConverterNames {
    pub comment: String,
    /// Native to storage.
    pub to_storage: String,
    /// Storage to native.
    pub to_native: String,
    /// Storage type of the converted container.
    pub storage: String,
}

impl ConverterNames {
    pub fn for_set(registry: &Registry, elem: &CanonicalType) -> Result<Self, DescriptorError> {
        let func = registry.func_name_fragment(elem)?;
        Ok(Self {
            comment: format!("{} sets", registry.human_name(elem)?),
            to_storage: format!("py_to_cpp_set_{func}"),
            to_native: format!("cpp_to_py_set_{func}"),
            storage: registry.storage_type(&CanonicalType::set(elem.clone()))?,
        })
    }

    pub fn for_map(
        registry: &Registry,
        key: &CanonicalType,
        value: &CanonicalType,
    ) -> Result<Self, DescriptorError> {
        let funcs = format!(
            "{}_{}",
            registry.func_name_fragment(key)?,
            registry.func_name_fragment(value)?
        );
        Ok(Self {
            comment: format!(
                "<{}, {}> conversions",
                registry.human_name(key)?,
                registry.human_name(value)?
            ),
            to_storage: format!("dict_to_map_{funcs}"),
            to_native: format!("map_to_dict_{funcs}"),
            storage: registry.storage_type(&CanonicalType::map(key.clone(), value.clone()))?,
        })
    }
}
