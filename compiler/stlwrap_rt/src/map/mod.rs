//! Map wrappers.
//!
//! Iteration yields keys. Assignment inserts or replaces.

use std::collections::BTreeMap;

use stlwrap_codegen::InsertionCheck;
use stlwrap_types::{CanonicalType, Registry};

use crate::handle::Handle;
use crate::{Converter, Init, NativeValue, StorageIter, StorageValue, WrapperError};

pub type MapStorage = BTreeMap<StorageValue, StorageValue>;

/// Iterator over the keys of a [`MapWrapper`].
pub type MapKeys<'r> = StorageIter<'r, MapStorage>;

/// A map from `key` to `value` behind a storage handle.
#[derive(Debug)]
pub struct MapWrapper<'r> {
    converter: Converter<'r>,
    key: CanonicalType,
    value: CanonicalType,
    check: InsertionCheck,
    storage: Handle<MapStorage>,
}

/// Key/value pairs of a native mapping, or of a sequence of two-element
/// tuples or lists.
fn native_pairs(source: &NativeValue) -> Result<Vec<(&NativeValue, &NativeValue)>, WrapperError> {
    let malformed = |found: &NativeValue| WrapperError::Conversion {
        target: "map",
        found: found.type_name(),
    };
    match source {
        NativeValue::Dict(pairs) => Ok(pairs.iter().map(|(k, v)| (k, v)).collect()),
        NativeValue::List(items) | NativeValue::Tuple(items) => items
            .iter()
            .map(|item| match item {
                NativeValue::Tuple(pair) | NativeValue::List(pair) => match pair.as_slice() {
                    [k, v] => Ok((k, v)),
                    _ => Err(malformed(item)),
                },
                _ => Err(malformed(item)),
            })
            .collect(),
        other => Err(malformed(other)),
    }
}

impl<'r> MapWrapper<'r> {
    pub fn new(
        registry: &'r Registry,
        key: CanonicalType,
        value: CanonicalType,
        init: Init<'_, MapWrapper<'r>>,
    ) -> Result<Self, WrapperError> {
        let key = Registry::ordered_key(key)?;
        let converter = Converter::new(registry);
        let storage = match init {
            Init::FromAlias { source, owns } => {
                if source.key != key || source.value != value {
                    return Err(WrapperError::Type {
                        expected: registry.human_name(&CanonicalType::map(key, value))?,
                        role: "aliases",
                        found: "map",
                    });
                }
                source.storage.alias(owns)?
            }
            Init::FromNative(source) => {
                let mut stored = MapStorage::new();
                for (k, v) in native_pairs(source)? {
                    stored.insert(converter.to_storage(k, &key)?, converter.to_storage(v, &value)?);
                }
                Handle::fresh(stored)
            }
            Init::Empty => Handle::fresh(MapStorage::new()),
        };
        tracing::debug!(%key, %value, owns = storage.owns_storage(), "new map wrapper");
        Ok(Self {
            converter,
            key,
            value,
            check: InsertionCheck::default(),
            storage,
        })
    }

    #[must_use]
    pub fn with_insertion_check(mut self, check: InsertionCheck) -> Self {
        self.check = check;
        self
    }

    pub fn key_type(&self) -> &CanonicalType {
        &self.key
    }

    pub fn value_type(&self) -> &CanonicalType {
        &self.value
    }

    /// Whether dropping this wrapper may release the storage.
    pub fn owns_storage(&self) -> bool {
        self.storage.owns_storage()
    }

    /// Key membership. A key of the wrong type or out of range is simply
    /// absent.
    pub fn contains(&self, key: &NativeValue) -> Result<bool, WrapperError> {
        let storage = self.storage.get()?;
        let Some(k) = self.converter.lookup(key, &self.key)? else {
            return Ok(false);
        };
        let found = storage.borrow().contains_key(&k);
        Ok(found)
    }

    pub fn len(&self) -> Result<usize, WrapperError> {
        Ok(self.storage.get()?.borrow().len())
    }

    pub fn is_empty(&self) -> Result<bool, WrapperError> {
        Ok(self.len()? == 0)
    }

    /// The value stored under `key`.
    ///
    /// Fails with [`WrapperError::Type`] for a mistyped key and
    /// [`WrapperError::Key`] for an absent or out-of-range one.
    pub fn get(&self, key: &NativeValue) -> Result<NativeValue, WrapperError> {
        let storage = self.storage.get()?;
        self.converter.check(key, &self.key, "keys")?;
        let Some(k) = self.converter.lookup(key, &self.key)? else {
            return Err(WrapperError::Key(key.clone()));
        };
        let map = storage.borrow();
        let stored = map.get(&k).ok_or_else(|| WrapperError::Key(key.clone()))?;
        self.converter.to_native(stored, &self.value)
    }

    /// Insert `value` under `key`, replacing any previous value.
    pub fn set(&self, key: &NativeValue, value: &NativeValue) -> Result<(), WrapperError> {
        let storage = self.storage.get()?;
        if self.check == InsertionCheck::Strict {
            self.converter.check(key, &self.key, "keys")?;
            self.converter.check(value, &self.value, "values")?;
        }
        let k = self.converter.to_storage(key, &self.key)?;
        let v = self.converter.to_storage(value, &self.value)?;
        storage.borrow_mut().insert(k, v);
        Ok(())
    }

    /// Remove `key` if present. Absent, mistyped or out-of-range keys are
    /// ignored.
    pub fn delete(&self, key: &NativeValue) -> Result<(), WrapperError> {
        let storage = self.storage.get()?;
        if let Some(k) = self.converter.lookup(key, &self.key)? {
            storage.borrow_mut().remove(&k);
        }
        Ok(())
    }

    pub fn keys(&self) -> Result<MapKeys<'r>, WrapperError> {
        Ok(StorageIter::new(
            self.converter,
            self.key.clone(),
            self.storage.get()?,
        ))
    }

    /// The whole map as a native dict.
    pub fn to_native(&self) -> Result<NativeValue, WrapperError> {
        let ty = CanonicalType::map(self.key.clone(), self.value.clone());
        let snapshot = StorageValue::Map(self.storage.get()?.borrow().clone());
        self.converter.to_native(&snapshot, &ty)
    }
}
