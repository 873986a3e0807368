//! Set wrappers.

use std::collections::BTreeSet;

use stlwrap_codegen::InsertionCheck;
use stlwrap_types::{CanonicalType, Registry};

use crate::handle::Handle;
use crate::{Converter, Init, NativeValue, StorageIter, StorageValue, WrapperError};

pub type SetStorage = BTreeSet<StorageValue>;

/// Iterator over the elements of a [`SetWrapper`].
pub type SetIter<'r> = StorageIter<'r, SetStorage>;

/// A set of `elem` values behind a storage handle.
#[derive(Debug)]
pub struct SetWrapper<'r> {
    converter: Converter<'r>,
    elem: CanonicalType,
    check: InsertionCheck,
    storage: Handle<SetStorage>,
}

impl<'r> SetWrapper<'r> {
    pub fn new(
        registry: &'r Registry,
        elem: CanonicalType,
        init: Init<'_, SetWrapper<'r>>,
    ) -> Result<Self, WrapperError> {
        let elem = Registry::ordered_key(elem)?;
        let converter = Converter::new(registry);
        let storage = match init {
            Init::FromAlias { source, owns } => {
                if source.elem != elem {
                    return Err(WrapperError::Type {
                        expected: registry.human_name(&CanonicalType::set(elem))?,
                        role: "aliases",
                        found: "set",
                    });
                }
                source.storage.alias(owns)?
            }
            Init::FromNative(values) => {
                let items = match values {
                    NativeValue::List(items)
                    | NativeValue::Tuple(items)
                    | NativeValue::Set(items) => items,
                    other => {
                        return Err(WrapperError::Conversion {
                            target: "set",
                            found: other.type_name(),
                        })
                    }
                };
                let stored = items
                    .iter()
                    .map(|item| converter.to_storage(item, &elem))
                    .collect::<Result<SetStorage, _>>()?;
                Handle::fresh(stored)
            }
            Init::Empty => Handle::fresh(SetStorage::new()),
        };
        tracing::debug!(%elem, owns = storage.owns_storage(), "new set wrapper");
        Ok(Self {
            converter,
            elem,
            check: InsertionCheck::default(),
            storage,
        })
    }

    #[must_use]
    pub fn with_insertion_check(mut self, check: InsertionCheck) -> Self {
        self.check = check;
        self
    }

    pub fn elem(&self) -> &CanonicalType {
        &self.elem
    }

    /// Whether dropping this wrapper may release the storage.
    pub fn owns_storage(&self) -> bool {
        self.storage.owns_storage()
    }

    /// Membership. A value of the wrong type or out of range is simply not
    /// a member.
    pub fn contains(&self, value: &NativeValue) -> Result<bool, WrapperError> {
        let storage = self.storage.get()?;
        let Some(stored) = self.converter.lookup(value, &self.elem)? else {
            return Ok(false);
        };
        let found = storage.borrow().contains(&stored);
        Ok(found)
    }

    pub fn len(&self) -> Result<usize, WrapperError> {
        Ok(self.storage.get()?.borrow().len())
    }

    pub fn is_empty(&self) -> Result<bool, WrapperError> {
        Ok(self.len()? == 0)
    }

    /// Insert `value`; inserting a member again changes nothing.
    pub fn add(&self, value: &NativeValue) -> Result<(), WrapperError> {
        let storage = self.storage.get()?;
        if self.check == InsertionCheck::Strict {
            self.converter.check(value, &self.elem, "values")?;
        }
        let stored = self.converter.to_storage(value, &self.elem)?;
        storage.borrow_mut().insert(stored);
        Ok(())
    }

    /// Remove `value` if present. Absent, mistyped or out-of-range values
    /// are ignored.
    pub fn discard(&self, value: &NativeValue) -> Result<(), WrapperError> {
        let storage = self.storage.get()?;
        if let Some(stored) = self.converter.lookup(value, &self.elem)? {
            storage.borrow_mut().remove(&stored);
        }
        Ok(())
    }

    pub fn iter(&self) -> Result<SetIter<'r>, WrapperError> {
        Ok(StorageIter::new(
            self.converter,
            self.elem.clone(),
            self.storage.get()?,
        ))
    }

    /// The whole set as a native value.
    pub fn to_native(&self) -> Result<NativeValue, WrapperError> {
        let set = self.iter()?.collect::<Result<Vec<_>, _>>()?;
        Ok(NativeValue::Set(set))
    }
}

#[cfg(test)]
mod tests;
