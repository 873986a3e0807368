//! Wrapper iterators.
//!
//! Finite and non-restartable. An iterator holds the storage it walks,
//! so it stays valid even if the wrapper that created it is dropped.
//! After the last item every call to `next` returns `None`.

use std::cell::RefCell;
use std::rc::Rc;

use stlwrap_types::CanonicalType;

use crate::{Converter, NativeValue, OrderedStorage, StorageValue, WrapperError};

#[derive(Clone, Debug)]
enum Position {
    Start,
    After(StorageValue),
    Done,
}

/// Iterates the keys of an ordered container as native values.
pub struct StorageIter<'r, C> {
    converter: Converter<'r>,
    item: CanonicalType,
    storage: Rc<RefCell<C>>,
    position: Position,
}

impl<'r, C> StorageIter<'r, C> {
    pub(crate) fn new(
        converter: Converter<'r>,
        item: CanonicalType,
        storage: Rc<RefCell<C>>,
    ) -> Self {
        Self {
            converter,
            item,
            storage,
            position: Position::Start,
        }
    }
}

impl<C: OrderedStorage> Iterator for StorageIter<'_, C> {
    type Item = Result<NativeValue, WrapperError>;

    fn next(&mut self) -> Option<Self::Item> {
        let last = match &self.position {
            Position::Start => None,
            Position::After(key) => Some(key),
            Position::Done => return None,
        };
        let Some(key) = self.storage.borrow().first_after(last) else {
            self.position = Position::Done;
            return None;
        };
        let value = self.converter.to_native(&key, &self.item);
        self.position = Position::After(key);
        Some(value)
    }
}
