//! Storage handles with explicit ownership.
//!
//! An owning handle keeps the container alive. An aliasing handle only
//! refers to it, and every access checks that an owner still exists, so
//! use after the owner is dropped surfaces as [`WrapperError::Dangling`]
//! instead of touching freed storage.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::WrapperError;

/// How a wrapper is constructed.
#[derive(Debug)]
pub enum Init<'a, W> {
    /// Share the storage of another wrapper. The alias owns the storage
    /// only when `owns` is `Some(true)`.
    FromAlias { source: &'a W, owns: Option<bool> },
    /// Copy the elements of a native collection into fresh storage.
    FromNative(&'a crate::NativeValue),
    /// Fresh, empty storage.
    Empty,
}

#[derive(Debug)]
pub(crate) enum Handle<T> {
    Owned(Rc<RefCell<T>>),
    Aliased(Weak<RefCell<T>>),
}

impl<T> Handle<T> {
    pub(crate) fn fresh(storage: T) -> Self {
        Handle::Owned(Rc::new(RefCell::new(storage)))
    }

    /// A second handle to the same storage.
    pub(crate) fn alias(&self, owns: Option<bool>) -> Result<Self, WrapperError> {
        let shared = self.get()?;
        Ok(if owns == Some(true) {
            Handle::Owned(shared)
        } else {
            Handle::Aliased(Rc::downgrade(&shared))
        })
    }

    /// The live storage, or [`WrapperError::Dangling`].
    pub(crate) fn get(&self) -> Result<Rc<RefCell<T>>, WrapperError> {
        match self {
            Handle::Owned(rc) => Ok(Rc::clone(rc)),
            Handle::Aliased(weak) => weak.upgrade().ok_or(WrapperError::Dangling),
        }
    }

    pub(crate) fn owns_storage(&self) -> bool {
        matches!(self, Handle::Owned(_))
    }
}
