//! Code generation options.

use serde::{Deserialize, Serialize};

/// Whether insertion methods type-check their arguments up front.
///
/// Membership, lookup and deletion always check; insertion (`add`,
/// `__setitem__`) only does under [`InsertionCheck::Strict`]. Under
/// [`InsertionCheck::Permissive`] a mistyped value fails later, inside the
/// element conversion.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsertionCheck {
    #[default]
    Permissive,
    Strict,
}

/// Options shared by every instantiation in a batch.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct CodegenOptions {
    pub insertion_check: InsertionCheck,
}

impl CodegenOptions {
    #[must_use]
    pub fn with_insertion_check(mut self, check: InsertionCheck) -> Self {
        self.insertion_check = check;
        self
    }
}
