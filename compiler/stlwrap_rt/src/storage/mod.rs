//! Storage values: the typed container library's representation.
//!
//! Storage values are totally ordered so they can key ordered sets and
//! maps. Floats order by `total_cmp`; values of different kinds order by
//! kind, which only matters for heterogeneous comparisons that a
//! well-typed wrapper never makes.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::ops::Bound;

/// A value in storage representation.
#[derive(Clone, Debug)]
pub enum StorageValue {
    Str(String),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    F32(f32),
    F64(f64),
    Complex { re: f64, im: f64 },
    Vector(Vec<StorageValue>),
    Set(BTreeSet<StorageValue>),
    Map(BTreeMap<StorageValue, StorageValue>),
}

impl StorageValue {
    fn rank(&self) -> u8 {
        match self {
            StorageValue::Str(_) => 0,
            StorageValue::I32(_) => 1,
            StorageValue::U32(_) => 2,
            StorageValue::I64(_) => 3,
            StorageValue::U64(_) => 4,
            StorageValue::F32(_) => 5,
            StorageValue::F64(_) => 6,
            StorageValue::Complex { .. } => 7,
            StorageValue::Vector(_) => 8,
            StorageValue::Set(_) => 9,
            StorageValue::Map(_) => 10,
        }
    }
}

impl Ord for StorageValue {
    fn cmp(&self, other: &Self) -> Ordering {
        use StorageValue as S;
        match (self, other) {
            (S::Str(a), S::Str(b)) => a.cmp(b),
            (S::I32(a), S::I32(b)) => a.cmp(b),
            (S::U32(a), S::U32(b)) => a.cmp(b),
            (S::I64(a), S::I64(b)) => a.cmp(b),
            (S::U64(a), S::U64(b)) => a.cmp(b),
            (S::F32(a), S::F32(b)) => a.total_cmp(b),
            (S::F64(a), S::F64(b)) => a.total_cmp(b),
            (S::Complex { re: a, im: b }, S::Complex { re: c, im: d }) => {
                a.total_cmp(c).then_with(|| b.total_cmp(d))
            }
            (S::Vector(a), S::Vector(b)) => a.cmp(b),
            (S::Set(a), S::Set(b)) => a.cmp(b),
            (S::Map(a), S::Map(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for StorageValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for StorageValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for StorageValue {}

/// An ordered container a wrapper iterator can walk by position.
///
/// Positions are keys, so an iterator survives mutation of the container:
/// it resumes after the last key it yielded.
pub trait OrderedStorage {
    /// The first key strictly after `last`, or the first key when `last`
    /// is `None`.
    fn first_after(&self, last: Option<&StorageValue>) -> Option<StorageValue>;
}

fn after(last: Option<&StorageValue>) -> (Bound<&StorageValue>, Bound<&StorageValue>) {
    match last {
        Some(last) => (Bound::Excluded(last), Bound::Unbounded),
        None => (Bound::Unbounded, Bound::Unbounded),
    }
}

impl OrderedStorage for BTreeSet<StorageValue> {
    fn first_after(&self, last: Option<&StorageValue>) -> Option<StorageValue> {
        self.range::<StorageValue, _>(after(last)).next().cloned()
    }
}

impl OrderedStorage for BTreeMap<StorageValue, StorageValue> {
    fn first_after(&self, last: Option<&StorageValue>) -> Option<StorageValue> {
        self.range::<StorageValue, _>(after(last))
            .next()
            .map(|(key, _)| key.clone())
    }
}
