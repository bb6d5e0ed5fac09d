//! Record sources.
//!
//! The engine reads records through [`RecordSource`] and mutates them
//! through [`MutableSource`]. A source owns its records; the engine only
//! asks for a consistent snapshot of the collection, or for an in-place
//! removal or update of the records matching a predicate.
//!
//! [`MemoryStore`] is the in-process implementation, backed by a vector
//! behind an `RwLock`.

use std::sync::{PoisonError, RwLock};

use thiserror::Error;

/// A readable collection of `E` records.
pub trait RecordSource<E> {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns a point-in-time copy of every record, in storage order.
    fn snapshot(&self) -> Result<Vec<E>, Self::Error>;
}

/// A collection whose records can be removed or updated in place.
pub trait MutableSource<E>: RecordSource<E> {
    /// Removes every record for which `predicate` returns `true` and
    /// returns how many were removed.
    fn remove_where(&self, predicate: &mut dyn FnMut(&E) -> bool) -> Result<usize, Self::Error>;

    /// Applies `update` to every record for which `predicate` returns `true`
    /// and returns how many were updated.
    fn modify_where(
        &self,
        predicate: &mut dyn FnMut(&E) -> bool,
        update: &mut dyn FnMut(&mut E),
    ) -> Result<usize, Self::Error>;
}

/// Errors of the in-memory store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store lock poisoned")]
    Poisoned,
}

impl<T> From<PoisonError<T>> for StoreError {
    fn from(_: PoisonError<T>) -> Self {
        StoreError::Poisoned
    }
}

/// Insertion-ordered in-memory record store.
#[derive(Debug, Default)]
pub struct MemoryStore<E> {
    records: RwLock<Vec<E>>,
}

impl<E> MemoryStore<E> {
    pub fn new() -> Self {
        MemoryStore {
            records: RwLock::new(Vec::new()),
        }
    }

    pub fn with_records(records: Vec<E>) -> Self {
        MemoryStore {
            records: RwLock::new(records),
        }
    }

    /// Appends a record.
    pub fn insert(&self, record: E) -> Result<(), StoreError> {
        self.records.write()?.push(record);
        Ok(())
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.records.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.records.read()?.is_empty())
    }
}

impl<E: Clone> RecordSource<E> for MemoryStore<E> {
    type Error = StoreError;

    fn snapshot(&self) -> Result<Vec<E>, StoreError> {
        Ok(self.records.read()?.clone())
    }
}

impl<E: Clone> MutableSource<E> for MemoryStore<E> {
    fn remove_where(&self, predicate: &mut dyn FnMut(&E) -> bool) -> Result<usize, StoreError> {
        let mut records = self.records.write()?;
        let before = records.len();
        records.retain(|record| !predicate(record));
        Ok(before - records.len())
    }

    fn modify_where(
        &self,
        predicate: &mut dyn FnMut(&E) -> bool,
        update: &mut dyn FnMut(&mut E),
    ) -> Result<usize, StoreError> {
        let mut records = self.records.write()?;
        let mut affected = 0;
        for record in records.iter_mut() {
            if predicate(&*record) {
                update(record);
                affected += 1;
            }
        }
        Ok(affected)
    }
}

/// Slices and vectors are read-only sources over their own contents.
impl<E: Clone> RecordSource<E> for [E] {
    type Error = std::convert::Infallible;

    fn snapshot(&self) -> Result<Vec<E>, Self::Error> {
        Ok(self.to_vec())
    }
}

impl<E: Clone> RecordSource<E> for Vec<E> {
    type Error = std::convert::Infallible;

    fn snapshot(&self) -> Result<Vec<E>, Self::Error> {
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_preserves_insertion_order() {
        let store = MemoryStore::new();
        store.insert(3).unwrap();
        store.insert(1).unwrap();
        store.insert(2).unwrap();
        assert_eq!(store.snapshot().unwrap(), vec![3, 1, 2]);
        assert_eq!(store.len().unwrap(), 3);
    }

    #[test]
    fn remove_where_counts_removed() {
        let store = MemoryStore::with_records(vec![1i32, 2, 3, 4, 5]);
        let removed = store.remove_where(&mut |n| n % 2 == 0).unwrap();
        assert_eq!(removed, 2);
        assert_eq!(store.snapshot().unwrap(), vec![1, 3, 5]);
    }

    #[test]
    fn modify_where_counts_updated() {
        let store = MemoryStore::with_records(vec![1i32, 2, 3]);
        let updated = store.modify_where(&mut |n| *n > 1, &mut |n| *n *= 10).unwrap();
        assert_eq!(updated, 2);
        assert_eq!(store.snapshot().unwrap(), vec![1, 20, 30]);
    }

    #[test]
    fn vec_is_a_source() {
        let records = vec!["a".to_string()];
        assert_eq!(RecordSource::snapshot(&records).unwrap(), records);
    }
}
