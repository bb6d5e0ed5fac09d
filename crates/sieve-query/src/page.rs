use serde::{Deserialize, Serialize};

/// One page of query results.
///
/// `total` counts every record matching the query before paging, so it is
/// the same for every page of the same query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub total: usize,
    pub collection: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(total: usize, collection: Vec<T>) -> Self {
        Page { total, collection }
    }

    /// Number of records on this page.
    pub fn len(&self) -> usize {
        self.collection.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collection.is_empty()
    }

    /// Maps every record, keeping the total.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            total: self.total,
            collection: self.collection.into_iter().map(f).collect(),
        }
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.collection.into_iter()
    }
}
