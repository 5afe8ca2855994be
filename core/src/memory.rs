//! Process-local record store.
//!
//! [`MemoryRecordStore`] keeps records in a `BTreeMap` keyed by
//! [`RecordKey`], so prefix scans come out in key order for free. Data is
//! lost when the process exits; use it for development and tests.

use crate::store::{Entry, ListSelector, RecordKey, RecordStore, StoreFuture};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory ordered key-value store.
///
/// Cloning is cheap and clones share the same data.
///
/// # Example
///
/// ```
/// use hxtodo_core::memory::MemoryRecordStore;
/// use hxtodo_core::store::{RecordKey, RecordStore};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = MemoryRecordStore::new();
/// let key = RecordKey::new("todo", "1");
/// store.set(&key, b"{}".to_vec()).await?;
/// assert!(store.get(&key).await?.is_some());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default)]
pub struct MemoryRecordStore {
    records: Arc<RwLock<BTreeMap<RecordKey, Vec<u8>>>>,
}

impl MemoryRecordStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records across all namespaces.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the store holds no records.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl RecordStore for MemoryRecordStore {
    fn get<'a>(&'a self, key: &'a RecordKey) -> StoreFuture<'a, Option<Vec<u8>>> {
        Box::pin(async move { Ok(self.records.read().await.get(key).cloned()) })
    }

    fn set<'a>(&'a self, key: &'a RecordKey, value: Vec<u8>) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            self.records.write().await.insert(key.clone(), value);
            Ok(())
        })
    }

    fn delete<'a>(&'a self, key: &'a RecordKey) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            self.records.write().await.remove(key);
            Ok(())
        })
    }

    fn list<'a>(&'a self, selector: &'a ListSelector) -> StoreFuture<'a, Vec<Entry>> {
        Box::pin(async move {
            let records = self.records.read().await;
            let in_namespace = records
                .iter()
                .filter(|(key, _)| key.namespace() == selector.namespace());
            let limit = selector.max_entries().unwrap_or(usize::MAX);
            let to_entry = |(key, value): (&RecordKey, &Vec<u8>)| Entry {
                key: key.clone(),
                value: value.clone(),
            };

            let entries = if selector.is_reverse() {
                in_namespace.rev().take(limit).map(to_entry).collect()
            } else {
                in_namespace.take(limit).map(to_entry).collect()
            };
            Ok(entries)
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    async fn seeded() -> MemoryRecordStore {
        let store = MemoryRecordStore::new();
        for id in ["b", "a", "c"] {
            store
                .set(&RecordKey::new("todo", id), id.as_bytes().to_vec())
                .await
                .unwrap();
        }
        store
            .set(&RecordKey::new("other", "z"), b"z".to_vec())
            .await
            .unwrap();
        store
    }

    fn ids(entries: &[Entry]) -> Vec<&str> {
        entries.iter().map(|e| e.key.id()).collect()
    }

    #[tokio::test]
    async fn get_set_delete() {
        let store = MemoryRecordStore::new();
        let key = RecordKey::new("todo", "1");

        assert_eq!(store.get(&key).await.unwrap(), None);
        store.set(&key, b"one".to_vec()).await.unwrap();
        assert_eq!(store.get(&key).await.unwrap(), Some(b"one".to_vec()));

        store.set(&key, b"uno".to_vec()).await.unwrap();
        assert_eq!(store.get(&key).await.unwrap(), Some(b"uno".to_vec()));
        assert_eq!(store.len().await, 1);

        store.delete(&key).await.unwrap();
        assert_eq!(store.get(&key).await.unwrap(), None);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn delete_absent_key_is_ok() {
        let store = MemoryRecordStore::new();
        store.delete(&RecordKey::new("todo", "nope")).await.unwrap();
    }

    #[tokio::test]
    async fn list_is_scoped_to_namespace_in_key_order() {
        let store = seeded().await;
        let entries = store.list(&ListSelector::prefix("todo")).await.unwrap();
        assert_eq!(ids(&entries), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn list_reverse_with_limit() {
        let store = seeded().await;
        let entries = store
            .list(&ListSelector::prefix("todo").reverse().limit(2))
            .await
            .unwrap();
        assert_eq!(ids(&entries), vec!["c", "b"]);
    }

    #[tokio::test]
    async fn list_unknown_namespace_is_empty() {
        let store = seeded().await;
        let entries = store.list(&ListSelector::prefix("nothing")).await.unwrap();
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn clones_share_data() {
        let store = MemoryRecordStore::new();
        let clone = store.clone();
        clone
            .set(&RecordKey::new("todo", "1"), b"x".to_vec())
            .await
            .unwrap();
        assert_eq!(store.len().await, 1);
    }
}
