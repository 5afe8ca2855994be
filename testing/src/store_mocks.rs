//! Record store doubles for exercising failure paths.
//!
//! - [`FailingRecordStore`]: wraps a [`MemoryRecordStore`] and fails reads
//!   and/or writes on demand

#![allow(clippy::module_name_repetitions)]

use hxtodo_core::memory::MemoryRecordStore;
use hxtodo_core::store::{Entry, ListSelector, RecordKey, RecordStore, StoreError, StoreFuture};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// A record store whose operations can be switched to fail.
///
/// While healthy it behaves exactly like the wrapped [`MemoryRecordStore`].
/// Failing writes return [`StoreError::WriteRejected`] and leave the data
/// untouched; failing reads return [`StoreError::Unavailable`].
///
/// # Example
///
/// ```
/// use hxtodo_testing::FailingRecordStore;
/// use hxtodo_core::store::{RecordKey, RecordStore, StoreError};
///
/// # async fn example() {
/// let store = FailingRecordStore::new();
/// store.fail_writes(true);
///
/// let result = store.set(&RecordKey::new("todo", "1"), b"{}".to_vec()).await;
/// assert!(matches!(result, Err(StoreError::WriteRejected { .. })));
/// assert!(store.inner().is_empty().await);
/// # }
/// ```
#[derive(Clone, Debug, Default)]
pub struct FailingRecordStore {
    inner: MemoryRecordStore,
    fail_reads: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
    rejected_writes: Arc<AtomicUsize>,
}

impl FailingRecordStore {
    /// Create a healthy store with no data.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `get` and `list` fail (or recover).
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make `set` and `delete` fail (or recover).
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of writes rejected so far.
    #[must_use]
    pub fn rejected_writes(&self) -> usize {
        self.rejected_writes.load(Ordering::SeqCst)
    }

    /// The wrapped store, for seeding data and inspecting results.
    #[must_use]
    pub const fn inner(&self) -> &MemoryRecordStore {
        &self.inner
    }

    fn check_read(&self) -> Result<(), StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("reads disabled by test".to_string()));
        }
        Ok(())
    }

    fn check_write(&self, key: &RecordKey) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            self.rejected_writes.fetch_add(1, Ordering::SeqCst);
            return Err(StoreError::WriteRejected {
                key: key.clone(),
                reason: "writes disabled by test".to_string(),
            });
        }
        Ok(())
    }
}

impl RecordStore for FailingRecordStore {
    fn get<'a>(&'a self, key: &'a RecordKey) -> StoreFuture<'a, Option<Vec<u8>>> {
        Box::pin(async move {
            self.check_read()?;
            self.inner.get(key).await
        })
    }

    fn set<'a>(&'a self, key: &'a RecordKey, value: Vec<u8>) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            self.check_write(key)?;
            self.inner.set(key, value).await
        })
    }

    fn delete<'a>(&'a self, key: &'a RecordKey) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            self.check_write(key)?;
            self.inner.delete(key).await
        })
    }

    fn list<'a>(&'a self, selector: &'a ListSelector) -> StoreFuture<'a, Vec<Entry>> {
        Box::pin(async move {
            self.check_read()?;
            self.inner.list(selector).await
        })
    }
}
