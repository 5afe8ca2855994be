//! Record store trait and related types.
//!
//! A record store is an ordered key-value store. Keys are two-segment tuples
//! `(namespace, id)`, values are opaque bytes. The store offers exactly what
//! the repository needs:
//!
//! - Point reads, writes and deletes on a single key
//! - Prefix scans over one namespace, in key order or reversed, with a limit
//!
//! Single-key operations are atomic. There are no multi-key transactions and
//! no version checks: concurrent writes to the same key are last-write-wins.
//!
//! # Implementations
//!
//! - [`MemoryRecordStore`](crate::memory::MemoryRecordStore): process-local, for development and tests
//! - `PostgresRecordStore` (in `hxtodo-postgres`): durable storage
//!
//! # Example
//!
//! ```no_run
//! use hxtodo_core::store::{ListSelector, RecordKey, RecordStore, StoreError};
//!
//! async fn example(store: &dyn RecordStore) -> Result<(), StoreError> {
//!     let key = RecordKey::new("todo", "01J0ABC");
//!     store.set(&key, br#"{"id":"01J0ABC","text":"Buy milk"}"#.to_vec()).await?;
//!
//!     let newest = store.list(&ListSelector::prefix("todo").reverse().limit(30)).await?;
//!     assert!(newest.len() <= 30);
//!     Ok(())
//! }
//! ```

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Boxed future returned by [`RecordStore`] operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + Send + 'a>>;

/// Errors that can occur during record store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backend could not be reached or did not answer.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// The backend answered but did not acknowledge a write.
    #[error("Write not acknowledged for {key}: {reason}")]
    WriteRejected {
        /// Key of the rejected write.
        key: RecordKey,
        /// Backend-provided reason.
        reason: String,
    },

    /// Any other backend failure.
    #[error("Store backend error: {0}")]
    Backend(String),
}

/// Composite key: a fixed namespace segment followed by a record id.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordKey {
    namespace: String,
    id: String,
}

impl RecordKey {
    /// Creates a key from its two segments.
    #[must_use]
    pub fn new(namespace: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            id: id.into(),
        }
    }

    /// Namespace segment.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Id segment.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.namespace, self.id)
    }
}

/// A key together with its stored value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    /// Record key
    pub key: RecordKey,
    /// Raw stored value
    pub value: Vec<u8>,
}

/// Selects a range of records for [`RecordStore::list`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListSelector {
    namespace: String,
    limit: Option<usize>,
    reverse: bool,
}

impl ListSelector {
    /// All records under `namespace`, ascending key order, no limit.
    #[must_use]
    pub fn prefix(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            limit: None,
            reverse: false,
        }
    }

    /// Return at most `limit` entries.
    #[must_use]
    pub const fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Walk keys in descending order.
    #[must_use]
    pub const fn reverse(mut self) -> Self {
        self.reverse = true;
        self
    }

    /// Namespace being scanned.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Maximum number of entries, if bounded.
    #[must_use]
    pub const fn max_entries(&self) -> Option<usize> {
        self.limit
    }

    /// Whether keys are walked in descending order.
    #[must_use]
    pub const fn is_reverse(&self) -> bool {
        self.reverse
    }
}

/// Ordered key-value store abstraction.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; a single handle is built at
/// startup and shared by every request.
///
/// # Dyn Compatibility
///
/// Methods return [`StoreFuture`] instead of using `async fn` so the store
/// can be held as `Arc<dyn RecordStore>` and chosen at runtime from
/// configuration.
pub trait RecordStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// Returns `None` if nothing is stored there.
    ///
    /// # Errors
    ///
    /// - `Unavailable` / `Backend`: the read could not be performed
    fn get<'a>(&'a self, key: &'a RecordKey) -> StoreFuture<'a, Option<Vec<u8>>>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// `Ok(())` means the write was acknowledged and is visible to
    /// subsequent reads.
    ///
    /// # Errors
    ///
    /// - `WriteRejected`: the backend refused the write
    /// - `Unavailable` / `Backend`: the write could not be performed
    fn set<'a>(&'a self, key: &'a RecordKey, value: Vec<u8>) -> StoreFuture<'a, ()>;

    /// Remove the value under `key`. Removing an absent key succeeds.
    ///
    /// # Errors
    ///
    /// - `Unavailable` / `Backend`: the delete could not be performed
    fn delete<'a>(&'a self, key: &'a RecordKey) -> StoreFuture<'a, ()>;

    /// Scan the records of one namespace.
    ///
    /// Entries come back in ascending id order, or descending when the
    /// selector is reversed, truncated to the selector's limit.
    ///
    /// # Errors
    ///
    /// - `Unavailable` / `Backend`: the scan could not be performed
    fn list<'a>(&'a self, selector: &'a ListSelector) -> StoreFuture<'a, Vec<Entry>>;
}
