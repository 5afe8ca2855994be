//! # hxtodo Testing
//!
//! Testing utilities and helpers for hxtodo.
//!
//! This crate provides:
//! - Deterministic implementations of environment traits
//! - Record store doubles for failure paths
//! - Fixture builders for repositories
//! - Test log capture
//!
//! ## Example
//!
//! ```
//! use hxtodo_testing::fixtures::memory_repository;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let (store, repo) = memory_repository();
//! let todo = repo.create(hxtodo_core::TodoText::new("Buy milk")?).await?;
//! assert_eq!(todo.id.as_str(), "00000000000000000001");
//! assert_eq!(store.len().await, 1);
//! # Ok(())
//! # }
//! ```

pub mod store_mocks;

/// Deterministic implementations of environment traits.
pub mod mocks {
    use hxtodo_core::environment::IdGenerator;
    use hxtodo_core::todo::TodoId;
    use std::sync::atomic::{AtomicU64, Ordering};

    /// Predictable, ordered ids for tests.
    ///
    /// Produces `00000000000000000001`, `00000000000000000002`, ... The
    /// zero padding keeps lexicographic order equal to generation order.
    ///
    /// # Example
    ///
    /// ```
    /// use hxtodo_testing::mocks::SequentialIdGenerator;
    /// use hxtodo_core::environment::IdGenerator;
    ///
    /// let ids = SequentialIdGenerator::new();
    /// assert_eq!(ids.next_id().as_str(), "00000000000000000001");
    /// assert_eq!(ids.next_id().as_str(), "00000000000000000002");
    /// ```
    #[derive(Debug, Default)]
    pub struct SequentialIdGenerator {
        counter: AtomicU64,
    }

    impl SequentialIdGenerator {
        /// Create a generator starting at 1.
        #[must_use]
        pub const fn new() -> Self {
            Self {
                counter: AtomicU64::new(0),
            }
        }
    }

    impl IdGenerator for SequentialIdGenerator {
        fn next_id(&self) -> TodoId {
            let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
            sequential_id(n)
        }
    }

    /// Build the id [`SequentialIdGenerator`] hands out as its `n`th value.
    ///
    /// # Panics
    ///
    /// Never in practice; a zero-padded number is always non-empty.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn sequential_id(n: u64) -> TodoId {
        TodoId::new(format!("{n:020}")).expect("padded counter should never be empty")
    }
}

/// Fixture builders.
pub mod fixtures {
    use super::mocks::SequentialIdGenerator;
    use super::store_mocks::FailingRecordStore;
    use hxtodo_core::memory::MemoryRecordStore;
    use hxtodo_core::repository::TodoRepository;
    use std::sync::Arc;

    /// Repository over a fresh in-memory store with sequential ids.
    ///
    /// The returned store shares data with the repository.
    #[must_use]
    pub fn memory_repository() -> (MemoryRecordStore, TodoRepository) {
        let store = MemoryRecordStore::new();
        let repo = TodoRepository::new(
            Arc::new(store.clone()),
            Arc::new(SequentialIdGenerator::new()),
        );
        (store, repo)
    }

    /// Repository over a [`FailingRecordStore`] with sequential ids.
    #[must_use]
    pub fn failing_repository() -> (FailingRecordStore, TodoRepository) {
        let store = FailingRecordStore::new();
        let repo = TodoRepository::new(
            Arc::new(store.clone()),
            Arc::new(SequentialIdGenerator::new()),
        );
        (store, repo)
    }
}

/// Log capture for tests.
pub mod tracing_support {
    /// Route `tracing` output through the test harness writer.
    ///
    /// Safe to call from every test; only the first call installs the
    /// subscriber. Honours `RUST_LOG`.
    pub fn init_test_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "warn".into()),
            )
            .with_test_writer()
            .try_init();
    }
}

// Re-export commonly used items
pub use fixtures::{failing_repository, memory_repository};
pub use mocks::{SequentialIdGenerator, sequential_id};
pub use store_mocks::FailingRecordStore;
pub use tracing_support::init_test_tracing;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use hxtodo_core::environment::IdGenerator;

    #[test]
    fn sequential_ids_are_ordered() {
        let ids = SequentialIdGenerator::new();
        let a = ids.next_id();
        let b = ids.next_id();
        assert!(a < b);
        assert_eq!(a, sequential_id(1));
        assert_eq!(b, sequential_id(2));
    }
}
