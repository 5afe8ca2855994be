//! Injected dependencies.
//!
//! External effects the repository needs besides the store are abstracted
//! behind traits so tests can swap in deterministic versions.

use crate::todo::TodoId;
use std::sync::{Mutex, PoisonError};
use uuid::Uuid;

/// Generates identifiers for new todos.
///
/// Implementations must hand out unique, non-empty ids whose lexicographic
/// order matches generation order; listings rely on it.
///
/// # Examples
///
/// ```ignore
/// // Production - time-ordered UUIDs
/// let ids = UuidV7Generator::new();
///
/// // Test - predictable ids
/// let ids = SequentialIdGenerator::new();
/// ```
pub trait IdGenerator: Send + Sync {
    /// Produce the next identifier.
    fn next_id(&self) -> TodoId;
}

/// Time-ordered UUIDv7 identifiers.
///
/// The 48-bit millisecond timestamp leads the UUID, so the hyphenated
/// lowercase form sorts by creation time. Ids generated within the same
/// millisecond are forced above the previous one.
#[derive(Debug, Default)]
pub struct UuidV7Generator {
    last: Mutex<u128>,
}

impl UuidV7Generator {
    /// Create a generator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for UuidV7Generator {
    fn next_id(&self) -> TodoId {
        let mut last = self.last.lock().unwrap_or_else(PoisonError::into_inner);
        let mut candidate = Uuid::now_v7().as_u128();
        if candidate <= *last {
            candidate = last.wrapping_add(1);
        }
        *last = candidate;
        TodoId::from_uuid(Uuid::from_u128(candidate))
    }
}
