//! # hxtodo Core
//!
//! Data model and data access for the hxtodo to-do list.
//!
//! ## Core Concepts
//!
//! - **Todo**: the single entity, `{id, text}`
//! - **Record Store**: ordered key-value store behind the [`store::RecordStore`] trait
//! - **Repository**: maps todos to `("todo", id)` keys and back
//! - **Environment**: injected id generation
//!
//! ## Architecture Principles
//!
//! - The store handle is built once at startup and passed in explicitly
//! - The repository caches nothing between calls
//! - Missing records degrade to empty results, never errors
//! - Failed writes always surface as errors
//!
//! ## Example
//!
//! ```
//! use hxtodo_core::{MemoryRecordStore, TodoRepository, TodoText, UuidV7Generator};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let repo = TodoRepository::new(
//!     Arc::new(MemoryRecordStore::new()),
//!     Arc::new(UuidV7Generator::new()),
//! );
//!
//! repo.create(TodoText::new("Buy milk")?).await?;
//! let newest_first = repo.list_recent().await?;
//! assert_eq!(newest_first[0].text, "Buy milk");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod environment;
pub mod memory;
pub mod repository;
pub mod store;
pub mod todo;

// Re-export commonly used types
pub use environment::{IdGenerator, UuidV7Generator};
pub use memory::MemoryRecordStore;
pub use repository::{RECENT_LIMIT, RepositoryError, TODO_NAMESPACE, TodoRepository};
pub use store::{Entry, ListSelector, RecordKey, RecordStore, StoreError, StoreFuture};
pub use todo::{Todo, TodoId, TodoText, TodoValueError};
