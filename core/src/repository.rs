//! Data access for todos.
//!
//! [`TodoRepository`] maps [`Todo`] values onto record store keys
//! `("todo", id)` and back. It holds no state between calls: every read goes
//! to the store.
//!
//! Missing records are never errors. `get` returns `None`, `delete` is a
//! no-op and `update` returns the attempted value without writing it.

use crate::environment::IdGenerator;
use crate::store::{ListSelector, RecordKey, RecordStore, StoreError};
use crate::todo::{Todo, TodoId, TodoText};
use std::sync::Arc;
use thiserror::Error;

/// Namespace segment all todo records live under.
pub const TODO_NAMESPACE: &str = "todo";

/// Maximum number of todos returned by [`TodoRepository::list_recent`].
pub const RECENT_LIMIT: usize = 30;

/// Errors surfaced by the repository.
///
/// All of them are fatal to the request that triggered them.
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// A read or scan could not be performed.
    #[error("Failed to read from store: {0}")]
    StoreRead(#[source] StoreError),

    /// A write or delete was not acknowledged; nothing was changed.
    #[error("Failed to write to store: {0}")]
    StoreWrite(#[source] StoreError),

    /// A stored value is not a valid todo.
    #[error("Corrupt record at {key}: {source}")]
    CorruptRecord {
        /// Key of the undecodable record.
        key: RecordKey,
        /// Decoding failure.
        #[source]
        source: serde_json::Error,
    },

    /// A todo could not be encoded for storage.
    #[error("Failed to encode todo {id}: {source}")]
    Encode {
        /// Id of the todo being written.
        id: TodoId,
        /// Encoding failure.
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

/// Repository for [`Todo`] records.
///
/// Cloning is cheap; clones share the same store handle.
///
/// # Example
///
/// ```
/// use hxtodo_core::environment::UuidV7Generator;
/// use hxtodo_core::memory::MemoryRecordStore;
/// use hxtodo_core::repository::TodoRepository;
/// use hxtodo_core::todo::TodoText;
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let repo = TodoRepository::new(
///     Arc::new(MemoryRecordStore::new()),
///     Arc::new(UuidV7Generator::new()),
/// );
///
/// let todo = repo.create(TodoText::new("Buy milk")?).await?;
/// assert_eq!(repo.get(&todo.id).await?, Some(todo));
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct TodoRepository {
    store: Arc<dyn RecordStore>,
    ids: Arc<dyn IdGenerator>,
}

impl TodoRepository {
    /// Create a repository over `store`, minting ids with `ids`.
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { store, ids }
    }

    /// The underlying store handle.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    fn key(id: &TodoId) -> RecordKey {
        RecordKey::new(TODO_NAMESPACE, id.as_str())
    }

    fn decode(key: &RecordKey, value: &[u8]) -> Result<Todo> {
        serde_json::from_slice(value).map_err(|source| RepositoryError::CorruptRecord {
            key: key.clone(),
            source,
        })
    }

    async fn write(&self, key: &RecordKey, todo: &Todo, operation: &'static str) -> Result<()> {
        let value = serde_json::to_vec(todo).map_err(|source| RepositoryError::Encode {
            id: todo.id.clone(),
            source,
        })?;
        self.store
            .set(key, value)
            .await
            .map_err(RepositoryError::StoreWrite)?;
        metrics::counter!("todo.repository.writes", "operation" => operation).increment(1);
        Ok(())
    }

    /// Up to [`RECENT_LIMIT`] todos, most recently created first.
    ///
    /// # Errors
    ///
    /// - `StoreRead`: the scan failed
    /// - `CorruptRecord`: a stored value could not be decoded
    pub async fn list_recent(&self) -> Result<Vec<Todo>> {
        let selector = ListSelector::prefix(TODO_NAMESPACE)
            .reverse()
            .limit(RECENT_LIMIT);
        let entries = self
            .store
            .list(&selector)
            .await
            .map_err(RepositoryError::StoreRead)?;

        entries
            .iter()
            .map(|entry| Self::decode(&entry.key, &entry.value))
            .collect()
    }

    /// Store a new todo under a freshly generated id.
    ///
    /// Either the record exists afterwards or an error is returned.
    ///
    /// # Errors
    ///
    /// - `StoreWrite`: the write was not acknowledged
    pub async fn create(&self, text: TodoText) -> Result<Todo> {
        let todo = Todo::new(self.ids.next_id(), text);
        self.write(&Self::key(&todo.id), &todo, "create").await?;
        tracing::debug!(todo_id = %todo.id, "Todo created");
        Ok(todo)
    }

    /// Fetch a todo by id. `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// - `StoreRead`: the read failed
    /// - `CorruptRecord`: the stored value could not be decoded
    pub async fn get(&self, id: &TodoId) -> Result<Option<Todo>> {
        let key = Self::key(id);
        let value = self
            .store
            .get(&key)
            .await
            .map_err(RepositoryError::StoreRead)?;
        value.map(|bytes| Self::decode(&key, &bytes)).transpose()
    }

    /// Replace the text of an existing todo.
    ///
    /// If no todo with `id` exists nothing is written, but the attempted
    /// `{id, text}` is still returned. Callers cannot tell the two cases
    /// apart from the return value.
    ///
    /// # Errors
    ///
    /// - `StoreRead`: the existence check failed
    /// - `StoreWrite`: the write was not acknowledged
    pub async fn update(&self, id: &TodoId, text: TodoText) -> Result<Todo> {
        let todo = Todo::new(id.clone(), text);
        let key = Self::key(id);
        let exists = self
            .store
            .get(&key)
            .await
            .map_err(RepositoryError::StoreRead)?
            .is_some();

        if exists {
            self.write(&key, &todo, "update").await?;
            tracing::debug!(todo_id = %id, "Todo updated");
        } else {
            tracing::debug!(todo_id = %id, "Update skipped, todo does not exist");
        }
        Ok(todo)
    }

    /// Remove a todo. Removing a missing todo is a no-op.
    ///
    /// # Errors
    ///
    /// - `StoreRead`: the existence check failed
    /// - `StoreWrite`: the delete was not acknowledged
    pub async fn delete(&self, id: &TodoId) -> Result<()> {
        let key = Self::key(id);
        let exists = self
            .store
            .get(&key)
            .await
            .map_err(RepositoryError::StoreRead)?
            .is_some();
        if !exists {
            return Ok(());
        }

        self.store
            .delete(&key)
            .await
            .map_err(RepositoryError::StoreWrite)?;
        metrics::counter!("todo.repository.writes", "operation" => "delete").increment(1);
        tracing::debug!(todo_id = %id, "Todo deleted");
        Ok(())
    }
}

impl std::fmt::Debug for TodoRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoRepository").finish_non_exhaustive()
    }
}
