//! Domain types for to-do items.
//!
//! A to-do list is a flat collection of [`Todo`] records. Each record has an
//! opaque, creation-ordered [`TodoId`] and a piece of user text. The text is
//! the only field that changes after creation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Errors raised when constructing domain values from untrusted input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TodoValueError {
    /// Identifiers must contain at least one character.
    #[error("Todo id cannot be empty")]
    EmptyId,

    /// Identifiers are restricted to ASCII letters, digits, `-` and `_`.
    #[error("Todo id contains an unsupported character: {0:?}")]
    InvalidIdChar(char),

    /// Text must contain at least one non-whitespace character.
    #[error("Todo text cannot be empty")]
    EmptyText,
}

/// Unique identifier for a todo item.
///
/// Identifiers are opaque strings. Freshly generated ones sort
/// lexicographically in creation order, which is what the record store's
/// key ordering relies on for most-recent-first listings. An identifier is
/// never empty and only uses `[A-Za-z0-9_-]`, so it can be dropped into a
/// URL path segment or a CSS id selector as is.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TodoId(String);

impl TodoId {
    /// Creates a `TodoId` from a non-empty string of `[A-Za-z0-9_-]`.
    ///
    /// # Errors
    ///
    /// - [`TodoValueError::EmptyId`] if `value` is empty
    /// - [`TodoValueError::InvalidIdChar`] for the first character outside
    ///   the allowed set
    pub fn new(value: impl Into<String>) -> Result<Self, TodoValueError> {
        let value = value.into();
        if value.is_empty() {
            return Err(TodoValueError::EmptyId);
        }
        if let Some(c) = value
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(TodoValueError::InvalidIdChar(c));
        }
        Ok(Self(value))
    }

    /// Creates a `TodoId` from a UUID, using its hyphenated lowercase form.
    #[must_use]
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id.hyphenated().to_string())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// DOM element id of the rendered item (`todo{id}`).
    #[must_use]
    pub fn dom_id(&self) -> String {
        format!("todo{}", self.0)
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TodoId {
    type Err = TodoValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for TodoId {
    type Error = TodoValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TodoId> for String {
    fn from(id: TodoId) -> Self {
        id.0
    }
}

/// Validated user text for a todo.
///
/// The text is kept exactly as submitted; only blank submissions are
/// rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TodoText(String);

impl TodoText {
    /// Validates user-supplied text.
    ///
    /// # Errors
    ///
    /// Returns [`TodoValueError::EmptyText`] if `value` is empty or only
    /// whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, TodoValueError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(TodoValueError::EmptyText);
        }
        Ok(Self(value))
    }

    /// Returns the text as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the wrapper and returns the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for TodoText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single todo item, exactly as persisted: `{"id": ..., "text": ...}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Unique identifier
    pub id: TodoId,
    /// What needs doing
    pub text: String,
}

impl Todo {
    /// Creates a todo from an id and validated text.
    #[must_use]
    pub fn new(id: TodoId, text: TodoText) -> Self {
        Self {
            id,
            text: text.into_inner(),
        }
    }
}
