//! Error types for event handling.

use thiserror::Error;

/// Errors that can occur when handling events.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EventError {
    /// The event kind is unknown.
    #[error("unknown event kind: {0}")]
    UnknownEventKind(String),

    /// The resource id category is not one of the defined values.
    #[error("unknown resource id category: {0}")]
    UnknownResourceCategory(i32),

    /// The event kind has no storage table.
    #[error("event kind '{0}' cannot be persisted")]
    NotPersistable(&'static str),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for EventError {
    fn from(err: serde_json::Error) -> Self {
        EventError::Serialization(err.to_string())
    }
}
