// error.rs — Error types for persistence and tracking.

use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur while storing, loading, or mutating the goal
/// collection.
///
/// The tracker itself logs and swallows persistence failures — the
/// in-memory list stays the source of truth for the session — so these
/// mostly surface in storage-backend code and tests.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// A storage I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// Failed to serialize/deserialize the goal blob.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A goal with this id is already in the store.
    #[error("goal already tracked: {0}")]
    DuplicateGoal(Uuid),

    /// A notification sink failed to accept an event (non-fatal).
    #[error("notification error: {0}")]
    Notification(String),
}
