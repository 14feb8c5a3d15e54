use thiserror::Error;

/// Errors that can occur within the deferred-task subsystem.
#[derive(Debug, Error)]
pub enum TaskError {
    /// Underlying SQLite / rusqlite error.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, TaskError>;
