use serde::{Deserialize, Serialize};

/// A persisted one-shot task record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeferredTask {
    /// UUID v4 string — primary key.
    pub id: String,
    /// Label grouping tasks for cancellation.
    pub tag: String,
    /// Epoch milliseconds at which the task becomes due.
    pub due_at: i64,
    /// ISO-8601 timestamp of enqueue.
    pub created_at: String,
}
