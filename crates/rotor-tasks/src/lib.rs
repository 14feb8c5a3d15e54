//! `rotor-tasks` — durable deferred-task facility with SQLite persistence.
//!
//! # Overview
//!
//! A task is a one-shot row in a SQLite `tasks` table: a tag, an absolute
//! due time, nothing else. The [`runner::TaskRunner`] polls the table every
//! second and forwards every task whose `due_at` has arrived over an mpsc
//! channel to whoever registered the receiving end.
//!
//! Because rows live in the database, a task enqueued before a process
//! death is still delivered after restart: at-least-once delivery, after
//! the delay has elapsed. The facility has no "replace" primitive and does
//! not enforce one-task-per-tag; callers wanting exclusivity must issue
//! [`queue::TaskQueue::cancel_all`] before every enqueue.

pub mod db;
pub mod error;
pub mod queue;
pub mod runner;
pub mod types;

pub use error::{Result, TaskError};
pub use queue::TaskQueue;
pub use runner::TaskRunner;
pub use types::DeferredTask;
