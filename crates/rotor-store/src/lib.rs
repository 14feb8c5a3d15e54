//! `rotor-store` — durable key-value store backed by SQLite.
//!
//! Every configuration value and per-slot state the daemon needs across
//! restarts lives here as one row in a `kv` table. Each `set` is an
//! independent upsert: a written key is immediately visible to subsequent
//! reads and survives process death on its own, with no transaction
//! spanning multiple keys.
//!
//! The canonical key names are owned by the [`keys`] module so no call
//! site builds key strings ad hoc.

pub mod db;
pub mod error;
pub mod keys;
pub mod store;

pub use error::{Result, StoreError};
pub use store::Store;
