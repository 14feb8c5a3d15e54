pub mod config;
pub mod error;
pub mod types;

pub use config::RotorConfig;
pub use error::{Result, RotorError};
pub use types::SlotId;
