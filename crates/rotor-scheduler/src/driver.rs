use async_trait::async_trait;
use thiserror::Error;

use rotor_core::SlotId;

/// Failures the platform can report for a single activation attempt.
///
/// Recorded per slot as display text; never aborts the rest of a round.
#[derive(Debug, Error)]
pub enum DriverError {
    /// The slot exists but cannot currently be activated.
    #[error("slot unavailable: {0}")]
    Unavailable(String),

    /// The platform refused the activation outright.
    #[error("activation rejected: {0}")]
    Rejected(String),
}

/// Platform seam: slot enumeration and the switch side effect.
///
/// The daemon holds exactly one driver for its lifetime. `slot_count` is
/// read once at startup; the slot set does not change at runtime.
#[async_trait]
pub trait SlotDriver: Send + Sync {
    /// Maximum active slot count the platform reports.
    fn slot_count(&self) -> u8;

    /// Activate `slot`. The returned text becomes the slot's last result.
    async fn activate(&self, slot: SlotId) -> std::result::Result<String, DriverError>;
}
