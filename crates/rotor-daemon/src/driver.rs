use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

use rotor_core::SlotId;
use rotor_scheduler::{DriverError, SlotDriver};

/// Stand-in platform driver: logs the activation instead of touching a
/// modem. Slot count comes from config since there is no hardware to ask.
pub struct LoggingDriver {
    sim_slots: u8,
}

impl LoggingDriver {
    pub fn new(sim_slots: u8) -> Self {
        Self { sim_slots }
    }
}

#[async_trait]
impl SlotDriver for LoggingDriver {
    fn slot_count(&self) -> u8 {
        self.sim_slots
    }

    async fn activate(&self, slot: SlotId) -> Result<String, DriverError> {
        info!(%slot, "activating slot");
        Ok(format!("Switched at {}", Utc::now().format("%H:%M:%S")))
    }
}
