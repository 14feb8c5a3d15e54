use thiserror::Error;

/// Errors that can occur within the scheduling subsystem.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// The interval field was empty, non-numeric, or below the 10 s floor.
    /// `notice` carries the user-facing text; no state was mutated.
    #[error("Invalid interval: {notice}")]
    InvalidInterval { notice: String },

    /// A slot index outside the platform-reported `1..=sim_slots` range.
    #[error("Unknown slot: SIM{slot}")]
    UnknownSlot { slot: u8 },

    /// Durable store failure.
    #[error("Store error: {0}")]
    Store(#[from] rotor_store::StoreError),

    /// Deferred-task facility failure.
    #[error("Task queue error: {0}")]
    Tasks(#[from] rotor_tasks::TaskError),
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
