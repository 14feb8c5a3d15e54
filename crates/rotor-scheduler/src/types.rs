use serde::Serialize;

/// Tag under which every switch task is enqueued and cancelled.
pub const SWITCH_TAG: &str = "switch";

/// Smallest accepted switch interval in seconds.
pub const MIN_INTERVAL_SECS: i64 = 10;

/// Interval used until the user saves one.
pub const DEFAULT_INTERVAL_SECS: i64 = 120;

/// Result text shown for a slot that has never been switched.
pub const PENDING_RESULT: &str = "Pending Switch";

/// Point-in-time view of the persisted schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScheduleSnapshot {
    pub interval_secs: i64,
    /// Epoch milliseconds of the next fire. Stale while paused.
    pub next_switch_ms: i64,
    pub playing: bool,
}
