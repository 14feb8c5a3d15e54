//! Canonical key names for the durable store.

use rotor_core::SlotId;

/// Switch interval in seconds (i64).
pub const INTERVAL: &str = "interval";
/// Absolute next-fire timestamp in epoch milliseconds (i64). Stale while
/// paused.
pub const NEXT_SWITCH: &str = "nextSwitch";
/// Play/pause state (bool).
pub const PLAYING: &str = "playing";

/// Enabled flag for one slot (bool), e.g. `SIM2`.
pub fn slot_enabled(slot: SlotId) -> String {
    format!("SIM{}", slot.index())
}

/// Last switch result text for one slot, e.g. `next_SIM2`.
pub fn slot_result(slot: SlotId) -> String {
    format!("next_SIM{}", slot.index())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_keys_use_one_based_index() {
        assert_eq!(slot_enabled(SlotId(1)), "SIM1");
        assert_eq!(slot_result(SlotId(4)), "next_SIM4");
    }
}
