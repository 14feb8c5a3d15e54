use serde::{Deserialize, Serialize};

/// Stable handle for one platform slot.
///
/// Slot identifiers are 1-based and fixed for the process lifetime: the
/// platform reports its maximum active slot count once at startup and the
/// set of valid handles is exactly `1..=sim_slots`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotId(pub u8);

impl SlotId {
    /// Iterate every valid handle for a platform reporting `sim_slots` slots.
    pub fn all(sim_slots: u8) -> impl Iterator<Item = SlotId> {
        (1..=sim_slots).map(SlotId)
    }

    /// The 1-based slot index.
    pub fn index(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for SlotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SIM{}", self.0)
    }
}
