use std::sync::{Arc, Mutex};

use serde::Serialize;

use rotor_core::SlotId;
use rotor_store::{keys, Store};

use crate::error::{Result, ScheduleError};
use crate::types::PENDING_RESULT;

/// Countdown portion of the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Countdown {
    Remaining { seconds: i64 },
    Paused,
}

impl Countdown {
    /// The user-facing countdown line.
    pub fn text(&self) -> String {
        match self {
            Countdown::Remaining { seconds } => format!("Next switch in {seconds} seconds"),
            Countdown::Paused => "Switching paused.".to_string(),
        }
    }
}

/// Display state of one slot.
#[derive(Debug, Clone, Serialize)]
pub struct SlotStatus {
    pub slot: u8,
    pub enabled: bool,
    pub label: String,
}

/// Full display state, as returned to the HTTP surface.
#[derive(Debug, Clone, Serialize)]
pub struct PanelSnapshot {
    pub countdown: Countdown,
    pub slots: Vec<SlotStatus>,
}

struct SlotView {
    enabled: bool,
    label: String,
}

struct PanelInner {
    countdown: Countdown,
    slots: Vec<SlotView>,
}

/// Live view-model shared between the HTTP surface and the reconciler.
///
/// The panel is the source of truth for slot `enabled` toggles (the
/// reconciler persists them); the store is the source of truth for labels
/// (the reconciler refreshes them). Slots are indexed `1..=sim_slots`,
/// fixed at construction.
#[derive(Clone)]
pub struct Panel {
    inner: Arc<Mutex<PanelInner>>,
    sim_slots: u8,
}

impl Panel {
    /// Build the panel for `sim_slots` slots, seeding toggles and labels
    /// from the store so a restart shows the last known state immediately.
    pub fn new(store: &Store, sim_slots: u8) -> Result<Self> {
        let mut slots = Vec::with_capacity(sim_slots as usize);
        for slot in SlotId::all(sim_slots) {
            let enabled = store.get_bool(&keys::slot_enabled(slot), true)?;
            let result = store.get_text(&keys::slot_result(slot), PENDING_RESULT)?;
            slots.push(SlotView {
                enabled,
                label: format!("{slot}: {result}"),
            });
        }
        Ok(Self {
            inner: Arc::new(Mutex::new(PanelInner {
                countdown: Countdown::Remaining { seconds: 0 },
                slots,
            })),
            sim_slots,
        })
    }

    pub fn sim_slots(&self) -> u8 {
        self.sim_slots
    }

    /// Flip a slot's live toggle. Persistence happens on the next
    /// reconciliation tick.
    pub fn set_enabled(&self, slot: SlotId, enabled: bool) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        let view = slot_view_mut(&mut inner, slot, self.sim_slots)?;
        view.enabled = enabled;
        Ok(())
    }

    /// Live toggle state, `None` for an out-of-range slot.
    pub fn enabled(&self, slot: SlotId) -> Option<bool> {
        let inner = self.inner.lock().unwrap();
        let idx = (slot.index() as usize).checked_sub(1)?;
        inner.slots.get(idx).map(|v| v.enabled)
    }

    pub fn set_countdown(&self, countdown: Countdown) {
        self.inner.lock().unwrap().countdown = countdown;
    }

    pub fn countdown(&self) -> Countdown {
        self.inner.lock().unwrap().countdown
    }

    pub fn set_label(&self, slot: SlotId, label: String) {
        let mut inner = self.inner.lock().unwrap();
        if let Ok(view) = slot_view_mut(&mut inner, slot, self.sim_slots) {
            view.label = label;
        }
    }

    pub fn snapshot(&self) -> PanelSnapshot {
        let inner = self.inner.lock().unwrap();
        PanelSnapshot {
            countdown: inner.countdown,
            slots: inner
                .slots
                .iter()
                .enumerate()
                .map(|(i, v)| SlotStatus {
                    slot: (i + 1) as u8,
                    enabled: v.enabled,
                    label: v.label.clone(),
                })
                .collect(),
        }
    }
}

fn slot_view_mut<'a>(
    inner: &'a mut PanelInner,
    slot: SlotId,
    sim_slots: u8,
) -> Result<&'a mut SlotView> {
    let idx = slot.index() as usize;
    if idx == 0 || slot.index() > sim_slots {
        return Err(ScheduleError::UnknownSlot { slot: slot.index() });
    }
    Ok(&mut inner.slots[idx - 1])
}
