use chrono::Utc;
use tokio::sync::watch;
use tracing::{debug, error, info};

use rotor_core::SlotId;
use rotor_store::{keys, Store};

use crate::error::Result;
use crate::panel::{Countdown, Panel};
use crate::types::PENDING_RESULT;

/// 1 Hz sync between the durable store and the live panel.
///
/// Each tick recomputes the countdown from the persisted next-fire time,
/// persists any slot toggle the user flipped since the last tick, and
/// refreshes slot labels from the store. The panel wins for `enabled`, the
/// store wins for result text.
pub struct Reconciler {
    store: Store,
    panel: Panel,
}

impl Reconciler {
    pub fn new(store: Store, panel: Panel) -> Self {
        Self { store, panel }
    }

    /// One reconciliation pass at wall-clock `now_ms`.
    pub fn tick(&self, now_ms: i64) -> Result<()> {
        let playing = self.store.get_bool(keys::PLAYING, true)?;
        // A never-written next-fire time reads as "due now".
        let next = self.store.get_i64(keys::NEXT_SWITCH, now_ms)?;

        if playing {
            let remaining = ((next - now_ms) / 1000).max(0);
            self.panel
                .set_countdown(Countdown::Remaining { seconds: remaining });
        } else {
            self.panel.set_countdown(Countdown::Paused);
        }

        for slot in SlotId::all(self.panel.sim_slots()) {
            let live = match self.panel.enabled(slot) {
                Some(v) => v,
                None => continue,
            };
            let enabled_key = keys::slot_enabled(slot);
            if self.store.get_bool(&enabled_key, true)? != live {
                self.store.set_bool(&enabled_key, live)?;
                debug!(%slot, enabled = live, "slot toggle persisted");
            }

            let result = self.store.get_text(&keys::slot_result(slot), PENDING_RESULT)?;
            self.panel.set_label(slot, format!("{slot}: {result}"));
        }
        Ok(())
    }

    /// Tick loop. Re-arms one second after each completed pass (no
    /// overlapping ticks) until `shutdown` broadcasts `true`.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        info!("reconciler started");

        let mut interval = tokio::time::interval(std::time::Duration::from_secs(1));
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = interval.tick() => {
                    if let Err(e) = self.tick(Utc::now().timestamp_millis()) {
                        error!("reconcile tick error: {e}");
                    }
                }
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        info!("reconciler shutting down");
                        break;
                    }
                }
            }
        }
    }
}
