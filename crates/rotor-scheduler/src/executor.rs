use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, warn};

use rotor_core::SlotId;
use rotor_store::{keys, Store};
use rotor_tasks::DeferredTask;

use crate::controller::ScheduleController;
use crate::driver::SlotDriver;
use crate::error::Result;

/// Runs one switch round whenever a deferred task fires.
///
/// Reads slot flags and play state fresh from the store at fire time:
/// configuration may have changed while the task waited in the queue. A
/// failing slot is recorded and never aborts the rest of the round.
pub struct SwitchExecutor {
    store: Store,
    driver: Arc<dyn SlotDriver>,
    controller: ScheduleController,
}

impl SwitchExecutor {
    pub fn new(store: Store, driver: Arc<dyn SlotDriver>, controller: ScheduleController) -> Self {
        Self {
            store,
            driver,
            controller,
        }
    }

    /// Switch every currently enabled slot, writing each outcome into the
    /// slot's result key.
    pub async fn execute(&self) -> Result<()> {
        for slot in SlotId::all(self.driver.slot_count()) {
            if !self.store.get_bool(&keys::slot_enabled(slot), true)? {
                debug!(%slot, "slot disabled — skipped");
                continue;
            }

            let outcome = match self.driver.activate(slot).await {
                Ok(text) => {
                    info!(%slot, "slot switched");
                    text
                }
                Err(e) => {
                    warn!(%slot, "switch failed: {e}");
                    format!("Failed: {e}")
                }
            };
            self.store.set_text(&keys::slot_result(slot), &outcome)?;
        }
        Ok(())
    }

    /// Handle one fired task: run the round, then arm the next window if
    /// the schedule is still playing at fire time.
    pub async fn fire(&self, now_ms: i64) -> Result<()> {
        self.execute().await?;
        if self.controller.is_playing()? {
            self.controller.reschedule(now_ms)?;
        } else {
            debug!("paused during wait — next round not armed");
        }
        Ok(())
    }

    /// Drain the fired-task channel, running one round per fired task,
    /// until `shutdown` broadcasts `true` or the channel closes.
    pub async fn run(
        self,
        mut fired_rx: mpsc::Receiver<DeferredTask>,
        mut shutdown: watch::Receiver<bool>,
    ) {
        info!("switch executor started");
        loop {
            tokio::select! {
                maybe_task = fired_rx.recv() => {
                    match maybe_task {
                        Some(task) => {
                            info!(task_id = %task.id, "switch task fired");
                            if let Err(e) = self.fire(Utc::now().timestamp_millis()).await {
                                error!("switch round error: {e}");
                            }
                        }
                        None => {
                            info!("fired channel closed — switch executor stopping");
                            break;
                        }
                    }
                }
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        info!("switch executor shutting down");
                        break;
                    }
                }
            }
        }
    }
}
