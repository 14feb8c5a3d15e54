use chrono::Utc;
use tokio::sync::{mpsc, watch};
use tracing::{error, info, warn};

use crate::queue::TaskQueue;
use crate::types::DeferredTask;

/// Polls the task table at 1 Hz and forwards due tasks for execution.
///
/// Fired tasks are delivered over an mpsc channel with `try_send` so a slow
/// consumer can never stall the poll loop.
pub struct TaskRunner {
    queue: TaskQueue,
    fired_tx: mpsc::Sender<DeferredTask>,
}

impl TaskRunner {
    pub fn new(queue: TaskQueue, fired_tx: mpsc::Sender<DeferredTask>) -> Self {
        Self { queue, fired_tx }
    }

    /// Main poll loop. Runs until `shutdown` broadcasts `true`.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        info!("task runner started");

        let mut interval = tokio::time::interval(std::time::Duration::from_secs(1));
        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let now_ms = Utc::now().timestamp_millis();
                    match self.queue.due(now_ms) {
                        Ok(tasks) => {
                            for task in tasks {
                                info!(task_id = %task.id, tag = %task.tag, "task due");
                                if self.fired_tx.try_send(task).is_err() {
                                    warn!("fired channel full or closed — task dropped");
                                }
                            }
                        }
                        Err(e) => error!("task poll error: {e}"),
                    }
                }
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        info!("task runner shutting down");
                        break;
                    }
                }
            }
        }
    }
}
