use tracing::info;

use rotor_store::{keys, Store};
use rotor_tasks::TaskQueue;

use crate::error::{Result, ScheduleError};
use crate::types::{ScheduleSnapshot, DEFAULT_INTERVAL_SECS, MIN_INTERVAL_SECS, SWITCH_TAG};

const NOTICE_EMPTY: &str = "Please enter an interval.";
const NOTICE_TOO_SMALL: &str = "Please enter a number greater than 10.";

/// Owns the switch interval and play/pause state.
///
/// Every state transition is persisted before the deferred-task facility is
/// touched, so a crash between the two leaves the durable state describing
/// the intent and [`Self::on_start`] repairs the rest.
///
/// Operations that compute a fire time take the current wall clock as
/// `now_ms` (epoch milliseconds); production callers pass
/// `Utc::now().timestamp_millis()`.
#[derive(Clone)]
pub struct ScheduleController {
    store: Store,
    tasks: TaskQueue,
}

impl ScheduleController {
    pub fn new(store: Store, tasks: TaskQueue) -> Self {
        Self { store, tasks }
    }

    /// Validate and apply the interval text field.
    ///
    /// Empty, non-numeric, or below-floor input fails with
    /// [`ScheduleError::InvalidInterval`] and mutates nothing. On success
    /// the interval is persisted and a fresh window is armed immediately.
    /// Returns the accepted seconds value.
    pub fn set_interval(&self, input: &str, now_ms: i64) -> Result<i64> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ScheduleError::InvalidInterval {
                notice: NOTICE_EMPTY.to_string(),
            });
        }
        let secs: i64 = trimmed
            .parse()
            .map_err(|_| ScheduleError::InvalidInterval {
                notice: NOTICE_TOO_SMALL.to_string(),
            })?;
        if secs < MIN_INTERVAL_SECS {
            return Err(ScheduleError::InvalidInterval {
                notice: NOTICE_TOO_SMALL.to_string(),
            });
        }

        self.store.set_i64(keys::INTERVAL, secs)?;
        info!(interval_secs = secs, "interval updated");
        self.reschedule(now_ms)?;
        Ok(secs)
    }

    /// Cancel any outstanding switch task and arm a fresh full window.
    ///
    /// Cancel is issued before enqueue in every code path so at most one
    /// task is ever outstanding. Calling twice in a row is idempotent: one
    /// task, one persisted next-fire time.
    pub fn reschedule(&self, now_ms: i64) -> Result<i64> {
        let secs = self.interval_secs()?;
        self.tasks.cancel_all(SWITCH_TAG)?;
        let next = now_ms + secs * 1000;
        self.store.set_i64(keys::NEXT_SWITCH, next)?;
        self.tasks.enqueue(SWITCH_TAG, secs as u64, now_ms)?;
        info!(next_switch_ms = next, interval_secs = secs, "switch rescheduled");
        Ok(next)
    }

    /// Stop switching. The stale next-fire time is left in place; the
    /// reconciler suppresses it via the playing flag.
    pub fn pause(&self) -> Result<()> {
        self.store.set_bool(keys::PLAYING, false)?;
        self.tasks.cancel_all(SWITCH_TAG)?;
        info!("switching paused");
        Ok(())
    }

    /// Restart switching with a fresh full window starting now. The
    /// partially elapsed window from before the pause is not resumed.
    pub fn resume(&self, now_ms: i64) -> Result<()> {
        self.store.set_bool(keys::PLAYING, true)?;
        self.reschedule(now_ms)?;
        info!("switching resumed");
        Ok(())
    }

    /// Process-start hook. When the persisted state says playing,
    /// reschedules unconditionally: every cold start is treated as a
    /// resume, so a live task exists even if the queue table was lost with
    /// the previous process. Seconds-remaining precision is not preserved
    /// across restarts, only the existence of a future fire time.
    pub fn on_start(&self, now_ms: i64) -> Result<()> {
        if self.is_playing()? {
            self.reschedule(now_ms)?;
        } else {
            info!("starting paused — no task armed");
        }
        Ok(())
    }

    pub fn interval_secs(&self) -> Result<i64> {
        Ok(self.store.get_i64(keys::INTERVAL, DEFAULT_INTERVAL_SECS)?)
    }

    pub fn is_playing(&self) -> Result<bool> {
        Ok(self.store.get_bool(keys::PLAYING, true)?)
    }

    /// Read the persisted schedule in one call. A never-written next-fire
    /// time defaults to `now_ms` so a fresh install shows zero remaining.
    pub fn snapshot(&self, now_ms: i64) -> Result<ScheduleSnapshot> {
        Ok(ScheduleSnapshot {
            interval_secs: self.interval_secs()?,
            next_switch_ms: self.store.get_i64(keys::NEXT_SWITCH, now_ms)?,
            playing: self.is_playing()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    fn controller() -> ScheduleController {
        let store = Store::new(Connection::open_in_memory().unwrap()).unwrap();
        let tasks = TaskQueue::new(Connection::open_in_memory().unwrap()).unwrap();
        ScheduleController::new(store, tasks)
    }

    fn assert_invalid(result: Result<i64>) {
        assert!(matches!(
            result,
            Err(ScheduleError::InvalidInterval { .. })
        ));
    }

    #[test]
    fn rejects_interval_below_floor() {
        let c = controller();
        assert_invalid(c.set_interval("5", 0));
        // Nothing was persisted and no task was armed.
        assert_eq!(c.interval_secs().unwrap(), DEFAULT_INTERVAL_SECS);
        assert_eq!(c.tasks.outstanding(SWITCH_TAG).unwrap(), 0);
    }

    #[test]
    fn rejects_empty_and_non_numeric_input() {
        let c = controller();
        assert_invalid(c.set_interval("", 0));
        assert_invalid(c.set_interval("   ", 0));
        assert_invalid(c.set_interval("abc", 0));
        assert_eq!(c.tasks.outstanding(SWITCH_TAG).unwrap(), 0);
    }

    #[test]
    fn invalid_input_leaves_previous_interval_in_place() {
        let c = controller();
        c.set_interval("45", 0).unwrap();
        assert_invalid(c.set_interval("9", 50_000));
        assert_eq!(c.interval_secs().unwrap(), 45);
        // The previously armed window is untouched.
        assert_eq!(c.snapshot(0).unwrap().next_switch_ms, 45_000);
    }

    #[test]
    fn valid_interval_persists_and_arms_one_task() {
        let c = controller();
        assert_eq!(c.set_interval("45", 1_000).unwrap(), 45);
        assert_eq!(c.interval_secs().unwrap(), 45);
        assert_eq!(c.snapshot(0).unwrap().next_switch_ms, 46_000);
        assert_eq!(c.tasks.outstanding(SWITCH_TAG).unwrap(), 1);
    }

    #[test]
    fn floor_value_itself_is_accepted() {
        let c = controller();
        assert_eq!(c.set_interval("10", 0).unwrap(), 10);
    }

    #[test]
    fn input_is_trimmed() {
        let c = controller();
        assert_eq!(c.set_interval(" 30 ", 0).unwrap(), 30);
    }

    #[test]
    fn reschedule_is_idempotent() {
        let c = controller();
        c.reschedule(0).unwrap();
        c.reschedule(0).unwrap();
        assert_eq!(c.tasks.outstanding(SWITCH_TAG).unwrap(), 1);
        assert_eq!(c.snapshot(0).unwrap().next_switch_ms, 120_000);
    }

    #[test]
    fn pause_cancels_but_keeps_next_fire_time() {
        let c = controller();
        c.reschedule(0).unwrap();
        c.pause().unwrap();
        assert!(!c.is_playing().unwrap());
        assert_eq!(c.tasks.outstanding(SWITCH_TAG).unwrap(), 0);
        // Stale while paused; the reconciler suppresses it via the playing flag.
        assert_eq!(c.snapshot(0).unwrap().next_switch_ms, 120_000);
    }

    #[test]
    fn resume_starts_a_fresh_full_window() {
        let c = controller();
        c.reschedule(0).unwrap(); // next = 120_000
        c.pause().unwrap(); // mid-window
        c.resume(85_000).unwrap();
        assert!(c.is_playing().unwrap());
        // Full window from resume time, not the 35 s remainder.
        assert_eq!(c.snapshot(0).unwrap().next_switch_ms, 205_000);
        assert_eq!(c.tasks.outstanding(SWITCH_TAG).unwrap(), 1);
    }

    #[test]
    fn repeated_resume_keeps_exactly_one_task() {
        let c = controller();
        c.resume(0).unwrap();
        c.resume(1_000).unwrap();
        c.resume(2_000).unwrap();
        assert_eq!(c.tasks.outstanding(SWITCH_TAG).unwrap(), 1);
    }

    #[test]
    fn on_start_rearms_when_playing() {
        let c = controller();
        c.on_start(7_000).unwrap();
        assert_eq!(c.tasks.outstanding(SWITCH_TAG).unwrap(), 1);
        assert_eq!(c.snapshot(0).unwrap().next_switch_ms, 127_000);
    }

    #[test]
    fn on_start_stays_idle_when_paused() {
        let c = controller();
        c.pause().unwrap();
        c.on_start(7_000).unwrap();
        assert_eq!(c.tasks.outstanding(SWITCH_TAG).unwrap(), 0);
    }
}
