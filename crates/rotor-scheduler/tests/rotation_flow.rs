// End-to-end rotation flow over an injected clock: the controller arms the
// window, the queue hands the task over at its due time, the executor
// switches, and the reconciler keeps the display in step with the store.

use std::sync::Arc;

use async_trait::async_trait;
use rusqlite::Connection;

use rotor_core::SlotId;
use rotor_scheduler::{
    Countdown, DriverError, Panel, Reconciler, ScheduleController, SlotDriver, SwitchExecutor,
    SWITCH_TAG,
};
use rotor_store::Store;
use rotor_tasks::TaskQueue;

struct FakeDriver {
    slots: u8,
}

#[async_trait]
impl SlotDriver for FakeDriver {
    fn slot_count(&self) -> u8 {
        self.slots
    }

    async fn activate(&self, _slot: SlotId) -> Result<String, DriverError> {
        Ok("Switched".to_string())
    }
}

struct Harness {
    store: Store,
    tasks: TaskQueue,
    controller: ScheduleController,
    panel: Panel,
    reconciler: Reconciler,
    executor: SwitchExecutor,
}

fn harness(slots: u8) -> Harness {
    let store = Store::new(Connection::open_in_memory().unwrap()).unwrap();
    let tasks = TaskQueue::new(Connection::open_in_memory().unwrap()).unwrap();
    let controller = ScheduleController::new(store.clone(), tasks.clone());
    let panel = Panel::new(&store, slots).unwrap();
    let reconciler = Reconciler::new(store.clone(), panel.clone());
    let executor = SwitchExecutor::new(
        store.clone(),
        Arc::new(FakeDriver { slots }),
        controller.clone(),
    );
    Harness {
        store,
        tasks,
        controller,
        panel,
        reconciler,
        executor,
    }
}

#[tokio::test]
async fn full_rotation_cycle() {
    let h = harness(3);

    // t=0: default interval 120 s, playing. Arm the first window.
    h.controller.on_start(0).unwrap();
    assert_eq!(h.store.get_i64("nextSwitch", -1).unwrap(), 120_000);
    assert_eq!(h.tasks.outstanding(SWITCH_TAG).unwrap(), 1);

    // t=60 s: a display tick shows 60 seconds remaining.
    h.reconciler.tick(60_000).unwrap();
    assert_eq!(h.panel.countdown(), Countdown::Remaining { seconds: 60 });

    // t=120 s: the task comes due and the executor runs the round.
    let fired = h.tasks.due(120_000).unwrap();
    assert_eq!(fired.len(), 1);
    h.executor.fire(120_000).await.unwrap();

    assert_eq!(h.store.get_text("next_SIM1", "").unwrap(), "Switched");

    // The next tick renders the fresh result and the re-armed countdown.
    h.reconciler.tick(121_000).unwrap();
    let snap = h.panel.snapshot();
    assert_eq!(snap.slots[0].label, "SIM1: Switched");
    assert_eq!(snap.countdown, Countdown::Remaining { seconds: 119 });

    // Still periodic: one outstanding task for the following window.
    assert_eq!(h.tasks.outstanding(SWITCH_TAG).unwrap(), 1);
    assert_eq!(h.store.get_i64("nextSwitch", -1).unwrap(), 240_000);
}

#[tokio::test]
async fn pause_midwindow_then_resume_gets_a_full_window() {
    let h = harness(1);

    h.controller.reschedule(0).unwrap(); // next = 120_000

    // t=75 s: 45 seconds remaining on the display.
    h.reconciler.tick(75_000).unwrap();
    assert_eq!(h.panel.countdown(), Countdown::Remaining { seconds: 45 });

    h.controller.pause().unwrap();
    h.reconciler.tick(76_000).unwrap();
    assert_eq!(h.panel.countdown(), Countdown::Paused);

    // Nothing fires at the originally scheduled time.
    assert!(h.tasks.due(120_000).unwrap().is_empty());

    // Resume 10 s after the pause: a fresh 120 s window, not the 45 s rest.
    h.controller.resume(85_000).unwrap();
    assert_eq!(h.store.get_i64("nextSwitch", -1).unwrap(), 205_000);
    assert_eq!(h.tasks.outstanding(SWITCH_TAG).unwrap(), 1);
}

#[tokio::test]
async fn slot_toggle_round_trips_through_the_store() {
    let h = harness(3);

    h.panel.set_enabled(SlotId(3), false).unwrap();
    h.reconciler.tick(1_000).unwrap();
    assert!(!h.store.get_bool("SIM3", true).unwrap());

    // The disabled slot is skipped on the next round.
    h.executor.fire(120_000).await.unwrap();
    assert_eq!(h.store.get_text("next_SIM1", "").unwrap(), "Switched");
    assert_eq!(
        h.store.get_text("next_SIM3", "Pending Switch").unwrap(),
        "Pending Switch"
    );
}

#[tokio::test]
async fn interval_change_midwindow_replaces_the_outstanding_task() {
    let h = harness(1);

    h.controller.reschedule(0).unwrap(); // 120 s window
    h.controller.set_interval("30", 60_000).unwrap();

    // The old task is gone; only the 30 s window remains.
    assert_eq!(h.tasks.outstanding(SWITCH_TAG).unwrap(), 1);
    assert!(h.tasks.due(89_999).unwrap().is_empty());
    assert_eq!(h.tasks.due(90_000).unwrap().len(), 1);
}

#[tokio::test]
async fn restart_survives_with_state_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rotor.db");

    {
        let store = Store::new(Connection::open(&path).unwrap()).unwrap();
        let tasks = TaskQueue::new(Connection::open(&path).unwrap()).unwrap();
        let controller = ScheduleController::new(store.clone(), tasks);
        controller.set_interval("60", 0).unwrap();
        let panel = Panel::new(&store, 2).unwrap();
        panel.set_enabled(SlotId(2), false).unwrap();
        Reconciler::new(store, panel).tick(1_000).unwrap();
    }

    // New process: same file, fresh handles.
    let store = Store::new(Connection::open(&path).unwrap()).unwrap();
    let tasks = TaskQueue::new(Connection::open(&path).unwrap()).unwrap();
    let controller = ScheduleController::new(store.clone(), tasks.clone());

    assert_eq!(controller.interval_secs().unwrap(), 60);
    let panel = Panel::new(&store, 2).unwrap();
    assert_eq!(panel.enabled(SlotId(2)), Some(false));

    // Cold start re-arms exactly one task from the restart time.
    controller.on_start(500_000).unwrap();
    assert_eq!(tasks.outstanding(SWITCH_TAG).unwrap(), 1);
    assert_eq!(store.get_i64("nextSwitch", -1).unwrap(), 560_000);
}
