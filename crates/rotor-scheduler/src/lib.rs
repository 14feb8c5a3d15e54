//! `rotor-scheduler` — periodic slot-switch scheduling and reconciliation.
//!
//! # Overview
//!
//! The [`controller::ScheduleController`] owns the play/pause state and the
//! switch interval. Every (re)schedule cancels any outstanding deferred
//! task, persists the next-fire timestamp, and enqueues one fresh task.
//! When that task fires, the [`executor::SwitchExecutor`] walks the enabled
//! slots and performs the platform switch through a [`driver::SlotDriver`],
//! recording each outcome per slot.
//!
//! The [`reconcile::Reconciler`] ticks at 1 Hz, recomputing the displayed
//! countdown from the persisted next-fire time and syncing slot toggles
//! between the live [`panel::Panel`] and the store.
//!
//! # Components
//!
//! | Component            | Role                                            |
//! |----------------------|-------------------------------------------------|
//! | `ScheduleController` | interval + play/pause, (re)arms the switch task |
//! | `Reconciler`         | 1 Hz display/store sync                         |
//! | `SwitchExecutor`     | runs one switch round when a task fires         |
//! | `Panel`              | live view-model shared with the HTTP surface    |
//! | `SlotDriver`         | platform seam: slot count + activation call     |

pub mod controller;
pub mod driver;
pub mod error;
pub mod executor;
pub mod panel;
pub mod reconcile;
pub mod types;

pub use controller::ScheduleController;
pub use driver::{DriverError, SlotDriver};
pub use error::{Result, ScheduleError};
pub use executor::SwitchExecutor;
pub use panel::{Countdown, Panel, PanelSnapshot, SlotStatus};
pub use reconcile::Reconciler;
pub use types::{
    ScheduleSnapshot, DEFAULT_INTERVAL_SECS, MIN_INTERVAL_SECS, PENDING_RESULT, SWITCH_TAG,
};
