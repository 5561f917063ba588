//! Notification scheduling core.
//!
//! This crate provides:
//! - `ScheduleSet`: schedule entries indexed by notification name and by due time
//! - `hard_state_notification_check`: the eligibility predicate for hard states
//! - `NotificationScheduler`: event ingress, renotification timer loop, and
//!   asynchronous dispatch coordination
//! - Stats surface with idle/pending counts per notifier instance

pub mod eligibility;
pub mod schedule;
pub mod scheduler;
pub mod stats;

#[cfg(test)]
pub(crate) mod mock;

pub use eligibility::hard_state_notification_check;
pub use schedule::{ScheduleInfo, ScheduleSet};
pub use scheduler::NotificationScheduler;
pub use stats::{stats_snapshot, NotifierStats, PerfdataValue};
