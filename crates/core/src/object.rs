//! Handle traits for configuration objects.
//!
//! The configuration object system owns hosts, services, and notification
//! objects; the rest of the system works against these trait seams and
//! holds `Arc` counted references. Identity is the object name, which the
//! configuration system keeps unique.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::check::{CheckResult, DependencyType, NotificationType, ServiceState, StateType};

/// Common surface of every configuration object.
pub trait ConfigObject: Send + Sync {
    /// Unique object name.
    fn name(&self) -> String;

    /// Whether the object is active (not deleted or deactivated).
    fn is_active(&self) -> bool;

    /// Whether the object is paused (owned by another cluster instance).
    fn is_paused(&self) -> bool;

    /// Downcast hook: `Some` for notification objects, `None` otherwise.
    fn as_notification(self: Arc<Self>) -> Option<Arc<dyn Notification>>;
}

/// A host or service whose state is monitored.
pub trait Checkable: ConfigObject {
    fn state_type(&self) -> StateType;

    fn last_state_type(&self) -> StateType;

    /// Current raw state.
    fn state(&self) -> ServiceState;

    /// Raw state before the most recent transition.
    fn last_state(&self) -> ServiceState;

    /// Whether the checkable is reachable under the given dependency
    /// semantics.
    fn is_reachable(&self, dependency: DependencyType) -> bool;

    fn is_in_downtime(&self) -> bool;

    fn is_acknowledged(&self) -> bool;

    fn is_flapping(&self) -> bool;

    /// Volatile checkables re-notify on every hard check result.
    fn is_volatile(&self) -> bool;

    fn last_check_result(&self) -> Option<CheckResult>;

    /// Notification objects attached to this checkable.
    fn notifications(&self) -> Vec<Arc<dyn Notification>>;
}

/// A notification object: pairs a checkable with a delivery policy and a
/// renotification schedule.
pub trait Notification: ConfigObject {
    /// Zone this notification belongs to, if any. `None` means the
    /// notification is not zone-restricted.
    fn zone_name(&self) -> Option<String>;

    /// The checkable this notification is attached to.
    fn checkable(&self) -> Arc<dyn Checkable>;

    /// Instant the next reminder is due.
    fn next_notification(&self) -> DateTime<Utc>;

    /// Move the next reminder to the given instant.
    fn set_next_notification(&self, at: DateTime<Utc>);

    /// Interval between reminders while a problem persists.
    fn renotification_interval(&self) -> Duration;

    /// Hand the notification to the delivery subsystem. Filter evaluation,
    /// template rendering, and transport all happen behind this call;
    /// failures are absorbed there.
    fn begin_execute(
        &self,
        ntype: NotificationType,
        check_result: Option<CheckResult>,
        forced: bool,
        reminder: bool,
        author: Option<&str>,
        text: Option<&str>,
    );
}
