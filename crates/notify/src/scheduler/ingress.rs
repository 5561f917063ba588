//! Handlers for the inbound monitoring signals.
//!
//! Each handler mutates the queues under the scheduler mutex and notifies
//! the condvar before releasing it. `begin_execute` always runs outside
//! the lock: delivery must not be able to deadlock against a handler
//! re-entering the scheduler.

use std::sync::Arc;

use tracing::debug;

use vigil_core::{
    CheckResult, Checkable, ConfigObject, DependencyType, Notification, NotificationType,
    ServiceState, StateType,
};

use crate::eligibility::hard_state_notification_check;
use crate::schedule::ScheduleInfo;

use super::core::Shared;

/// A checkable settled into a hard state: notify immediately and queue a
/// reminder (problems) or evict the reminder (recoveries).
pub(crate) fn state_change(
    shared: &Shared,
    checkable: &Arc<dyn Checkable>,
    check_result: &CheckResult,
    state_type: StateType,
) {
    if state_type != StateType::Hard {
        return;
    }

    debug!("Hard state change for '{}'", checkable.name());
    if !hard_state_notification_check(checkable.as_ref()) {
        return;
    }

    let ntype = if check_result.state == ServiceState::Ok {
        NotificationType::Recovery
    } else {
        NotificationType::Problem
    };

    for notification in checkable.notifications() {
        debug!(
            "'{}' triggers notification '{}' ({:?})",
            checkable.name(),
            notification.name(),
            ntype
        );
        notification.begin_execute(ntype, checkable.last_check_result(), false, false, None, None);

        let mut queues = shared.queues.lock().unwrap();
        if ntype != NotificationType::Recovery {
            let info = ScheduleInfo::of(&notification);
            debug!(
                "Queued reminder for '{}' at {}",
                notification.name(),
                info.next_message
            );
            queues.idle.replace(info);
        } else {
            queues.idle.remove(&notification.name());
        }
        shared.cv.notify_all();
    }
}

/// A checkable started or stopped flapping: notify, and queue a reminder
/// for flapping starts.
pub(crate) fn flapping_changed(shared: &Shared, checkable: &Arc<dyn Checkable>) {
    let ntype = if checkable.is_flapping() {
        NotificationType::FlappingStart
    } else {
        NotificationType::FlappingEnd
    };
    debug!("'{}' flapping changed ({:?})", checkable.name(), ntype);

    for notification in checkable.notifications() {
        notification.begin_execute(ntype, checkable.last_check_result(), false, false, None, None);

        let mut queues = shared.queues.lock().unwrap();
        if ntype != NotificationType::FlappingEnd {
            queues.idle.replace(ScheduleInfo::of(&notification));
        }
        shared.cv.notify_all();
    }
}

/// A problem was acknowledged: pass author and comment through to every
/// attached notification. The queues are untouched.
pub(crate) fn acknowledgement_set(checkable: &Arc<dyn Checkable>, author: &str, text: &str) {
    for notification in checkable.notifications() {
        notification.begin_execute(
            NotificationType::Acknowledgement,
            checkable.last_check_result(),
            false,
            false,
            Some(author),
            Some(text),
        );
    }
}

/// A configuration object's active or paused flag changed. Notifications
/// that became responsible here are queued; ones that ceased to be are
/// evicted from both queues.
pub(crate) fn object_changed(shared: &Shared, object: &Arc<dyn ConfigObject>) {
    let Some(notification) = Arc::clone(object).as_notification() else {
        return;
    };

    let same_zone = notification
        .zone_name()
        .map_or(true, |zone| zone == shared.config.local_zone);

    let checkable = notification.checkable();

    if checkable.state_type() == StateType::Soft {
        return;
    }
    if checkable.state() == ServiceState::Ok {
        return;
    }
    if !checkable.is_reachable(DependencyType::Notification)
        || checkable.is_in_downtime()
        || checkable.is_acknowledged()
        || checkable.is_flapping()
    {
        return;
    }

    let mut queues = shared.queues.lock().unwrap();
    if notification.is_active() && !notification.is_paused() && same_zone {
        // Leave it alone while its dispatch is in flight; the callback
        // re-admits it.
        if queues.pending.contains(&notification.name()) {
            shared.cv.notify_all();
            return;
        }

        if queues.idle.insert(ScheduleInfo::of(&notification)) {
            debug!(
                "Queued '{}' at {}",
                notification.name(),
                notification.next_notification()
            );
        }
    } else {
        queues.idle.remove(&notification.name());
        queues.pending.remove(&notification.name());
    }
    shared.cv.notify_all();
}

/// A notification's reminder time moved: refresh the idle entry's position
/// in the time index.
pub(crate) fn next_notification_changed(shared: &Shared, notification: &Arc<dyn Notification>) {
    // TODO: no producer emits this signal yet; verify the wiring once the
    // config layer fires it on reminder-time updates.
    debug!(
        "'{}' next notification moved to {}",
        notification.name(),
        notification.next_notification()
    );

    let mut queues = shared.queues.lock().unwrap();
    queues.idle.replace(ScheduleInfo::of(notification));
    shared.cv.notify_all();
}
