//! The scheduler thread and the dispatch callback.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::debug;

use vigil_core::{Checkable, ConfigObject, Notification, NotificationType};

use crate::eligibility::hard_state_notification_check;
use crate::schedule::ScheduleInfo;

use super::core::Shared;

/// Delay before a dispatch against an inactive notification is retried.
const INACTIVE_RETRY_SECS: i64 = 60;

/// Scheduler thread body. Holds the queue lock except while sleeping and
/// while handing a promoted entry to the dispatch pool.
pub(crate) fn run(shared: Arc<Shared>) {
    let mut queues = shared.queues.lock().unwrap();

    loop {
        while queues.idle.is_empty() && !queues.stopped {
            queues = shared.cv.wait(queues).unwrap();
        }
        if queues.stopped {
            break;
        }

        let Some(next) = queues.idle.peek_next().cloned() else {
            continue;
        };

        let wait = next.next_message.signed_duration_since(Utc::now());
        if wait > Duration::zero() {
            // A wake before the deadline simply re-evaluates the minimum;
            // an event may have moved it.
            let timeout = wait.to_std().unwrap_or_default();
            debug!(
                "Waiting {:?} until '{}' is due",
                timeout,
                next.notification.name()
            );
            let (guard, _) = shared.cv.wait_timeout(queues, timeout).unwrap();
            queues = guard;
            continue;
        }

        // Promote. The event bus may have advanced the reminder time
        // between peek and now, so re-read it from the handle.
        let notification = Arc::clone(&next.notification);
        queues.idle.remove(&notification.name());
        let info = ScheduleInfo::of(&notification);
        debug!(
            "Promoting '{}', reminder scheduled for {}",
            notification.name(),
            info.next_message
        );
        queues.pending.insert(info);

        drop(queues);
        let worker_shared = Arc::clone(&shared);
        shared.pool.spawn(move || {
            send_message(worker_shared, notification, NotificationType::Problem, true);
        });
        queues = shared.queues.lock().unwrap();
    }
}

/// Dispatch callback. Runs on the worker pool; never holds the queue lock
/// while delivery runs.
pub(crate) fn send_message(
    shared: Arc<Shared>,
    notification: Arc<dyn Notification>,
    ntype: NotificationType,
    reminder: bool,
) {
    if !notification.is_active() {
        // Reschedule rather than forget: the object may come back.
        debug!(
            "'{}' is inactive, retrying in {}s",
            notification.name(),
            INACTIVE_RETRY_SECS
        );
        let mut queues = shared.queues.lock().unwrap();
        queues.pending.remove(&notification.name());
        notification.set_next_notification(Utc::now() + Duration::seconds(INACTIVE_RETRY_SECS));
        queues.idle.insert(ScheduleInfo::of(&notification));
        shared.cv.notify_all();
        return;
    }

    let checkable = notification.checkable();
    if hard_state_notification_check(checkable.as_ref()) {
        notification.begin_execute(
            ntype,
            checkable.last_check_result(),
            false,
            reminder,
            None,
            None,
        );
    } else {
        // Not eligible right now: push the reminder one interval out and
        // let the next pass re-evaluate.
        let interval = Duration::from_std(notification.renotification_interval())
            .unwrap_or_else(|_| Duration::seconds(INACTIVE_RETRY_SECS));
        let next = Utc::now() + interval;
        debug!(
            "'{}' not eligible, next reminder at {}",
            notification.name(),
            next
        );
        notification.set_next_notification(next);
    }

    let mut queues = shared.queues.lock().unwrap();
    if queues.pending.remove(&notification.name()) {
        if notification.is_active() {
            queues.idle.insert(ScheduleInfo::of(&notification));
        }
        shared.cv.notify_all();
    }
}
