//! Eligibility check for hard-state notifications.

use tracing::debug;

use vigil_core::{Checkable, ConfigObject, DependencyType, ServiceState, StateType};

/// Decide whether a checkable's current hard state warrants sending
/// notifications. Pure predicate; callers run it both when an event
/// arrives and again right before a scheduled reminder goes out.
pub fn hard_state_notification_check(checkable: &dyn Checkable) -> bool {
    // Unconditional vetoes first.
    if !checkable.is_reachable(DependencyType::Notification) {
        debug!("Not sending for '{}': not reachable", checkable.name());
        return false;
    }
    if checkable.is_in_downtime() {
        debug!("Not sending for '{}': in downtime", checkable.name());
        return false;
    }
    if checkable.is_acknowledged() {
        debug!("Not sending for '{}': acknowledged", checkable.name());
        return false;
    }
    if checkable.is_flapping() {
        debug!("Not sending for '{}': flapping", checkable.name());
        return false;
    }

    let mut send = true;

    // The checkable is in a hard state here; the second arm is a recovery.
    if checkable.last_state_type() == StateType::Soft
        || (checkable.last_state_type() == StateType::Hard
            && checkable.last_state() != ServiceState::Ok
            && checkable.state() == ServiceState::Ok)
    {
        debug!(
            "Sending for '{}': soft -> hard or recovery",
            checkable.name()
        );
        send = true;
    }

    if checkable.is_volatile() && checkable.state_type() == StateType::Hard {
        debug!("Sending for '{}': volatile in hard state", checkable.name());
        send = true;
    }

    // Overrides run after the positive rules; the order is observable.
    if checkable.last_state() == ServiceState::Ok
        && checkable.last_state_type() == StateType::Soft
    {
        // No notifications for SOFT-OK -> HARD-OK.
        debug!("Not sending for '{}': soft-ok -> hard-ok", checkable.name());
        send = false;
    }

    if checkable.is_volatile()
        && checkable.last_state() == ServiceState::Ok
        && checkable.state() == ServiceState::Ok
    {
        // No notifications for volatile OK -> OK changes.
        debug!("Not sending for '{}': volatile ok -> ok", checkable.name());
        send = false;
    }

    send
}
