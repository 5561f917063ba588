//! Check and state vocabulary shared across the monitoring system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether a checkable's state has settled.
///
/// A state is `Soft` while retry attempts are still running and becomes
/// `Hard` once it is stable. Only `Hard` transitions produce notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StateType {
    Soft,
    Hard,
}

/// Raw state reported by a check.
///
/// Hosts map onto this as Up → `Ok` and Down → `Critical`; `Ok` is the
/// recovery marker everywhere a handler asks "is this OK/Up".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ServiceState {
    Ok = 0,
    Warning = 1,
    Critical = 2,
    Unknown = 3,
}

/// Dependency traversal mode for reachability checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DependencyType {
    /// Reachability for check execution purposes.
    Checking,
    /// Reachability for notification purposes.
    Notification,
}

/// Outcome of a single check execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    pub state: ServiceState,
    pub output: String,
    pub execution_end: DateTime<Utc>,
}

impl CheckResult {
    pub fn new(state: ServiceState, output: impl Into<String>) -> Self {
        Self {
            state,
            output: output.into(),
            execution_end: Utc::now(),
        }
    }
}

/// Kind of notification being sent.
///
/// The scheduler core produces `Problem`, `Recovery`, `FlappingStart`,
/// `FlappingEnd`, and `Acknowledgement`; the remaining members belong to
/// the delivery subsystem's filter vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotificationType {
    DowntimeStart,
    DowntimeEnd,
    DowntimeRemoved,
    Custom,
    Acknowledgement,
    Problem,
    Recovery,
    FlappingStart,
    FlappingEnd,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_state_severity_ordering() {
        assert!(ServiceState::Ok < ServiceState::Warning);
        assert!(ServiceState::Warning < ServiceState::Critical);
        assert!(ServiceState::Critical < ServiceState::Unknown);
    }

    #[test]
    fn check_result_captures_state() {
        let cr = CheckResult::new(ServiceState::Critical, "disk full");
        assert_eq!(cr.state, ServiceState::Critical);
        assert_eq!(cr.output, "disk full");
    }
}
