//! Mock configuration objects for unit tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration as StdDuration;

use chrono::{DateTime, Utc};

use vigil_core::{
    CheckResult, Checkable, ConfigObject, DependencyType, Notification, NotificationType,
    ServiceState, StateType,
};

/// Mutable state of a mock checkable.
#[derive(Clone)]
pub(crate) struct CheckableState {
    pub state_type: StateType,
    pub last_state_type: StateType,
    pub state: ServiceState,
    pub last_state: ServiceState,
    pub reachable: bool,
    pub in_downtime: bool,
    pub acknowledged: bool,
    pub flapping: bool,
    pub volatile: bool,
}

impl Default for CheckableState {
    fn default() -> Self {
        // A freshly settled hard problem that is eligible for notifications.
        Self {
            state_type: StateType::Hard,
            last_state_type: StateType::Soft,
            state: ServiceState::Critical,
            last_state: ServiceState::Critical,
            reachable: true,
            in_downtime: false,
            acknowledged: false,
            flapping: false,
            volatile: false,
        }
    }
}

pub(crate) struct MockCheckable {
    name: String,
    state: RwLock<CheckableState>,
    check_result: RwLock<Option<CheckResult>>,
    notifications: RwLock<Vec<Arc<dyn Notification>>>,
}

impl MockCheckable {
    pub fn new(name: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            state: RwLock::new(CheckableState::default()),
            check_result: RwLock::new(None),
            notifications: RwLock::new(Vec::new()),
        })
    }

    pub fn set_state(&self, update: impl FnOnce(&mut CheckableState)) {
        update(&mut self.state.write().unwrap());
    }

    pub fn set_check_result(&self, cr: CheckResult) {
        *self.check_result.write().unwrap() = Some(cr);
    }

    pub fn attach(&self, notification: Arc<dyn Notification>) {
        self.notifications.write().unwrap().push(notification);
    }
}

impl ConfigObject for MockCheckable {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn is_active(&self) -> bool {
        true
    }

    fn is_paused(&self) -> bool {
        false
    }

    fn as_notification(self: Arc<Self>) -> Option<Arc<dyn Notification>> {
        None
    }
}

impl Checkable for MockCheckable {
    fn state_type(&self) -> StateType {
        self.state.read().unwrap().state_type
    }

    fn last_state_type(&self) -> StateType {
        self.state.read().unwrap().last_state_type
    }

    fn state(&self) -> ServiceState {
        self.state.read().unwrap().state
    }

    fn last_state(&self) -> ServiceState {
        self.state.read().unwrap().last_state
    }

    fn is_reachable(&self, _dependency: DependencyType) -> bool {
        self.state.read().unwrap().reachable
    }

    fn is_in_downtime(&self) -> bool {
        self.state.read().unwrap().in_downtime
    }

    fn is_acknowledged(&self) -> bool {
        self.state.read().unwrap().acknowledged
    }

    fn is_flapping(&self) -> bool {
        self.state.read().unwrap().flapping
    }

    fn is_volatile(&self) -> bool {
        self.state.read().unwrap().volatile
    }

    fn last_check_result(&self) -> Option<CheckResult> {
        self.check_result.read().unwrap().clone()
    }

    fn notifications(&self) -> Vec<Arc<dyn Notification>> {
        self.notifications.read().unwrap().clone()
    }
}

/// One recorded `begin_execute` call.
#[derive(Debug, Clone)]
pub(crate) struct Execution {
    pub ntype: NotificationType,
    pub check_result: Option<CheckResult>,
    pub forced: bool,
    pub reminder: bool,
    pub author: Option<String>,
    pub text: Option<String>,
}

pub(crate) struct MockNotification {
    name: String,
    active: AtomicBool,
    paused: AtomicBool,
    zone: RwLock<Option<String>>,
    checkable: RwLock<Option<Arc<dyn Checkable>>>,
    next: RwLock<DateTime<Utc>>,
    interval: StdDuration,
    executions: Mutex<Vec<Execution>>,
}

impl MockNotification {
    pub fn new(name: &str, next: DateTime<Utc>) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            active: AtomicBool::new(true),
            paused: AtomicBool::new(false),
            zone: RwLock::new(None),
            checkable: RwLock::new(None),
            next: RwLock::new(next),
            interval: StdDuration::from_secs(300),
            executions: Mutex::new(Vec::new()),
        })
    }

    /// Point this notification at its checkable (call once during setup).
    pub fn bind(&self, checkable: Arc<dyn Checkable>) {
        *self.checkable.write().unwrap() = Some(checkable);
    }

    pub fn set_active(&self, active: bool) {
        self.active.store(active, Ordering::SeqCst);
    }

    pub fn set_paused(&self, paused: bool) {
        self.paused.store(paused, Ordering::SeqCst);
    }

    pub fn set_zone(&self, zone: Option<String>) {
        *self.zone.write().unwrap() = zone;
    }

    pub fn executions(&self) -> Vec<Execution> {
        self.executions.lock().unwrap().clone()
    }

    pub fn execution_count(&self) -> usize {
        self.executions.lock().unwrap().len()
    }
}

impl ConfigObject for MockNotification {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    fn as_notification(self: Arc<Self>) -> Option<Arc<dyn Notification>> {
        Some(self)
    }
}

impl Notification for MockNotification {
    fn zone_name(&self) -> Option<String> {
        self.zone.read().unwrap().clone()
    }

    fn checkable(&self) -> Arc<dyn Checkable> {
        self.checkable
            .read()
            .unwrap()
            .clone()
            .expect("mock notification has no checkable bound")
    }

    fn next_notification(&self) -> DateTime<Utc> {
        *self.next.read().unwrap()
    }

    fn set_next_notification(&self, at: DateTime<Utc>) {
        *self.next.write().unwrap() = at;
    }

    fn renotification_interval(&self) -> StdDuration {
        self.interval
    }

    fn begin_execute(
        &self,
        ntype: NotificationType,
        check_result: Option<CheckResult>,
        forced: bool,
        reminder: bool,
        author: Option<&str>,
        text: Option<&str>,
    ) {
        self.executions.lock().unwrap().push(Execution {
            ntype,
            check_result,
            forced,
            reminder,
            author: author.map(str::to_string),
            text: text.map(str::to_string),
        });
    }
}
