use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};

use tracing::info;

use vigil_core::events::{MonitoringEvents, SlotId};
use vigil_core::{
    CheckResult, Checkable, ConfigObject, Notification, NotifyConfig, StateType, VigilError,
};

use crate::schedule::ScheduleSet;
use crate::stats::NotifierStats;

use super::{dispatch, ingress};

/// Queue state guarded by the scheduler mutex.
///
/// A notification appears in at most one of `idle` and `pending` at any
/// moment while the lock is held; entries only move `idle -> pending ->
/// idle` (or out entirely).
#[derive(Debug, Default)]
pub(crate) struct Queues {
    /// Entries awaiting their next reminder time.
    pub(crate) idle: ScheduleSet,
    /// Entries whose dispatch callback is in flight.
    pub(crate) pending: ScheduleSet,
    /// Cooperative shutdown flag.
    pub(crate) stopped: bool,
}

/// State shared between the event handlers, the scheduler thread, and the
/// dispatch workers.
pub(crate) struct Shared {
    pub(crate) config: NotifyConfig,
    pub(crate) queues: Mutex<Queues>,
    pub(crate) cv: Condvar,
    pub(crate) pool: rayon::ThreadPool,
}

/// Slot ids held while the scheduler is running, so `stop` can disconnect
/// the handlers it connected.
struct EventSubscriptions {
    events: Arc<MonitoringEvents>,
    active_changed: SlotId,
    paused_changed: SlotId,
    state_change: SlotId,
    flapping_changed: SlotId,
    acknowledgement_set: SlotId,
    next_notification_changed: SlotId,
}

impl EventSubscriptions {
    fn disconnect_all(&self) {
        self.events.object_active_changed.disconnect(self.active_changed);
        self.events.object_paused_changed.disconnect(self.paused_changed);
        self.events.state_change.disconnect(self.state_change);
        self.events.flapping_changed.disconnect(self.flapping_changed);
        self.events
            .acknowledgement_set
            .disconnect(self.acknowledgement_set);
        self.events
            .next_notification_changed
            .disconnect(self.next_notification_changed);
    }
}

/// Coordinates renotification scheduling for one notifier instance.
///
/// Multiple instances may coexist; each owns its own queues, scheduler
/// thread, and dispatch pool. The stats surface aggregates across them.
pub struct NotificationScheduler {
    name: String,
    pub(super) shared: Arc<Shared>,
    thread: Option<JoinHandle<()>>,
    subscriptions: Option<EventSubscriptions>,
}

impl NotificationScheduler {
    /// Create a new scheduler instance with the given config.
    pub fn new(name: impl Into<String>, config: NotifyConfig) -> Result<Self, VigilError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.resolved_dispatch_threads())
            .thread_name(|i| format!("notification-dispatch-{i}"))
            .build()
            .map_err(|e| VigilError::WorkerPool(e.to_string()))?;

        Ok(Self {
            name: name.into(),
            shared: Arc::new(Shared {
                config,
                queues: Mutex::new(Queues::default()),
                cv: Condvar::new(),
                pool,
            }),
            thread: None,
            subscriptions: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Subscribe the event handlers and spawn the scheduler thread.
    pub fn start(&mut self, events: &Arc<MonitoringEvents>) -> Result<(), VigilError> {
        if self.thread.is_some() {
            return Err(VigilError::AlreadyRunning(self.name.clone()));
        }

        self.shared.queues.lock().unwrap().stopped = false;

        let shared = Arc::clone(&self.shared);
        let active_changed = events.object_active_changed.connect(move |ev| {
            ingress::object_changed(&shared, &ev.object);
        });

        let shared = Arc::clone(&self.shared);
        let paused_changed = events.object_paused_changed.connect(move |ev| {
            ingress::object_changed(&shared, &ev.object);
        });

        let shared = Arc::clone(&self.shared);
        let state_change = events.state_change.connect(move |ev| {
            ingress::state_change(&shared, &ev.checkable, &ev.check_result, ev.state_type);
        });

        let shared = Arc::clone(&self.shared);
        let flapping_changed = events.flapping_changed.connect(move |ev| {
            ingress::flapping_changed(&shared, &ev.checkable);
        });

        let acknowledgement_set = events.acknowledgement_set.connect(move |ev| {
            ingress::acknowledgement_set(&ev.checkable, &ev.author, &ev.text);
        });

        let shared = Arc::clone(&self.shared);
        let next_notification_changed = events.next_notification_changed.connect(move |ev| {
            ingress::next_notification_changed(&shared, &ev.notification);
        });

        let subscriptions = EventSubscriptions {
            events: Arc::clone(events),
            active_changed,
            paused_changed,
            state_change,
            flapping_changed,
            acknowledgement_set,
            next_notification_changed,
        };

        let shared = Arc::clone(&self.shared);
        let handle = match thread::Builder::new()
            .name("notification scheduler".to_string())
            .spawn(move || dispatch::run(shared))
        {
            Ok(handle) => handle,
            Err(e) => {
                subscriptions.disconnect_all();
                return Err(e.into());
            }
        };
        self.thread = Some(handle);
        self.subscriptions = Some(subscriptions);

        info!("'{}' started.", self.name);
        Ok(())
    }

    /// Stop the scheduler: no new promotions happen once the flag is set,
    /// but in-flight dispatches are waited for before returning.
    pub fn stop(&mut self) -> Result<(), VigilError> {
        let thread = self
            .thread
            .take()
            .ok_or_else(|| VigilError::NotRunning(self.name.clone()))?;

        {
            let mut queues = self.shared.queues.lock().unwrap();
            queues.stopped = true;
            self.shared.cv.notify_all();

            while !queues.pending.is_empty() {
                queues = self.shared.cv.wait(queues).unwrap();
            }
        }

        let _ = thread.join();

        if let Some(subscriptions) = self.subscriptions.take() {
            subscriptions.disconnect_all();
        }

        info!("'{}' stopped.", self.name);
        Ok(())
    }

    /// Number of notifications awaiting their reminder time.
    pub fn idle_count(&self) -> u64 {
        self.shared.queues.lock().unwrap().idle.len() as u64
    }

    /// Number of notifications whose dispatch is in flight.
    pub fn pending_count(&self) -> u64 {
        self.shared.queues.lock().unwrap().pending.len() as u64
    }

    /// Sample both counters in one pass under the lock.
    pub fn stats(&self) -> NotifierStats {
        let queues = self.shared.queues.lock().unwrap();
        NotifierStats {
            name: self.name.clone(),
            idle: queues.idle.len() as u64,
            pending: queues.pending.len() as u64,
        }
    }

    // Direct handler entry points, for callers that hold object handles
    // rather than going through the signal hub.

    pub fn on_state_change(
        &self,
        checkable: &Arc<dyn Checkable>,
        check_result: &CheckResult,
        state_type: StateType,
    ) {
        ingress::state_change(&self.shared, checkable, check_result, state_type);
    }

    pub fn on_flapping_changed(&self, checkable: &Arc<dyn Checkable>) {
        ingress::flapping_changed(&self.shared, checkable);
    }

    pub fn on_acknowledgement_set(&self, checkable: &Arc<dyn Checkable>, author: &str, text: &str) {
        ingress::acknowledgement_set(checkable, author, text);
    }

    pub fn on_object_changed(&self, object: &Arc<dyn ConfigObject>) {
        ingress::object_changed(&self.shared, object);
    }

    pub fn on_next_notification_changed(&self, notification: &Arc<dyn Notification>) {
        ingress::next_notification_changed(&self.shared, notification);
    }
}

impl Drop for NotificationScheduler {
    fn drop(&mut self) {
        if self.thread.is_some() {
            let _ = self.stop();
        }
    }
}
