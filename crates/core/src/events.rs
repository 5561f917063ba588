//! In-process signal hub.
//!
//! Subsystems publish lifecycle and state events here; interested
//! components connect handler slots. Emission is synchronous on the
//! caller's thread, so handlers must not block on the emitter.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use crate::check::{CheckResult, StateType};
use crate::object::{Checkable, ConfigObject, Notification};

/// Identifier for a connected slot, used to disconnect it later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(u64);

type Slot<A> = Arc<dyn Fn(&A) + Send + Sync>;

/// A broadcast signal with dynamically connected handler slots.
pub struct Signal<A> {
    slots: RwLock<Vec<(SlotId, Slot<A>)>>,
    next_id: AtomicU64,
}

impl<A> Signal<A> {
    pub fn new() -> Self {
        Self {
            slots: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(0),
        }
    }

    /// Connect a handler. The returned id disconnects it.
    pub fn connect<F>(&self, slot: F) -> SlotId
    where
        F: Fn(&A) + Send + Sync + 'static,
    {
        let id = SlotId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.slots.write().unwrap().push((id, Arc::new(slot)));
        id
    }

    /// Disconnect a previously connected handler. Returns false if the id
    /// was not connected.
    pub fn disconnect(&self, id: SlotId) -> bool {
        let mut slots = self.slots.write().unwrap();
        let before = slots.len();
        slots.retain(|(slot_id, _)| *slot_id != id);
        slots.len() < before
    }

    /// Invoke every connected handler with the event.
    ///
    /// Slots are snapshotted before invocation so a handler may connect or
    /// disconnect without deadlocking against the slot list.
    pub fn emit(&self, event: &A) {
        let slots: Vec<Slot<A>> = self
            .slots
            .read()
            .unwrap()
            .iter()
            .map(|(_, slot)| Arc::clone(slot))
            .collect();

        for slot in slots {
            slot(event);
        }
    }

    pub fn len(&self) -> usize {
        self.slots.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.read().unwrap().is_empty()
    }
}

impl<A> Default for Signal<A> {
    fn default() -> Self {
        Self::new()
    }
}

/// A checkable settled into a new state.
#[derive(Clone)]
pub struct StateChangeEvent {
    pub checkable: Arc<dyn Checkable>,
    pub check_result: CheckResult,
    pub state_type: StateType,
}

/// A checkable started or stopped flapping.
#[derive(Clone)]
pub struct FlappingChangedEvent {
    pub checkable: Arc<dyn Checkable>,
}

/// A problem on a checkable was acknowledged.
#[derive(Clone)]
pub struct AcknowledgementSetEvent {
    pub checkable: Arc<dyn Checkable>,
    pub author: String,
    pub text: String,
}

/// A configuration object's active or paused flag changed.
#[derive(Clone)]
pub struct ObjectChangedEvent {
    pub object: Arc<dyn ConfigObject>,
}

/// A notification's next reminder time was moved.
#[derive(Clone)]
pub struct NextNotificationChangedEvent {
    pub notification: Arc<dyn Notification>,
    /// Cluster endpoint the update originated from, if not local.
    pub origin: Option<String>,
}

/// The inbound signals a notifier instance subscribes to.
#[derive(Default)]
pub struct MonitoringEvents {
    pub object_active_changed: Signal<ObjectChangedEvent>,
    pub object_paused_changed: Signal<ObjectChangedEvent>,
    pub state_change: Signal<StateChangeEvent>,
    pub flapping_changed: Signal<FlappingChangedEvent>,
    pub acknowledgement_set: Signal<AcknowledgementSetEvent>,
    pub next_notification_changed: Signal<NextNotificationChangedEvent>,
}

impl MonitoringEvents {
    pub fn new() -> Self {
        Self::default()
    }
}
