//! Schedule entries and the dual-index set that holds them.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use vigil_core::{ConfigObject, Notification};

/// A notification handle paired with the instant its next reminder is due.
#[derive(Clone)]
pub struct ScheduleInfo {
    pub notification: Arc<dyn Notification>,
    pub next_message: DateTime<Utc>,
}

impl ScheduleInfo {
    /// Snapshot the handle's current `next_notification` time.
    pub fn of(notification: &Arc<dyn Notification>) -> Self {
        Self {
            next_message: notification.next_notification(),
            notification: Arc::clone(notification),
        }
    }
}

impl fmt::Debug for ScheduleInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScheduleInfo")
            .field("notification", &self.notification.name())
            .field("next_message", &self.next_message)
            .finish()
    }
}

/// Schedule entries with two coexisting views: by notification name
/// (unique) and by due time (non-unique, ordered).
///
/// Every mutation goes through the methods here so the views stay in
/// lockstep. Changing an entry's time is erase + reinsert; there is no
/// in-place reindex. Entries due at the same instant order by name.
#[derive(Debug, Default)]
pub struct ScheduleSet {
    by_name: HashMap<String, ScheduleInfo>,
    by_time: BTreeSet<(DateTime<Utc>, String)>,
}

impl ScheduleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry. Returns false and leaves the set unchanged if an
    /// entry for the same notification is already present.
    pub fn insert(&mut self, info: ScheduleInfo) -> bool {
        let name = info.notification.name();
        if self.by_name.contains_key(&name) {
            return false;
        }
        self.by_time.insert((info.next_message, name.clone()));
        self.by_name.insert(name, info);
        true
    }

    /// Insert an entry, displacing any existing entry for the same
    /// notification. This is the time-update path.
    pub fn replace(&mut self, info: ScheduleInfo) {
        self.remove(&info.notification.name());
        self.insert(info);
    }

    /// Remove the entry for the given notification name. Returns false if
    /// no entry was present.
    pub fn remove(&mut self, name: &str) -> bool {
        match self.by_name.remove(name) {
            Some(info) => {
                self.by_time.remove(&(info.next_message, name.to_string()));
                true
            }
            None => false,
        }
    }

    pub fn get(&self, name: &str) -> Option<&ScheduleInfo> {
        self.by_name.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// The entry with the earliest due time, if any.
    pub fn peek_next(&self) -> Option<&ScheduleInfo> {
        self.by_time
            .iter()
            .next()
            .and_then(|(_, name)| self.by_name.get(name))
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
