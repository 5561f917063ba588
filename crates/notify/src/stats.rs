//! Read-only stats surface for notifier instances.

use serde::Serialize;
use serde_json::{json, Value};

use crate::scheduler::NotificationScheduler;

/// Idle/pending counts for one notifier instance.
#[derive(Debug, Clone, Serialize)]
pub struct NotifierStats {
    pub name: String,
    pub idle: u64,
    pub pending: u64,
}

/// One performance-data scalar.
#[derive(Debug, Clone, Serialize)]
pub struct PerfdataValue {
    pub label: String,
    pub value: f64,
}

/// Single-pass snapshot across notifier instances: a status document keyed
/// by instance name, plus the flat perfdata series (`<name>_idle`,
/// `<name>_pending`).
pub fn stats_snapshot(notifiers: &[&NotificationScheduler]) -> (Value, Vec<PerfdataValue>) {
    let mut status = serde_json::Map::new();
    let mut perfdata = Vec::with_capacity(notifiers.len() * 2);

    for notifier in notifiers {
        let stats = notifier.stats();

        perfdata.push(PerfdataValue {
            label: format!("{}_idle", stats.name),
            value: stats.idle as f64,
        });
        perfdata.push(PerfdataValue {
            label: format!("{}_pending", stats.name),
            value: stats.pending as f64,
        });

        status.insert(
            stats.name.clone(),
            json!({ "idle": stats.idle, "pending": stats.pending }),
        );
    }

    (Value::Object(status), perfdata)
}
