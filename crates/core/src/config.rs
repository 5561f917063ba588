use std::env;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_usize(key: &str, default: usize) -> usize {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Notification scheduler configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyConfig {
    /// Name of the zone this instance is responsible for. Empty = no zone
    /// restriction: every notification counts as local.
    #[serde(default = "default_local_zone")]
    pub local_zone: String,
    /// Dispatch worker threads. 0 = available parallelism.
    #[serde(default = "default_dispatch_threads")]
    pub dispatch_threads: usize,
}

fn default_local_zone() -> String {
    String::new()
}

fn default_dispatch_threads() -> usize {
    0
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            local_zone: default_local_zone(),
            dispatch_threads: default_dispatch_threads(),
        }
    }
}

impl NotifyConfig {
    /// Build config from environment variables (call `load_dotenv()` first).
    pub fn from_env() -> Self {
        Self {
            local_zone: env_or("VIGIL_LOCAL_ZONE", ""),
            dispatch_threads: env_usize("VIGIL_DISPATCH_THREADS", 0),
        }
    }

    /// Resolve dispatch thread count (0 means use available parallelism).
    pub fn resolved_dispatch_threads(&self) -> usize {
        if self.dispatch_threads == 0 {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4)
        } else {
            self.dispatch_threads
        }
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Notify config loaded:");
        tracing::info!(
            "  local_zone:       {}",
            if self.local_zone.is_empty() { "(none)" } else { &self.local_zone }
        );
        tracing::info!(
            "  dispatch_threads: {} (resolved: {})",
            self.dispatch_threads,
            self.resolved_dispatch_threads()
        );
    }
}
