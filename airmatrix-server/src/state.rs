//! Shared handler state.

use std::sync::Arc;
use std::time::Instant;

use airmatrix_supervisor::Supervisor;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub supervisor: Arc<Supervisor>,
    /// One in-flight lifecycle action at a time; overlapping requests queue
    /// here instead of racing on the managed process. Status reads never
    /// take this lock.
    pub action_lock: Arc<Mutex<()>>,
    /// Base URL of the host platform API (overlay-model registry).
    pub host_api_base: String,
    pub started_at: DateTime<Utc>,
    pub started: Instant,
}

impl AppState {
    pub fn new(supervisor: Arc<Supervisor>, host_api_base: String) -> Self {
        Self {
            supervisor,
            action_lock: Arc::new(Mutex::new(())),
            host_api_base,
            started_at: Utc::now(),
            started: Instant::now(),
        }
    }
}
