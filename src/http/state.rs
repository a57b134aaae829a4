use crate::monitor::MonitorSession;
use std::sync::Arc;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// The monitoring session this service fronts (one per instance)
    pub monitor: Arc<MonitorSession>,
}

impl AppState {
    pub fn new(monitor: Arc<MonitorSession>) -> Self {
        Self { monitor }
    }
}
