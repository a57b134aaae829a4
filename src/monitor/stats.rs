use super::session::SessionState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Statistics about a monitoring session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorStats {
    /// Current lifecycle state
    pub state: SessionState,

    /// Whether the draw loop is running
    pub is_monitoring: bool,

    /// When monitoring last became active
    pub started_at: Option<DateTime<Utc>>,

    /// Seconds since monitoring became active (0 when it never did)
    pub duration_secs: f64,

    /// Waveform frames rendered so far
    pub frames_rendered: usize,
}
