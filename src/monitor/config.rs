use crate::relay::SurfaceId;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for a monitoring session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Surface whose broker is asked for the microphone
    pub surface: SurfaceId,

    /// Analyser window size (power of two; snapshots hold half of this)
    pub fft_size: usize,

    /// Waveform canvas width in pixels
    pub canvas_width: u32,

    /// Waveform canvas height in pixels
    pub canvas_height: u32,

    /// Delay between draw frames
    pub frame_interval: Duration,

    /// Upper bound on the capability round trip
    pub capability_timeout: Duration,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            surface: SurfaceId(1),
            fft_size: 2048,
            canvas_width: 300,
            canvas_height: 100,
            frame_interval: Duration::from_millis(16), // ~60 frames/sec
            capability_timeout: Duration::from_secs(10),
        }
    }
}
