use crate::transcribe::TranscriptView;
use serde::{Deserialize, Serialize};

/// Mutually exclusive enablement of the start/stop controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlState {
    pub start_enabled: bool,
    pub stop_enabled: bool,
}

impl ControlState {
    pub fn idle() -> Self {
        Self {
            start_enabled: true,
            stop_enabled: false,
        }
    }

    pub fn monitoring() -> Self {
        Self {
            start_enabled: false,
            stop_enabled: true,
        }
    }
}

impl Default for ControlState {
    fn default() -> Self {
        Self::idle()
    }
}

/// One rendered waveform polyline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveformFrame {
    pub width: u32,
    pub height: u32,
    /// Polyline vertices: one per analysed sample, plus the closing segment
    /// back to the vertical midline at the right edge
    pub points: Vec<(f32, f32)>,
}

/// Everything the UI surface shows, published by the session's tasks
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplaySnapshot {
    pub controls: ControlState,
    pub volume_text: String,
    pub waveform: Option<WaveformFrame>,
    pub transcript: TranscriptView,
    pub status_message: Option<String>,
}

/// Map a time-domain snapshot onto canvas coordinates
///
/// `x = i * width / len`, `y = (sample / 128) * height / 2`, matching the
/// analyser's byte domain where 128 is silence.
pub fn render_waveform(samples: &[u8], width: u32, height: u32) -> WaveformFrame {
    let mut points = Vec::with_capacity(samples.len() + 1);

    if !samples.is_empty() {
        let slice_width = width as f32 / samples.len() as f32;
        let mut x = 0.0f32;
        for &sample in samples {
            let v = sample as f32 / 128.0;
            points.push((x, v * height as f32 / 2.0));
            x += slice_width;
        }
    }
    points.push((width as f32, height as f32 / 2.0));

    WaveformFrame {
        width,
        height,
        points,
    }
}

/// Average absolute deviation of a snapshot from the 128 silence midpoint
pub fn average_deviation(samples: &[u8]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum: f64 = samples
        .iter()
        .map(|&s| (s as f64 / 128.0 - 1.0).abs())
        .sum();
    sum / samples.len() as f64
}

/// Volume estimate in dB, rounded to two decimals
///
/// A perfectly silent buffer has zero deviation, so the logarithm yields
/// negative infinity; that value is displayed as-is rather than masked.
pub fn volume_db(samples: &[u8]) -> f64 {
    (20.0 * average_deviation(samples).log10() * 100.0).round() / 100.0
}
