use super::device::{AudioFrame, CaptureDevice, CaptureError, MicrophoneStream};
use std::f32::consts::TAU;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::debug;
use uuid::Uuid;

/// Frame cadence of generated streams (10 frames/sec)
const FRAME_INTERVAL_MS: u64 = 100;

/// Signal shape produced by a [`FixtureDevice`]
#[derive(Debug, Clone, Copy)]
pub enum FixtureSignal {
    /// All-zero samples
    Silence,
    /// Sine tone at the given frequency
    Sine { frequency_hz: f32 },
    /// Full-scale square wave alternating rail to rail every sample
    Square,
}

impl FixtureSignal {
    fn generate(&self, count: usize, sample_rate: u32, offset: u64) -> Vec<i16> {
        match self {
            FixtureSignal::Silence => vec![0i16; count],
            FixtureSignal::Sine { frequency_hz } => (0..count)
                .map(|i| {
                    let t = (offset + i as u64) as f32 / sample_rate as f32;
                    (frequency_hz * t * TAU).sin() * (i16::MAX as f32 * 0.8)
                })
                .map(|s| s as i16)
                .collect(),
            FixtureSignal::Square => (0..count)
                .map(|i| {
                    if (offset + i as u64) % 2 == 0 {
                        i16::MIN
                    } else {
                        i16::MAX
                    }
                })
                .collect(),
        }
    }
}

/// Capture device backed by a generated signal
///
/// Grants every request. The producer task runs until the stream handle is
/// dropped and its channel closes.
pub struct FixtureDevice {
    signal: FixtureSignal,
    sample_rate: u32,
}

impl FixtureDevice {
    pub fn new(signal: FixtureSignal, sample_rate: u32) -> Self {
        Self {
            signal,
            sample_rate,
        }
    }
}

#[async_trait::async_trait]
impl CaptureDevice for FixtureDevice {
    async fn request_stream(&self) -> Result<MicrophoneStream, CaptureError> {
        let (tx, rx) = mpsc::channel(32);
        let signal = self.signal;
        let sample_rate = self.sample_rate;
        let samples_per_frame = (sample_rate as u64 * FRAME_INTERVAL_MS / 1000) as usize;
        let stream_id = Uuid::new_v4();

        tokio::spawn(async move {
            debug!("Fixture capture task started (stream {})", stream_id);
            let mut ticker = tokio::time::interval(Duration::from_millis(FRAME_INTERVAL_MS));
            let mut offset = 0u64;
            let mut timestamp_ms = 0u64;
            loop {
                ticker.tick().await;
                let frame = AudioFrame {
                    samples: signal.generate(samples_per_frame, sample_rate, offset),
                    sample_rate,
                    channels: 1,
                    timestamp_ms,
                };
                offset += samples_per_frame as u64;
                timestamp_ms += FRAME_INTERVAL_MS;
                if tx.send(frame).await.is_err() {
                    break;
                }
            }
            debug!("Fixture capture task stopped (stream {})", stream_id);
        });

        Ok(MicrophoneStream {
            id: stream_id,
            sample_rate,
            channels: 1,
            frames: rx,
        })
    }

    fn name(&self) -> &str {
        "fixture"
    }
}

/// Capture device that refuses every request
pub struct DeniedDevice {
    reason: String,
}

impl DeniedDevice {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl Default for DeniedDevice {
    fn default() -> Self {
        Self::new("Permission denied")
    }
}

#[async_trait::async_trait]
impl CaptureDevice for DeniedDevice {
    async fn request_stream(&self) -> Result<MicrophoneStream, CaptureError> {
        Err(CaptureError::PermissionDenied(self.reason.clone()))
    }

    fn name(&self) -> &str {
        "denied"
    }
}
