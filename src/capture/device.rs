use thiserror::Error;
use tokio::sync::mpsc;
use uuid::Uuid;

/// Errors a capture device can report when a stream is requested
#[derive(Debug, Error)]
pub enum CaptureError {
    /// The platform (or the user) refused microphone access
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("device unavailable: {0}")]
    DeviceUnavailable(String),

    #[error("capture backend error: {0}")]
    Backend(String),
}

/// Audio sample data (16-bit PCM, interleaved)
#[derive(Debug, Clone)]
pub struct AudioFrame {
    /// Raw audio samples (i16 PCM, interleaved)
    pub samples: Vec<i16>,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of channels
    pub channels: u16,
    /// Timestamp in milliseconds since capture started
    pub timestamp_ms: u64,
}

/// Opaque handle to a live microphone capture stream
///
/// Granted by a [`CaptureDevice`]; the analysis graph drains `frames` until
/// the handle is dropped.
#[derive(Debug)]
pub struct MicrophoneStream {
    /// Stream identifier, used in logs
    pub id: Uuid,
    /// Sample rate of the delivered frames in Hz
    pub sample_rate: u32,
    /// Number of channels in the delivered frames
    pub channels: u16,
    /// Live frame channel
    pub frames: mpsc::Receiver<AudioFrame>,
}

/// Microphone capture capability
///
/// `request_stream` may suspend while a permission grant is pending; it
/// resolves with either a live stream handle or the refusal reason. Only the
/// pending request is suspended, never the caller's event loop.
#[async_trait::async_trait]
pub trait CaptureDevice: Send + Sync {
    /// Request an audio-only capture stream
    async fn request_stream(&self) -> Result<MicrophoneStream, CaptureError>;

    /// Device name for logging
    fn name(&self) -> &str;
}
