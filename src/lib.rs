pub mod analysis;
pub mod capture;
pub mod config;
pub mod http;
pub mod monitor;
pub mod relay;
pub mod transcribe;

pub use analysis::{Analyser, AudioGraph, ContextState};
pub use capture::{AudioFrame, CaptureDevice, CaptureError, MicrophoneStream};
pub use config::Config;
pub use http::{create_router, AppState};
pub use monitor::{
    DisplaySnapshot, MonitorConfig, MonitorSession, MonitorStats, SessionState, WaveformFrame,
};
pub use relay::{
    CapabilityBroker, CapabilityResponse, PermissionRelay, RelayError, RelayMessage, SurfaceId,
};
pub use transcribe::{
    RecognitionConfig, RecognitionEngine, RecognitionEvent, TranscriptBuffer, TranscriptView,
};
