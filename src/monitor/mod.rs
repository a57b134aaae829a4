//! Monitoring session management
//!
//! This module provides the `MonitorSession` abstraction that manages:
//! - Microphone acquisition through the permission relay
//! - The analysis graph lifecycle
//! - Waveform/volume rendering on a per-frame loop
//! - The speech-recognition session and transcript state
//! - Display state and session statistics

mod config;
mod display;
mod session;
mod stats;

pub use config::MonitorConfig;
pub use display::{
    average_deviation, render_waveform, volume_db, ControlState, DisplaySnapshot, WaveformFrame,
};
pub use session::{MonitorSession, SessionState};
pub use stats::MonitorStats;
