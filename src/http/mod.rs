//! HTTP API standing in for the popup control surface
//!
//! This module provides a REST API for driving the monitoring session:
//! - POST /monitor/start - Start monitoring
//! - POST /monitor/stop - Stop monitoring
//! - GET /monitor/status - Query session statistics
//! - GET /monitor/display - Controls, volume text, waveform, transcript
//! - GET /monitor/transcript - Accumulated transcript
//! - GET /health - Health check

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
