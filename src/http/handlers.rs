use super::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Serialize;
use tracing::{error, info};

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct MonitorActionResponse {
    pub status: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /monitor/start
/// Start the monitoring session
pub async fn start_monitoring(State(state): State<AppState>) -> impl IntoResponse {
    if state.monitor.is_monitoring() {
        return (
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                error: "Monitoring is already active".to_string(),
            }),
        )
            .into_response();
    }

    info!("Start requested over HTTP");

    match state.monitor.start().await {
        Ok(()) => (
            StatusCode::OK,
            Json(MonitorActionResponse {
                status: "monitoring".to_string(),
                message: "Microphone monitoring started".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to start monitoring: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("{}", e),
                }),
            )
                .into_response()
        }
    }
}

/// POST /monitor/stop
/// Stop the monitoring session (a no-op when nothing is active)
pub async fn stop_monitoring(State(state): State<AppState>) -> impl IntoResponse {
    info!("Stop requested over HTTP");

    match state.monitor.stop().await {
        Ok(()) => (
            StatusCode::OK,
            Json(MonitorActionResponse {
                status: "stopped".to_string(),
                message: "Microphone monitoring stopped".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to stop monitoring: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("{}", e),
                }),
            )
                .into_response()
        }
    }
}

/// GET /monitor/status
/// Session statistics
pub async fn get_status(State(state): State<AppState>) -> impl IntoResponse {
    (StatusCode::OK, Json(state.monitor.stats().await)).into_response()
}

/// GET /monitor/display
/// Everything the UI surface shows: controls, volume text, waveform,
/// transcript, status message
pub async fn get_display(State(state): State<AppState>) -> impl IntoResponse {
    (StatusCode::OK, Json(state.monitor.display().await)).into_response()
}

/// GET /monitor/transcript
/// Accumulated transcript (finalized + interim)
pub async fn get_transcript(State(state): State<AppState>) -> impl IntoResponse {
    (StatusCode::OK, Json(state.monitor.transcript().await)).into_response()
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
