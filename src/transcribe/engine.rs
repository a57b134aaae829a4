use super::events::RecognitionEvent;
use super::scripted::ScriptedEngine;
use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum RecognitionError {
    #[error("recognition engine failed to start: {0}")]
    StartFailed(String),

    #[error("invalid recognition script: {0}")]
    InvalidScript(String),
}

/// Session parameters handed to an engine at start
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognitionConfig {
    /// Keep recognizing across utterances instead of stopping at the first
    pub continuous: bool,
    /// Deliver provisional hypotheses before results are final
    pub interim_results: bool,
    /// BCP 47 language tag
    pub lang: String,
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            continuous: true,
            interim_results: true,
            lang: "en-US".to_string(),
        }
    }
}

/// Event stream returned by a started engine
pub type RecognitionEvents = BoxStream<'static, RecognitionEvent>;

/// A speech-recognition engine
///
/// One instance backs at most one running session; `start` may be called
/// again after `stop`. `stop` is a no-op when nothing is running.
#[async_trait::async_trait]
pub trait RecognitionEngine: Send + Sync {
    /// Engine name for logging
    fn name(&self) -> &str;

    /// Begin a recognition session and return its event stream
    async fn start(
        &mut self,
        config: &RecognitionConfig,
    ) -> Result<RecognitionEvents, RecognitionError>;

    /// Stop the running session
    async fn stop(&mut self) -> Result<(), RecognitionError>;
}

/// Probe for an available engine once at startup
///
/// The result is threaded into the monitoring session as an explicit
/// optional dependency; `None` disables transcription for the process
/// lifetime while leaving everything else intact.
pub fn negotiate(kind: &str, script: Option<&Path>) -> Option<Box<dyn RecognitionEngine>> {
    match kind {
        "scripted" => {
            let Some(path) = script else {
                warn!("Scripted recognition selected without a script file; transcription disabled");
                return None;
            };
            match ScriptedEngine::from_file(path) {
                Ok(engine) => Some(Box::new(engine)),
                Err(e) => {
                    warn!("Failed to load recognition script: {}; transcription disabled", e);
                    None
                }
            }
        }
        "none" => {
            warn!("Speech recognition not supported; transcription disabled");
            None
        }
        other => {
            warn!(
                "Unknown recognition engine '{}'; transcription disabled",
                other
            );
            None
        }
    }
}
