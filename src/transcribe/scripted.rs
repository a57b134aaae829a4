use super::engine::{RecognitionConfig, RecognitionEngine, RecognitionError, RecognitionEvents};
use super::events::RecognitionEvent;
use futures::stream::StreamExt;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// One scripted step: wait, then emit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptedStep {
    #[serde(default)]
    pub delay_ms: u64,
    pub event: RecognitionEvent,
}

/// Replays a fixed event script
///
/// The in-tree engine implementation, used by the demo binary and tests; the
/// stream ends when the script runs out.
pub struct ScriptedEngine {
    steps: Vec<ScriptedStep>,
}

impl ScriptedEngine {
    pub fn new(steps: Vec<ScriptedStep>) -> Self {
        Self { steps }
    }

    pub fn from_json(json: &str) -> Result<Self, RecognitionError> {
        let steps = serde_json::from_str(json)
            .map_err(|e| RecognitionError::InvalidScript(e.to_string()))?;
        Ok(Self::new(steps))
    }

    pub fn from_file(path: &Path) -> Result<Self, RecognitionError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| RecognitionError::InvalidScript(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }
}

#[async_trait::async_trait]
impl RecognitionEngine for ScriptedEngine {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn start(
        &mut self,
        config: &RecognitionConfig,
    ) -> Result<RecognitionEvents, RecognitionError> {
        info!(
            "Starting scripted recognition ({} steps, lang {})",
            self.steps.len(),
            config.lang
        );

        let steps = self.steps.clone();
        let stream = futures::stream::unfold(steps.into_iter(), |mut steps| async move {
            let step = steps.next()?;
            if step.delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(step.delay_ms)).await;
            }
            Some((step.event, steps))
        });

        if config.interim_results {
            return Ok(stream.boxed());
        }

        // Interim results disabled: strip non-final hypotheses, dropping
        // events that end up empty
        let finals_only = stream.filter_map(|event| async move {
            match event {
                RecognitionEvent::Result(mut ev) => {
                    ev.results.retain(|r| r.is_final);
                    ev.result_index = 0;
                    if ev.results.is_empty() {
                        None
                    } else {
                        Some(RecognitionEvent::Result(ev))
                    }
                }
                other => Some(other),
            }
        });
        Ok(finals_only.boxed())
    }

    async fn stop(&mut self) -> Result<(), RecognitionError> {
        debug!("Scripted recognition stopped");
        Ok(())
    }
}
