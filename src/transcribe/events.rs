use serde::{Deserialize, Serialize};

/// A single transcription hypothesis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognitionAlternative {
    pub transcript: String,
    pub confidence: f32,
}

/// One recognized segment: ranked alternatives plus a finality flag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognitionResult {
    pub alternatives: Vec<RecognitionAlternative>,
    pub is_final: bool,
}

impl RecognitionResult {
    /// Single-hypothesis result, the common case
    pub fn new(transcript: impl Into<String>, is_final: bool) -> Self {
        Self {
            alternatives: vec![RecognitionAlternative {
                transcript: transcript.into(),
                confidence: 1.0,
            }],
            is_final,
        }
    }
}

/// Payload of a result event
///
/// Carries the full result list plus the index of the first result that
/// changed since the previous event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultEvent {
    pub result_index: usize,
    pub results: Vec<RecognitionResult>,
}

/// Events emitted by a running recognition session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecognitionEvent {
    Result(ResultEvent),
    Error { message: String },
}
