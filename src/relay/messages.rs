use crate::capture::MicrophoneStream;
use serde::{Deserialize, Serialize};

/// Messages exchanged across the relay chain
///
/// `GetMicrophone` travels controller → relay, `RequestMicrophone`
/// relay → broker. Neither carries a payload; the discriminator is the whole
/// message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RelayMessage {
    #[serde(rename = "GET_MICROPHONE")]
    GetMicrophone,
    #[serde(rename = "REQUEST_MICROPHONE")]
    RequestMicrophone,
}

/// Response to a microphone capability request
///
/// Produced by the broker and passed through the relay unmodified.
/// Invariant: exactly one of `stream`/`error` is meaningful, gated by
/// `success`; the constructors uphold it.
#[derive(Debug)]
pub struct CapabilityResponse {
    pub success: bool,
    pub stream: Option<MicrophoneStream>,
    pub error: Option<String>,
}

impl CapabilityResponse {
    pub fn granted(stream: MicrophoneStream) -> Self {
        Self {
            success: true,
            stream: Some(stream),
            error: None,
        }
    }

    pub fn denied(error: impl Into<String>) -> Self {
        Self {
            success: false,
            stream: None,
            error: Some(error.into()),
        }
    }

    /// Collapse the envelope into the granted handle or the reported reason
    pub fn into_result(self) -> Result<MicrophoneStream, String> {
        if self.success {
            self.stream
                .ok_or_else(|| "granted response carried no stream".to_string())
        } else {
            Err(self
                .error
                .unwrap_or_else(|| "Failed to access microphone".to_string()))
        }
    }
}
