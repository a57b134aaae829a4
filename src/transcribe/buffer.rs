use super::events::ResultEvent;
use serde::{Deserialize, Serialize};

/// Rendered transcript state
///
/// Finalized text and the interim suffix are kept apart so a UI can style
/// the provisional part differently.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TranscriptView {
    pub finalized: String,
    pub interim: String,
}

impl TranscriptView {
    /// Finalized and interim text joined for plain display
    pub fn rendered(&self) -> String {
        format!("{}{}", self.finalized, self.interim)
    }
}

/// Accumulates recognition results across events
///
/// Finalized text only ever grows; the interim suffix is rebuilt from
/// scratch on every event. There is no reset operation; the buffer lives as
/// long as the session owning it.
#[derive(Debug, Default)]
pub struct TranscriptBuffer {
    finalized: String,
    interim: String,
}

impl TranscriptBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one result event into the buffer
    ///
    /// Re-scans the results from the event's start index: final results are
    /// appended to the finalized text (space-separated), the rest rebuild
    /// the interim suffix.
    pub fn apply(&mut self, event: &ResultEvent) {
        self.interim.clear();

        for result in event.results.iter().skip(event.result_index) {
            let Some(alternative) = result.alternatives.first() else {
                continue;
            };
            if result.is_final {
                self.finalized.push_str(&alternative.transcript);
                self.finalized.push(' ');
            } else {
                self.interim.push_str(&alternative.transcript);
            }
        }
    }

    pub fn view(&self) -> TranscriptView {
        TranscriptView {
            finalized: self.finalized.clone(),
            interim: self.interim.clone(),
        }
    }
}
