//! Speech transcription
//!
//! This module provides:
//! - The `RecognitionEngine` trait and startup capability negotiation
//! - Recognition event/result types
//! - Transcript aggregation (finalized text + volatile interim suffix)
//! - A scripted replay engine for demos and tests

mod buffer;
mod engine;
mod events;
mod scripted;

pub use buffer::{TranscriptBuffer, TranscriptView};
pub use engine::{
    negotiate, RecognitionConfig, RecognitionEngine, RecognitionError, RecognitionEvents,
};
pub use events::{RecognitionAlternative, RecognitionEvent, RecognitionResult, ResultEvent};
pub use scripted::{ScriptedEngine, ScriptedStep};
