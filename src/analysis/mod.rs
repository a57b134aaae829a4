//! Audio analysis graph
//!
//! Exposes periodic time-domain snapshots of a live capture stream:
//! - `Analyser`: rolling byte-sample window (128 = silence midpoint)
//! - `AudioGraph`: context/source/analyser wiring with an explicit close

mod analyser;
mod graph;

pub use analyser::{Analyser, SILENCE_MIDPOINT};
pub use graph::{AudioGraph, ContextState};
