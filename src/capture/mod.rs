//! Microphone capture capability
//!
//! The platform's capture grant is modeled as the [`CaptureDevice`] trait:
//! ask for an audio-only stream, get back an opaque [`MicrophoneStream`]
//! handle or a refusal. Fixture devices generate known signals for demos and
//! tests; a denying device exercises the permission-refused path.

mod device;
mod fixture;

pub use device::{AudioFrame, CaptureDevice, CaptureError, MicrophoneStream};
pub use fixture::{DeniedDevice, FixtureDevice, FixtureSignal};
