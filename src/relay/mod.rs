//! Cross-context microphone-permission relay
//!
//! The controller never talks to the capture device directly: it asks the
//! relay, the relay forwards to the broker registered for the target
//! surface, and the broker answers with a stream handle or a refusal.
//! Responses are deferred (oneshot reply channels) and the round trip is
//! bounded by a configurable timeout.

mod broker;
mod messages;
mod relay;

pub use broker::{BrokerRequest, CapabilityBroker};
pub use messages::{CapabilityResponse, RelayMessage};
pub use relay::{PermissionRelay, RelayError, SurfaceId};
