use super::messages::{CapabilityResponse, RelayMessage};
use crate::capture::CaptureDevice;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// A relayed message awaiting a deferred reply
pub struct BrokerRequest {
    pub message: RelayMessage,
    pub reply: oneshot::Sender<CapabilityResponse>,
}

/// Per-surface agent that answers microphone requests from a capture device
///
/// Serves one request at a time; while a grant is pending, later requests
/// queue in the broker channel. Failures are reported upward in the response
/// envelope, never surfaced here.
pub struct CapabilityBroker {
    device: Arc<dyn CaptureDevice>,
}

impl CapabilityBroker {
    pub fn new(device: Arc<dyn CaptureDevice>) -> Self {
        Self { device }
    }

    /// Spawn the broker loop
    ///
    /// The returned sender is what gets registered with the relay; the loop
    /// exits once every sender is dropped.
    pub fn spawn(self) -> (mpsc::Sender<BrokerRequest>, JoinHandle<()>) {
        let (tx, mut rx) = mpsc::channel::<BrokerRequest>(8);

        let handle = tokio::spawn(async move {
            info!("Capability broker started (device: {})", self.device.name());

            while let Some(request) = rx.recv().await {
                match request.message {
                    RelayMessage::RequestMicrophone => {
                        let response = match self.device.request_stream().await {
                            Ok(stream) => {
                                info!("Microphone granted (stream {})", stream.id);
                                CapabilityResponse::granted(stream)
                            }
                            Err(e) => {
                                warn!("Microphone request refused: {}", e);
                                CapabilityResponse::denied(e.to_string())
                            }
                        };
                        if request.reply.send(response).is_err() {
                            warn!("Requester gave up before the response was ready");
                        }
                    }
                    other => {
                        debug!("Ignoring unexpected message: {:?}", other);
                    }
                }
            }

            info!("Capability broker stopped");
        });

        (tx, handle)
    }
}
