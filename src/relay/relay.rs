use super::broker::BrokerRequest;
use super::messages::{CapabilityResponse, RelayMessage};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot, RwLock};
use tracing::{debug, info};

/// Identifier of a foreground surface a capability broker serves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SurfaceId(pub u32);

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "surface-{}", self.0)
    }
}

#[derive(Debug, Error)]
pub enum RelayError {
    /// No broker is registered for the target surface
    #[error("no capability broker registered for {0}")]
    Unreachable(SurfaceId),

    /// The broker accepted the request but never replied within the deadline
    #[error("capability request to {surface} timed out after {timeout:?}")]
    Timeout {
        surface: SurfaceId,
        timeout: Duration,
    },

    /// The broker went away before answering
    #[error("capability broker for {0} closed before replying")]
    Closed(SurfaceId),
}

/// Routes capability requests to the broker registered for a target surface
///
/// The target is an explicit parameter and the round trip is bounded by a
/// timeout; an unregistered surface fails immediately instead of leaving the
/// requester waiting. No validation happens beyond the message discriminator
/// and nothing is ever retried.
#[derive(Clone)]
pub struct PermissionRelay {
    surfaces: Arc<RwLock<HashMap<SurfaceId, mpsc::Sender<BrokerRequest>>>>,
    timeout: Duration,
}

impl PermissionRelay {
    pub fn new(timeout: Duration) -> Self {
        Self {
            surfaces: Arc::new(RwLock::new(HashMap::new())),
            timeout,
        }
    }

    /// Register the broker serving `surface`, replacing any previous one
    pub async fn register_surface(&self, surface: SurfaceId, broker: mpsc::Sender<BrokerRequest>) {
        let mut surfaces = self.surfaces.write().await;
        if surfaces.insert(surface, broker).is_some() {
            info!("Replaced capability broker for {}", surface);
        } else {
            info!("Registered capability broker for {}", surface);
        }
    }

    pub async fn unregister_surface(&self, surface: SurfaceId) {
        if self.surfaces.write().await.remove(&surface).is_some() {
            info!("Unregistered capability broker for {}", surface);
        }
    }

    /// Handle a `GetMicrophone` request: forward `RequestMicrophone` to the
    /// broker for `surface` and await its deferred response.
    pub async fn get_microphone(
        &self,
        surface: SurfaceId,
    ) -> Result<CapabilityResponse, RelayError> {
        let broker = self
            .surfaces
            .read()
            .await
            .get(&surface)
            .cloned()
            .ok_or(RelayError::Unreachable(surface))?;

        debug!("Forwarding {:?} to {}", RelayMessage::RequestMicrophone, surface);

        let (reply_tx, reply_rx) = oneshot::channel();
        let request = BrokerRequest {
            message: RelayMessage::RequestMicrophone,
            reply: reply_tx,
        };

        broker
            .send(request)
            .await
            .map_err(|_| RelayError::Closed(surface))?;

        match tokio::time::timeout(self.timeout, reply_rx).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(_)) => Err(RelayError::Closed(surface)),
            Err(_) => Err(RelayError::Timeout {
                surface,
                timeout: self.timeout,
            }),
        }
    }
}
