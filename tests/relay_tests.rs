// Tests for the permission relay round trip: grants, denials, unreachable
// surfaces, and the bounded timeout.

use mic_monitor::capture::{DeniedDevice, FixtureDevice, FixtureSignal};
use mic_monitor::relay::{
    BrokerRequest, CapabilityBroker, PermissionRelay, RelayError, RelayMessage, SurfaceId,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

fn test_relay() -> PermissionRelay {
    PermissionRelay::new(Duration::from_millis(250))
}

#[tokio::test]
async fn test_granted_request_returns_stream() {
    let relay = test_relay();
    let surface = SurfaceId(7);
    let device = Arc::new(FixtureDevice::new(FixtureSignal::Silence, 16_000));
    let (broker_tx, _broker) = CapabilityBroker::new(device).spawn();
    relay.register_surface(surface, broker_tx).await;

    let response = relay
        .get_microphone(surface)
        .await
        .expect("round trip should succeed");

    assert!(response.success);
    assert!(response.error.is_none(), "granted response must not carry an error");

    let stream = response
        .into_result()
        .expect("granted response should carry a stream");
    assert_eq!(stream.sample_rate, 16_000);
    assert_eq!(stream.channels, 1);
}

#[tokio::test]
async fn test_denied_request_reports_reason() {
    let relay = test_relay();
    let surface = SurfaceId(7);
    let (broker_tx, _broker) = CapabilityBroker::new(Arc::new(DeniedDevice::default())).spawn();
    relay.register_surface(surface, broker_tx).await;

    let response = relay
        .get_microphone(surface)
        .await
        .expect("a denial still completes the round trip");

    assert!(!response.success);
    assert!(response.stream.is_none(), "denied response must not carry a stream");

    let reason = response
        .into_result()
        .expect_err("denied response should carry an error");
    assert!(reason.contains("Permission denied"), "got: {}", reason);
}

#[tokio::test]
async fn test_unregistered_surface_is_unreachable() {
    let relay = test_relay();

    let err = relay
        .get_microphone(SurfaceId(99))
        .await
        .expect_err("no broker is registered");

    assert!(matches!(err, RelayError::Unreachable(SurfaceId(99))));
}

#[tokio::test]
async fn test_unregistering_restores_unreachable() {
    let relay = test_relay();
    let surface = SurfaceId(4);
    let device = Arc::new(FixtureDevice::new(FixtureSignal::Silence, 16_000));
    let (broker_tx, _broker) = CapabilityBroker::new(device).spawn();

    relay.register_surface(surface, broker_tx).await;
    assert!(relay.get_microphone(surface).await.is_ok());

    relay.unregister_surface(surface).await;
    let err = relay
        .get_microphone(surface)
        .await
        .expect_err("broker is gone");
    assert!(matches!(err, RelayError::Unreachable(_)));
}

#[tokio::test]
async fn test_unresponsive_broker_times_out() {
    let relay = test_relay();
    let surface = SurfaceId(3);

    // A "broker" that accepts requests and never replies: the requests are
    // held alive so the reply channels stay open without an answer.
    let (tx, mut rx) = mpsc::channel::<BrokerRequest>(8);
    let _sink = tokio::spawn(async move {
        let mut held = Vec::new();
        while let Some(request) = rx.recv().await {
            held.push(request);
        }
    });
    relay.register_surface(surface, tx).await;

    let err = relay
        .get_microphone(surface)
        .await
        .expect_err("the round trip must be bounded");

    assert!(
        matches!(err, RelayError::Timeout { .. }),
        "expected a timeout, got: {}",
        err
    );
}

#[tokio::test]
async fn test_dead_broker_reports_closed() {
    let relay = test_relay();
    let surface = SurfaceId(5);

    let (tx, rx) = mpsc::channel::<BrokerRequest>(8);
    drop(rx);
    relay.register_surface(surface, tx).await;

    let err = relay
        .get_microphone(surface)
        .await
        .expect_err("the broker channel is closed");
    assert!(matches!(err, RelayError::Closed(SurfaceId(5))));
}

#[tokio::test]
async fn test_dropped_reply_reports_closed() {
    let relay = test_relay();
    let surface = SurfaceId(6);

    // A broker that consumes requests but drops the reply channel.
    let (tx, mut rx) = mpsc::channel::<BrokerRequest>(8);
    let _sink = tokio::spawn(async move { while rx.recv().await.is_some() {} });
    relay.register_surface(surface, tx).await;

    let err = relay
        .get_microphone(surface)
        .await
        .expect_err("the reply was dropped");
    assert!(matches!(err, RelayError::Closed(_)));
}

#[test]
fn test_relay_message_wire_tags() {
    let get = serde_json::to_value(RelayMessage::GetMicrophone).expect("serializable");
    assert_eq!(get, serde_json::json!({"type": "GET_MICROPHONE"}));

    let request = serde_json::to_value(RelayMessage::RequestMicrophone).expect("serializable");
    assert_eq!(request, serde_json::json!({"type": "REQUEST_MICROPHONE"}));
}
