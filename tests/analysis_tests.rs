// Tests for the analysis graph and the draw math: waveform coordinate
// mapping, the volume formula (including its non-finite silence edge), and
// the graph lifecycle.

use mic_monitor::analysis::{AudioGraph, ContextState, SILENCE_MIDPOINT};
use mic_monitor::capture::{AudioFrame, MicrophoneStream};
use mic_monitor::monitor::{average_deviation, render_waveform, volume_db};
use std::time::Duration;
use tokio::sync::mpsc;
use uuid::Uuid;

fn test_stream() -> (mpsc::Sender<AudioFrame>, MicrophoneStream) {
    let (tx, rx) = mpsc::channel(8);
    let stream = MicrophoneStream {
        id: Uuid::new_v4(),
        sample_rate: 16_000,
        channels: 1,
        frames: rx,
    };
    (tx, stream)
}

#[test]
fn test_silent_buffer_has_zero_deviation() {
    let samples = vec![SILENCE_MIDPOINT; 1024];
    assert_eq!(average_deviation(&samples), 0.0);
}

#[test]
fn test_silent_buffer_volume_is_negative_infinity() {
    // log10(0): preserved as display behavior, not masked
    let samples = vec![SILENCE_MIDPOINT; 1024];
    let db = volume_db(&samples);
    assert!(db.is_infinite() && db < 0.0, "got: {}", db);
}

#[test]
fn test_full_deviation_buffer_is_zero_db() {
    // Every sample pinned to the negative rail: |0/128 - 1| = 1.0 exactly
    let samples = vec![0u8; 1024];
    assert_eq!(average_deviation(&samples), 1.0);
    assert_eq!(volume_db(&samples), 0.0);
}

#[test]
fn test_square_wave_volume() {
    // Alternating 0/255: deviations 1.0 and 127/128, so the average falls
    // just short of 1.0 and the rounded figure lands at -0.03 dB
    let samples: Vec<u8> = (0..1024).map(|i| if i % 2 == 0 { 0 } else { 255 }).collect();

    let expected_avg = (1.0 + 127.0 / 128.0) / 2.0;
    assert!((average_deviation(&samples) - expected_avg).abs() < 1e-12);
    assert_eq!(volume_db(&samples), -0.03);
}

#[test]
fn test_volume_rounds_to_two_decimals() {
    let samples = vec![64u8; 512]; // deviation 0.5 → 20·log10(0.5) ≈ -6.0206
    assert_eq!(volume_db(&samples), -6.02);
}

#[test]
fn test_waveform_coordinate_mapping() {
    let frame = render_waveform(&[0, 128, 255], 300, 100);

    assert_eq!(frame.width, 300);
    assert_eq!(frame.height, 100);
    assert_eq!(frame.points.len(), 4, "three samples plus the closing segment");

    let (x0, y0) = frame.points[0];
    assert_eq!((x0, y0), (0.0, 0.0));

    let (x1, y1) = frame.points[1];
    assert_eq!(x1, 100.0);
    assert_eq!(y1, 50.0, "the midpoint sample sits on the midline");

    let (x2, y2) = frame.points[2];
    assert_eq!(x2, 200.0);
    assert!((y2 - 99.609375).abs() < 1e-4);

    assert_eq!(
        frame.points[3],
        (300.0, 50.0),
        "the polyline closes at the right edge midline"
    );
}

#[test]
fn test_waveform_of_empty_snapshot() {
    let frame = render_waveform(&[], 300, 100);
    assert_eq!(frame.points, vec![(300.0, 50.0)]);
}

#[tokio::test]
async fn test_graph_pumps_stream_into_analyser() {
    let (tx, stream) = test_stream();
    let graph = AudioGraph::new(stream, 64).expect("valid fft size");
    assert_eq!(graph.state(), ContextState::Running);

    tx.send(AudioFrame {
        samples: vec![i16::MAX; 64],
        sample_rate: 16_000,
        channels: 1,
        timestamp_ms: 0,
    })
    .await
    .expect("pump is draining the channel");

    tokio::time::sleep(Duration::from_millis(20)).await;

    let analyser = graph.analyser();
    let guard = analyser.lock().await;
    let mut out = vec![0u8; guard.frequency_bin_count()];
    guard.byte_time_domain(&mut out);
    assert!(
        out.iter().all(|&b| b == 255),
        "the pumped samples should be visible in the snapshot"
    );
}

#[tokio::test]
async fn test_graph_close_disconnects_source() {
    let (tx, stream) = test_stream();
    let mut graph = AudioGraph::new(stream, 64).expect("valid fft size");

    graph.close().await;
    assert_eq!(graph.state(), ContextState::Closed);

    // The pump is gone; the channel backs up and eventually rejects sends
    let frame = AudioFrame {
        samples: vec![0; 16],
        sample_rate: 16_000,
        channels: 1,
        timestamp_ms: 0,
    };
    for _ in 0..16 {
        if tx.try_send(frame.clone()).is_err() {
            return;
        }
    }
    panic!("a closed graph must stop draining its stream");
}

#[tokio::test]
async fn test_graph_rejects_invalid_fft_size() {
    let (_tx, stream) = test_stream();
    assert!(AudioGraph::new(stream, 1000).is_err(), "1000 is not a power of two");
}
