use anyhow::{Context, Result};
use clap::Parser;
use mic_monitor::capture::{CaptureDevice, DeniedDevice, FixtureDevice, FixtureSignal};
use mic_monitor::monitor::MonitorSession;
use mic_monitor::relay::{CapabilityBroker, PermissionRelay, SurfaceId};
use mic_monitor::{create_router, transcribe, AppState, Config};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Live microphone monitor: waveform, volume level, and transcription
#[derive(Parser, Debug)]
#[command(name = "mic-monitor", version)]
struct Args {
    /// Config file (without extension, resolved by the config loader)
    #[arg(long, default_value = "config/mic-monitor")]
    config: String,

    /// Override the HTTP port from the config file
    #[arg(long)]
    port: Option<u16>,

    /// Capture device to register: "sine", "square", "silence" or "denied"
    #[arg(long, default_value = "sine")]
    device: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let cfg = Config::load(&args.config)?;
    let port = args.port.unwrap_or(cfg.service.http.port);

    info!("{} v0.1.0", cfg.service.name);

    let device: Arc<dyn CaptureDevice> = match args.device.as_str() {
        "square" => Arc::new(FixtureDevice::new(FixtureSignal::Square, 16_000)),
        "silence" => Arc::new(FixtureDevice::new(FixtureSignal::Silence, 16_000)),
        "denied" => Arc::new(DeniedDevice::default()),
        _ => Arc::new(FixtureDevice::new(
            FixtureSignal::Sine {
                frequency_hz: 440.0,
            },
            16_000,
        )),
    };
    info!("Capture device: {}", device.name());

    let monitor_config = cfg.monitor.to_monitor_config();
    let surface = SurfaceId(cfg.monitor.surface_id);

    let relay = PermissionRelay::new(monitor_config.capability_timeout);
    let (broker_tx, _broker_task) = CapabilityBroker::new(device).spawn();
    relay.register_surface(surface, broker_tx).await;

    let engine = transcribe::negotiate(
        &cfg.recognition.engine,
        cfg.recognition.script.as_deref().map(Path::new),
    );
    let recognition_config = cfg.recognition.to_recognition_config();

    let monitor = Arc::new(MonitorSession::new(
        monitor_config,
        relay,
        recognition_config,
        engine,
    ));
    let router = create_router(AppState::new(monitor));

    let addr = format!("{}:{}", cfg.service.http.bind, port);
    info!("HTTP control API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, router)
        .await
        .context("HTTP server error")?;

    Ok(())
}
