use super::config::MonitorConfig;
use super::display::{render_waveform, volume_db, ControlState, DisplaySnapshot};
use super::stats::MonitorStats;
use crate::analysis::{Analyser, AudioGraph};
use crate::capture::MicrophoneStream;
use crate::relay::PermissionRelay;
use crate::transcribe::{
    RecognitionConfig, RecognitionEngine, RecognitionEvent, TranscriptBuffer, TranscriptView,
};
use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use futures::stream::StreamExt;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

/// Lifecycle states of a monitoring session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Idle,
    Requesting,
    Active,
    Stopped,
    Failed,
}

/// Remediation steps shown when microphone access is denied
const PERMISSION_REMEDIATION: &str = "Error accessing microphone. \
Please follow these steps to enable microphone access:\n\
1. Open the monitor's surface settings\n\
2. Find the capture permissions section\n\
3. Under \"Microphone\", select \"Allow\"\n\
4. Start monitoring again";

/// A monitoring session: microphone acquisition, waveform/volume rendering,
/// and live transcription
///
/// Owns all session state. Acquisition goes through the permission relay;
/// the granted stream is wired into an analysis graph whose snapshots the
/// draw loop turns into waveform frames and a volume figure. Transcription
/// runs independently when an engine was negotiated at startup.
pub struct MonitorSession {
    config: MonitorConfig,
    relay: PermissionRelay,

    /// Current lifecycle state
    state: Arc<Mutex<SessionState>>,

    /// Whether the draw loop should keep rendering
    is_monitoring: Arc<AtomicBool>,

    /// When monitoring last became active
    started_at: Arc<Mutex<Option<DateTime<Utc>>>>,

    /// Waveform frames rendered since monitoring became active
    frames_rendered: Arc<AtomicUsize>,

    /// Analysis graph, present only while a stream is wired up
    graph: Arc<Mutex<Option<AudioGraph>>>,

    /// Handle for the draw loop task
    draw_task: Arc<Mutex<Option<JoinHandle<()>>>>,

    /// Negotiated recognition engine, if the platform has one
    recognition: Arc<Mutex<Option<Box<dyn RecognitionEngine>>>>,

    /// Handle for the recognition event task
    recognition_task: Arc<Mutex<Option<JoinHandle<()>>>>,

    recognition_config: RecognitionConfig,

    /// Accumulated transcript
    transcript: Arc<Mutex<TranscriptBuffer>>,

    /// State the UI surface reads
    display: Arc<RwLock<DisplaySnapshot>>,
}

impl MonitorSession {
    pub fn new(
        config: MonitorConfig,
        relay: PermissionRelay,
        recognition_config: RecognitionConfig,
        engine: Option<Box<dyn RecognitionEngine>>,
    ) -> Self {
        Self {
            config,
            relay,
            state: Arc::new(Mutex::new(SessionState::Idle)),
            is_monitoring: Arc::new(AtomicBool::new(false)),
            started_at: Arc::new(Mutex::new(None)),
            frames_rendered: Arc::new(AtomicUsize::new(0)),
            graph: Arc::new(Mutex::new(None)),
            draw_task: Arc::new(Mutex::new(None)),
            recognition: Arc::new(Mutex::new(engine)),
            recognition_task: Arc::new(Mutex::new(None)),
            recognition_config,
            transcript: Arc::new(Mutex::new(TranscriptBuffer::new())),
            display: Arc::new(RwLock::new(DisplaySnapshot::default())),
        }
    }

    /// Start monitoring
    ///
    /// Acquires the microphone through the relay, wires the analysis graph,
    /// and begins the draw and recognition loops. All failures are surfaced
    /// to the display here and leave the session stopped.
    pub async fn start(&self) -> Result<()> {
        if self.is_monitoring.load(Ordering::SeqCst) {
            warn!("Monitoring already started");
            return Ok(());
        }

        self.set_state(SessionState::Requesting).await;
        info!("Requesting microphone for {}", self.config.surface);

        let response = match self.relay.get_microphone(self.config.surface).await {
            Ok(response) => response,
            Err(e) => return self.fail(e.to_string()).await,
        };

        let stream = match response.into_result() {
            Ok(stream) => stream,
            Err(reason) => return self.fail(reason).await,
        };

        if let Err(e) = self.activate(stream).await {
            return self.fail(format!("{:#}", e)).await;
        }

        self.set_state(SessionState::Active).await;
        info!("Monitoring session active");
        Ok(())
    }

    /// Stop monitoring and release the session's audio resources
    ///
    /// Guarded: without a live audio graph there is nothing to tear down and
    /// the call is a no-op.
    pub async fn stop(&self) -> Result<()> {
        if self.graph.lock().await.is_none() {
            debug!("Stop requested with no active audio graph; nothing to do");
            return Ok(());
        }

        self.teardown().await;
        self.set_state(SessionState::Stopped).await;
        info!("Monitoring session stopped");
        Ok(())
    }

    pub fn is_monitoring(&self) -> bool {
        self.is_monitoring.load(Ordering::SeqCst)
    }

    pub async fn state(&self) -> SessionState {
        *self.state.lock().await
    }

    /// Current session statistics
    pub async fn stats(&self) -> MonitorStats {
        let started_at = *self.started_at.lock().await;
        let duration_secs = started_at
            .map(|t| Utc::now().signed_duration_since(t).num_milliseconds() as f64 / 1000.0)
            .unwrap_or(0.0);

        MonitorStats {
            state: self.state().await,
            is_monitoring: self.is_monitoring(),
            started_at,
            duration_secs,
            frames_rendered: self.frames_rendered.load(Ordering::SeqCst),
        }
    }

    /// Snapshot of everything the UI surface shows
    pub async fn display(&self) -> DisplaySnapshot {
        self.display.read().await.clone()
    }

    /// Accumulated transcript
    pub async fn transcript(&self) -> TranscriptView {
        self.transcript.lock().await.view()
    }

    async fn set_state(&self, state: SessionState) {
        *self.state.lock().await = state;
    }

    /// Wire the granted stream up and begin the session's loops
    async fn activate(&self, stream: MicrophoneStream) -> Result<()> {
        info!(
            "Microphone granted (stream {}, {} Hz)",
            stream.id, stream.sample_rate
        );

        let graph = AudioGraph::new(stream, self.config.fft_size)
            .context("Failed to build the analysis graph")?;
        let analyser = graph.analyser();
        {
            *self.graph.lock().await = Some(graph);
        }

        {
            *self.started_at.lock().await = Some(Utc::now());
        }
        self.frames_rendered.store(0, Ordering::SeqCst);

        // The draw loop checks this at every frame entry; it must already be
        // set when the first frame runs
        self.is_monitoring.store(true, Ordering::SeqCst);

        {
            let mut display = self.display.write().await;
            display.controls = ControlState::monitoring();
            display.status_message = None;
        }

        self.start_recognition()
            .await
            .context("Failed to start speech recognition")?;

        let handle = self.spawn_draw_loop(analyser);
        {
            *self.draw_task.lock().await = Some(handle);
        }

        Ok(())
    }

    /// Surface a failure, tear down through the stop path, end in Stopped
    async fn fail(&self, reason: String) -> Result<()> {
        error!("Error accessing microphone: {}", reason);

        let message = if reason.contains("Permission") {
            PERMISSION_REMEDIATION.to_string()
        } else {
            format!("Error accessing microphone. {}", reason)
        };

        self.set_state(SessionState::Failed).await;
        {
            self.display.write().await.status_message = Some(message.clone());
        }

        self.teardown().await;
        self.set_state(SessionState::Stopped).await;

        bail!(message)
    }

    /// The stop path: halt the loops, release the graph, reset the controls
    ///
    /// Safe to run when nothing was ever set up.
    async fn teardown(&self) {
        // Flag first: an in-flight frame finishes, the next one never starts
        self.is_monitoring.store(false, Ordering::SeqCst);

        if let Some(task) = self.draw_task.lock().await.take() {
            task.abort();
            let _ = task.await;
        }

        if let Some(task) = self.recognition_task.lock().await.take() {
            task.abort();
            let _ = task.await;
        }

        if let Some(engine) = self.recognition.lock().await.as_mut() {
            if let Err(e) = engine.stop().await {
                warn!("Failed to stop recognition engine: {}", e);
            }
        }

        if let Some(mut graph) = self.graph.lock().await.take() {
            graph.close().await;
        }

        self.display.write().await.controls = ControlState::idle();
    }

    /// Begin the recognition session, if an engine was negotiated
    async fn start_recognition(&self) -> Result<()> {
        let mut engine_guard = self.recognition.lock().await;
        let Some(engine) = engine_guard.as_mut() else {
            return Ok(());
        };

        let mut events = engine.start(&self.recognition_config).await?;

        let transcript = Arc::clone(&self.transcript);
        let display = Arc::clone(&self.display);

        let task = tokio::spawn(async move {
            debug!("Recognition task started");

            while let Some(event) = events.next().await {
                match event {
                    RecognitionEvent::Result(result) => {
                        let view = {
                            let mut buffer = transcript.lock().await;
                            buffer.apply(&result);
                            buffer.view()
                        };
                        display.write().await.transcript = view;
                    }
                    RecognitionEvent::Error { message } => {
                        // Log only; recognition errors are non-fatal and
                        // nothing restarts the session
                        error!("Speech recognition error: {}", message);
                    }
                }
            }

            debug!("Recognition task stopped");
        });

        *self.recognition_task.lock().await = Some(task);
        Ok(())
    }

    /// Spawn the per-frame render loop
    ///
    /// Frames are strictly sequential; the loop exits at the first frame
    /// entry after `is_monitoring` flips false.
    fn spawn_draw_loop(&self, analyser: Arc<Mutex<Analyser>>) -> JoinHandle<()> {
        let is_monitoring = Arc::clone(&self.is_monitoring);
        let frames_rendered = Arc::clone(&self.frames_rendered);
        let display = Arc::clone(&self.display);
        let width = self.config.canvas_width;
        let height = self.config.canvas_height;
        let frame_interval = self.config.frame_interval;

        tokio::spawn(async move {
            debug!("Draw loop started");

            let bin_count = analyser.lock().await.frequency_bin_count();
            let mut samples = vec![0u8; bin_count];
            let mut frames = tokio::time::interval(frame_interval);
            frames.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                frames.tick().await;
                if !is_monitoring.load(Ordering::SeqCst) {
                    break;
                }

                analyser.lock().await.byte_time_domain(&mut samples);

                let waveform = render_waveform(&samples, width, height);
                let volume = volume_db(&samples);

                {
                    let mut snapshot = display.write().await;
                    snapshot.waveform = Some(waveform);
                    snapshot.volume_text = format!("Volume Level: {} dB", volume);
                }

                frames_rendered.fetch_add(1, Ordering::SeqCst);
            }

            debug!("Draw loop stopped");
        })
    }
}
