use super::analyser::Analyser;
use crate::capture::MicrophoneStream;
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info};
use uuid::Uuid;

/// Lifecycle state of an audio context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextState {
    Running,
    Closed,
}

/// Analysis graph wired from a granted microphone stream
///
/// The context → source → analyser chain: a pump task drains the stream's
/// frames into the analyser ring from construction until `close`.
pub struct AudioGraph {
    context_id: Uuid,
    state: ContextState,
    analyser: Arc<Mutex<Analyser>>,
    pump: Option<JoinHandle<()>>,
}

impl AudioGraph {
    /// Build the graph and connect source → analyser
    pub fn new(stream: MicrophoneStream, fft_size: usize) -> Result<Self> {
        let analyser = Arc::new(Mutex::new(Analyser::new(fft_size)?));
        let context_id = Uuid::new_v4();

        let sink = Arc::clone(&analyser);
        let stream_id = stream.id;
        let mut frames = stream.frames;
        let pump = tokio::spawn(async move {
            debug!("Source pump started (stream {})", stream_id);
            while let Some(frame) = frames.recv().await {
                sink.lock().await.push_samples(&frame.samples);
            }
            debug!("Source pump stopped (stream {})", stream_id);
        });

        info!(
            "Audio graph connected (context {}, fft size {})",
            context_id, fft_size
        );

        Ok(Self {
            context_id,
            state: ContextState::Running,
            analyser,
            pump: Some(pump),
        })
    }

    pub fn context_id(&self) -> Uuid {
        self.context_id
    }

    pub fn state(&self) -> ContextState {
        self.state
    }

    /// Shared handle to the analyser node
    pub fn analyser(&self) -> Arc<Mutex<Analyser>> {
        Arc::clone(&self.analyser)
    }

    /// Disconnect the source and close the context
    pub async fn close(&mut self) {
        if let Some(pump) = self.pump.take() {
            pump.abort();
            let _ = pump.await;
        }
        self.state = ContextState::Closed;
        info!("Audio graph closed (context {})", self.context_id);
    }
}
