use crate::monitor::MonitorConfig;
use crate::relay::SurfaceId;
use crate::transcribe::RecognitionConfig;
use anyhow::Result;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub monitor: MonitorSettings,
    pub recognition: RecognitionSettings,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

/// `[monitor]` section; tuning knobs fall back to the session defaults
#[derive(Debug, Deserialize)]
pub struct MonitorSettings {
    pub surface_id: u32,
    #[serde(default = "default_fft_size")]
    pub fft_size: usize,
    #[serde(default = "default_canvas_width")]
    pub canvas_width: u32,
    #[serde(default = "default_canvas_height")]
    pub canvas_height: u32,
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,
    #[serde(default = "default_capability_timeout_secs")]
    pub capability_timeout_secs: u64,
}

impl MonitorSettings {
    pub fn to_monitor_config(&self) -> MonitorConfig {
        MonitorConfig {
            surface: SurfaceId(self.surface_id),
            fft_size: self.fft_size,
            canvas_width: self.canvas_width,
            canvas_height: self.canvas_height,
            frame_interval: Duration::from_millis(self.frame_interval_ms),
            capability_timeout: Duration::from_secs(self.capability_timeout_secs),
        }
    }
}

/// `[recognition]` section
#[derive(Debug, Deserialize)]
pub struct RecognitionSettings {
    /// Engine selection: "scripted" replays a JSON fixture, "none" disables
    /// transcription
    pub engine: String,
    /// Event script for the scripted engine
    pub script: Option<String>,
    #[serde(default = "default_lang")]
    pub lang: String,
    #[serde(default = "default_true")]
    pub continuous: bool,
    #[serde(default = "default_true")]
    pub interim_results: bool,
}

impl RecognitionSettings {
    pub fn to_recognition_config(&self) -> RecognitionConfig {
        RecognitionConfig {
            continuous: self.continuous,
            interim_results: self.interim_results,
            lang: self.lang.clone(),
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

fn default_fft_size() -> usize {
    2048
}

fn default_canvas_width() -> u32 {
    300
}

fn default_canvas_height() -> u32 {
    100
}

fn default_frame_interval_ms() -> u64 {
    16
}

fn default_capability_timeout_secs() -> u64 {
    10
}

fn default_lang() -> String {
    "en-US".to_string()
}

fn default_true() -> bool {
    true
}
