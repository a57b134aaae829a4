// Tests for configuration loading and its conversion into the runtime
// config types.

use mic_monitor::relay::SurfaceId;
use mic_monitor::Config;
use std::time::Duration;

const FULL_CONFIG: &str = r#"
[service]
name = "mic-monitor"

[service.http]
bind = "127.0.0.1"
port = 3939

[monitor]
surface_id = 2
fft_size = 1024
canvas_width = 640
canvas_height = 200
frame_interval_ms = 33
capability_timeout_secs = 5

[recognition]
engine = "scripted"
script = "config/recognition-script.json"
lang = "de-DE"
continuous = true
interim_results = false
"#;

const MINIMAL_CONFIG: &str = r#"
[service]
name = "mic-monitor"

[service.http]
bind = "0.0.0.0"
port = 8080

[monitor]
surface_id = 1

[recognition]
engine = "none"
"#;

fn load(toml: &str) -> Config {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("mic-monitor.toml");
    std::fs::write(&path, toml).expect("write config");

    let name = dir.path().join("mic-monitor");
    Config::load(name.to_str().expect("utf-8 path")).expect("config should load")
}

#[test]
fn test_load_full_config() {
    let cfg = load(FULL_CONFIG);

    assert_eq!(cfg.service.name, "mic-monitor");
    assert_eq!(cfg.service.http.bind, "127.0.0.1");
    assert_eq!(cfg.service.http.port, 3939);

    let monitor = cfg.monitor.to_monitor_config();
    assert_eq!(monitor.surface, SurfaceId(2));
    assert_eq!(monitor.fft_size, 1024);
    assert_eq!(monitor.canvas_width, 640);
    assert_eq!(monitor.canvas_height, 200);
    assert_eq!(monitor.frame_interval, Duration::from_millis(33));
    assert_eq!(monitor.capability_timeout, Duration::from_secs(5));

    let recognition = cfg.recognition.to_recognition_config();
    assert_eq!(recognition.lang, "de-DE");
    assert!(recognition.continuous);
    assert!(!recognition.interim_results);
}

#[test]
fn test_monitor_settings_have_defaults() {
    let cfg = load(MINIMAL_CONFIG);

    let monitor = cfg.monitor.to_monitor_config();
    assert_eq!(monitor.surface, SurfaceId(1));
    assert_eq!(monitor.fft_size, 2048, "default analyser window");
    assert_eq!(monitor.canvas_width, 300);
    assert_eq!(monitor.canvas_height, 100);
    assert_eq!(monitor.frame_interval, Duration::from_millis(16));
    assert_eq!(monitor.capability_timeout, Duration::from_secs(10));

    let recognition = cfg.recognition.to_recognition_config();
    assert_eq!(recognition.lang, "en-US", "default locale");
    assert!(recognition.continuous);
    assert!(recognition.interim_results);
    assert!(cfg.recognition.script.is_none());
}

#[test]
fn test_missing_config_fails() {
    assert!(Config::load("config/does-not-exist").is_err());
}
