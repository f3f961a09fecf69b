mod capture;
mod detection;
mod gate;
mod session;
mod system;

pub use capture::*;
pub use detection::*;
pub use gate::*;
pub use session::*;
pub use system::*;

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::ConfigError;

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub gate: GateConfig,
    pub detection: DetectionConfig,
    pub capture: CaptureConfig,
    pub session: SessionConfig,
    pub system: SystemConfig,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.gate.validate()?;
        if !self.detection.reports_eye_state() {
            // not fatal: the gate just never sees eye probabilities
            warn!("[Config::validate] detection.classification_mode is none, blinks cannot be detected");
        }
        Ok(())
    }
}

pub fn get_config_path() -> Option<String> {
    let config_paths = ["config.toml", "../config.toml"];
    config_paths
        .iter()
        .find(|path| Path::new(path).exists())
        .map(|path| path.to_string())
}

pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let config_str = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let config: Config = toml::from_str(&config_str).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })?;
    config.validate()?;
    info!("[load_config] load config from {} : {:?}", path.display(), config);
    Ok(config)
}

/// Loads `config.toml` from the first candidate location, or defaults when
/// none exists.
pub fn load_config() -> Result<Config, ConfigError> {
    match get_config_path() {
        Some(path) => load_config_from(Path::new(&path)),
        None => {
            info!("[load_config] no config.toml found, using defaults");
            Ok(Config::default())
        }
    }
}

// process-wide config
use once_cell::sync::Lazy;
use std::sync::Mutex;

pub static CONFIG: Lazy<Mutex<Option<Config>>> = Lazy::new(|| Mutex::new(None));

pub fn set_config(config: Config) {
    let mut config_guard = CONFIG.lock().unwrap_or_else(|e| e.into_inner());
    *config_guard = Some(config);
}

pub fn init_config() -> Result<Config, ConfigError> {
    let config = load_config()?;
    set_config(config.clone());
    Ok(config)
}

pub fn get_config() -> Option<Config> {
    CONFIG.lock().unwrap_or_else(|e| e.into_inner()).clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::tempdir;

    fn write_config(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, contents).expect("write config");
        (dir, path)
    }

    #[test]
    fn empty_file_yields_defaults() {
        let (_dir, path) = write_config("");
        let config = load_config_from(&path).expect("load");
        assert_eq!(config, Config::default());
        assert_eq!(config.gate.closed_eye_threshold, 0.4);
        assert_eq!(config.gate.debounce_ms, 500);
        assert_eq!(config.capture.flash, Flash::Off);
        assert!(config.capture.skip_metadata);
        assert_eq!(config.session.camera_position, CameraPosition::Front);
        assert!(config.session.pause_after_capture);
        assert_eq!(config.system.log_level(), "info");
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let (_dir, path) = write_config(
            r#"
[gate]
debounce_ms = 800

[detection]
performance_mode = "fast"

[session]
pause_after_capture = false

[system]
log_level = "debug"
"#,
        );
        let config = load_config_from(&path).expect("load");
        assert_eq!(config.gate.debounce_ms, 800);
        assert_eq!(config.gate.closed_eye_threshold, 0.4);
        assert_eq!(config.detection.performance_mode, PerformanceMode::Fast);
        assert_eq!(config.detection.classification_mode, DetectorMode::All);
        assert_eq!(config.system.log_level(), "debug");
        assert!(!config.session.pause_after_capture);
        assert_eq!(config.session.camera_position, CameraPosition::Front);
    }

    #[test]
    fn out_of_range_threshold_is_rejected() {
        for bad in ["0.0", "1.0", "-0.2", "1.5"] {
            let (_dir, path) = write_config(&format!("[gate]\nclosed_eye_threshold = {}\n", bad));
            match load_config_from(&path) {
                Err(ConfigError::Invalid(msg)) => assert!(msg.contains("closed_eye_threshold")),
                other => panic!("expected invalid for {}, got {:?}", bad, other),
            }
        }
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let (_dir, path) = write_config("[gate\ndebounce_ms = ");
        assert!(matches!(load_config_from(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("nope.toml");
        assert!(matches!(load_config_from(&path), Err(ConfigError::Io { .. })));
    }

    #[test]
    #[serial]
    fn global_config_round_trips() {
        let mut config = Config::default();
        config.gate.debounce_ms = 250;
        set_config(config.clone());
        assert_eq!(get_config(), Some(config));
    }
}
