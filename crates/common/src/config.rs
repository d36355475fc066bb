//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{HandsignError, HandsignResult};

/// Global application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Recognizer thresholds and timings.
    pub recognizer: RecognizerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Tunables for the gesture recognizer.
///
/// Durations are expressed in seconds and converted to nanoseconds when a
/// session is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognizerConfig {
    /// Minimum continuous dwell before a letter counts as held.
    pub hold_threshold_secs: f64,

    /// Dwell required on each element of the wake sequence.
    pub sequence_dwell_secs: f64,

    /// Minimum gap between two Rock-sign mode toggles.
    pub mode_toggle_cooldown_secs: f64,

    /// Horizontal index-fingertip travel (pixels) between consecutive frames
    /// that counts as a swipe.
    pub swipe_threshold_px: i32,

    /// Cooldown shared by both hands after any swipe fires.
    pub swipe_cooldown_secs: f64,

    /// Width of the mirrored capture frame, used to convert normalized
    /// fingertip x into pixels.
    pub frame_width_px: u32,

    /// Whether the session starts awake (accepting commands).
    pub accepting_on_start: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "handsign_recognizer=trace,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            hold_threshold_secs: 1.0,
            sequence_dwell_secs: 1.0,
            mode_toggle_cooldown_secs: 2.0,
            swipe_threshold_px: 50,
            swipe_cooldown_secs: 1.0,
            frame_width_px: 640,
            accepting_on_start: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl RecognizerConfig {
    /// Reject values that would make the state machines meaningless.
    pub fn validate(&self) -> HandsignResult<()> {
        let durations = [
            ("hold_threshold_secs", self.hold_threshold_secs),
            ("sequence_dwell_secs", self.sequence_dwell_secs),
            ("mode_toggle_cooldown_secs", self.mode_toggle_cooldown_secs),
            ("swipe_cooldown_secs", self.swipe_cooldown_secs),
        ];
        for (name, value) in durations {
            if !value.is_finite() || value <= 0.0 {
                return Err(HandsignError::config(format!(
                    "{name} must be a positive number of seconds, got {value}"
                )));
            }
        }
        if self.swipe_threshold_px <= 0 {
            return Err(HandsignError::config(format!(
                "swipe_threshold_px must be positive, got {}",
                self.swipe_threshold_px
            )));
        }
        if self.frame_width_px == 0 {
            return Err(HandsignError::config("frame_width_px must be non-zero"));
        }
        Ok(())
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        let (config, error) = Self::load_or_default_from(&config_path);
        if let Some(e) = error {
            tracing::warn!("Failed to load config at {:?}: {}", config_path, e);
        }
        config
    }

    /// Like [`AppConfig::load`], but hands the load error back instead of
    /// logging it, for callers that install the logger from this config.
    /// A missing file is not an error.
    pub fn load_or_default_from(path: &Path) -> (Self, Option<HandsignError>) {
        if !path.exists() {
            return (Self::default(), None);
        }
        match Self::load_from(path) {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Load and validate config from an explicit path.
    pub fn load_from(path: &Path) -> HandsignResult<Self> {
        if !path.exists() {
            return Err(HandsignError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.recognizer.validate()?;
        Ok(config)
    }

    /// Save config to the standard location.
    pub fn save(&self) -> HandsignResult<PathBuf> {
        let config_path = config_file_path();
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    /// Save config to an explicit path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> HandsignResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("handsign").join("config.json")
}
