//! Configuration management for the staring contest application

use crate::constants::{
    DEFAULT_COUNTDOWN_TICKS, DEFAULT_EAR_THRESHOLD, DEFAULT_PLAYBACK_FPS, DEFAULT_TICK_INTERVAL_MS,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Blink detection configuration
    pub detection: DetectionConfig,

    /// Countdown configuration
    pub countdown: CountdownConfig,

    /// Session policy configuration
    pub session: SessionConfig,

    /// Leaderboard store configuration
    pub leaderboard: LeaderboardConfig,

    /// Recorded stream playback configuration
    pub capture: CaptureConfig,
}

/// Blink detection parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// EAR below which a frame counts as a blink
    pub ear_threshold: f64,
}

/// Countdown parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountdownConfig {
    /// Number of ticks before the round starts
    pub ticks: u32,

    /// Interval between ticks in milliseconds
    pub tick_interval_ms: u64,
}

impl CountdownConfig {
    /// Tick interval as a duration
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

/// Session policy parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Abandon a running round after this many seconds without a detected
    /// face. Off by default: a round waits indefinitely.
    pub idle_timeout_secs: Option<f64>,
}

impl SessionConfig {
    /// Idle timeout as a duration, if enabled
    #[must_use]
    pub fn idle_timeout(&self) -> Option<Duration> {
        self.idle_timeout_secs.map(Duration::from_secs_f64)
    }
}

/// Leaderboard store parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardConfig {
    /// Path of the flat leaderboard file
    pub path: PathBuf,
}

/// Recorded stream playback parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Playback rate for landmark recordings (0 replays unpaced)
    pub playback_fps: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            detection: DetectionConfig::default(),
            countdown: CountdownConfig::default(),
            session: SessionConfig::default(),
            leaderboard: LeaderboardConfig::default(),
            capture: CaptureConfig::default(),
        }
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            ear_threshold: DEFAULT_EAR_THRESHOLD,
        }
    }
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            ticks: DEFAULT_COUNTDOWN_TICKS,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_timeout_secs: None,
        }
    }
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("leaderboard.json"),
        }
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            playback_fps: DEFAULT_PLAYBACK_FPS,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        serde_yaml::from_str(&content).map_err(|e| Error::ConfigError(format!("failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::ConfigError(format!("failed to serialize config: {e}")))?;

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !self.detection.ear_threshold.is_finite() || self.detection.ear_threshold <= 0.0 {
            return Err(Error::ConfigError(
                "EAR threshold must be a positive finite value".to_string(),
            ));
        }
        if self.detection.ear_threshold >= 1.0 {
            return Err(Error::ConfigError(
                "EAR threshold must be below 1.0".to_string(),
            ));
        }

        if self.countdown.ticks == 0 {
            return Err(Error::ConfigError(
                "countdown must have at least one tick".to_string(),
            ));
        }

        if let Some(timeout) = self.session.idle_timeout_secs {
            if !timeout.is_finite() || timeout <= 0.0 {
                return Err(Error::ConfigError(
                    "idle timeout must be a positive number of seconds".to_string(),
                ));
            }
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Staring Contest Configuration

# Blink detection
detection:
  ear_threshold: 0.2

# Countdown before the round starts
countdown:
  ticks: 3
  tick_interval_ms: 1000

# Session policy
session:
  # Abandon a round after this many seconds without a detected face.
  # Disabled by default: the round waits indefinitely.
  idle_timeout_secs: null

# Leaderboard store
leaderboard:
  path: "leaderboard.json"

# Recorded stream playback
capture:
  playback_fps: 30
"#;
