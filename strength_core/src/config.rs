//! Configuration file support for the progression engine.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/strengthlog/config.toml`.
//! Every knob has a default matching the built-in program, so a missing or
//! partial file always produces a usable config.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Engine configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub progression: ProgressionConfig,

    #[serde(default)]
    pub volume: VolumeConfig,

    #[serde(default)]
    pub feedback: FeedbackConfig,
}

/// Rep/weight prescription and fatigue model parameters
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProgressionConfig {
    /// Target reps used when a slot has no stored target and no history
    #[serde(default = "default_target_reps")]
    pub default_target_reps: i32,

    /// Starting weight for an exercise with no logged history
    #[serde(default = "default_base_weight")]
    pub base_weight: f64,

    /// Hard lower clamp on the prescribed rep target
    #[serde(default = "default_min_target_reps")]
    pub min_target_reps: i32,

    /// Hard upper clamp on the prescribed rep target
    #[serde(default = "default_max_target_reps")]
    pub max_target_reps: i32,

    /// Load multiplier applied when the muscle group is at deload
    #[serde(default = "default_deload_weight_multiplier")]
    pub deload_weight_multiplier: f64,

    /// Absolute weight floor after the deload multiplier
    #[serde(default = "default_min_weight")]
    pub min_weight: f64,

    /// Per-set rep decline of the fatigue model
    #[serde(default = "default_rep_drop_per_set")]
    pub rep_drop_per_set: i32,

    /// No set is prescribed below this rep count
    #[serde(default = "default_min_set_reps")]
    pub min_set_reps: i32,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            default_target_reps: default_target_reps(),
            base_weight: default_base_weight(),
            min_target_reps: default_min_target_reps(),
            max_target_reps: default_max_target_reps(),
            deload_weight_multiplier: default_deload_weight_multiplier(),
            min_weight: default_min_weight(),
            rep_drop_per_set: default_rep_drop_per_set(),
            min_set_reps: default_min_set_reps(),
        }
    }
}

/// Set-count adjustment parameters
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VolumeConfig {
    /// Default prescribed set count for a fresh slot
    #[serde(default = "default_target_sets")]
    pub default_target_sets: i32,

    /// Set-count floor for every exercise class
    #[serde(default = "default_min_sets")]
    pub min_sets: i32,
}

impl Default for VolumeConfig {
    fn default() -> Self {
        Self {
            default_target_sets: default_target_sets(),
            min_sets: default_min_sets(),
        }
    }
}

/// Feedback trend analysis parameters
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FeedbackConfig {
    /// How many recent feedback entries feed the trend analysis
    #[serde(default = "default_lookback")]
    pub lookback: usize,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            lookback: default_lookback(),
        }
    }
}

// Default value functions
fn default_target_reps() -> i32 {
    10
}

fn default_base_weight() -> f64 {
    50.0
}

fn default_min_target_reps() -> i32 {
    8
}

fn default_max_target_reps() -> i32 {
    15
}

fn default_deload_weight_multiplier() -> f64 {
    0.55
}

fn default_min_weight() -> f64 {
    5.0
}

fn default_rep_drop_per_set() -> i32 {
    1
}

fn default_min_set_reps() -> i32 {
    5
}

fn default_target_sets() -> i32 {
    4
}

fn default_min_sets() -> i32 {
    1
}

fn default_lookback() -> usize {
    3
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
        base.join("strengthlog").join("config.toml")
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    /// Reject configs whose clamps cannot be satisfied
    pub fn validate(&self) -> Result<()> {
        if self.progression.min_target_reps > self.progression.max_target_reps {
            return Err(Error::Config(format!(
                "min_target_reps {} > max_target_reps {}",
                self.progression.min_target_reps, self.progression.max_target_reps
            )));
        }
        if self.progression.min_weight < 0.0 {
            return Err(Error::Config("min_weight must be non-negative".into()));
        }
        if self.volume.min_sets < 1 {
            return Err(Error::Config("min_sets must be at least 1".into()));
        }
        if self.feedback.lookback == 0 {
            return Err(Error::Config("feedback lookback must be at least 1".into()));
        }
        Ok(())
    }
}
