//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{DriftError, DriftResult};

/// Global driftview configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriftConfig {
    /// Default drift animation parameters.
    pub animation: AnimationDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Default drift animation parameters used when a caller omits them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationDefaults {
    /// Whether single drifts autoreverse forever.
    pub repeats: bool,

    /// Lower zoom bound (1.0 = natural displayed size).
    pub min_zoom: f64,

    /// Upper zoom bound, passed to the sampler as a distance.
    pub max_zoom: f64,

    /// Lower pan speed bound (points per second).
    pub min_speed: f64,

    /// Upper pan speed bound (points per second).
    pub max_speed: f64,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "driftview_core=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

impl Default for AnimationDefaults {
    fn default() -> Self {
        Self {
            repeats: false,
            min_zoom: 1.0,
            max_zoom: 1.8,
            min_speed: 3.0,
            max_speed: 5.0,
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

/// Largest bound whose hundredths still fit the sampler's 32-bit draw range.
pub const MAX_BOUND: f64 = u32::MAX as f64 / 100.0;

impl AnimationDefaults {
    /// Check the preconditions the traits builder relies on.
    pub fn validate(&self) -> DriftResult<()> {
        for (name, value) in [
            ("min_zoom", self.min_zoom),
            ("max_zoom", self.max_zoom),
            ("min_speed", self.min_speed),
            ("max_speed", self.max_speed),
        ] {
            if !value.is_finite() {
                return Err(DriftError::invalid_parameter(format!(
                    "{name} must be finite, got {value}"
                )));
            }
            if value > MAX_BOUND {
                return Err(DriftError::invalid_parameter(format!(
                    "{name} must not exceed {MAX_BOUND}, got {value}"
                )));
            }
        }
        if self.min_zoom < 0.0 || self.max_zoom < 0.0 {
            return Err(DriftError::invalid_parameter(
                "zoom bounds must not be negative",
            ));
        }
        if self.min_speed <= 0.0 || self.max_speed <= 0.0 {
            return Err(DriftError::invalid_parameter(
                "speed bounds must be strictly positive",
            ));
        }
        Ok(())
    }
}

impl DriftConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match Self::load_from(&config_path) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!("Failed to load config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Load and validate config from an explicit path.
    pub fn load_from(path: &Path) -> DriftResult<Self> {
        if !path.exists() {
            return Err(DriftError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Parse and validate config from a JSON document.
    pub fn from_json_str(content: &str) -> DriftResult<Self> {
        let config: Self = serde_json::from_str(content)?;
        config
            .animation
            .validate()
            .map_err(|e| DriftError::config(e.to_string()))?;
        Ok(config)
    }

    /// Save config to the standard location.
    pub fn save(&self) -> DriftResult<()> {
        self.save_to(&config_file_path())
    }

    /// Save config as pretty JSON, creating parent directories.
    pub fn save_to(&self, path: &Path) -> DriftResult<()> {
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
    base.join("driftview").join("config.json")
}
