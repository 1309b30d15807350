//! Decoder Configuration
//!
//! Timing and threshold parameters for the decoder core. Defaults match the
//! DCF77 broadcast format at a 1 kHz strobe rate and should only be changed
//! for simulation or for related longwave services with different pulse
//! timing.
//!
//! ## Example
//!
//! ```rust
//! use dcf77_core::config::DecoderConfig;
//!
//! let config = DecoderConfig::default();
//! assert_eq!(config.window_ticks, 1000);
//! config.validate().unwrap();
//!
//! let custom: DecoderConfig = DecoderConfig::from_yaml("
//! quality_threshold: 750
//! ").unwrap();
//! assert_eq!(custom.quality_threshold, 750);
//! assert_eq!(custom.window_ticks, 1000);
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Error type for configuration operations.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Failed to read configuration file
    ReadError(String),
    /// Failed to parse configuration
    ParseError(String),
    /// Invalid configuration value
    ValidationError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(msg) => write!(f, "failed to read config: {}", msg),
            ConfigError::ParseError(msg) => write!(f, "failed to parse config: {}", msg),
            ConfigError::ValidationError(msg) => write!(f, "invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Decoder timing and threshold parameters.
///
/// All tick quantities assume the fixed 1 kHz strobe, so 1 tick = 1 ms.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// Symbol window length in ticks (one second).
    pub window_ticks: u32,
    /// ZERO pulse duration in ticks (end of the short-pulse phase).
    pub zero_pulse_ticks: u32,
    /// ONE pulse duration in ticks (end of the long-pulse phase).
    pub one_pulse_ticks: u32,
    /// Phase-trial offset between the early/center/late detectors, in ticks.
    pub finesync_offset: u32,
    /// Minimum quality for a resolved second to be trusted (out of 1000).
    pub quality_threshold: u32,
    /// Consecutive degraded seconds tolerated in hold-over before the
    /// controller drops back to coarse acquisition.
    pub max_hold_symbols: u32,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            window_ticks: 1000,
            zero_pulse_ticks: 100,
            one_pulse_ticks: 200,
            finesync_offset: 10,
            quality_threshold: 800,
            max_hold_symbols: 30,
        }
    }
}

impl DecoderConfig {
    /// Check parameter consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.zero_pulse_ticks == 0 || self.zero_pulse_ticks >= self.one_pulse_ticks {
            return Err(ConfigError::ValidationError(format!(
                "pulse phases must satisfy 0 < zero ({}) < one ({})",
                self.zero_pulse_ticks, self.one_pulse_ticks
            )));
        }
        if self.one_pulse_ticks >= self.window_ticks {
            return Err(ConfigError::ValidationError(format!(
                "one_pulse_ticks ({}) must be shorter than the window ({})",
                self.one_pulse_ticks, self.window_ticks
            )));
        }
        if self.finesync_offset >= self.zero_pulse_ticks {
            return Err(ConfigError::ValidationError(format!(
                "finesync_offset ({}) must stay within the short-pulse phase ({})",
                self.finesync_offset, self.zero_pulse_ticks
            )));
        }
        if self.quality_threshold > self.window_ticks {
            return Err(ConfigError::ValidationError(format!(
                "quality_threshold ({}) exceeds the attainable range ({})",
                self.quality_threshold, self.window_ticks
            )));
        }
        Ok(())
    }

    /// Parse a configuration from a YAML string. Missing fields take their
    /// default values.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a YAML file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(format!("{}: {}", path.display(), e)))?;
        Self::from_yaml(&content)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}
