//! Configuration for the write-minimization engine.
//!
//! This module defines the settings the surrounding controller passes in. It
//! provides:
//! 1. **Defaults:** Baseline training horizon, sample threshold and cell width.
//! 2. **Structures:** Hierarchical config for compression, learning and wear.
//! 3. **Enums:** The compression mode selector.
//!
//! Configuration is supplied as JSON (`EngineConfig::from_json`) or built with
//! `EngineConfig::default()`.

use serde::{Deserialize, Serialize};

use crate::common::ConfigError;
use crate::wear::CellLevels;

/// Default configuration constants for the engine.
mod defaults {
    use crate::wear::CellLevels;

    /// Writes observed before the learner extracts its pattern table.
    pub const TRAINING_HORIZON: u64 = 5_000_000;

    /// Fraction of the sample-counter range used as the zero-prone threshold.
    pub const THRESHOLD_FACTOR: f64 = 0.4;

    /// Bits stored per physical cell (triple-level cells).
    pub const CELL_LEVELS: CellLevels = CellLevels::Three;
}

/// Compression applied to each write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum CompressionMode {
    /// Writes are stored raw.
    None,
    /// Static Frequent-Pattern Compression.
    #[serde(alias = "FPC")]
    Fpc,
    /// Static Base-Delta-Immediate.
    #[default]
    #[serde(alias = "BDI")]
    Bdi,
    /// Adaptive: baseline FPC while training, learned FPC/BDI afterward.
    #[serde(alias = "DFPC", alias = "Dynamic")]
    Dfpc,
}

/// Top-level engine configuration.
///
/// # Examples
///
/// ```
/// use nvwrite_core::config::{CompressionMode, EngineConfig};
///
/// let json = r#"{
///     "compression": { "mode": "Dfpc", "encode": true },
///     "learner": { "training_horizon": 1000 }
/// }"#;
///
/// let config = EngineConfig::from_json(json).unwrap();
/// assert_eq!(config.compression.mode, CompressionMode::Dfpc);
/// assert!(config.compression.encode);
/// assert_eq!(config.learner.training_horizon, 1000);
/// assert!((config.learner.threshold_factor - 0.4).abs() < f64::EPSILON);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Compression settings
    #[serde(default)]
    pub compression: CompressionConfig,
    /// Pattern learner settings
    #[serde(default)]
    pub learner: LearnerConfig,
    /// Wear accounting settings
    #[serde(default)]
    pub wear: WearConfig,
}

impl EngineConfig {
    /// Parses and validates a JSON configuration document.
    ///
    /// Missing sections and fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] for malformed input (including invalid
    /// cell widths) and the validation errors of [`EngineConfig::validate`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges that the type system does not enforce.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ThresholdFactor`] when the factor is outside
    /// `[0, 1]` or NaN.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let factor = self.learner.threshold_factor;
        if !(0.0..=1.0).contains(&factor) {
            return Err(ConfigError::ThresholdFactor(factor));
        }
        Ok(())
    }
}

/// Compression mode and post-processing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressionConfig {
    /// Codec selection
    #[serde(default)]
    pub mode: CompressionMode,

    /// Apply the ternary remap after compression
    #[serde(default)]
    pub encode: bool,
}

/// Pattern learner configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LearnerConfig {
    /// Writes observed before extraction (0 = steady state from the first write)
    #[serde(default = "LearnerConfig::default_training_horizon")]
    pub training_horizon: u64,

    /// Sample threshold factor in `[0, 1]`
    #[serde(default = "LearnerConfig::default_threshold_factor")]
    pub threshold_factor: f64,
}

impl LearnerConfig {
    fn default_training_horizon() -> u64 {
        defaults::TRAINING_HORIZON
    }

    fn default_threshold_factor() -> f64 {
        defaults::THRESHOLD_FACTOR
    }
}

impl Default for LearnerConfig {
    fn default() -> Self {
        Self {
            training_horizon: defaults::TRAINING_HORIZON,
            threshold_factor: defaults::THRESHOLD_FACTOR,
        }
    }
}

/// Wear accounting configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WearConfig {
    /// Bits per cell (1, 2 or 3)
    #[serde(default = "WearConfig::default_cell_levels")]
    pub cell_levels: CellLevels,

    /// Count changed cells instead of reporting the stored width
    #[serde(default = "WearConfig::default_count_cell_changes")]
    pub count_cell_changes: bool,
}

impl WearConfig {
    fn default_cell_levels() -> CellLevels {
        defaults::CELL_LEVELS
    }

    /// Cell counting is on unless explicitly disabled.
    fn default_count_cell_changes() -> bool {
        true
    }
}

impl Default for WearConfig {
    fn default() -> Self {
        Self {
            cell_levels: defaults::CELL_LEVELS,
            count_cell_changes: true,
        }
    }
}
