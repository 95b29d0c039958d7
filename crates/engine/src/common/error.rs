//! Error types.
//!
//! Engine operations on well-formed requests cannot fail; contract violations
//! (malformed word sizes, overflowing scratch buffers) panic. The only
//! recoverable failures are configuration problems, reported here.

use thiserror::Error;

/// Errors raised while loading or validating an [`EngineConfig`](crate::config::EngineConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The sample threshold factor lies outside `[0, 1]` (or is NaN).
    #[error("threshold factor must lie in [0, 1], got {0}")]
    ThresholdFactor(f64),

    /// The multi-level-cell width is not 1, 2 or 3 bits.
    #[error("cell levels must be 1, 2 or 3 bits per cell, got {0}")]
    CellLevels(u32),

    /// The configuration document could not be parsed.
    #[error("malformed configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
}
