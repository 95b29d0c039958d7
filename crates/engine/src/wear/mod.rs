//! Wear accounting.
//!
//! This module provides:
//! 1. **Change counting:** Cell-level comparison of old and new stored data.
//! 2. **Ternary remap:** A re-encoding of compressed payloads that reduces
//!    physical cell transitions.

/// Cell-level change counting.
pub mod changes;

/// Ternary remap.
pub mod ternary;

pub use changes::{CellLevels, count_changes};
pub use ternary::{encode_request, ternary_encode};
