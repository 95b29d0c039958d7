//! Adaptive compression and write-minimization engine for non-volatile memory.
//!
//! This crate estimates what a write to a wear-limited medium really costs:
//! 1. **Packing:** Word views of a 64-byte block and nibble-coded symbol streams.
//! 2. **Codecs:** Static FPC and BDI, plus dynamic variants driven by learned patterns.
//! 3. **Learner:** Online sampling and one-time extraction of a ranked pattern table.
//! 4. **Wear:** Cell-level change counting and the ternary remap.
//! 5. **Engine:** The per-write pipeline, configuration, and statistics.

/// Block codecs (classifiers, FPC, BDI, dynamic).
pub mod codec;
/// Common types and constants (payloads, requests, errors).
pub mod common;
/// Engine configuration (defaults, mode enum, hierarchical config structures).
pub mod config;
/// The per-write engine.
pub mod engine;
/// Online pattern learning (counters, extraction, pattern table).
pub mod learner;
/// Byte/word packing and symbol serialization.
pub mod packing;
/// Write statistics collection and reporting.
pub mod stats;
/// Change counting and ternary remap.
pub mod wear;

/// Payload buffer and write request types.
pub use crate::common::{ConfigError, PayloadBuffer, Target, WriteRequest};
/// Root configuration type; use `EngineConfig::default()` or `EngineConfig::from_json`.
pub use crate::config::{CompressionMode, EngineConfig};
/// Main engine type; construct with `WriteEngine::new`.
pub use crate::engine::{WriteEngine, WriteOutcome};
/// Running write statistics.
pub use crate::stats::WriteStats;
