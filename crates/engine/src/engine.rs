//! The write engine: compression, learning and wear accounting per write.
//!
//! One engine serves one memory channel. Every call runs to completion;
//! the engine holds no references into the requests it processes.

use crate::codec::bdi::StaticBdi;
use crate::codec::dynamic::{DynamicFpc, dynamic_compress};
use crate::codec::fpc::StaticFpc;
use crate::codec::{BlockCodec, compress_payload};
use crate::common::constants::BLOCK_BITS;
use crate::common::{ConfigError, WriteRequest};
use crate::config::{CompressionMode, EngineConfig};
use crate::learner::{PatternLearner, PatternTable};
use crate::stats::WriteStats;
use crate::wear::{count_changes, encode_request};

/// What one processed write cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOutcome {
    /// The new payload was compressed.
    pub compressed: bool,
    /// Compressed length of the new payload in bytes before any ternary
    /// remap (0 when raw).
    pub compressed_len: usize,
    /// Stored width in bits.
    pub bits_written_raw: u64,
    /// Changed bits, clamped to one block.
    pub bits_written: u64,
}

/// Adaptive compression and write-minimization engine.
///
/// # Examples
///
/// ```
/// use nvwrite_core::{EngineConfig, WriteEngine, WriteRequest};
///
/// let mut engine = WriteEngine::new(EngineConfig::default()).unwrap();
/// let mut request = WriteRequest::new([0; 64], [0xAB; 64]);
///
/// let outcome = engine.process_write(&mut request);
/// assert!(outcome.compressed);
/// assert_eq!(engine.writes(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct WriteEngine {
    config: EngineConfig,
    learner: PatternLearner,
    stats: WriteStats,
    writes: u64,
}

impl WriteEngine {
    /// Creates an engine from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns the error of [`EngineConfig::validate`].
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            learner: PatternLearner::new(config.learner.threshold_factor),
            config,
            stats: WriteStats::default(),
            writes: 0,
        })
    }

    /// Compresses both payloads of `request`.
    ///
    /// In [`CompressionMode::Dfpc`] the learner trains while `write_count` is
    /// below the training horizon (baseline FPC ladder) and extracts its table
    /// on the first call at or past the horizon; later calls use the dynamic
    /// codecs.
    ///
    /// # Arguments
    ///
    /// * `request` - The write; only compressed-side payload fields change.
    /// * `mode` - Codec selection.
    /// * `write_count` - Global write counter.
    ///
    /// # Returns
    ///
    /// True if the new payload was compressed.
    pub fn compress(&mut self, request: &mut WriteRequest, mode: CompressionMode, write_count: u64) -> bool {
        let compressed = match mode {
            CompressionMode::None => false,
            CompressionMode::Fpc => Self::compress_static(&StaticFpc, request),
            CompressionMode::Bdi => Self::compress_static(&StaticBdi, request),
            CompressionMode::Dfpc => self.compress_adaptive(request, write_count),
        };
        tracing::trace!(
            ?mode,
            write_count,
            compressed,
            len = request.new.compressed_len(),
            "compress"
        );
        compressed
    }

    fn compress_static(codec: &dyn BlockCodec, request: &mut WriteRequest) -> bool {
        let _ = compress_payload(codec, &mut request.previous);
        compress_payload(codec, &mut request.new)
    }

    fn compress_adaptive(&mut self, request: &mut WriteRequest, write_count: u64) -> bool {
        if write_count < self.config.learner.training_horizon {
            self.learner.observe(request.new.raw());
            return Self::compress_static(&DynamicFpc::baseline(), request);
        }

        self.learner.finish_training();
        let table = self.learner.table().copied().unwrap_or(PatternTable::EMPTY);
        let _ = dynamic_compress(&table, &mut request.previous);
        dynamic_compress(&table, &mut request.new).is_compressed()
    }

    /// Applies the ternary remap to every compressed payload of `request`.
    ///
    /// # Returns
    ///
    /// True if the new payload was remapped.
    pub fn encode(request: &mut WriteRequest) -> bool {
        encode_request(request)
    }

    /// Counts changed bits with the configured cell width.
    pub fn count_changes(&self, request: &WriteRequest, count_cells: bool) -> u64 {
        count_changes(request, self.config.wear.cell_levels, count_cells)
    }

    /// Runs the full per-write pipeline and records its statistics.
    ///
    /// Compresses with the configured mode (using the engine's own write
    /// counter), optionally remaps, counts changed bits and advances the
    /// write counter. The compression ratio is taken from the codec output,
    /// before the remap; change counts see the remapped bytes.
    pub fn process_write(&mut self, request: &mut WriteRequest) -> WriteOutcome {
        let compressed = self.compress(request, self.config.compression.mode, self.writes);
        let compressed_len = request.new.compressed_len();
        if self.config.compression.encode {
            let _ = Self::encode(request);
        }

        let bits_written_raw = self.count_changes(request, false);
        let bits_written = self
            .count_changes(request, self.config.wear.count_cell_changes)
            .min(BLOCK_BITS);

        self.stats.record(
            compressed.then_some(compressed_len),
            bits_written_raw,
            bits_written,
        );
        self.writes += 1;

        WriteOutcome {
            compressed,
            compressed_len,
            bits_written_raw,
            bits_written,
        }
    }

    /// Active configuration.
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Pattern learner state.
    pub const fn learner(&self) -> &PatternLearner {
        &self.learner
    }

    /// Accumulated statistics.
    pub const fn stats(&self) -> &WriteStats {
        &self.stats
    }

    /// Writes processed by [`WriteEngine::process_write`].
    pub const fn writes(&self) -> u64 {
        self.writes
    }
}
