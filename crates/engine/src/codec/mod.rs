//! Block codecs.
//!
//! This module provides:
//! 1. **Classifiers:** All-zero / all-equal scans and the multi-base delta search.
//! 2. **FPC:** Frequent-Pattern Compression over 4-byte words.
//! 3. **BDI:** Base-Delta-Immediate over 8/4/2-byte words.
//! 4. **Dynamic:** FPC/BDI variants driven by a learned pattern table.
//!
//! Codecs are pure: they size a block and describe it as a symbol stream.
//! Serializing the winning stream into a payload is a separate step
//! ([`compress_payload`]).

/// Base-Delta-Immediate compression.
pub mod bdi;

/// Word classifiers and multi-base search.
pub mod classify;

/// Learned-table FPC/BDI codecs.
pub mod dynamic;

/// Frequent-Pattern Compression.
pub mod fpc;

use crate::common::PayloadBuffer;
use crate::common::constants::BLOCK_SIZE;
use crate::packing::{SymbolStream, words_to_bytes};

/// Result of running a codec over one block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Encoding {
    /// Size estimate in bytes.
    pub size: usize,
    /// Symbols describing the block.
    pub stream: SymbolStream,
}

impl Encoding {
    /// An encoding that leaves the block raw.
    pub const fn uncompressed() -> Self {
        Self {
            size: BLOCK_SIZE,
            stream: SymbolStream::new(),
        }
    }

    /// Returns true if the encoding is smaller than the raw block.
    pub const fn is_compressed(&self) -> bool {
        self.size < BLOCK_SIZE
    }
}

/// A codec that sizes and describes a single block.
pub trait BlockCodec {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Encodes `block`.
    ///
    /// # Arguments
    ///
    /// * `block` - Raw block contents.
    ///
    /// # Returns
    ///
    /// The codec's encoding; [`Encoding::is_compressed`] tells whether it beats raw.
    fn encode(&self, block: &[u8; BLOCK_SIZE]) -> Encoding;
}

/// Runs `codec` over the payload's raw block and serializes the result if it
/// compresses.
///
/// # Returns
///
/// True if the payload was compressed.
pub fn compress_payload(codec: &dyn BlockCodec, payload: &mut PayloadBuffer) -> bool {
    let encoding = codec.encode(payload.raw());
    tracing::trace!(
        codec = codec.name(),
        size = encoding.size,
        compressed = encoding.is_compressed()
    );
    if encoding.is_compressed() {
        let _ = words_to_bytes(payload, &encoding.stream, encoding.size);
        true
    } else {
        false
    }
}
