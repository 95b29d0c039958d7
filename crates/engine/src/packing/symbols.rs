//! Nibble-coded symbol streams and their serialization.
//!
//! Every codec describes its output as a list of symbols, each occupying 0-8
//! nibbles. Serialization writes the nibbles most significant first, two per
//! byte; an odd nibble total leaves the final low nibble unused.

use crate::common::PayloadBuffer;
use crate::common::constants::{BLOCK_SIZE, MAX_SYMBOLS};

/// A single variable-width symbol.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Symbol {
    /// Symbol bits; only the low `nibbles * 4` bits are emitted.
    pub value: u64,
    /// Width in nibbles (0-8).
    pub nibbles: u8,
}

/// Fixed-capacity ordered list of symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolStream {
    symbols: [Symbol; MAX_SYMBOLS],
    len: usize,
}

impl SymbolStream {
    /// Creates an empty stream.
    pub const fn new() -> Self {
        Self {
            symbols: [Symbol {
                value: 0,
                nibbles: 0,
            }; MAX_SYMBOLS],
            len: 0,
        }
    }

    /// Creates a stream holding a single symbol.
    pub fn single(value: u64, nibbles: u8) -> Self {
        let mut stream = Self::new();
        stream.push(value, nibbles);
        stream
    }

    /// Appends a symbol.
    ///
    /// # Panics
    ///
    /// Panics if `nibbles > 8` or the stream is full.
    pub fn push(&mut self, value: u64, nibbles: u8) {
        assert!(nibbles <= 8, "symbol width {nibbles} exceeds 8 nibbles");
        assert!(
            self.len < MAX_SYMBOLS,
            "symbol stream overflow (capacity {MAX_SYMBOLS})"
        );
        self.symbols[self.len] = Symbol { value, nibbles };
        self.len += 1;
    }

    /// Appends every symbol of `other`.
    pub fn extend_from(&mut self, other: &Self) {
        for symbol in other.iter() {
            self.push(symbol.value, symbol.nibbles);
        }
    }

    /// Number of symbols.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the stream holds no symbols.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterates over the symbols in emission order.
    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols[..self.len].iter()
    }

    /// Total width in nibbles.
    pub fn total_nibbles(&self) -> usize {
        self.iter().map(|s| usize::from(s.nibbles)).sum()
    }

    /// Serialized length in bytes.
    pub fn byte_len(&self) -> usize {
        self.total_nibbles().div_ceil(2)
    }
}

impl Default for SymbolStream {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializes `stream` into the payload's compressed buffer.
///
/// The payload is always marked compressed. `byte_budget` is the size the codec
/// reported; when the emitted length differs (tag nibbles, odd totals) the
/// emitted length wins. The half-termination flag is set iff the nibble total
/// is odd.
///
/// # Arguments
///
/// * `payload` - Payload to annotate.
/// * `stream` - Symbols to serialize.
/// * `byte_budget` - Size estimate reported by the codec.
///
/// # Returns
///
/// The number of bytes emitted.
///
/// # Panics
///
/// Panics if the stream does not fit in one block.
pub fn words_to_bytes(payload: &mut PayloadBuffer, stream: &SymbolStream, byte_budget: usize) -> usize {
    let mut bytes = [0u8; BLOCK_SIZE];
    let mut nibble_pos = 0usize;

    for symbol in stream.iter() {
        for k in (0..symbol.nibbles).rev() {
            let nibble = ((symbol.value >> (u32::from(k) * 4)) & 0xF) as u8;
            let byte = nibble_pos / 2;
            assert!(
                byte < BLOCK_SIZE,
                "symbol stream of {} nibbles does not fit in a {BLOCK_SIZE}-byte block",
                stream.total_nibbles()
            );
            if nibble_pos % 2 == 0 {
                bytes[byte] = nibble << 4;
            } else {
                bytes[byte] |= nibble;
            }
            nibble_pos += 1;
        }
    }

    let emitted = nibble_pos.div_ceil(2);
    if emitted != byte_budget {
        tracing::trace!(byte_budget, emitted, "serialized length differs from codec estimate");
    }
    payload.store_compressed(&bytes[..emitted], nibble_pos % 2 == 1);
    emitted
}
