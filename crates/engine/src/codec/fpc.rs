//! Frequent-Pattern Compression (FPC).
//!
//! Each 4-byte word is classified into one of seven mutually exclusive,
//! priority-ordered patterns with a fixed nibble cost. The block compresses
//! when the rounded-up nibble total is smaller than the raw block.

use super::classify::magnitude;
use super::{BlockCodec, Encoding};
use crate::common::constants::BLOCK_SIZE;
use crate::packing::{SymbolStream, block_words32};

/// FPC word patterns, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FpcPattern {
    /// The word is zero.
    Zero,
    /// Signed magnitude fits in one byte.
    SignedByte,
    /// Signed magnitude fits in two bytes.
    SignedHalfword,
    /// The low 16 bits are zero.
    ZeroLowHalf,
    /// Both 16-bit halves are at most 0xFF.
    ByteHalves,
    /// All four bytes are equal.
    RepeatedByte,
    /// None of the above.
    Uncompressed,
}

impl FpcPattern {
    /// Classifies a word.
    pub const fn classify(word: u32) -> Self {
        let mag = magnitude(word);
        let [b0, b1, b2, b3] = word.to_le_bytes();
        if word == 0 {
            Self::Zero
        } else if mag <= 0xFF {
            Self::SignedByte
        } else if mag <= 0xFFFF {
            Self::SignedHalfword
        } else if word & 0xFFFF == 0 {
            Self::ZeroLowHalf
        } else if word & 0xFFFF <= 0xFF && word >> 16 <= 0xFF {
            Self::ByteHalves
        } else if b0 == b1 && b0 == b2 && b0 == b3 {
            Self::RepeatedByte
        } else {
            Self::Uncompressed
        }
    }

    /// Encoded width in nibbles, prefix included.
    pub const fn nibbles(self) -> u8 {
        match self {
            Self::Zero => 1,
            Self::SignedByte | Self::RepeatedByte => 3,
            Self::SignedHalfword | Self::ZeroLowHalf | Self::ByteHalves => 5,
            Self::Uncompressed => 8,
        }
    }

    /// Encoded symbol for `word` (which must belong to this pattern).
    pub const fn symbol(self, word: u32) -> u64 {
        let mag = magnitude(word) as u64;
        let word = word as u64;
        match self {
            Self::Zero => 0,
            Self::SignedByte => 0x100 | mag,
            Self::SignedHalfword => 0x30000 | mag,
            Self::ZeroLowHalf => 0x40000 | (word >> 16),
            Self::ByteHalves => 0x50000 | ((word >> 16) << 8) | (word & 0xFF),
            Self::RepeatedByte => 0x600 | (word & 0xFF),
            Self::Uncompressed => word,
        }
    }

    /// Training counter slot for the patterns the learner tracks.
    pub const fn counter_slot(self) -> Option<usize> {
        match self {
            Self::SignedByte => Some(0),
            Self::ByteHalves => Some(1),
            Self::RepeatedByte => Some(2),
            _ => None,
        }
    }
}

/// The whole-block zero encoding shared by every FPC-family codec.
pub(crate) fn zero_block() -> Encoding {
    Encoding {
        size: 1,
        stream: SymbolStream::single(0, 1),
    }
}

/// Static FPC codec with the fixed seven-pattern table.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticFpc;

impl BlockCodec for StaticFpc {
    fn name(&self) -> &'static str {
        "fpc"
    }

    fn encode(&self, block: &[u8; BLOCK_SIZE]) -> Encoding {
        if block.iter().all(|&b| b == 0) {
            return zero_block();
        }

        let mut stream = SymbolStream::new();
        for word in block_words32(block) {
            let pattern = FpcPattern::classify(word);
            stream.push(pattern.symbol(word), pattern.nibbles());
        }
        Encoding {
            size: stream.byte_len(),
            stream,
        }
    }
}
