//! Base-Delta-Immediate (BDI) compression.
//!
//! The block is tried under eight methods (same-value and multi-base at 8, 4
//! and 2 byte granularity). Methods run in tag order and a later method only
//! replaces the current best when strictly smaller, so the earliest method wins
//! ties.
//!
//! # Performance
//!
//! - **Time Complexity:** O(8 × words) per block.
//! - **Space Complexity:** O(1); every attempt lives on the stack.

use super::classify::{DeltaWidth, all_equal, multi_base_compress};
use super::{BlockCodec, Encoding};
use crate::common::constants::{BDI_METHODS, BLOCK_SIZE};
use crate::packing::{SymbolStream, WordWidth, bytes_to_words};

/// Word-granularity family of a BDI method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BdiFamily {
    /// 8-byte words.
    Eight,
    /// 4-byte words.
    Four,
    /// 2-byte words.
    Two,
}

impl BdiFamily {
    /// All families, in attempt order.
    pub const ALL: [Self; 3] = [Self::Eight, Self::Four, Self::Two];

    /// Word width the family reads the block at.
    pub const fn width(self) -> WordWidth {
        match self {
            Self::Eight => WordWidth::Eight,
            Self::Four => WordWidth::Four,
            Self::Two => WordWidth::Two,
        }
    }

    /// Methods belonging to the family, in attempt order.
    pub const fn methods(self) -> &'static [BdiMethod] {
        match self {
            Self::Eight => &[
                BdiMethod::SameValue8,
                BdiMethod::Base8Delta1,
                BdiMethod::Base8Delta2,
                BdiMethod::Base8Delta4,
            ],
            Self::Four => &[
                BdiMethod::SameValue4,
                BdiMethod::Base4Delta1,
                BdiMethod::Base4Delta2,
            ],
            Self::Two => &[BdiMethod::Base2Delta1],
        }
    }
}

/// BDI methods; the discriminant is the 1-nibble tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BdiMethod {
    /// Whole block is one repeated 8-byte word.
    SameValue8 = 0,
    /// 8-byte words, 1-byte deltas.
    Base8Delta1 = 1,
    /// 8-byte words, 2-byte deltas.
    Base8Delta2 = 2,
    /// 8-byte words, 4-byte deltas.
    Base8Delta4 = 3,
    /// Whole block is one repeated 4-byte word.
    SameValue4 = 4,
    /// 4-byte words, 1-byte deltas.
    Base4Delta1 = 5,
    /// 4-byte words, 2-byte deltas.
    Base4Delta2 = 6,
    /// 2-byte words, 1-byte deltas.
    Base2Delta1 = 7,
}

impl BdiMethod {
    /// All methods in tag order.
    pub const ALL: [Self; BDI_METHODS] = [
        Self::SameValue8,
        Self::Base8Delta1,
        Self::Base8Delta2,
        Self::Base8Delta4,
        Self::SameValue4,
        Self::Base4Delta1,
        Self::Base4Delta2,
        Self::Base2Delta1,
    ];

    /// Tag nibble / counter index.
    pub const fn tag(self) -> usize {
        self as usize
    }

    /// Family the method belongs to.
    pub const fn family(self) -> BdiFamily {
        match self {
            Self::SameValue8 | Self::Base8Delta1 | Self::Base8Delta2 | Self::Base8Delta4 => {
                BdiFamily::Eight
            }
            Self::SameValue4 | Self::Base4Delta1 | Self::Base4Delta2 => BdiFamily::Four,
            Self::Base2Delta1 => BdiFamily::Two,
        }
    }

    const fn delta(self) -> Option<DeltaWidth> {
        match self {
            Self::Base8Delta1 | Self::Base4Delta1 | Self::Base2Delta1 => Some(DeltaWidth::One),
            Self::Base8Delta2 | Self::Base4Delta2 => Some(DeltaWidth::Two),
            Self::Base8Delta4 => Some(DeltaWidth::Four),
            Self::SameValue8 | Self::SameValue4 => None,
        }
    }

    /// Runs this method over the family's word view.
    ///
    /// Returns `None` when the method does not apply (same-value on a block
    /// with differing words) or is rejected.
    fn attempt(self, words: &[u64]) -> Option<BdiAttempt> {
        let width = self.family().width();
        match self.delta() {
            None => {
                if !all_equal(words) {
                    return None;
                }
                let mut stream = SymbolStream::new();
                let value = words[0];
                if width == WordWidth::Eight {
                    stream.push(value >> 32, 8);
                }
                stream.push(value & 0xFFFF_FFFF, 8);
                Some(BdiAttempt {
                    method: self,
                    size: width.bytes(),
                    stream,
                })
            }
            Some(delta) => {
                let attempt = multi_base_compress(words, delta, width);
                attempt.accepted.then_some(BdiAttempt {
                    method: self,
                    size: attempt.size,
                    stream: attempt.stream,
                })
            }
        }
    }
}

/// The winning BDI method for a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BdiAttempt {
    /// Method that produced the encoding.
    pub method: BdiMethod,
    /// Size estimate in bytes (tag excluded).
    pub size: usize,
    /// Untagged symbol stream.
    pub stream: SymbolStream,
}

/// Finds the smallest BDI encoding among the enabled families.
///
/// # Arguments
///
/// * `block` - Raw block contents.
/// * `enabled` - Filter deciding which families are attempted.
///
/// # Returns
///
/// The best attempt if any beats the raw block size.
pub fn best_attempt(
    block: &[u8; BLOCK_SIZE],
    enabled: impl Fn(BdiFamily) -> bool,
) -> Option<BdiAttempt> {
    let mut best: Option<BdiAttempt> = None;
    for family in BdiFamily::ALL.into_iter().filter(|&f| enabled(f)) {
        let words = bytes_to_words(block, family.width());
        for &method in family.methods() {
            let Some(attempt) = method.attempt(&words) else {
                continue;
            };
            let best_size = best.as_ref().map_or(BLOCK_SIZE, |b| b.size);
            if attempt.size < best_size {
                best = Some(attempt);
            }
        }
    }
    best
}

/// Static BDI codec: every method enabled, tag nibble prepended.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticBdi;

impl BlockCodec for StaticBdi {
    fn name(&self) -> &'static str {
        "bdi"
    }

    fn encode(&self, block: &[u8; BLOCK_SIZE]) -> Encoding {
        best_attempt(block, |_| true).map_or_else(Encoding::uncompressed, |best| {
            let mut stream = SymbolStream::single(best.method.tag() as u64, 1);
            stream.extend_from(&best.stream);
            Encoding {
                size: best.size,
                stream,
            }
        })
    }
}
