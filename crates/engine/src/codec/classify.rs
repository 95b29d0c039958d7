//! Stateless word classifiers and the multi-base delta search.
//!
//! # Performance
//!
//! - **Time Complexity:** O(n) in the number of words for every classifier.
//! - **Space Complexity:** O(1); results are fixed-capacity stack values.

use crate::packing::{SymbolStream, WordWidth};

/// Width of a base-relative delta in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeltaWidth {
    /// 1-byte deltas (|delta| <= 0xFF).
    One,
    /// 2-byte deltas (|delta| <= 0xFFFF).
    Two,
    /// 4-byte deltas (|delta| <= 0xFFFF_FFFF).
    Four,
}

impl DeltaWidth {
    /// Width in bytes.
    pub const fn bytes(self) -> usize {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Four => 4,
        }
    }

    /// Largest representable distance from a base.
    pub const fn limit(self) -> u64 {
        match self {
            Self::One => 0xFF,
            Self::Two => 0xFFFF,
            Self::Four => 0xFFFF_FFFF,
        }
    }

    /// Width of one emitted delta in nibbles.
    pub const fn nibbles(self) -> u8 {
        (self.bytes() * 2) as u8
    }
}

/// Outcome of one multi-base attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MultiBase {
    /// Compressed size in bytes, or the raw size when rejected.
    pub size: usize,
    /// Number of bases used (1 or 2).
    pub bases: usize,
    /// True if every word was within range of a base.
    pub accepted: bool,
    /// Base literals followed by one delta per word.
    pub stream: SymbolStream,
}

/// Returns true if every word is zero.
pub fn all_zero(words: &[u64]) -> bool {
    words.iter().all(|&w| w == 0)
}

/// Returns true if every word equals the first.
pub fn all_equal(words: &[u64]) -> bool {
    words.first().is_none_or(|&first| words.iter().all(|&w| w == first))
}

/// Magnitude of a 32-bit word read as a signed integer.
#[inline]
pub const fn magnitude(word: u32) -> u32 {
    (word as i32).unsigned_abs()
}

/// Distance between a base and a word (absolute wrapping difference).
#[inline]
const fn distance(base: u64, word: u64) -> u64 {
    (base.wrapping_sub(word) as i64).unsigned_abs()
}

fn push_literal(stream: &mut SymbolStream, base: u64, width: WordWidth) {
    match width {
        WordWidth::Eight => {
            stream.push(base >> 32, 8);
            stream.push(base & 0xFFFF_FFFF, 8);
        }
        WordWidth::Four => stream.push(base & 0xFFFF_FFFF, 8),
        WordWidth::Two => stream.push(base & 0xFFFF, 4),
    }
}

/// Encodes `words` as deltas against at most two bases.
///
/// Base 0 is the first word; base 1 is the first word whose distance from
/// base 0 exceeds the delta range. Each word is encoded against the first base
/// within range. If any word fits neither base the attempt is rejected and
/// reports the raw size.
///
/// # Arguments
///
/// * `words` - Word view of the block.
/// * `delta` - Delta width.
/// * `width` - Word width the words were read at.
///
/// # Returns
///
/// The attempt's size and symbol stream.
///
/// # Panics
///
/// Panics if `words` is empty.
pub fn multi_base_compress(words: &[u64], delta: DeltaWidth, width: WordWidth) -> MultiBase {
    assert!(!words.is_empty(), "multi-base compression needs at least one word");
    let limit = delta.limit();

    let mut bases = [words[0], 0];
    let mut base_count = 1;
    if let Some(&second) = words.iter().find(|&&w| distance(bases[0], w) > limit) {
        bases[1] = second;
        base_count = 2;
    }

    let mut stream = SymbolStream::new();
    for &base in &bases[..base_count] {
        push_literal(&mut stream, base, width);
    }

    let mut encodable = 0;
    for &word in words {
        if let Some(&base) = bases[..base_count]
            .iter()
            .find(|&&b| distance(b, word) <= limit)
        {
            stream.push(distance(base, word) & limit, delta.nibbles());
            encodable += 1;
        }
    }

    let raw = words.len() * width.bytes();
    let accepted = encodable == words.len();
    let size = if accepted {
        delta.bytes() * encodable + width.bytes() * base_count
    } else {
        raw
    };

    MultiBase {
        size,
        bases: base_count,
        accepted,
        stream,
    }
}
