//! Byte-to-word reinterpretation.
//!
//! Blocks are viewed as arrays of little-endian unsigned words at 2, 4 or 8
//! byte granularity. The word array lives on the stack; a 64-byte block yields
//! at most 32 words.

use std::ops::Deref;

use crate::common::constants::BLOCK_SIZE;
use crate::common::{Target, WriteRequest};

/// Largest word count a block can produce (2-byte words).
pub const MAX_WORDS: usize = BLOCK_SIZE / 2;

/// Word granularity in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WordWidth {
    /// 16-bit words.
    Two,
    /// 32-bit words.
    Four,
    /// 64-bit words.
    Eight,
}

impl WordWidth {
    /// Width in bytes.
    pub const fn bytes(self) -> usize {
        match self {
            Self::Two => 2,
            Self::Four => 4,
            Self::Eight => 8,
        }
    }
}

/// Fixed-capacity array of words decoded from a block.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Words {
    values: [u64; MAX_WORDS],
    len: usize,
}

impl Words {
    const fn empty() -> Self {
        Self {
            values: [0; MAX_WORDS],
            len: 0,
        }
    }
}

impl Deref for Words {
    type Target = [u64];

    fn deref(&self) -> &[u64] {
        &self.values[..self.len]
    }
}

impl std::fmt::Debug for Words {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Reinterprets `bytes` as little-endian words of the given width.
///
/// Byte `i * step + j` contributes `byte << (8 * j)` to word `i`.
///
/// # Panics
///
/// Panics if `bytes.len()` is not a multiple of the word width or the result
/// would exceed [`MAX_WORDS`]; both are programming errors.
pub fn bytes_to_words(bytes: &[u8], width: WordWidth) -> Words {
    let step = width.bytes();
    assert!(
        bytes.len() % step == 0,
        "buffer of {} bytes is not a multiple of the {step}-byte word size",
        bytes.len()
    );
    assert!(
        bytes.len() / step <= MAX_WORDS,
        "buffer of {} bytes exceeds the {MAX_WORDS}-word scratch capacity",
        bytes.len()
    );

    let mut words = Words::empty();
    for chunk in bytes.chunks_exact(step) {
        words.values[words.len] = chunk
            .iter()
            .rev()
            .fold(0u64, |acc, &byte| (acc << 8) | u64::from(byte));
        words.len += 1;
    }
    words
}

/// Splits a block into its sixteen 32-bit words.
pub fn block_words32(block: &[u8; BLOCK_SIZE]) -> [u32; BLOCK_SIZE / 4] {
    let mut words = [0u32; BLOCK_SIZE / 4];
    for (word, chunk) in words.iter_mut().zip(block.chunks_exact(4)) {
        *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    words
}

impl WriteRequest {
    /// Reads the first `size` raw bytes of the selected payload as words.
    ///
    /// # Arguments
    ///
    /// * `target` - Which payload to read.
    /// * `size` - Number of bytes to read (at most one block).
    /// * `width` - Word granularity.
    ///
    /// # Panics
    ///
    /// Panics if `size` exceeds the block or is not a multiple of `width`.
    pub fn words(&self, target: Target, size: usize, width: WordWidth) -> Words {
        assert!(size <= BLOCK_SIZE, "cannot read {size} bytes from a {BLOCK_SIZE}-byte block");
        bytes_to_words(&self.payload(target).raw()[..size], width)
    }
}
