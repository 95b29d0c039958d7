//! Training-window frequency counters.

use crate::codec::bdi::best_attempt;
use crate::codec::fpc::FpcPattern;
use crate::common::constants::{
    BDI_METHODS, BLOCK_SIZE, FPC_PATTERNS, NIBBLES_PER_WORD, SAMPLE_SLOTS,
};
use crate::packing::block_words32;

/// Hit and savings counters gathered while training.
///
/// * `fpc[0..3]` - word hits for signed-byte, byte-halves and repeated-byte.
/// * `bdi[0..8]` - bytes saved by each BDI method when it won a block.
/// * `samples[0..128]` - zero hits per absolute nibble position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingCounters {
    /// FPC structural pattern hits.
    pub fpc: [u64; FPC_PATTERNS],
    /// BDI per-method byte savings.
    pub bdi: [u64; BDI_METHODS],
    /// Zero-nibble hits per nibble position.
    pub samples: [u64; SAMPLE_SLOTS],
    /// Blocks observed.
    pub writes: u64,
}

impl TrainingCounters {
    /// Creates zeroed counters.
    pub const fn new() -> Self {
        Self {
            fpc: [0; FPC_PATTERNS],
            bdi: [0; BDI_METHODS],
            samples: [0; SAMPLE_SLOTS],
            writes: 0,
        }
    }

    /// Counts FPC structural pattern hits over the block's 4-byte words.
    pub fn identify_fpc(&mut self, block: &[u8; BLOCK_SIZE]) {
        for word in block_words32(block) {
            if let Some(slot) = FpcPattern::classify(word).counter_slot() {
                self.fpc[slot] += 1;
            }
        }
    }

    /// Credits the winning BDI method with the bytes it saves.
    pub fn identify_bdi(&mut self, block: &[u8; BLOCK_SIZE]) {
        if let Some(best) = best_attempt(block, |_| true) {
            self.bdi[best.method.tag()] += (BLOCK_SIZE - best.size) as u64;
        }
    }

    /// Counts zero nibbles per absolute nibble position.
    pub fn sample(&mut self, block: &[u8; BLOCK_SIZE]) {
        for (i, word) in block_words32(block).into_iter().enumerate() {
            for j in 0..NIBBLES_PER_WORD {
                if (word >> (j * 4)) & 0xF == 0 {
                    self.samples[i * NIBBLES_PER_WORD + j] += 1;
                }
            }
        }
    }

    /// Runs every collector over one block.
    pub fn observe(&mut self, block: &[u8; BLOCK_SIZE]) {
        self.identify_fpc(block);
        self.identify_bdi(block);
        self.sample(block);
        self.writes += 1;
    }
}

impl Default for TrainingCounters {
    fn default() -> Self {
        Self::new()
    }
}
