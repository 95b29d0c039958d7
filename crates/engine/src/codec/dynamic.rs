//! Codecs driven by a learned [`PatternTable`].
//!
//! Dynamic FPC tries the learned masks around the fixed halfword ladder: masks
//! that keep fewer than four nibbles are tried first, wider masks only after
//! the halfword checks have failed. Dynamic BDI runs only the families the
//! learner left enabled and emits no tag nibble.
//!
//! While the learner is still training, the same FPC implementation runs as
//! the baseline ladder: no table, and the halfword rungs take the `0x2`/`0x3`
//! prefixes instead of `0x3`/`0x4`.

use super::bdi::best_attempt;
use super::classify::magnitude;
use super::fpc::zero_block;
use super::{BlockCodec, Encoding};
use crate::common::PayloadBuffer;
use crate::common::constants::BLOCK_SIZE;
use crate::learner::table::{PatternEntry, PatternTable};
use crate::packing::{SymbolStream, block_words32, words_to_bytes};

static EMPTY_TABLE: PatternTable = PatternTable::EMPTY;

/// Prefixes of the signed-halfword and low-half-zero rungs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HalfwordPrefixes {
    signed: u64,
    high_half: u64,
}

const LEARNED_PREFIXES: HalfwordPrefixes = HalfwordPrefixes {
    signed: 0x30000,
    high_half: 0x40000,
};

const BASELINE_PREFIXES: HalfwordPrefixes = HalfwordPrefixes {
    signed: 0x20000,
    high_half: 0x30000,
};

/// Learned-table FPC codec.
#[derive(Debug, Clone, Copy)]
pub struct DynamicFpc<'a> {
    table: &'a PatternTable,
    prefixes: HalfwordPrefixes,
}

impl<'a> DynamicFpc<'a> {
    /// Creates a codec over `table`.
    pub const fn new(table: &'a PatternTable) -> Self {
        Self {
            table,
            prefixes: LEARNED_PREFIXES,
        }
    }

    fn try_entries(&self, magnitude: u32, wide: bool) -> Option<(u64, u8)> {
        self.table
            .entries()
            .iter()
            .enumerate()
            .filter(|(_, entry)| (entry.kept_nibbles() >= 4) == wide)
            .find(|(_, entry)| entry.matches(magnitude))
            .map(|(index, entry)| entry_symbol(index, entry, magnitude))
    }

    fn classify(&self, word: u32) -> (u64, u8) {
        if word == 0 {
            return (0x1, 1);
        }
        let mag = magnitude(word);
        if let Some(symbol) = self.try_entries(mag, false) {
            return symbol;
        }
        if mag <= 0xFFFF {
            return (self.prefixes.signed | u64::from(mag), 5);
        }
        if word & 0xFFFF == 0 {
            return (self.prefixes.high_half | u64::from(word >> 16), 5);
        }
        if let Some(symbol) = self.try_entries(mag, true) {
            return symbol;
        }
        let [b0, b1, b2, b3] = word.to_le_bytes();
        if self.table.flags().repeated_byte && b0 == b1 && b0 == b2 && b0 == b3 {
            return (0x600 | u64::from(b0), 3);
        }
        (u64::from(word), 8)
    }
}

impl DynamicFpc<'static> {
    /// The training-phase ladder: no masks, no structural checks.
    pub const fn baseline() -> Self {
        Self {
            table: &EMPTY_TABLE,
            prefixes: BASELINE_PREFIXES,
        }
    }
}

fn entry_symbol(index: usize, entry: &PatternEntry, magnitude: u32) -> (u64, u8) {
    let kept = entry.kept_nibbles();
    let prefix = (index as u64 + 4) << (u32::from(kept) * 4);
    (prefix | entry.gather(magnitude), kept + 1)
}

impl BlockCodec for DynamicFpc<'_> {
    fn name(&self) -> &'static str {
        if self.prefixes == BASELINE_PREFIXES {
            "fpc-baseline"
        } else {
            "fpc-dynamic"
        }
    }

    fn encode(&self, block: &[u8; BLOCK_SIZE]) -> Encoding {
        if block.iter().all(|&b| b == 0) {
            return zero_block();
        }

        let mut stream = SymbolStream::new();
        for word in block_words32(block) {
            let (value, nibbles) = self.classify(word);
            stream.push(value, nibbles);
        }
        Encoding {
            size: stream.byte_len(),
            stream,
        }
    }
}

/// Learned-table BDI codec.
#[derive(Debug, Clone, Copy)]
pub struct DynamicBdi<'a> {
    table: &'a PatternTable,
}

impl<'a> DynamicBdi<'a> {
    /// Creates a codec over `table`.
    pub const fn new(table: &'a PatternTable) -> Self {
        Self { table }
    }
}

impl BlockCodec for DynamicBdi<'_> {
    fn name(&self) -> &'static str {
        "bdi-dynamic"
    }

    fn encode(&self, block: &[u8; BLOCK_SIZE]) -> Encoding {
        let flags = self.table.flags();
        if !flags.any_bdi() {
            return Encoding::uncompressed();
        }
        best_attempt(block, |family| flags.family_enabled(family)).map_or_else(
            Encoding::uncompressed,
            |best| Encoding {
                size: best.size,
                stream: best.stream,
            },
        )
    }
}

/// Which dynamic codec's output was serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DynamicWinner {
    /// Dynamic FPC.
    Fpc,
    /// Dynamic BDI.
    Bdi,
}

/// Result of [`dynamic_compress`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DynamicOutcome {
    /// Dynamic FPC size.
    pub fpc_size: usize,
    /// Dynamic BDI size (64 when nothing is enabled or nothing compresses).
    pub bdi_size: usize,
    /// Codec whose stream was serialized, if any.
    pub winner: Option<DynamicWinner>,
    /// The smaller of the two sizes.
    pub size: usize,
}

impl DynamicOutcome {
    /// Returns true if the payload was compressed.
    pub const fn is_compressed(&self) -> bool {
        self.winner.is_some()
    }
}

/// Runs dynamic FPC and dynamic BDI on the payload and serializes the winner.
///
/// FPC wins when strictly smaller; otherwise BDI is serialized if it
/// compressed. When neither compresses the payload is left untouched.
pub fn dynamic_compress(table: &PatternTable, payload: &mut PayloadBuffer) -> DynamicOutcome {
    let fpc = DynamicFpc::new(table).encode(payload.raw());
    let bdi = DynamicBdi::new(table).encode(payload.raw());

    let winner = if fpc.size < bdi.size {
        Some((DynamicWinner::Fpc, fpc))
    } else if bdi.is_compressed() {
        Some((DynamicWinner::Bdi, bdi))
    } else {
        None
    };

    if let Some((_, encoding)) = &winner {
        let _ = words_to_bytes(payload, &encoding.stream, encoding.size);
    }
    tracing::trace!(
        fpc_size = fpc.size,
        bdi_size = bdi.size,
        winner = ?winner.map(|(w, _)| w),
        "dynamic compression"
    );

    DynamicOutcome {
        fpc_size: fpc.size,
        bdi_size: bdi.size,
        winner: winner.map(|(w, _)| w),
        size: fpc.size.min(bdi.size),
    }
}
