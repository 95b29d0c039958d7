//! Cell-level change counting between the stored and the incoming block.
//!
//! # Performance
//!
//! - **Time Complexity:** O(words × cells per word), at most 16 × 32.
//! - **Space Complexity:** O(1).

use serde::{Deserialize, Serialize};

use crate::common::constants::{BLOCK_BITS, FPC_WORDS};
use crate::common::{ConfigError, Target, WriteRequest};

/// Bits stored per physical cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum CellLevels {
    /// Single-level cells.
    One,
    /// Two bits per cell.
    Two,
    /// Three bits per cell.
    Three,
}

impl CellLevels {
    /// Bits per cell.
    pub const fn bits(self) -> u32 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
        }
    }

    /// Cells needed to cover a 32-bit word.
    pub const fn cells_per_word(self) -> u32 {
        32u32.div_ceil(self.bits())
    }

    const fn mask(self) -> u32 {
        (1 << self.bits()) - 1
    }
}

impl TryFrom<u32> for CellLevels {
    type Error = ConfigError;

    fn try_from(bits: u32) -> Result<Self, Self::Error> {
        match bits {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            other => Err(ConfigError::CellLevels(other)),
        }
    }
}

impl From<CellLevels> for u32 {
    fn from(levels: CellLevels) -> Self {
        levels.bits()
    }
}

/// Cost of the changed cells among the low `cells` cells of a word pair.
fn word_changes(old: u32, new: u32, levels: CellLevels, cells: u32) -> u64 {
    let bits = levels.bits();
    let last = levels.cells_per_word() - 1;
    (0..cells)
        .filter(|&k| {
            let shift = k * bits;
            (old >> shift) & levels.mask() != (new >> shift) & levels.mask()
        })
        .map(|k| if k == last { 2 } else { u64::from(bits) })
        .sum()
}

/// Counts the bits that change when the new payload overwrites the previous one.
///
/// Both payloads are read through their stored representation (compressed if
/// present, raw otherwise). The width compared is that of the new payload.
///
/// # Arguments
///
/// * `request` - The write request.
/// * `levels` - Bits per cell.
/// * `count_cells` - When false, the new payload's bit width is returned as is.
///
/// # Returns
///
/// The bit-change count, clamped to one block (512 bits).
pub fn count_changes(request: &WriteRequest, levels: CellLevels, count_cells: bool) -> u64 {
    let new = request.payload(Target::New);
    let old = request.payload(Target::Previous);
    let width = if new.is_compressed() {
        8 * new.compressed_len() as u64
    } else {
        BLOCK_BITS
    };
    if !count_cells {
        return width;
    }

    let cells = levels.cells_per_word();
    let whole = width / 32;
    let full = whole.min(FPC_WORDS as u64) as usize;

    let mut changes: u64 = (0..full)
        .map(|i| word_changes(old.stored_word(i), new.stored_word(i), levels, cells))
        .sum();

    let tail = (width % 32) as u32;
    if whole <= FPC_WORDS as u64 && tail != 0 {
        let tail_cells = tail.div_ceil(levels.bits());
        changes += word_changes(old.stored_word(full), new.stored_word(full), levels, tail_cells);
    }

    changes.min(BLOCK_BITS)
}
