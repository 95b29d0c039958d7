//! The learned pattern table.
//!
//! A table entry is a nibble mask over a 32-bit word: nibbles set to `0xF` in
//! the mask must be zero for the entry to match; the remaining "kept" nibbles
//! are emitted verbatim. The table also carries the structural categories
//! (repeated byte, BDI families) that survived top-k selection.

use crate::codec::bdi::BdiFamily;
use crate::common::constants::{NIBBLES_PER_WORD, PATTERN_TABLE_CAPACITY};

/// One learned nibble mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PatternEntry {
    mask: u32,
    zero_nibbles: u8,
}

impl PatternEntry {
    /// Builds an entry from an 8-bit group.
    ///
    /// Bit `j` of `group` describes nibble `j` of the word: 1 means the nibble
    /// is kept, 0 means it must be zero (mask nibble `0xF`).
    pub const fn from_group(group: u8) -> Self {
        let mut mask = 0u32;
        let mut j = 0;
        while j < NIBBLES_PER_WORD {
            if group & (1 << j) == 0 {
                mask |= 0xF << (j * 4);
            }
            j += 1;
        }
        Self {
            mask,
            zero_nibbles: NIBBLES_PER_WORD as u8 - group.count_ones() as u8,
        }
    }

    /// Nibble mask of the must-be-zero positions.
    pub const fn mask(&self) -> u32 {
        self.mask
    }

    /// Number of must-be-zero nibbles.
    pub const fn zero_nibbles(&self) -> u8 {
        self.zero_nibbles
    }

    /// Number of nibbles emitted when the entry matches.
    pub const fn kept_nibbles(&self) -> u8 {
        NIBBLES_PER_WORD as u8 - self.zero_nibbles
    }

    /// Returns true if every masked nibble of `value` is zero.
    #[inline]
    pub const fn matches(&self, value: u32) -> bool {
        value & self.mask == 0
    }

    /// Packs the kept nibbles of `value` together, lowest position first.
    ///
    /// Kept nibble `k` (counting kept positions from the least significant)
    /// lands in nibble `k` of the result.
    pub const fn gather(&self, value: u32) -> u64 {
        let mut out = 0u64;
        let mut k = 0;
        let mut j = 0;
        while j < NIBBLES_PER_WORD {
            if (self.mask >> (j * 4)) & 0xF == 0 {
                out |= (((value >> (j * 4)) & 0xF) as u64) << (k * 4);
                k += 1;
            }
            j += 1;
        }
        out
    }
}

/// Structural categories left enabled after extraction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct StructuralFlags {
    /// FPC repeated-byte check.
    pub repeated_byte: bool,
    /// BDI methods over 8-byte words.
    pub bdi8: bool,
    /// BDI methods over 4-byte words.
    pub bdi4: bool,
    /// BDI methods over 2-byte words.
    pub bdi2: bool,
}

impl StructuralFlags {
    /// Returns true if the BDI family is enabled.
    pub const fn family_enabled(&self, family: BdiFamily) -> bool {
        match family {
            BdiFamily::Eight => self.bdi8,
            BdiFamily::Four => self.bdi4,
            BdiFamily::Two => self.bdi2,
        }
    }

    /// Enables a BDI family.
    pub const fn enable_family(&mut self, family: BdiFamily) {
        match family {
            BdiFamily::Eight => self.bdi8 = true,
            BdiFamily::Four => self.bdi4 = true,
            BdiFamily::Two => self.bdi2 = true,
        }
    }

    /// Returns true if any BDI family is enabled.
    pub const fn any_bdi(&self) -> bool {
        self.bdi8 || self.bdi4 || self.bdi2
    }
}

/// Ordered set of learned masks plus the enabled structural categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternTable {
    entries: [PatternEntry; PATTERN_TABLE_CAPACITY],
    len: usize,
    flags: StructuralFlags,
}

impl PatternTable {
    /// A table with no masks and no structural categories.
    pub const EMPTY: Self = Self {
        entries: [PatternEntry {
            mask: 0,
            zero_nibbles: 0,
        }; PATTERN_TABLE_CAPACITY],
        len: 0,
        flags: StructuralFlags {
            repeated_byte: false,
            bdi8: false,
            bdi4: false,
            bdi2: false,
        },
    };

    /// Appends a mask entry.
    ///
    /// # Panics
    ///
    /// Panics if the table is full.
    pub fn push(&mut self, entry: PatternEntry) {
        assert!(
            self.len < PATTERN_TABLE_CAPACITY,
            "pattern table overflow (capacity {PATTERN_TABLE_CAPACITY})"
        );
        self.entries[self.len] = entry;
        self.len += 1;
    }

    /// Mask entries in selection order.
    pub fn entries(&self) -> &[PatternEntry] {
        &self.entries[..self.len]
    }

    /// Enabled structural categories.
    pub const fn flags(&self) -> &StructuralFlags {
        &self.flags
    }

    /// Enabled structural categories, mutably.
    pub const fn flags_mut(&mut self) -> &mut StructuralFlags {
        &mut self.flags
    }

    /// Number of mask entries.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the table holds no mask entries.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Default for PatternTable {
    fn default() -> Self {
        Self::EMPTY
    }
}
