//! Fixed geometry of the modeled memory block and the learner's tables.
//!
//! Every buffer in the engine is sized from these constants; inputs that do not
//! fit are contract violations and panic rather than being truncated.

/// Size of one storage block (cache line / memory word) in bytes.
pub const BLOCK_SIZE: usize = 64;

/// Size of one storage block in bits; also the clamp for reported bit changes.
pub const BLOCK_BITS: u64 = (BLOCK_SIZE * 8) as u64;

/// Number of 4-byte words in a block (FPC granularity).
pub const FPC_WORDS: usize = BLOCK_SIZE / 4;

/// Number of nibbles in a 4-byte word.
pub const NIBBLES_PER_WORD: usize = 8;

/// Upper bound on symbols emitted for one block (2-byte BDI: tag + 2 bases + 32 deltas).
pub const MAX_SYMBOLS: usize = 35;

/// Number of FPC structural patterns tracked during training.
pub const FPC_PATTERNS: usize = 3;

/// Number of BDI methods (and hit counters).
pub const BDI_METHODS: usize = 8;

/// Number of nibble-position sample counters (one per nibble of the block).
pub const SAMPLE_SLOTS: usize = FPC_WORDS * NIBBLES_PER_WORD;

/// Number of learned-pattern slots in the active pattern table.
pub const PATTERN_TABLE_CAPACITY: usize = 4;

/// Largest compressed length (bytes) the ternary remap accepts.
pub const TERNARY_LIMIT: usize = 48;

/// Capacity of a payload's compressed buffer.
///
/// Codec output never exceeds [`BLOCK_SIZE`]; a ternary-remapped stream can grow
/// to 1.5x of [`TERNARY_LIMIT`].
pub const COMPRESSED_CAPACITY: usize = TERNARY_LIMIT * 3 / 2;
