//! Word packing layer.
//!
//! This module converts between the byte view of a block and the two word
//! views the codecs work on:
//! 1. **Words:** Fixed-width little-endian words read out of a payload.
//! 2. **Symbols:** Variable-width nibble-coded symbols serialized back into a
//!    payload's compressed buffer.

/// Nibble-coded symbol streams.
pub mod symbols;

/// Byte-to-word reinterpretation.
pub mod words;

pub use symbols::{Symbol, SymbolStream, words_to_bytes};
pub use words::{WordWidth, Words, block_words32, bytes_to_words};
