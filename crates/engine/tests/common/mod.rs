//! Shared builders and harness helpers.

use nvwrite_core::WriteRequest;
use nvwrite_core::common::BLOCK_SIZE;

/// Installs a test-friendly tracing subscriber (once per process).
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Builds a block from sixteen little-endian 32-bit words.
pub fn block32(words: [u32; 16]) -> [u8; BLOCK_SIZE] {
    let mut block = [0u8; BLOCK_SIZE];
    for (chunk, word) in block.chunks_exact_mut(4).zip(words) {
        chunk.copy_from_slice(&word.to_le_bytes());
    }
    block
}

/// Builds a block from eight little-endian 64-bit words.
pub fn block64(words: [u64; 8]) -> [u8; BLOCK_SIZE] {
    let mut block = [0u8; BLOCK_SIZE];
    for (chunk, word) in block.chunks_exact_mut(8).zip(words) {
        chunk.copy_from_slice(&word.to_le_bytes());
    }
    block
}

/// A block whose sixteen 32-bit words all equal `word`.
pub fn splat32(word: u32) -> [u8; BLOCK_SIZE] {
    block32([word; 16])
}

/// A request writing `new` over `previous`.
pub fn request(new: [u8; BLOCK_SIZE], previous: [u8; BLOCK_SIZE]) -> WriteRequest {
    WriteRequest::new(new, previous)
}
