//! Payload buffers and write requests.
//!
//! A write request carries two payloads: the data being written and the data
//! currently stored at the target address. The engine only ever touches the
//! compressed-side fields of a payload; the raw bytes are immutable once the
//! request has been built.

use super::constants::{BLOCK_SIZE, COMPRESSED_CAPACITY};

/// Selects one of the two payloads of a [`WriteRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    /// The data being written.
    New,
    /// The data currently stored at the target address.
    Previous,
}

/// One block of data plus its (optional) compressed representation.
#[derive(Clone, PartialEq, Eq)]
pub struct PayloadBuffer {
    raw: [u8; BLOCK_SIZE],
    compressed: [u8; COMPRESSED_CAPACITY],
    compressed_len: usize,
    is_compressed: bool,
    is_half: bool,
}

impl PayloadBuffer {
    /// Creates an uncompressed payload holding `raw`.
    pub const fn new(raw: [u8; BLOCK_SIZE]) -> Self {
        Self {
            raw,
            compressed: [0; COMPRESSED_CAPACITY],
            compressed_len: 0,
            is_compressed: false,
            is_half: false,
        }
    }

    /// Creates a payload from a byte slice.
    ///
    /// # Panics
    ///
    /// Panics if `bytes` is not exactly one block long.
    pub fn from_slice(bytes: &[u8]) -> Self {
        assert_eq!(
            bytes.len(),
            BLOCK_SIZE,
            "payload must be exactly {BLOCK_SIZE} bytes, got {}",
            bytes.len()
        );
        let mut raw = [0; BLOCK_SIZE];
        raw.copy_from_slice(bytes);
        Self::new(raw)
    }

    /// Returns the uncompressed block.
    pub const fn raw(&self) -> &[u8; BLOCK_SIZE] {
        &self.raw
    }

    /// Returns true if a compressed representation is present.
    pub const fn is_compressed(&self) -> bool {
        self.is_compressed
    }

    /// Returns the valid compressed bytes (empty when uncompressed).
    pub fn compressed(&self) -> &[u8] {
        &self.compressed[..self.compressed_len]
    }

    /// Returns the number of valid compressed bytes.
    pub const fn compressed_len(&self) -> usize {
        self.compressed_len
    }

    /// Returns true if the last compressed byte only carries its upper nibble.
    pub const fn is_half_terminated(&self) -> bool {
        self.is_half
    }

    /// Returns the bytes that would be written to the medium.
    pub fn stored(&self) -> &[u8] {
        if self.is_compressed {
            self.compressed()
        } else {
            &self.raw
        }
    }

    /// Reads the little-endian 32-bit word at `index` of the stored stream.
    ///
    /// Bytes past the end of the stream read as zero.
    pub fn stored_word(&self, index: usize) -> u32 {
        let backing: &[u8] = if self.is_compressed {
            &self.compressed
        } else {
            &self.raw
        };
        let start = index * 4;
        backing
            .get(start..start + 4)
            .map_or(0, |b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// Replaces the compressed representation.
    ///
    /// The tail of the buffer past `bytes.len()` is zeroed.
    ///
    /// # Panics
    ///
    /// Panics if `bytes` exceeds the compressed capacity, or if `half` is set
    /// for an empty stream.
    pub(crate) fn store_compressed(&mut self, bytes: &[u8], half: bool) {
        assert!(
            bytes.len() <= COMPRESSED_CAPACITY,
            "compressed stream of {} bytes exceeds capacity {COMPRESSED_CAPACITY}",
            bytes.len()
        );
        assert!(!half || !bytes.is_empty(), "empty stream cannot be half-terminated");
        self.compressed = [0; COMPRESSED_CAPACITY];
        self.compressed[..bytes.len()].copy_from_slice(bytes);
        self.compressed_len = bytes.len();
        self.is_compressed = true;
        self.is_half = half;
    }

    /// Drops any compressed representation.
    pub fn clear_compression(&mut self) {
        self.compressed = [0; COMPRESSED_CAPACITY];
        self.compressed_len = 0;
        self.is_compressed = false;
        self.is_half = false;
    }
}

impl Default for PayloadBuffer {
    fn default() -> Self {
        Self::new([0; BLOCK_SIZE])
    }
}

impl std::fmt::Debug for PayloadBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PayloadBuffer")
            .field("raw", &self.raw)
            .field("compressed", &self.compressed())
            .field("is_compressed", &self.is_compressed)
            .field("is_half", &self.is_half)
            .finish()
    }
}

/// A write issued to the engine: new data plus the data it overwrites.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteRequest {
    /// Data being written.
    pub new: PayloadBuffer,
    /// Data currently stored at the same address.
    pub previous: PayloadBuffer,
}

impl WriteRequest {
    /// Creates a request from the new and previous block contents.
    pub const fn new(new: [u8; BLOCK_SIZE], previous: [u8; BLOCK_SIZE]) -> Self {
        Self {
            new: PayloadBuffer::new(new),
            previous: PayloadBuffer::new(previous),
        }
    }

    /// Returns the selected payload.
    pub const fn payload(&self, target: Target) -> &PayloadBuffer {
        match target {
            Target::New => &self.new,
            Target::Previous => &self.previous,
        }
    }

    /// Returns the selected payload mutably.
    pub fn payload_mut(&mut self, target: Target) -> &mut PayloadBuffer {
        match target {
            Target::New => &mut self.new,
            Target::Previous => &mut self.previous,
        }
    }
}
