//! 2-bit to 3-bit ternary remap of compressed payloads.
//!
//! Each bit pair of the compressed stream becomes a 3-bit code
//! (`00→000`, `01→001`, `10→110`, `11→111`), so a single-bit change in the
//! pair flips fewer physical cells.

use crate::common::constants::{COMPRESSED_CAPACITY, TERNARY_LIMIT};
use crate::common::{Target, WriteRequest};

const CODES: [u8; 4] = [0b000, 0b001, 0b110, 0b111];

fn read_bit(bytes: &[u8], index: usize) -> u8 {
    (bytes[index / 8] >> (7 - index % 8)) & 1
}

/// Remaps the selected payload's compressed stream in place.
///
/// Applies only to compressed payloads of at most 48 bytes; anything else is
/// left untouched.
///
/// # Returns
///
/// True if the payload was remapped.
pub fn ternary_encode(request: &mut WriteRequest, target: Target) -> bool {
    let payload = request.payload_mut(target);
    let len = payload.compressed_len();
    if !payload.is_compressed() || len > TERNARY_LIMIT {
        return false;
    }

    let input = payload.compressed();
    let bits = 8 * len - if payload.is_half_terminated() { 4 } else { 0 };
    let pairs = bits / 2;

    let mut out = [0u8; COMPRESSED_CAPACITY];
    let mut pos = 0usize;
    for pair in 0..pairs {
        let value = (read_bit(input, 2 * pair) << 1) | read_bit(input, 2 * pair + 1);
        let code = CODES[usize::from(value)];
        for shift in (0..3).rev() {
            if (code >> shift) & 1 == 1 {
                out[pos / 8] |= 0x80 >> (pos % 8);
            }
            pos += 1;
        }
    }

    let out_len = pos.div_ceil(8);
    let rem = pos % 8;
    let half = rem != 0 && rem <= 4;
    tracing::trace!(?target, from = len, to = out_len, half, "ternary remap");
    payload.store_compressed(&out[..out_len], half);
    true
}

/// Remaps every compressed payload of the request.
///
/// # Returns
///
/// True if the new payload was remapped.
pub fn encode_request(request: &mut WriteRequest) -> bool {
    let _ = ternary_encode(request, Target::Previous);
    ternary_encode(request, Target::New)
}
