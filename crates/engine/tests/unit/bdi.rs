//! Static BDI Unit Tests.
//!
//! Verifies the method ladder order, same-value packing, family filtering and
//! the tagged serialization.

use nvwrite_core::codec::bdi::{BdiFamily, BdiMethod, StaticBdi, best_attempt};
use nvwrite_core::codec::{BlockCodec, compress_payload};
use nvwrite_core::common::PayloadBuffer;
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::block64;

const REPEATED: u64 = 0x0123_4567_89AB_CDEF;

fn far_apart() -> [u8; 64] {
    let mut words = [0u64; 8];
    for (i, w) in words.iter_mut().enumerate() {
        *w = (i as u64) * 0x1111_1111_1111_1111;
    }
    block64(words)
}

// ══════════════════════════════════════════════════════════
// 1. Method table
// ══════════════════════════════════════════════════════════

#[test]
fn tags_follow_ladder_order() {
    let tags: Vec<usize> = BdiMethod::ALL.iter().map(|m| m.tag()).collect();
    assert_eq!(tags, (0..8).collect::<Vec<_>>());
}

#[rstest]
#[case(BdiMethod::SameValue8, BdiFamily::Eight)]
#[case(BdiMethod::Base8Delta4, BdiFamily::Eight)]
#[case(BdiMethod::SameValue4, BdiFamily::Four)]
#[case(BdiMethod::Base4Delta2, BdiFamily::Four)]
#[case(BdiMethod::Base2Delta1, BdiFamily::Two)]
fn methods_belong_to_families(#[case] method: BdiMethod, #[case] family: BdiFamily) {
    assert_eq!(method.family(), family);
    assert!(family.methods().contains(&method));
}

// ══════════════════════════════════════════════════════════
// 2. Best-attempt selection
// ══════════════════════════════════════════════════════════

#[test]
fn repeated_eight_byte_word_packs_to_eight_bytes() {
    let best = best_attempt(&block64([REPEATED; 8]), |_| true).unwrap();
    assert_eq!(best.method, BdiMethod::SameValue8);
    assert_eq!(best.size, 8);
}

#[test]
fn zero_block_prefers_four_byte_same_value() {
    let best = best_attempt(&[0; 64], |_| true).unwrap();
    assert_eq!(best.method, BdiMethod::SameValue4);
    assert_eq!(best.size, 4);
}

#[test]
fn small_deltas_pick_one_byte_eight_byte_method() {
    let mut words = [0u64; 8];
    for (i, w) in words.iter_mut().enumerate() {
        *w = 0x1000_0000_0000_0000 + i as u64;
    }
    let best = best_attempt(&block64(words), |_| true).unwrap();
    assert_eq!(best.method, BdiMethod::Base8Delta1);
    assert_eq!(best.size, 8 + 8);
}

#[test]
fn disabled_families_are_skipped() {
    let block = block64([REPEATED; 8]);
    assert!(best_attempt(&block, |f| f == BdiFamily::Two).is_none());
    let four = best_attempt(&block, |f| f == BdiFamily::Four).unwrap();
    assert_eq!(four.method.family(), BdiFamily::Four);
    assert!(best_attempt(&block, |_| false).is_none());
}

#[test]
fn far_apart_words_do_not_compress() {
    assert!(best_attempt(&far_apart(), |_| true).is_none());
    assert!(!StaticBdi.encode(&far_apart()).is_compressed());
}

// ══════════════════════════════════════════════════════════
// 3. Tagged serialization
// ══════════════════════════════════════════════════════════

#[test]
fn tag_nibble_precedes_stream() {
    let mut payload = PayloadBuffer::new(block64([REPEATED; 8]));
    assert!(compress_payload(&StaticBdi, &mut payload));
    assert_eq!(StaticBdi.encode(payload.raw()).size, 8);
    assert_eq!(payload.compressed_len(), 9);
    assert!(payload.is_half_terminated());
    assert_eq!(
        payload.compressed(),
        &[0x00, 0x12, 0x34, 0x56, 0x78, 0x9A, 0xBC, 0xDE, 0xF0]
    );
}

#[test]
fn four_byte_same_value_emits_the_word() {
    let mut payload = PayloadBuffer::new([0x5A; 64]);
    assert!(compress_payload(&StaticBdi, &mut payload));
    assert_eq!(payload.compressed(), &[0x45, 0xA5, 0xA5, 0xA5, 0xA0]);
}
