//! Static FPC Unit Tests.
//!
//! Verifies the seven-pattern priority ladder, its symbol layout and the
//! block-level size decision.

use nvwrite_core::codec::fpc::{FpcPattern, StaticFpc};
use nvwrite_core::codec::{BlockCodec, compress_payload};
use nvwrite_core::common::PayloadBuffer;
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::{block32, splat32};

// ══════════════════════════════════════════════════════════
// 1. Word classification
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(0, FpcPattern::Zero)]
#[case(5, FpcPattern::SignedByte)]
#[case(0xFFFF_FFFB, FpcPattern::SignedByte)]
#[case(0x1234, FpcPattern::SignedHalfword)]
#[case(0xFFFF_8000, FpcPattern::SignedHalfword)]
#[case(0x1234_0000, FpcPattern::ZeroLowHalf)]
#[case(0x0012_0034, FpcPattern::ByteHalves)]
#[case(0xABAB_ABAB, FpcPattern::RepeatedByte)]
#[case(0x1234_5678, FpcPattern::Uncompressed)]
fn words_follow_priority_order(#[case] word: u32, #[case] expected: FpcPattern) {
    assert_eq!(FpcPattern::classify(word), expected);
}

#[rstest]
#[case(0, 0, 1)]
#[case(0xFFFF_FFFB, 0x105, 3)]
#[case(0x1234, 0x3_1234, 5)]
#[case(0x1234_0000, 0x4_1234, 5)]
#[case(0x0012_0034, 0x5_1234, 5)]
#[case(0xABAB_ABAB, 0x6AB, 3)]
#[case(0x1234_5678, 0x1234_5678, 8)]
fn symbols_carry_prefix_and_payload(#[case] word: u32, #[case] symbol: u64, #[case] nibbles: u8) {
    let pattern = FpcPattern::classify(word);
    assert_eq!(pattern.symbol(word), symbol);
    assert_eq!(pattern.nibbles(), nibbles);
}

#[test]
fn only_structural_patterns_have_counter_slots() {
    assert_eq!(FpcPattern::SignedByte.counter_slot(), Some(0));
    assert_eq!(FpcPattern::ByteHalves.counter_slot(), Some(1));
    assert_eq!(FpcPattern::RepeatedByte.counter_slot(), Some(2));
    assert_eq!(FpcPattern::Zero.counter_slot(), None);
    assert_eq!(FpcPattern::Uncompressed.counter_slot(), None);
}

// ══════════════════════════════════════════════════════════
// 2. Block encoding
// ══════════════════════════════════════════════════════════

#[test]
fn zero_block_compresses_to_one_byte() {
    let encoding = StaticFpc.encode(&[0; 64]);
    assert!(encoding.is_compressed());
    assert_eq!(encoding.size, 1);

    let mut payload = PayloadBuffer::default();
    assert!(compress_payload(&StaticFpc, &mut payload));
    assert_eq!(payload.compressed(), &[0x00]);
    assert!(payload.is_half_terminated());
}

#[test]
fn unstructured_block_stays_raw() {
    let mut words = [0u32; 16];
    for (i, w) in words.iter_mut().enumerate() {
        *w = 0x1000_0001 + (i as u32) * 0x0101_0101;
    }
    let block = block32(words);

    assert!(!StaticFpc.encode(&block).is_compressed());
    let mut payload = PayloadBuffer::new(block);
    assert!(!compress_payload(&StaticFpc, &mut payload));
    assert!(!payload.is_compressed());
}

#[test]
fn mixed_block_serializes_high_nibble_first() {
    let mut words = [0u32; 16];
    words[0] = 5;
    let mut payload = PayloadBuffer::new(block32(words));

    assert!(compress_payload(&StaticFpc, &mut payload));
    assert_eq!(payload.compressed_len(), 9);
    assert_eq!(payload.compressed(), &[0x10, 0x50, 0, 0, 0, 0, 0, 0, 0]);
    assert!(!payload.is_half_terminated());
}

#[test]
fn halfword_block_sizes_by_nibble_total() {
    let encoding = StaticFpc.encode(&splat32(0x1234));
    assert_eq!(encoding.size, 16 * 5 / 2);
}
