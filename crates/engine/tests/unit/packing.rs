//! Word Packing Unit Tests.
//!
//! Verifies the little-endian word views of a block and the nibble
//! serialization of symbol streams into payloads.

use nvwrite_core::common::{PayloadBuffer, Target};
use nvwrite_core::packing::{SymbolStream, WordWidth, block_words32, bytes_to_words, words_to_bytes};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

use crate::common::{block32, request};

fn rebuild(words: &[u64], width: WordWidth) -> Vec<u8> {
    words
        .iter()
        .flat_map(|w| w.to_le_bytes().into_iter().take(width.bytes()))
        .collect()
}

fn width_strategy() -> impl Strategy<Value = WordWidth> {
    prop_oneof![Just(WordWidth::Two), Just(WordWidth::Four), Just(WordWidth::Eight)]
}

// ══════════════════════════════════════════════════════════
// 1. Byte-to-word views
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(WordWidth::Two, vec![0x0201, 0x0403])]
#[case(WordWidth::Four, vec![0x0403_0201])]
fn words_are_little_endian(#[case] width: WordWidth, #[case] expected: Vec<u64>) {
    let words = bytes_to_words(&[1, 2, 3, 4], width);
    assert_eq!(&*words, expected.as_slice());
}

#[test]
fn eight_byte_words_fold_all_bytes() {
    let words = bytes_to_words(&[1, 2, 3, 4, 5, 6, 7, 8], WordWidth::Eight);
    assert_eq!(&*words, &[0x0807_0605_0403_0201]);
}

#[test]
#[should_panic(expected = "not a multiple")]
fn misaligned_size_panics() {
    let _ = bytes_to_words(&[0; 6], WordWidth::Four);
}

#[test]
fn request_words_select_the_target_payload() {
    let mut previous = [0u8; 64];
    previous[0] = 0xAA;
    let req = request([0; 64], previous);
    assert_eq!(req.words(Target::New, 8, WordWidth::Four)[0], 0);
    assert_eq!(req.words(Target::Previous, 8, WordWidth::Four)[0], 0xAA);
    assert_eq!(req.words(Target::Previous, 8, WordWidth::Four).len(), 2);
}

#[test]
fn block_words32_matches_builder() {
    let mut words = [0u32; 16];
    for (i, w) in words.iter_mut().enumerate() {
        *w = (i as u32) * 0x0101_0101;
    }
    assert_eq!(block_words32(&block32(words)), words);
}

proptest! {
    #[test]
    fn words_round_trip_to_bytes(width in width_strategy(), seed in prop::collection::vec(any::<u8>(), 0..=64)) {
        let len = seed.len() / width.bytes() * width.bytes();
        let bytes = &seed[..len];
        let words = bytes_to_words(bytes, width);
        prop_assert_eq!(words.len(), len / width.bytes());
        prop_assert_eq!(rebuild(&words, width), bytes.to_vec());
    }
}

// ══════════════════════════════════════════════════════════
// 2. Symbol serialization
// ══════════════════════════════════════════════════════════

#[test]
fn serialization_marks_payload_compressed() {
    let mut payload = PayloadBuffer::default();
    let mut stream = SymbolStream::new();
    stream.push(0x1234_5678, 8);
    stream.push(0x9, 1);

    let emitted = words_to_bytes(&mut payload, &stream, 5);

    assert_eq!(emitted, 5);
    assert!(payload.is_compressed());
    assert!(payload.is_half_terminated());
    assert_eq!(payload.compressed(), &[0x12, 0x34, 0x56, 0x78, 0x90]);
    assert_eq!(payload.stored_word(0), 0x7856_3412);
    assert_eq!(payload.stored_word(1), 0x90);
}

#[test]
fn emitted_length_wins_over_budget() {
    let mut payload = PayloadBuffer::default();
    let stream = SymbolStream::single(0xABCD, 4);
    assert_eq!(words_to_bytes(&mut payload, &stream, 7), 2);
    assert_eq!(payload.compressed_len(), 2);
}

#[test]
fn zero_width_symbols_emit_nothing() {
    let mut payload = PayloadBuffer::default();
    let mut stream = SymbolStream::new();
    stream.push(0xF, 0);
    stream.push(0xA, 1);
    let _ = words_to_bytes(&mut payload, &stream, 1);
    assert_eq!(payload.compressed(), &[0xA0]);
}

#[test]
fn cleared_payload_reads_raw() {
    let mut payload = PayloadBuffer::new([0x11; 64]);
    let _ = words_to_bytes(&mut payload, &SymbolStream::single(0, 2), 1);
    payload.clear_compression();
    assert!(!payload.is_compressed());
    assert_eq!(payload.stored().len(), 64);
    assert_eq!(payload.stored_word(15), 0x1111_1111);
    assert_eq!(payload.stored_word(16), 0);
}
