//! Classifier Unit Tests.
//!
//! Verifies the zero/equal scans, signed magnitudes and the multi-base delta
//! search.

use nvwrite_core::codec::classify::{DeltaWidth, all_equal, all_zero, magnitude, multi_base_compress};
use nvwrite_core::packing::WordWidth;
use proptest::prelude::*;
use rstest::rstest;

// ══════════════════════════════════════════════════════════
// 1. Scans
// ══════════════════════════════════════════════════════════

#[test]
fn scans_handle_empty_and_uniform_input() {
    assert!(all_zero(&[]));
    assert!(all_equal(&[]));
    assert!(all_zero(&[0, 0, 0]));
    assert!(!all_zero(&[0, 1]));
    assert!(all_equal(&[7, 7, 7]));
    assert!(!all_equal(&[7, 7, 8]));
}

#[rstest]
#[case(0, 0)]
#[case(0x7F, 0x7F)]
#[case(0xFFFF_FFF0, 16)]
#[case(0xFFFF_FFFF, 1)]
#[case(0x8000_0000, 0x8000_0000)]
fn magnitude_reads_words_as_signed(#[case] word: u32, #[case] expected: u32) {
    assert_eq!(magnitude(word), expected);
}

// ══════════════════════════════════════════════════════════
// 2. Multi-base search
// ══════════════════════════════════════════════════════════

#[test]
fn second_base_covers_far_words() {
    let words = [100, 101, 99, 0x1000, 0x1001];
    let result = multi_base_compress(&words, DeltaWidth::One, WordWidth::Four);

    assert!(result.accepted);
    assert_eq!(result.bases, 2);
    assert_eq!(result.size, 5 + 2 * 4);
    assert_eq!(result.stream.len(), 7);
    assert_eq!(result.stream.byte_len(), result.size);
}

#[test]
fn single_base_when_all_words_are_close() {
    let words = [0x1_0000, 0x1_0010, 0x0_FFF0, 0x1_00FF];
    let result = multi_base_compress(&words, DeltaWidth::One, WordWidth::Four);
    assert!(result.accepted);
    assert_eq!(result.bases, 1);
    assert_eq!(result.size, 4 + 4);
}

#[test]
fn word_outside_both_bases_rejects_attempt() {
    let words = [0, 0x1000, 0x200_0000];
    let result = multi_base_compress(&words, DeltaWidth::One, WordWidth::Four);
    assert!(!result.accepted);
    assert_eq!(result.size, 3 * 4);
}

#[test]
fn eight_byte_bases_emit_two_halves() {
    let words = [0x0123_4567_89AB_CDEF, 0x0123_4567_89AB_CDF0];
    let result = multi_base_compress(&words, DeltaWidth::Two, WordWidth::Eight);
    assert!(result.accepted);
    assert_eq!(result.size, 2 * 2 + 8);
    let first: Vec<u64> = result.stream.iter().take(2).map(|s| s.value).collect();
    assert_eq!(first, vec![0x0123_4567, 0x89AB_CDEF]);
}

#[test]
#[should_panic(expected = "at least one word")]
fn empty_input_panics() {
    let _ = multi_base_compress(&[], DeltaWidth::One, WordWidth::Two);
}

proptest! {
    #[test]
    fn close_block_never_exceeds_raw(
        base in 0x100u32..0xFFFF_FF00,
        deltas in prop::collection::vec(-255i64..=255, 15),
    ) {
        let mut words = vec![u64::from(base)];
        words.extend(deltas.iter().map(|&d| (i64::from(base) + d) as u64));
        let result = multi_base_compress(&words, DeltaWidth::One, WordWidth::Four);
        prop_assert!(result.accepted);
        prop_assert_eq!(result.bases, 1);
        prop_assert!(result.size <= words.len() * 4);
    }

    #[test]
    fn rejected_attempts_report_raw_size(words in prop::collection::vec(any::<u32>(), 1..=16)) {
        let words: Vec<u64> = words.into_iter().map(u64::from).collect();
        let result = multi_base_compress(&words, DeltaWidth::One, WordWidth::Four);
        if !result.accepted {
            prop_assert_eq!(result.size, words.len() * 4);
        }
    }
}
