//! One-time pattern extraction at the end of training.
//!
//! Extraction runs in four steps:
//! 1. **Threshold:** `min + (max - min) × factor` over the sample counters.
//! 2. **Folding:** Each word's eight nibble flags become one group byte.
//! 3. **Self-similarity:** The group list is halved while it repeats itself.
//! 4. **Selection:** FPC, BDI and sample candidates are ranked by estimated
//!    savings; the top four are materialized into a [`PatternTable`].

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use super::counters::TrainingCounters;
use super::table::{PatternEntry, PatternTable};
use crate::codec::bdi::BdiFamily;
use crate::common::constants::{
    FPC_WORDS, NIBBLES_PER_WORD, PATTERN_TABLE_CAPACITY, SAMPLE_SLOTS,
};

/// Groups already covered by the fixed FPC ladders.
const EXCLUDED_GROUPS: [u8; 4] = [0x03, 0x0F, 0x33, 0xF0];

/// Group materialized for the FPC signed-byte pattern.
const SIGNED_BYTE_GROUP: u8 = 0x03;

/// Group materialized for the FPC byte-halves pattern.
const BYTE_HALVES_GROUP: u8 = 0x33;

/// What a candidate would enable if selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CandidateKind {
    /// FPC signed-byte mask.
    FpcSignedByte,
    /// FPC byte-halves mask.
    FpcByteHalves,
    /// FPC repeated-byte check.
    FpcRepeatedByte,
    /// A BDI family.
    Bdi(BdiFamily),
    /// A learned sample group.
    Sample {
        /// Group byte (bit j set = nibble j kept).
        group: u8,
    },
}

/// A ranked extraction candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    /// What the candidate enables.
    pub kind: CandidateKind,
    /// Estimated bytes saved over the training window.
    pub savings: u64,
    /// Insertion order; breaks savings ties.
    pub index: usize,
}

/// Everything extraction computed, kept for logging and introspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Sample threshold.
    pub threshold: u64,
    /// Folded group bytes.
    pub groups: [u8; FPC_WORDS],
    /// Self-similar group count.
    pub pattern_num: usize,
    /// All candidates in insertion order.
    pub candidates: Vec<Candidate>,
    /// Selected candidates, best first.
    pub selected: Vec<Candidate>,
    /// The resulting table.
    pub table: PatternTable,
}

/// Computes the sample threshold, `floor(min + (max - min) × factor)`.
pub fn sample_threshold(samples: &[u64; SAMPLE_SLOTS], factor: f64) -> u64 {
    let min = samples.iter().copied().min().unwrap_or(0);
    let max = samples.iter().copied().max().unwrap_or(0);
    let offset = ((max - min) as f64 * factor).floor() as u64;
    min + offset
}

/// Folds the sample counters into one group byte per word.
///
/// Bit `j` of group `i` is set iff slot `8i + j` is below `threshold`.
pub fn fold_groups(samples: &[u64; SAMPLE_SLOTS], threshold: u64) -> [u8; FPC_WORDS] {
    let mut groups = [0u8; FPC_WORDS];
    for (i, group) in groups.iter_mut().enumerate() {
        for j in 0..NIBBLES_PER_WORD {
            if samples[i * NIBBLES_PER_WORD + j] < threshold {
                *group |= 1 << j;
            }
        }
    }
    groups
}

/// Smallest prefix length whose repetition reproduces the group list under
/// successive halving.
pub fn self_similar_width(groups: &[u8; FPC_WORDS]) -> usize {
    let mut n = FPC_WORDS / 2;
    while n >= 1 && groups[..n] == groups[n..2 * n] {
        n /= 2;
    }
    (2 * n).max(1)
}

/// Keeps the `k` best candidates, highest savings first, earliest on ties.
pub fn select_top(candidates: &[Candidate], k: usize) -> Vec<Candidate> {
    let mut heap: BinaryHeap<_> = candidates
        .iter()
        .map(|c| (c.savings, Reverse(c.index)))
        .collect();
    let mut selected = Vec::with_capacity(k);
    while selected.len() < k {
        let Some((_, Reverse(index))) = heap.pop() else {
            break;
        };
        selected.push(candidates[index]);
    }
    selected
}

fn fpc_savings(hits: u64, emitted_nibbles: u64) -> u64 {
    (4 * hits).saturating_sub(emitted_nibbles * hits + 3 * hits / 8)
}

fn sample_candidates(
    samples: &[u64; SAMPLE_SLOTS],
    groups: &[u8; FPC_WORDS],
    pattern_num: usize,
) -> Vec<(u8, u64)> {
    let mut seen: Vec<u8> = Vec::new();
    let mut out = Vec::new();
    for (i, &group) in groups.iter().enumerate().take(pattern_num) {
        let zeros = NIBBLES_PER_WORD as u64 - u64::from(group.count_ones());
        if zeros == 0
            || zeros == NIBBLES_PER_WORD as u64
            || seen.contains(&group)
            || EXCLUDED_GROUPS.contains(&group)
        {
            continue;
        }
        seen.push(group);

        let m = (0..NIBBLES_PER_WORD)
            .filter(|&j| group & (1 << j) == 0)
            .map(|j| samples[i * NIBBLES_PER_WORD + j])
            .min()
            .unwrap_or(0);
        out.push((group, (m * zeros / 2).saturating_sub(3 * m / 8)));
    }
    out
}

fn materialize(selected: &[Candidate]) -> PatternTable {
    let mut table = PatternTable::EMPTY;
    for candidate in selected {
        match candidate.kind {
            CandidateKind::FpcSignedByte => table.push(PatternEntry::from_group(SIGNED_BYTE_GROUP)),
            CandidateKind::FpcByteHalves => table.push(PatternEntry::from_group(BYTE_HALVES_GROUP)),
            CandidateKind::FpcRepeatedByte => table.flags_mut().repeated_byte = true,
            CandidateKind::Bdi(family) => table.flags_mut().enable_family(family),
            CandidateKind::Sample { group } => table.push(PatternEntry::from_group(group)),
        }
    }
    table
}

/// Extracts the pattern table from a finished training window.
///
/// # Arguments
///
/// * `counters` - Counters gathered during training.
/// * `threshold_factor` - Fraction of the sample range used as threshold.
pub fn extract_patterns(counters: &TrainingCounters, threshold_factor: f64) -> Extraction {
    let threshold = sample_threshold(&counters.samples, threshold_factor);
    let groups = fold_groups(&counters.samples, threshold);
    let pattern_num = self_similar_width(&groups);

    let bdi_family = |family: BdiFamily| -> u64 {
        family
            .methods()
            .iter()
            .map(|method| counters.bdi[method.tag()])
            .sum()
    };

    let mut scored = vec![
        (CandidateKind::FpcSignedByte, fpc_savings(counters.fpc[0], 1)),
        (CandidateKind::FpcByteHalves, fpc_savings(counters.fpc[1], 2)),
        (CandidateKind::FpcRepeatedByte, fpc_savings(counters.fpc[2], 1)),
    ];
    scored.extend(
        BdiFamily::ALL
            .into_iter()
            .map(|family| (CandidateKind::Bdi(family), bdi_family(family))),
    );
    scored.extend(
        sample_candidates(&counters.samples, &groups, pattern_num)
            .into_iter()
            .map(|(group, savings)| (CandidateKind::Sample { group }, savings)),
    );

    let candidates: Vec<Candidate> = scored
        .into_iter()
        .enumerate()
        .map(|(index, (kind, savings))| Candidate {
            kind,
            savings,
            index,
        })
        .collect();
    let selected = select_top(&candidates, PATTERN_TABLE_CAPACITY);

    tracing::debug!(
        threshold,
        pattern_num,
        ?groups,
        candidates = candidates.len(),
        "pattern extraction"
    );

    Extraction {
        threshold,
        groups,
        pattern_num,
        table: materialize(&selected),
        candidates,
        selected,
    }
}
