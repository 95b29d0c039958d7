//! Online pattern learning.
//!
//! This module provides:
//! 1. **Counters:** FPC/BDI hit counters and per-nibble zero samplers fed
//!    during the training window.
//! 2. **Extraction:** Threshold filtering, self-similarity folding and top-k
//!    selection that turn the counters into a pattern table.
//! 3. **Table:** The learned masks and structural flags read by the dynamic
//!    codecs.
//!
//! The learner is a two-state machine. It starts in [`Phase::Training`] and
//! moves to [`Phase::SteadyState`] exactly once, when
//! [`PatternLearner::finish_training`] is called. The training counters are
//! consumed by the transition; only the sample counters are carried over for
//! introspection.

/// Training-window frequency counters.
pub mod counters;

/// One-time pattern extraction.
pub mod extract;

/// The learned pattern table.
pub mod table;

pub use counters::TrainingCounters;
pub use extract::{Candidate, CandidateKind, Extraction, extract_patterns};
pub use table::{PatternEntry, PatternTable, StructuralFlags};

use crate::common::constants::{BLOCK_SIZE, SAMPLE_SLOTS};

/// State reached after extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SteadyState {
    /// The learned table.
    pub table: PatternTable,
    /// Candidates chosen by extraction, best first.
    pub selected: Vec<Candidate>,
    /// Sample counters as they stood when training ended.
    pub samples: [u64; SAMPLE_SLOTS],
}

/// Learner phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Gathering counters.
    Training(Box<TrainingCounters>),
    /// Table extracted; counters frozen.
    SteadyState(Box<SteadyState>),
}

/// Learns the dominant word patterns of a workload.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternLearner {
    phase: Phase,
    threshold_factor: f64,
}

impl PatternLearner {
    /// Creates a learner in the training phase.
    ///
    /// # Arguments
    ///
    /// * `threshold_factor` - Fraction of the sample range used as the
    ///   zero-prone threshold (0.4 by default).
    pub fn new(threshold_factor: f64) -> Self {
        Self {
            phase: Phase::Training(Box::default()),
            threshold_factor,
        }
    }

    /// Feeds one block to the training counters.
    ///
    /// Ignored once training has finished.
    pub fn observe(&mut self, block: &[u8; BLOCK_SIZE]) {
        match &mut self.phase {
            Phase::Training(counters) => counters.observe(block),
            Phase::SteadyState(_) => {
                tracing::trace!("learner already in steady state; block ignored");
            }
        }
    }

    /// Extracts the pattern table and leaves the training phase.
    ///
    /// Calling this again after the transition does nothing.
    pub fn finish_training(&mut self) {
        let Phase::Training(counters) = &self.phase else {
            return;
        };

        let extraction = extract_patterns(counters, self.threshold_factor);
        tracing::info!(
            writes = counters.writes,
            threshold = extraction.threshold,
            pattern_num = extraction.pattern_num,
            masks = ?extraction.table.entries().iter().map(PatternEntry::mask).collect::<Vec<_>>(),
            flags = ?extraction.table.flags(),
            "training finished; pattern table extracted"
        );

        let samples = counters.samples;
        self.phase = Phase::SteadyState(Box::new(SteadyState {
            table: extraction.table,
            selected: extraction.selected,
            samples,
        }));
    }

    /// Current phase.
    pub const fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Returns true while still training.
    pub const fn is_training(&self) -> bool {
        matches!(self.phase, Phase::Training(_))
    }

    /// The learned table, once training has finished.
    pub fn table(&self) -> Option<&PatternTable> {
        match &self.phase {
            Phase::Training(_) => None,
            Phase::SteadyState(state) => Some(&state.table),
        }
    }

    /// The training counters, while still training.
    pub fn counters(&self) -> Option<&TrainingCounters> {
        match &self.phase {
            Phase::Training(counters) => Some(counters),
            Phase::SteadyState(_) => None,
        }
    }

    /// Sample counters (live while training, frozen afterward).
    pub fn sample_counters(&self) -> &[u64; SAMPLE_SLOTS] {
        match &self.phase {
            Phase::Training(counters) => &counters.samples,
            Phase::SteadyState(state) => &state.samples,
        }
    }
}
