//! Write statistics collection and reporting.
//!
//! This module tracks what the engine saved. It provides:
//! 1. **Counts:** Writes issued and writes that compressed.
//! 2. **Compression:** Running compression-ratio sum and its mean.
//! 3. **Wear:** Bits written before and after cell-change counting.

use std::fmt;

use crate::common::constants::BLOCK_SIZE;

/// Names accepted by [`WriteStats::print_sections`].
pub const STATS_SECTIONS: &[&str] = &["summary", "compression", "wear"];

const RULE: &str = "----------------------------------------------------------";
const BANNER: &str = "==========================================================";

/// Running statistics over every processed write.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WriteStats {
    /// Writes processed.
    pub writes: u64,
    /// Writes whose new payload compressed.
    pub compressed_writes: u64,
    /// Sum of stored widths in bits (no cell counting).
    pub bits_written_raw: u64,
    /// Sum of changed bits after cell counting (each clamped to one block).
    pub bits_written: u64,
    /// Sum of per-write compression ratios (`64 / stored bytes`).
    pub compression_ratio_sum: f64,
}

impl WriteStats {
    /// Records one write.
    ///
    /// # Arguments
    ///
    /// * `compressed_len` - Stored length of the new payload, `None` if raw.
    /// * `bits_raw` - Stored width in bits.
    /// * `bits` - Changed bits.
    pub fn record(&mut self, compressed_len: Option<usize>, bits_raw: u64, bits: u64) {
        self.writes += 1;
        let effective = match compressed_len {
            Some(len) => {
                self.compressed_writes += 1;
                len.max(1)
            }
            None => BLOCK_SIZE,
        };
        self.compression_ratio_sum += BLOCK_SIZE as f64 / effective as f64;
        self.bits_written_raw += bits_raw;
        self.bits_written += bits;
    }

    /// Mean compression ratio (0 before any write).
    pub fn mean_compression_ratio(&self) -> f64 {
        if self.writes == 0 {
            0.0
        } else {
            self.compression_ratio_sum / self.writes as f64
        }
    }

    /// Percentage of writes that compressed.
    pub fn compression_rate(&self) -> f64 {
        if self.writes == 0 {
            0.0
        } else {
            100.0 * self.compressed_writes as f64 / self.writes as f64
        }
    }

    /// Percentage of stored bits that cell counting avoided writing.
    pub fn bit_reduction(&self) -> f64 {
        if self.bits_written_raw == 0 {
            0.0
        } else {
            100.0 * self.bits_written_raw.saturating_sub(self.bits_written) as f64
                / self.bits_written_raw as f64
        }
    }

    fn write_sections(&self, out: &mut impl fmt::Write, sections: &[String]) -> fmt::Result {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);

        writeln!(out, "\n{BANNER}")?;
        writeln!(out, "NVM WRITE ENGINE STATISTICS")?;
        writeln!(out, "{BANNER}")?;
        if want("summary") {
            writeln!(out, "writes                   {}", self.writes)?;
            writeln!(out, "compressed_writes        {}", self.compressed_writes)?;
            writeln!(out, "{RULE}")?;
        }
        if want("compression") {
            writeln!(out, "COMPRESSION")?;
            writeln!(out, "  comp.rate              {:.2}%", self.compression_rate())?;
            writeln!(out, "  comp.ratio_mean        {:.4}", self.mean_compression_ratio())?;
            writeln!(out, "  comp.ratio_sum         {:.4}", self.compression_ratio_sum)?;
            writeln!(out, "{RULE}")?;
        }
        if want("wear") {
            writeln!(out, "WEAR")?;
            writeln!(out, "  wear.bits_raw          {}", self.bits_written_raw)?;
            writeln!(out, "  wear.bits_written      {}", self.bits_written)?;
            writeln!(out, "  wear.reduction         {:.2}%", self.bit_reduction())?;
            writeln!(out, "{RULE}")?;
        }
        writeln!(out, "{BANNER}")
    }

    /// Renders the selected sections; an empty selection renders all of them.
    pub fn render_sections(&self, sections: &[String]) -> String {
        let mut out = String::new();
        let _ = self.write_sections(&mut out, sections);
        out
    }

    /// Prints the selected sections to stdout.
    ///
    /// Valid names are listed in [`STATS_SECTIONS`]; unknown names are ignored.
    pub fn print_sections(&self, sections: &[String]) {
        print!("{}", self.render_sections(sections));
    }
}
