//! Statistics Unit Tests.
//!
//! Verifies accumulation, derived metrics and sectioned rendering.

use nvwrite_core::WriteStats;
use nvwrite_core::stats::STATS_SECTIONS;

fn sample() -> WriteStats {
    let mut stats = WriteStats::default();
    stats.record(Some(16), 128, 40);
    stats.record(None, 512, 100);
    stats
}

#[test]
fn record_accumulates_counts() {
    let stats = sample();
    assert_eq!(stats.writes, 2);
    assert_eq!(stats.compressed_writes, 1);
    assert_eq!(stats.bits_written_raw, 640);
    assert_eq!(stats.bits_written, 140);
    assert!((stats.compression_ratio_sum - 5.0).abs() < 1e-9);
}

#[test]
fn derived_metrics() {
    let stats = sample();
    assert!((stats.mean_compression_ratio() - 2.5).abs() < 1e-9);
    assert!((stats.compression_rate() - 50.0).abs() < 1e-9);
    assert!((stats.bit_reduction() - 100.0 * 500.0 / 640.0).abs() < 1e-9);
}

#[test]
fn empty_stats_do_not_divide_by_zero() {
    let stats = WriteStats::default();
    assert_eq!(stats.mean_compression_ratio(), 0.0);
    assert_eq!(stats.compression_rate(), 0.0);
    assert_eq!(stats.bit_reduction(), 0.0);
}

#[test]
fn empty_selection_renders_every_section() {
    let report = sample().render_sections(&[]);
    assert!(report.contains("compressed_writes        1"));
    assert!(report.contains("COMPRESSION"));
    assert!(report.contains("WEAR"));
    assert!(report.contains("comp.ratio_mean        2.5000"));
}

#[test]
fn selection_filters_sections() {
    let report = sample().render_sections(&["wear".to_string()]);
    assert!(report.contains("wear.bits_written      140"));
    assert!(!report.contains("COMPRESSION"));
    assert!(!report.contains("compressed_writes"));
}

#[test]
fn section_names_are_listed() {
    assert_eq!(STATS_SECTIONS, &["summary", "compression", "wear"]);
}
