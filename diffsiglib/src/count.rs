//! High-level significance counting API.
//!
//! This module composes the pipeline: parse the patch, drop ignored files,
//! build per-file statistics (self-cancelled), merge them, run the global
//! cancellation pass, and sum what is left.
//!
//! The whole computation is a pure function of the patch text and the
//! options: no I/O, no shared state, deterministic output. Callers that want
//! the per-file and pre-cancellation numbers for display get them on
//! [`SignificanceReport`] instead of from log output.

use serde::Serialize;

use crate::ignore::IgnoreConfig;
use crate::normalize::LineNormalizer;
use crate::patch::parse_patch;
use crate::stats::{table_total, AggregateStatistics, FileStatistics};
use crate::Result;

/// Options for significance counting.
#[derive(Debug, Clone, Default)]
pub struct CountOptions {
    /// Which files are excluded from the statistics
    pub ignore: IgnoreConfig,
    /// How line content is canonicalized before comparison
    pub normalizer: LineNormalizer,
}

impl CountOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the ignore configuration.
    pub fn ignore(mut self, ignore: IgnoreConfig) -> Self {
        self.ignore = ignore;
        self
    }

    /// Set the line normalizer.
    pub fn normalizer(mut self, normalizer: LineNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }
}

/// Added/deleted line counts for one stage of the pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LineTotals {
    /// Lines added
    pub added: u64,
    /// Lines deleted
    pub deleted: u64,
}

impl LineTotals {
    /// Added plus deleted.
    pub fn total(&self) -> u64 {
        self.added + self.deleted
    }

    fn of(stats: &AggregateStatistics) -> Self {
        Self {
            added: table_total(&stats.additions),
            deleted: table_total(&stats.deletions),
        }
    }
}

/// Per-file diagnostic row: how much change one file carries after its own
/// cancellation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    /// Old-side path (sentinel when absent)
    pub old_path: String,
    /// New-side path (sentinel when absent)
    pub new_path: String,
    /// Self-cancelled changed-line count for this file
    pub lines: u64,
}

/// Result of analyzing one patch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SignificanceReport {
    /// One row per non-ignored file, in patch order
    pub files: Vec<FileReport>,
    /// Merged totals before the global cancellation pass
    pub including_moved: LineTotals,
    /// Totals after the global cancellation pass
    pub significant: LineTotals,
}

impl SignificanceReport {
    /// The final integer: significant added plus significant deleted lines.
    pub fn significant_lines(&self) -> u64 {
        self.significant.total()
    }
}

/// Analyze a patch and return the full report.
///
/// Malformed-but-parseable input (no file records) produces an empty report,
/// not an error; only an unparseable hunk header fails.
pub fn analyze_patch(patch: &str, options: &CountOptions) -> Result<SignificanceReport> {
    let statistics: Vec<FileStatistics> = parse_patch(patch)?
        .iter()
        .filter(|diff| {
            !options
                .ignore
                .is_ignored_file(diff.old_path.as_deref(), diff.new_path.as_deref())
        })
        .map(|diff| FileStatistics::from_diff(diff, &options.normalizer))
        .collect();

    let files = statistics
        .iter()
        .map(|stats| FileReport {
            old_path: stats.old_path.clone(),
            new_path: stats.new_path.clone(),
            lines: stats.line_count(),
        })
        .collect();

    let merged = AggregateStatistics::merge(&statistics);
    let including_moved = LineTotals::of(&merged);
    let significant = LineTotals::of(&merged.reduce());

    Ok(SignificanceReport {
        files,
        including_moved,
        significant,
    })
}

/// Count the significant changed lines of a patch with default options.
///
/// This is the single-integer contract: the sum of added and deleted lines
/// that survive ignore filtering and both cancellation passes. An empty
/// patch counts zero.
pub fn count_significant_lines(patch: &str) -> Result<u64> {
    analyze_patch(patch, &CountOptions::new()).map(|report| report.significant_lines())
}
