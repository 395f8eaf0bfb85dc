//! Frequency statistics over normalized diff lines.
//!
//! Both the per-file and the aggregate tables map normalized line content to
//! an occurrence count. Iteration order is first-insertion order and it is
//! load-bearing: the merger visits keys in that order, so the aggregate
//! tables read as "order of first appearance across files, in file order".
//! `IndexMap` provides exactly that contract; a hash map would not.

use serde::Serialize;

use crate::normalize::LineNormalizer;
use crate::patch::{FileDiff, LineKind, NULL_PATH};
use crate::reduce::reduce_tables;

/// Ordered map from normalized line content to occurrence count.
///
/// A key is present with count >= 1; absence means zero occurrences.
pub type FrequencyTable = indexmap::IndexMap<String, u64>;

/// Sum of all counts in a table.
pub fn table_total(table: &FrequencyTable) -> u64 {
    table.values().sum()
}

/// One file's add/delete statistics, already self-cancelled.
///
/// Built from a single [`FileDiff`], consumed by
/// [`AggregateStatistics::merge`], then discarded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileStatistics {
    /// Old-side path, or the `/dev/null` sentinel when absent
    pub old_path: String,
    /// New-side path, or the `/dev/null` sentinel when absent
    pub new_path: String,
    /// Normalized added lines and their counts
    pub additions: FrequencyTable,
    /// Normalized deleted lines and their counts
    pub deletions: FrequencyTable,
}

impl FileStatistics {
    /// Build the statistics for one file record.
    ///
    /// Absent paths resolve to [`NULL_PATH`]. A record whose new path is the
    /// sentinel is a whole-file deletion and yields empty tables without
    /// inspecting its hunks: removed code leaves nothing to review.
    ///
    /// Otherwise every added and deleted hunk line is normalized and tallied
    /// in patch order, and the pair of tables is reduced before returning so
    /// intra-file movement is already cancelled when the file reaches the
    /// merger.
    pub fn from_diff(diff: &FileDiff, normalizer: &LineNormalizer) -> Self {
        let old_path = diff.old_path.clone().unwrap_or_else(|| NULL_PATH.to_string());
        let new_path = diff.new_path.clone().unwrap_or_else(|| NULL_PATH.to_string());

        if new_path == NULL_PATH {
            return Self {
                old_path,
                new_path,
                ..Self::default()
            };
        }

        let mut additions = FrequencyTable::new();
        let mut deletions = FrequencyTable::new();
        for line in diff.hunks.iter().flat_map(|hunk| &hunk.lines) {
            let table = match line.kind {
                LineKind::Added => &mut additions,
                LineKind::Deleted => &mut deletions,
                LineKind::Context => continue,
            };
            *table.entry(normalizer.normalize(line.body())).or_insert(0) += 1;
        }

        let (additions, deletions) = reduce_tables(&additions, &deletions);

        Self {
            old_path,
            new_path,
            additions,
            deletions,
        }
    }

    /// Lines of change this file still carries after its own cancellation.
    pub fn line_count(&self) -> u64 {
        table_total(&self.additions) + table_total(&self.deletions)
    }
}

/// File-agnostic add/delete statistics for a whole patch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AggregateStatistics {
    /// Normalized added lines and their counts across all files
    pub additions: FrequencyTable,
    /// Normalized deleted lines and their counts across all files
    pub deletions: FrequencyTable,
}

impl AggregateStatistics {
    /// Create empty aggregate statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge per-file tables into one global pair.
    ///
    /// Files are processed in input order and each table's keys in its own
    /// iteration order; counts for a key seen in several files are summed.
    /// An empty input yields two empty tables.
    pub fn merge<'a>(files: impl IntoIterator<Item = &'a FileStatistics>) -> Self {
        let mut totals = Self::new();
        for file in files {
            for (line, count) in &file.additions {
                *totals.additions.entry(line.clone()).or_insert(0) += count;
            }
            for (line, count) in &file.deletions {
                *totals.deletions.entry(line.clone()).or_insert(0) += count;
            }
        }
        totals
    }

    /// Run the cancellation pass over the merged tables.
    ///
    /// This is the second, global reduction: a line moved *between* files
    /// survives each per-file pass but cancels here.
    pub fn reduce(&self) -> Self {
        let (additions, deletions) = reduce_tables(&self.additions, &self.deletions);
        Self {
            additions,
            deletions,
        }
    }

    /// Sum of all remaining counts in both tables.
    pub fn line_count(&self) -> u64 {
        table_total(&self.additions) + table_total(&self.deletions)
    }
}
