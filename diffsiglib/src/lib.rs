//! # diffsiglib
//!
//! A diff-significance estimator: given the text of a unified multi-file
//! patch, compute one integer: how many lines of *meaningful* change it
//! contains.
//!
//! ## Overview
//!
//! Raw diff size is a poor proxy for review effort. A thousand-line patch
//! that regenerates a lockfile, re-indents a module, or moves a block of
//! code between files reads very differently from a thousand lines of new
//! logic. diffsiglib discounts that noise in two ways:
//!
//! - **Ignorable files**: records whose paths match a configurable substring
//!   list (lockfiles, snapshots, vendored trees, images, editor config)
//!   contribute nothing.
//! - **Movement cancellation**: added and deleted lines are normalized
//!   (whitespace and trivial punctuation removed) and tallied in ordered
//!   frequency tables; matching add/delete counts cancel. The pass runs once
//!   per file, catching lines moved within a file, and once globally over
//!   the merged tables, catching lines moved between files.
//!
//! The pipeline is pure: no I/O, no shared state, output fully determined by
//! the patch text and the options.
//!
//! ## Example
//!
//! ```rust
//! use diffsiglib::count_significant_lines;
//!
//! let patch = r#"--- a/src/greet.rs
//! +++ b/src/greet.rs
//! @@ -1,3 +1,3 @@
//!  fn greet() {
//! -    println!("hi");
//! +    println!("hello");
//!  }
//! "#;
//!
//! // One line out, one line in, nothing cancelled.
//! assert_eq!(count_significant_lines(patch).unwrap(), 2);
//! ```
//!
//! A patch that only rearranges cancels away:
//!
//! ```rust
//! use diffsiglib::count_significant_lines;
//!
//! let patch = r#"--- a/src/lib.rs
//! +++ b/src/lib.rs
//! @@ -1,3 +1,3 @@
//! -pub mod alpha;
//!  pub mod beta;
//! +pub mod alpha;
//!  pub mod gamma;
//! "#;
//!
//! assert_eq!(count_significant_lines(patch).unwrap(), 0);
//! ```

pub mod count;
pub mod error;
pub mod ignore;
pub mod normalize;
pub mod patch;
pub mod reduce;
pub mod stats;

pub use count::{
    analyze_patch, count_significant_lines, CountOptions, FileReport, LineTotals,
    SignificanceReport,
};
pub use error::DiffsigError;
pub use ignore::{IgnoreConfig, DEFAULT_IGNORES};
pub use normalize::{LineNormalizer, DEFAULT_STRIP_CHARS};
pub use patch::{parse_patch, DiffLine, FileDiff, Hunk, LineKind, NULL_PATH};
pub use reduce::reduce_tables;
pub use stats::{table_total, AggregateStatistics, FileStatistics, FrequencyTable};

/// Result type for diffsiglib operations
pub type Result<T> = std::result::Result<T, DiffsigError>;
