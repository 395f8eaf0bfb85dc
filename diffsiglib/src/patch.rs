//! Unified diff parsing.
//!
//! Turns raw multi-file patch text (the conventional `--- a/path` /
//! `+++ b/path` / `@@ ... @@` format emitted by `git diff` and friends) into
//! an ordered sequence of [`FileDiff`] records.
//!
//! The parser is deliberately tolerant: metadata lines (`index`, mode
//! changes, `Binary files ... differ`, rename headers) are skipped, as are
//! lines inside a hunk whose marker is not `+`, `-`, or space. Empty or
//! marker-free input yields zero records. The only hard failure is a hunk
//! header whose line ranges cannot be parsed; without them the hunk body
//! cannot be delimited.

use crate::error::DiffsigError;
use crate::Result;

/// Path value used for the missing side of a create or delete.
pub const NULL_PATH: &str = "/dev/null";

/// Kind of a single hunk line, derived from its leading marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Line added by the patch (`+`)
    Added,
    /// Line removed by the patch (`-`)
    Deleted,
    /// Unchanged context line (space)
    Context,
}

/// A single line of hunk text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    /// What the line does to the file
    pub kind: LineKind,
    /// Original text, including the leading marker character
    pub raw: String,
}

impl DiffLine {
    /// The line text with the leading marker stripped.
    pub fn body(&self) -> &str {
        self.raw.get(1..).unwrap_or("")
    }
}

/// One contiguous block of changes within a file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Hunk {
    /// First line of the hunk in the old file
    pub old_start: u64,
    /// Number of old-file lines the hunk covers
    pub old_count: u64,
    /// First line of the hunk in the new file
    pub new_start: u64,
    /// Number of new-file lines the hunk covers
    pub new_count: u64,
    /// Hunk body in patch order
    pub lines: Vec<DiffLine>,
}

/// One file's worth of changes in a patch.
///
/// Either path may be absent: `old_path` for a created file, `new_path` for a
/// deleted one (both correspond to `/dev/null` in the patch text).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileDiff {
    /// Path on the old side, if the file existed before the patch
    pub old_path: Option<String>,
    /// Path on the new side, if the file exists after the patch
    pub new_path: Option<String>,
    /// Hunks in patch order
    pub hunks: Vec<Hunk>,
}

impl FileDiff {
    /// True if the patch removes the file entirely.
    pub fn is_deletion(&self) -> bool {
        self.new_path.is_none()
    }
}

/// Parse a multi-file unified diff into ordered file records.
///
/// Returns an empty vector for empty or marker-free input. Fails only on a
/// hunk header whose ranges do not parse.
pub fn parse_patch(text: &str) -> Result<Vec<FileDiff>> {
    let mut files: Vec<FileDiff> = Vec::new();
    let mut current: Option<FileDiff> = None;

    // Lines left to consume in the current hunk body, per the header ranges.
    let mut old_remaining: u64 = 0;
    let mut new_remaining: u64 = 0;

    for (index, line) in text.lines().enumerate() {
        // A new git header always ends the previous hunk, even when that
        // hunk's ranges promised more lines than its body delivered.
        let in_hunk_body =
            (old_remaining > 0 || new_remaining > 0) && !line.starts_with("diff --git ");
        if in_hunk_body {
            // The open hunk is always the last one pushed onto the current
            // record; the counters are only non-zero once it exists.
            let Some(hunk) = current.as_mut().and_then(|f| f.hunks.last_mut()) else {
                old_remaining = 0;
                new_remaining = 0;
                continue;
            };
            match line.chars().next() {
                Some('+') => {
                    new_remaining = new_remaining.saturating_sub(1);
                    hunk.lines.push(DiffLine {
                        kind: LineKind::Added,
                        raw: line.to_string(),
                    });
                }
                Some('-') => {
                    old_remaining = old_remaining.saturating_sub(1);
                    hunk.lines.push(DiffLine {
                        kind: LineKind::Deleted,
                        raw: line.to_string(),
                    });
                }
                Some(' ') | None => {
                    // Some tools strip the trailing space off blank context
                    // lines, so an empty line still counts on both sides.
                    old_remaining = old_remaining.saturating_sub(1);
                    new_remaining = new_remaining.saturating_sub(1);
                    hunk.lines.push(DiffLine {
                        kind: LineKind::Context,
                        raw: line.to_string(),
                    });
                }
                Some('\\') => {
                    // "\ No newline at end of file" is annotation, not content.
                }
                Some(_) => {
                    // Unrecognized marker: skipped, not counted, not an error.
                }
            }
            continue;
        }

        if let Some(rest) = line.strip_prefix("diff --git ") {
            old_remaining = 0;
            new_remaining = 0;
            if let Some(file) = current.take() {
                files.push(file);
            }
            // Seed paths from the git header so records without `---`/`+++`
            // lines (binary files, mode-only changes) still carry them; the
            // file headers below override when present.
            let (old, new) = parse_git_header_paths(rest);
            current = Some(FileDiff {
                old_path: old,
                new_path: new,
                hunks: Vec::new(),
            });
        } else if let Some(rest) = line.strip_prefix("--- ") {
            if current.is_none() {
                current = Some(FileDiff::default());
            }
            if let Some(file) = current.as_mut() {
                file.old_path = parse_path(rest);
            }
        } else if let Some(rest) = line.strip_prefix("+++ ") {
            if current.is_none() {
                current = Some(FileDiff::default());
            }
            if let Some(file) = current.as_mut() {
                file.new_path = parse_path(rest);
            }
        } else if line.starts_with("@@") {
            let hunk = parse_hunk_header(line, index + 1)?;
            old_remaining = hunk.old_count;
            new_remaining = hunk.new_count;
            // A hunk with no preceding file header opens an anonymous record.
            current.get_or_insert_with(FileDiff::default).hunks.push(hunk);
        }
        // Anything else between files/hunks is metadata; skip it.
    }

    if let Some(file) = current.take() {
        files.push(file);
    }

    Ok(files)
}

/// Split the `a/old b/new` tail of a `diff --git` line into both paths.
///
/// Splitting on `" b/"` keeps paths with spaces intact on the old side;
/// quoted or otherwise exotic paths fall back to no paths at all, which the
/// `---`/`+++` headers then fill in.
fn parse_git_header_paths(rest: &str) -> (Option<String>, Option<String>) {
    match rest.split_once(" b/") {
        Some((old, new)) => {
            let old = old.strip_prefix("a/").map(|p| p.to_string());
            (old, Some(new.to_string()))
        }
        None => (None, None),
    }
}

/// Parse the target of a `---`/`+++` header line.
///
/// Strips the `a/`/`b/` prefix git adds and any tab-separated timestamp GNU
/// diff appends. `/dev/null` maps to `None`.
fn parse_path(target: &str) -> Option<String> {
    let target = target.split('\t').next().unwrap_or(target).trim_end();
    if target == NULL_PATH {
        return None;
    }
    let stripped = target
        .strip_prefix("a/")
        .or_else(|| target.strip_prefix("b/"))
        .unwrap_or(target);
    Some(stripped.to_string())
}

/// Parse a `@@ -old[,count] +new[,count] @@` header into an empty [`Hunk`].
fn parse_hunk_header(line: &str, line_number: usize) -> Result<Hunk> {
    let malformed = || DiffsigError::MalformedHunkHeader {
        line: line_number,
        header: line.to_string(),
    };

    let after_open = line.strip_prefix("@@").ok_or_else(malformed)?;
    let ranges = after_open
        .find("@@")
        .map(|end| &after_open[..end])
        .ok_or_else(malformed)?;

    let mut old_range = None;
    let mut new_range = None;
    for token in ranges.split_whitespace() {
        if let Some(rest) = token.strip_prefix('-') {
            old_range = parse_range(rest);
        } else if let Some(rest) = token.strip_prefix('+') {
            new_range = parse_range(rest);
        }
    }

    let (old_start, old_count) = old_range.ok_or_else(malformed)?;
    let (new_start, new_count) = new_range.ok_or_else(malformed)?;

    Ok(Hunk {
        old_start,
        old_count,
        new_start,
        new_count,
        lines: Vec::new(),
    })
}

/// Parse `start[,count]`; the count defaults to 1 when omitted.
fn parse_range(text: &str) -> Option<(u64, u64)> {
    match text.split_once(',') {
        Some((start, count)) => Some((start.parse().ok()?, count.parse().ok()?)),
        None => Some((text.parse().ok()?, 1)),
    }
}
