//! Error types for diffsiglib

use thiserror::Error;

/// Errors that can occur while analyzing a patch
#[derive(Error, Debug)]
pub enum DiffsigError {
    /// A hunk header matched `@@` but its line ranges could not be parsed.
    ///
    /// This is the one hard failure in the pipeline: garbage that never looks
    /// like a hunk is skipped silently, but a header that claims to be a hunk
    /// and then lies about its ranges means the rest of the patch cannot be
    /// attributed to files reliably.
    #[error("malformed hunk header at line {line}: '{header}'")]
    MalformedHunkHeader { line: usize, header: String },
}
