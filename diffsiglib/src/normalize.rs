//! Line canonicalization for change comparison.
//!
//! Two lines that differ only by indentation, trailing punctuation, or quote
//! style are the same change as far as the estimator is concerned. The
//! normalizer deletes every whitespace character (internal ones included, not
//! merely collapsed) and a small set of pure-punctuation characters, so such
//! pairs produce identical keys and cancel in the reducer.
//!
//! This is a heuristic, not a parser: it accepts rare false positives in
//! exchange for staying language-agnostic.

use serde::{Deserialize, Serialize};

/// Punctuation stripped by default: quote styles, semicolons, and commas
/// carry no semantic weight in most languages.
pub const DEFAULT_STRIP_CHARS: &[char] = &['"', '\'', '`', ';', ','];

/// Canonicalizes raw line bodies for frequency counting.
///
/// The set of stripped punctuation characters is data, not logic. Replace it
/// with [`LineNormalizer::with_chars`] when the default policy does not fit
/// the codebase under review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineNormalizer {
    /// Characters deleted from every line in addition to whitespace
    strip_chars: Vec<char>,
}

impl Default for LineNormalizer {
    fn default() -> Self {
        Self {
            strip_chars: DEFAULT_STRIP_CHARS.to_vec(),
        }
    }
}

impl LineNormalizer {
    /// Create a normalizer with the default punctuation policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a normalizer with a custom punctuation set.
    pub fn with_chars(chars: impl IntoIterator<Item = char>) -> Self {
        Self {
            strip_chars: chars.into_iter().collect(),
        }
    }

    /// Canonicalize one line body (the text after the diff marker).
    ///
    /// Removes all whitespace and every configured punctuation character.
    pub fn normalize(&self, body: &str) -> String {
        body.chars()
            .filter(|c| !c.is_whitespace() && !self.strip_chars.contains(c))
            .collect()
    }
}
