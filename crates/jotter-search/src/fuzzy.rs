//! Word-level fuzzy matching.
//!
//! A query matches a document when the case-folded query occurs in the
//! case-folded document, or failing that, when every whitespace-separated
//! query word lies within the edit-distance threshold of at least one
//! document word. Two query words may match the same document word.

use jotter_core::defaults::FUZZY_THRESHOLD;

use crate::edit_distance::{distance, truncate_chars};

/// Default maximum edit distance per word pair.
pub const DEFAULT_THRESHOLD: usize = FUZZY_THRESHOLD;

/// Decide whether `query` fuzzily matches `document_text`.
///
/// Total for every input: an empty or all-whitespace query always matches.
/// No per-token length cap is applied; see [`FuzzyMatcher`] for that.
pub fn fuzzy_match(document_text: &str, query: &str, threshold: usize) -> bool {
    FuzzyMatcher::new(threshold).matches(document_text, query)
}

/// Fuzzy matcher configured once and reused across documents.
///
/// The threshold is a fixed absolute distance; it does not scale with word
/// length, so short words collide more easily than long ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FuzzyMatcher {
    threshold: usize,
    max_token_chars: Option<usize>,
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

impl FuzzyMatcher {
    /// Create a matcher with the given threshold and no token length cap.
    pub fn new(threshold: usize) -> Self {
        Self {
            threshold,
            max_token_chars: None,
        }
    }

    /// Truncate every token to `max_chars` chars before computing distances.
    ///
    /// Bounds the cost of a single comparison at `max_chars²` when documents
    /// come from untrusted input.
    pub fn with_max_token_chars(mut self, max_chars: usize) -> Self {
        self.max_token_chars = Some(max_chars);
        self
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn max_token_chars(&self) -> Option<usize> {
        self.max_token_chars
    }

    /// Decide whether `query` matches `document_text`.
    pub fn matches(&self, document_text: &str, query: &str) -> bool {
        let document = document_text.to_lowercase();
        let query = query.to_lowercase();

        if document.contains(&query) {
            return true;
        }

        let document_words: Vec<&str> = document
            .split_whitespace()
            .map(|w| self.cap(w))
            .collect();

        query
            .split_whitespace()
            .map(|w| self.cap(w))
            .all(|q_word| {
                document_words
                    .iter()
                    .any(|d_word| distance(d_word, q_word) <= self.threshold)
            })
    }

    fn cap<'a>(&self, word: &'a str) -> &'a str {
        match self.max_token_chars {
            Some(max) => truncate_chars(word, max),
            None => word,
        }
    }
}
