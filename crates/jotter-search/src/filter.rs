//! Search modes applied to note titles and contents.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::debug;

use jotter_core::Note;

use crate::fuzzy::FuzzyMatcher;

/// How a search query is compared with note fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Case-insensitive substring containment.
    Strict,
    /// Substring match with word-level edit-distance fallback.
    #[default]
    Fuzzy,
}

impl SearchMode {
    /// Interpret the `strict` query-string flag.
    ///
    /// Only a case-insensitive `"true"` selects strict mode; a missing flag or
    /// any other value selects fuzzy mode.
    pub fn from_strict_flag(flag: Option<&str>) -> Self {
        match flag {
            Some(v) if v.trim().eq_ignore_ascii_case("true") => SearchMode::Strict,
            _ => SearchMode::Fuzzy,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchMode::Strict => "strict",
            SearchMode::Fuzzy => "fuzzy",
        }
    }
}

/// Case-insensitive substring containment.
pub fn strict_match(text: &str, query: &str) -> bool {
    text.to_lowercase().contains(&query.to_lowercase())
}

/// A document with a title and a body that can be searched.
pub trait Searchable {
    fn title(&self) -> &str;
    fn content(&self) -> &str;
}

impl Searchable for Note {
    fn title(&self) -> &str {
        &self.title
    }

    fn content(&self) -> &str {
        &self.content
    }
}

/// Keeps documents whose title or content matches a query.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoteFilter {
    mode: SearchMode,
    matcher: FuzzyMatcher,
}

impl NoteFilter {
    pub fn new(mode: SearchMode, matcher: FuzzyMatcher) -> Self {
        Self { mode, matcher }
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    /// True when either field of `doc` matches `query` under this mode.
    pub fn matches<T: Searchable>(&self, doc: &T, query: &str) -> bool {
        match self.mode {
            SearchMode::Strict => {
                strict_match(doc.title(), query) || strict_match(doc.content(), query)
            }
            SearchMode::Fuzzy => {
                self.matcher.matches(doc.title(), query)
                    || self.matcher.matches(doc.content(), query)
            }
        }
    }

    /// Keep the matching documents, preserving input order.
    ///
    /// An empty query keeps every document. A whitespace-only query is
    /// matched like any other: strict mode looks for the literal whitespace,
    /// fuzzy mode has no words to check and keeps everything.
    pub fn filter<T: Searchable>(&self, docs: Vec<T>, query: &str) -> Vec<T> {
        if query.is_empty() {
            return docs;
        }

        let start = Instant::now();
        let candidate_count = docs.len();
        let results: Vec<T> = docs
            .into_iter()
            .filter(|doc| self.matches(doc, query))
            .collect();

        debug!(
            subsystem = "search",
            component = "note_filter",
            op = "filter",
            search_mode = self.mode.as_str(),
            threshold = self.matcher.threshold(),
            candidate_count,
            result_count = results.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Note filter complete"
        );

        results
    }
}
