//! # jotter-search
//!
//! Note search for jotter.
//!
//! This crate provides:
//! - Case-insensitive Levenshtein distance with a single rolling row
//! - Word-level fuzzy matching layered over exact substring search
//! - Strict/fuzzy search modes applied to note titles and contents
//!
//! ## Example
//!
//! ```
//! use jotter_search::{distance, fuzzy_match, DEFAULT_THRESHOLD};
//!
//! assert_eq!(distance("kitten", "sitting"), 3);
//! assert!(fuzzy_match("The quick brown fox", "quik", DEFAULT_THRESHOLD));
//! assert!(!fuzzy_match("cat dog", "elephant", 2));
//! ```

pub mod edit_distance;
pub mod filter;
pub mod fuzzy;

pub use edit_distance::{distance, truncate_chars};
pub use filter::{strict_match, NoteFilter, SearchMode, Searchable};
pub use fuzzy::{fuzzy_match, FuzzyMatcher, DEFAULT_THRESHOLD};
