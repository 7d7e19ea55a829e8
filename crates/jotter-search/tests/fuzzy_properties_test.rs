//! Property checks for edit distance and fuzzy matching over a fixed corpus.

use chrono::Utc;
use jotter_core::Note;
use jotter_search::{
    distance, fuzzy_match, FuzzyMatcher, NoteFilter, SearchMode, DEFAULT_THRESHOLD,
};
use uuid::Uuid;

const CORPUS: &[&str] = &[
    "",
    "a",
    "A",
    "abc",
    "abd",
    "ABC",
    "kitten",
    "sitting",
    "Saturday",
    "sunday",
    "quick",
    "quik",
    "привет",
    "ПРИВЕТ",
    "naïve",
    "naive",
    "日本語",
    "hello world",
];

#[test]
fn distance_is_symmetric() {
    for a in CORPUS {
        for b in CORPUS {
            assert_eq!(distance(a, b), distance(b, a), "d({a:?}, {b:?})");
        }
    }
}

#[test]
fn distance_to_self_is_zero() {
    for a in CORPUS {
        assert_eq!(distance(a, a), 0, "d({a:?}, {a:?})");
    }
}

#[test]
fn distance_obeys_triangle_inequality() {
    for a in CORPUS {
        for b in CORPUS {
            for c in CORPUS {
                assert!(
                    distance(a, c) <= distance(a, b) + distance(b, c),
                    "triangle violated for {a:?}, {b:?}, {c:?}"
                );
            }
        }
    }
}

#[test]
fn distance_from_empty_is_char_count() {
    for s in CORPUS {
        assert_eq!(distance("", s), s.chars().count(), "d(\"\", {s:?})");
    }
}

#[test]
fn distance_is_bounded_by_longer_length() {
    for a in CORPUS {
        for b in CORPUS {
            let longer = a.chars().count().max(b.chars().count());
            let diff = a.chars().count().abs_diff(b.chars().count());
            let d = distance(a, b);
            assert!(d <= longer, "d({a:?}, {b:?}) = {d} > {longer}");
            assert!(d >= diff, "d({a:?}, {b:?}) = {d} < {diff}");
        }
    }
}

#[test]
fn known_distances() {
    assert_eq!(distance("abc", "abc"), 0);
    assert_eq!(distance("abc", "abd"), 1);
    assert_eq!(distance("kitten", "sitting"), 3);
    assert_eq!(distance("Saturday", "sunday"), 3);
    assert_eq!(distance("ABC", "abc"), 0);
    assert_eq!(distance("naïve", "naive"), 1);
}

#[test]
fn known_matches() {
    assert!(fuzzy_match("Hello World", "hello", DEFAULT_THRESHOLD));
    assert!(fuzzy_match("The quick brown fox", "quik", DEFAULT_THRESHOLD));
    assert!(!fuzzy_match("The quick brown fox", "zzzzzzz", DEFAULT_THRESHOLD));
    assert!(!fuzzy_match("cat dog", "elephant", 2));
    assert!(fuzzy_match("anything at all", "", DEFAULT_THRESHOLD));
}

#[test]
fn one_unmatched_query_word_fails_the_query() {
    // "xylophone" is at least 6 edits from every word below
    assert!(distance("one", "xylophone") > 3);
    assert!(distance("two", "xylophone") > 3);
    assert!(distance("three", "xylophone") > 3);
    assert!(!fuzzy_match("one two three", "one xylophone", 3));
    assert!(fuzzy_match("one two three", "one two", 3));
}

#[test]
fn exact_phrase_always_matches_regardless_of_threshold() {
    let docs = ["The quick brown fox", "hello world", "ПРИВЕТ мир"];
    for doc in docs {
        let lower = doc.to_lowercase();
        let words: Vec<&str> = lower.split_whitespace().collect();
        for window in words.windows(2) {
            let phrase = window.join(" ");
            assert!(fuzzy_match(doc, &phrase, 0), "{phrase:?} in {doc:?}");
        }
    }
}

#[test]
fn matching_is_deterministic() {
    let matcher = FuzzyMatcher::default();
    for doc in CORPUS {
        for query in CORPUS {
            let first = matcher.matches(doc, query);
            assert_eq!(matcher.matches(doc, query), first);
            assert_eq!(fuzzy_match(doc, query, DEFAULT_THRESHOLD), first);
        }
    }
}

#[test]
fn matcher_is_shareable_across_threads() {
    let matcher = FuzzyMatcher::default();
    let handles: Vec<_> = (0..4)
        .map(|_| std::thread::spawn(move || matcher.matches("The quick brown fox", "quik")))
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap());
    }
}

fn note(title: &str, content: &str) -> Note {
    let now = Utc::now();
    Note {
        id: Uuid::now_v7(),
        user_id: Uuid::nil(),
        title: title.to_string(),
        content: content.to_string(),
        created_at: now,
        updated_at: now,
    }
}

#[test]
fn notes_match_on_title_or_content() {
    let notes = vec![
        note("Trip to Lisbon", "Book flights and hotel"),
        note("Reading list", "Dune, Neuromancer"),
        note("Untitled", "call the plumber about the kitchen sink"),
    ];

    let fuzzy = NoteFilter::new(SearchMode::Fuzzy, FuzzyMatcher::default());
    let hits = fuzzy.filter(notes.clone(), "plumbr");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "Untitled");

    let hits = fuzzy.filter(notes.clone(), "hotell");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "Trip to Lisbon");

    let strict = NoteFilter::new(SearchMode::Strict, FuzzyMatcher::default());
    assert!(strict.filter(notes.clone(), "plumbr").is_empty());
    assert_eq!(strict.filter(notes, "NEUROMANCER").len(), 1);
}
