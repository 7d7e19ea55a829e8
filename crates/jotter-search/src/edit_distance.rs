//! Case-insensitive Levenshtein (edit) distance.
//!
//! Strings are compared as sequences of `char`s. Two chars are equal when
//! their full lowercase expansions are equal, so `'A'` and `'a'` cost nothing
//! to align. There is no Unicode normalization: a precomposed `é` and `e`
//! followed by U+0301 are different sequences and the combining mark counts
//! as a separate char.

/// Compute the Levenshtein distance between `a` and `b`, ignoring case.
///
/// Insertion, deletion, and substitution each cost 1. Uses one rolling row
/// sized to the shorter input, so memory is O(min(m, n)) and time O(m * n).
///
/// Callers holding unbounded input should cap token length first (see
/// [`truncate_chars`]); this function has no limit of its own.
pub fn distance(a: &str, b: &str) -> usize {
    let (long, short) = if a.chars().count() >= b.chars().count() {
        (a, b)
    } else {
        (b, a)
    };
    let short: Vec<char> = short.chars().collect();

    if short.is_empty() {
        return long.chars().count();
    }

    // row[j] holds the distance between the processed prefix of `long`
    // and the first j chars of `short`.
    let mut row: Vec<usize> = (0..=short.len()).collect();

    for (i, lc) in long.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, &sc) in short.iter().enumerate() {
            let above = row[j + 1];
            let substitution = diagonal + usize::from(!chars_eq_ignore_case(lc, sc));
            let deletion = above + 1;
            let insertion = row[j] + 1;
            row[j + 1] = substitution.min(deletion).min(insertion);
            diagonal = above;
        }
    }

    row[short.len()]
}

#[inline]
fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

/// Return at most the first `max_chars` chars of `s`.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_strings() {
        assert_eq!(distance("abc", "abc"), 0);
        assert_eq!(distance("", ""), 0);
    }

    #[test]
    fn test_single_substitution() {
        assert_eq!(distance("abc", "abd"), 1);
    }

    #[test]
    fn test_kitten_sitting() {
        assert_eq!(distance("kitten", "sitting"), 3);
        assert_eq!(distance("sitting", "kitten"), 3);
    }

    #[test]
    fn test_empty_operand_is_length_of_other() {
        assert_eq!(distance("", "hello"), 5);
        assert_eq!(distance("hello", ""), 5);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(distance("ABC", "abc"), 0);
        assert_eq!(distance("Quick", "qUIK"), 1);
    }

    #[test]
    fn test_insertions_and_deletions() {
        assert_eq!(distance("quick", "quik"), 1);
        assert_eq!(distance("flaw", "lawn"), 2);
        assert_eq!(distance("a", "abcd"), 3);
    }

    #[test]
    fn test_counts_chars_not_bytes() {
        assert_eq!(distance("привет", "привет"), 0);
        assert_eq!(distance("привет", "превет"), 1);
        assert_eq!(distance("ПРИВЕТ", "привет"), 0);
        assert_eq!(distance("", "ёж"), 2);
    }

    #[test]
    fn test_combining_marks_are_not_normalized() {
        // precomposed U+00E9 vs 'e' + U+0301
        assert_eq!(distance("caf\u{e9}", "cafe\u{301}"), 2);
    }

    #[test]
    fn test_shorter_operand_in_either_position() {
        assert_eq!(distance("a", "xyzab"), 4);
        assert_eq!(distance("xyzab", "a"), 4);
        assert_eq!(distance("日本", "日本語です"), 3);
        assert_eq!(distance("日本語です", "日本"), 3);
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("hello", 3), "hel");
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("привет", 2), "пр");
        assert_eq!(truncate_chars("abc", 0), "");
    }
}
