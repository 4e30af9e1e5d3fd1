//! Character-bounded string helpers.
//!
//! Limits throughout the pipeline are counted in characters, never bytes, so
//! truncation can't split a multi-byte code point.

/// Longest prefix of `s` holding at most `max_chars` characters.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Trim, then keep at most `max_chars` characters.
pub fn bounded_preview(s: &str, max_chars: usize) -> String {
    truncate_chars(s.trim(), max_chars).to_string()
}

/// Number of characters in `s`.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_shorter_than_limit() {
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("", 10), "");
    }

    #[test]
    fn test_truncate_exact_and_over() {
        assert_eq!(truncate_chars("abcdef", 6), "abcdef");
        assert_eq!(truncate_chars("abcdef", 3), "abc");
        assert_eq!(truncate_chars("abcdef", 0), "");
    }

    #[test]
    fn test_truncate_multibyte() {
        let s = "héllo wörld";
        assert_eq!(truncate_chars(s, 2), "hé");
        assert_eq!(char_len(truncate_chars(s, 7)), 7);
    }

    #[test]
    fn test_bounded_preview_trims_first() {
        assert_eq!(bounded_preview("   hello world  ", 5), "hello");
        assert_eq!(bounded_preview("\n\n", 5), "");
    }
}
