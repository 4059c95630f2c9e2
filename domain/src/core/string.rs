//! String utilities for the domain layer.

/// Shorten `s` to at most `max_len` bytes, marking the cut with `...`.
///
/// Every layer uses this one helper for text shown outside the answer
/// itself: log previews, HTTP error body excerpts and history listings.
/// The cut always falls on a character boundary.
pub fn truncate(s: &str, max_len: usize) -> String {
    const ELLIPSIS: &str = "...";

    if s.len() <= max_len {
        return s.to_string();
    }
    let budget = max_len.saturating_sub(ELLIPSIS.len());
    let cut = s
        .char_indices()
        .map(|(idx, _)| idx)
        .rfind(|&idx| idx <= budget)
        .unwrap_or(0);
    format!("{}{}", &s[..cut], ELLIPSIS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
    }

    #[test]
    fn test_truncate_multibyte() {
        // 'é' is 2 bytes; cutting inside it backs up to the previous boundary
        assert_eq!(truncate("café au lait", 7), "caf...");
        assert_eq!(truncate("naïve", 20), "naïve");
    }

    #[test]
    fn test_truncate_never_splits_wide_chars() {
        // '🦀' occupies bytes 2..6; a budget of 5 ends inside it
        assert_eq!(truncate("ab🦀cdef", 8), "ab...");
        assert_eq!(truncate("ab🦀cdef", 9), "ab🦀...");
    }

    #[test]
    fn test_truncate_tiny_limit() {
        assert_eq!(truncate("abcdef", 2), "...");
    }
}
