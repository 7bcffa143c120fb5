//! String utilities for the domain layer.

/// Single-line preview of `s`: newlines become spaces, and text longer
/// than `max_chars` characters is cut with an ellipsis.
///
/// Counts characters, not bytes, so multi-byte text is never split.
pub fn excerpt(s: &str, max_chars: usize) -> String {
    let flat = s.replace('\n', " ");
    match flat.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}...", &flat[..end]),
        None => flat,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excerpt_short_text_is_flattened_only() {
        assert_eq!(excerpt("short\nline", 60), "short line");
        assert_eq!(excerpt("", 10), "");
    }

    #[test]
    fn test_excerpt_exact_length_is_not_cut() {
        assert_eq!(excerpt("abcde", 5), "abcde");
        assert_eq!(excerpt("abcdef", 5), "abcde...");
    }

    #[test]
    fn test_excerpt_multibyte_boundary() {
        let s = "é".repeat(70);
        assert_eq!(excerpt(&s, 60), format!("{}...", "é".repeat(60)));
    }
}
