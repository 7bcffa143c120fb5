//! Shared utility functions.

/// Return the last `max_chars` characters of `s`.
///
/// Counts characters, not bytes, so the slice never splits a UTF-8 sequence.
/// If the string is shorter than `max_chars`, the entire string is returned.
pub fn tail_chars(s: &str, max_chars: usize) -> &str {
    if max_chars == 0 {
        return "";
    }
    match s.char_indices().rev().nth(max_chars - 1) {
        Some((start, _)) => &s[start..],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tail_ascii() {
        assert_eq!(tail_chars("hello world", 5), "world");
    }

    #[test]
    fn tail_no_op_when_short() {
        assert_eq!(tail_chars("hi", 10), "hi");
        assert_eq!(tail_chars("hi", 2), "hi");
    }

    #[test]
    fn tail_multibyte_boundary() {
        let s = "あのね"; // 9 bytes: 3+3+3
        assert_eq!(tail_chars(s, 1), "ね");
        assert_eq!(tail_chars(s, 2), "のね");
    }

    #[test]
    fn tail_zero_and_empty() {
        assert_eq!(tail_chars("abc", 0), "");
        assert_eq!(tail_chars("", 10), "");
    }
}
