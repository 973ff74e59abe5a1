//! Log-injection mitigation for untrusted request input.

/// Strip line-break characters so untrusted input cannot forge log lines.
///
/// Covers CR and LF plus NEL (U+0085), LINE SEPARATOR (U+2028) and
/// PARAGRAPH SEPARATOR (U+2029), which some log viewers also break on.
pub fn sanitize_log_input(input: &str) -> String {
    input
        .chars()
        .filter(|c| !matches!(c, '\r' | '\n' | '\u{0085}' | '\u{2028}' | '\u{2029}'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_line_breaks() {
        assert_eq!(sanitize_log_input("abc\r\nINFO forged"), "abcINFO forged");
        assert_eq!(sanitize_log_input("a\nb\rc"), "abc");
    }

    #[test]
    fn strips_unicode_line_separators() {
        assert_eq!(
            sanitize_log_input("a\u{0085}b\u{2028}c\u{2029}INFO forged"),
            "abcINFO forged"
        );
    }

    #[test]
    fn leaves_clean_input_untouched() {
        assert_eq!(sanitize_log_input("LongTermMemory"), "LongTermMemory");
        assert_eq!(sanitize_log_input("Gedächtnis"), "Gedächtnis");
        assert_eq!(sanitize_log_input(""), "");
    }
}
