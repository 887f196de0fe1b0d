//! Text cleanup for served resources

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

/// Lines holding nothing but spaces or tabs, including their line break
static EMPTY_LINE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?mR)^[\t ]*$\r?\n").expect("empty line pattern is valid"));

/// Whether a single line, with or without its terminator, is blank
///
/// Agrees with [`strip_empty_lines`]: a line is blank exactly when stripping
/// would remove it.
pub fn is_empty_line(line: &str) -> bool {
    let terminated = if line.ends_with('\n') {
        Cow::Borrowed(line)
    } else {
        Cow::Owned(format!("{line}\n"))
    };
    EMPTY_LINE_PATTERN
        .find(&terminated)
        .is_some_and(|m| m.start() == 0 && m.end() == terminated.len())
}

/// Remove blank lines, e.g. the gaps compiled stylesheets tend to carry
pub fn strip_empty_lines(text: &str) -> String {
    EMPTY_LINE_PATTERN.replace_all(text, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_empty_line() {
        assert!(is_empty_line(""));
        assert!(is_empty_line(" \t "));
        assert!(!is_empty_line(" a "));
        assert!(is_empty_line(" \t\n"));
        assert!(!is_empty_line("a\n\n"));
    }

    #[test]
    fn test_is_empty_line_matches_stripping() {
        for line in ["", " ", "\t \r", " \r", "a", " a\r", "\r\r", " \n"] {
            let terminated = if line.ends_with('\n') {
                line.to_string()
            } else {
                format!("{line}\n")
            };
            assert_eq!(
                is_empty_line(line),
                strip_empty_lines(&terminated).is_empty(),
                "disagreement on {line:?}"
            );
        }
        assert!(is_empty_line(" \r"));
    }

    #[test]
    fn test_strip_empty_lines() {
        let css = ".a {\n  color: red; }\n\n  \t\n.b {\n  color: blue; }\n";
        assert_eq!(strip_empty_lines(css), ".a {\n  color: red; }\n.b {\n  color: blue; }\n");
    }

    #[test]
    fn test_strip_crlf_empty_lines() {
        assert_eq!(strip_empty_lines("a\r\n\r\nb\r\n"), "a\r\nb\r\n");
    }

    #[test]
    fn test_last_line_without_terminator_kept() {
        assert_eq!(strip_empty_lines("a\n  "), "a\n  ");
    }
}
