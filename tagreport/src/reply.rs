//! Maps a response body onto the two 16-character display lines.

use heapless::String;

/// Character cells per display line.
pub const LCD_COLS: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyLines {
    pub line1: String<LCD_COLS>,
    pub line2: Option<String<LCD_COLS>>,
}

/// Splits a reply body on the first `|` into two display lines, else a
/// single line. The body is trimmed, each line truncated to 16 characters
/// and never wrapped. The `|` convention is a display contract only; no
/// further structure is assumed.
pub fn split_reply(body: &str) -> ReplyLines {
    let body = body.trim();
    match body.split_once('|') {
        Some((first, second)) => ReplyLines {
            line1: truncate_line(first),
            line2: Some(truncate_line(second)),
        },
        None => ReplyLines { line1: truncate_line(body), line2: None },
    }
}

/// Truncates to what fits in one line, on a character boundary.
pub fn truncate_line(s: &str) -> String<LCD_COLS> {
    let mut out: String<LCD_COLS> = String::new();
    for c in s.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_pipe() {
        let lines = split_reply("Present|John Doe");
        assert_eq!(lines.line1.as_str(), "Present");
        assert_eq!(lines.line2.as_deref(), Some("John Doe"));
    }

    #[test]
    fn long_single_line_is_truncated_to_sixteen() {
        let lines = split_reply("Attendance recorded successfully");
        assert_eq!(lines.line1.as_str(), "Attendance recor");
        assert_eq!(lines.line1.len(), 16);
        assert!(lines.line2.is_none());
    }

    #[test]
    fn both_halves_are_truncated() {
        let lines = split_reply("A very long first field|and a longer second one");
        assert_eq!(lines.line1.as_str(), "A very long firs");
        assert_eq!(lines.line2.as_deref(), Some("and a longer sec"));
    }

    #[test]
    fn only_first_pipe_splits() {
        let lines = split_reply("a|b|c");
        assert_eq!(lines.line1.as_str(), "a");
        assert_eq!(lines.line2.as_deref(), Some("b|c"));
    }

    #[test]
    fn body_whitespace_is_trimmed() {
        let lines = split_reply("\r\nPresent\n");
        assert_eq!(lines.line1.as_str(), "Present");
        assert!(lines.line2.is_none());
    }

    #[test]
    fn empty_body_renders_empty_line() {
        let lines = split_reply("");
        assert_eq!(lines.line1.as_str(), "");
        assert!(lines.line2.is_none());
    }
}
