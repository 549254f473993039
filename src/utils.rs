use chrono::Local;

use crate::level::Severity;

/// Width of a rendered timestamp, `YYYY-MM-DD HH:MM:SS`.
pub const TIMESTAMP_LEN: usize = 19;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const RESET: &str = "\x1B[0m";

/// Current local wall-clock time at second resolution.
pub fn timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Assembles one complete line: `<color>[LEVEL]<reset>(<timestamp>) -- <message>`.
///
/// The message is copied verbatim. No newline is appended.
pub fn format_line(severity: Severity, colored: bool, timestamp: &str, message: &str) -> Vec<u8> {
    let tag = if colored {
        format!("\x1B[{}m{}{RESET}", severity.color().to_fg_str(), severity.tag())
    } else {
        severity.tag().to_string()
    };
    format!("{tag}({timestamp}) -- {message}").into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn test_timestamp_shape() {
        let stamp = timestamp();
        assert_eq!(stamp.len(), TIMESTAMP_LEN);
        let re = Regex::new(r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}$").unwrap();
        assert!(re.is_match(&stamp), "unexpected timestamp {stamp:?}");
    }

    #[test]
    fn test_plain_line() {
        let line = format_line(Severity::Info, false, "2024-01-02 03:04:05", "hello\n");
        assert_eq!(line, b"[INFO](2024-01-02 03:04:05) -- hello\n");
    }

    #[test]
    fn test_colored_line() {
        let line = format_line(Severity::Fatal, true, "2024-01-02 03:04:05", "boom");
        assert_eq!(
            String::from_utf8(line).unwrap(),
            "\x1B[31m[FATAL]\x1B[0m(2024-01-02 03:04:05) -- boom"
        );
        let line = format_line(Severity::Debug, true, "2024-01-02 03:04:05", "");
        assert_eq!(
            String::from_utf8(line).unwrap(),
            "\x1B[94m[DEBUG]\x1B[0m(2024-01-02 03:04:05) -- "
        );
    }

    #[test]
    fn test_message_is_not_a_template() {
        let line = format_line(Severity::Warn, false, "2024-01-02 03:04:05", "100% {} %s");
        assert!(line.ends_with(b" -- 100% {} %s"));
    }
}
