//! Terminal input and output sanitization
//!
//! Operand lines typed at the prompt go through [`strip_control_chars`] before
//! they are parsed or recorded. History lines read back from disk may have
//! been edited by hand, so the `history` command passes them through
//! [`strip_ansi_codes`] before printing.

/// Removes ASCII control characters except tab, newline and carriage return
///
/// # Examples
///
/// ```
/// use badcalc::utils::strip_control_chars;
///
/// assert_eq!(strip_control_chars("4\x002\x07"), "42");
/// assert_eq!(strip_control_chars("1\t2"), "1\t2");
/// ```
pub fn strip_control_chars(text: &str) -> String {
    text.chars().filter(|&ch| !is_stripped_control(ch)).collect()
}

fn is_stripped_control(ch: char) -> bool {
    ch.is_ascii_control() && ch != '\t' && ch != '\n' && ch != '\r'
}

/// Strips ANSI escape codes from a string
///
/// Removes ANSI CSI (Control Sequence Introducer) escape codes that could
/// affect terminal display, along with the same control characters as
/// [`strip_control_chars`].
///
/// # Examples
///
/// ```
/// use badcalc::utils::strip_ansi_codes;
///
/// let text = "\x1b[31m5|3|+|8.0\x1b[0m";
/// assert_eq!(strip_ansi_codes(text), "5|3|+|8.0");
/// ```
pub fn strip_ansi_codes(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        // CSI sequence: ESC [ ... (letter)
        if ch == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            for next_ch in chars.by_ref() {
                if next_ch.is_ascii_alphabetic() {
                    break;
                }
            }
            continue;
        }

        if is_stripped_control(ch) {
            continue;
        }

        result.push(ch);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_control_chars_keeps_plain_text() {
        assert_eq!(strip_control_chars("3,5"), "3,5");
        assert_eq!(strip_control_chars(""), "");
    }

    #[test]
    fn test_strip_control_chars_removes_nul_and_bell() {
        assert_eq!(strip_control_chars("\x005\x07"), "5");
        assert_eq!(strip_control_chars("1\x7f2"), "12");
    }

    #[test]
    fn test_strip_control_chars_preserves_whitespace_controls() {
        assert_eq!(strip_control_chars("1\t2\r\n"), "1\t2\r\n");
    }

    #[test]
    fn test_strip_control_chars_leaves_escape_payload() {
        // Only the ESC byte is removed; the rest is ordinary text
        assert_eq!(strip_control_chars("\x1b[31m5"), "[31m5");
    }

    #[test]
    fn test_strip_control_chars_unicode() {
        assert_eq!(strip_control_chars("π\x08"), "π");
    }

    #[test]
    fn test_strip_ansi_codes_color() {
        let text = "\x1b[31mRed text\x1b[0m normal";
        assert_eq!(strip_ansi_codes(text), "Red text normal");
    }

    #[test]
    fn test_strip_ansi_codes_cursor_movement() {
        let text = "\x1b[2J\x1b[H Cleared screen";
        assert_eq!(strip_ansi_codes(text), " Cleared screen");
    }

    #[test]
    fn test_strip_ansi_codes_bell() {
        assert_eq!(strip_ansi_codes("Alert! \x07"), "Alert! ");
    }

    #[test]
    fn test_strip_ansi_codes_preserves_newlines() {
        let text = "Line 1\nLine 2\rLine 3\tTabbed";
        assert_eq!(strip_ansi_codes(text), "Line 1\nLine 2\rLine 3\tTabbed");
    }
}
