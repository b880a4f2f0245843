//! Character classification shared by the scanner and trivia queries.

/// Length of a `<<<<<<<`, `=======`, `|||||||` or `>>>>>>>` marker.
pub const MERGE_CONFLICT_MARKER_LENGTH: usize = 7;

/// Check if a character is a line terminator.
#[inline]
pub fn is_line_break(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Check if a character is whitespace that does not end a line.
/// The byte-order mark counts as whitespace.
#[inline]
pub fn is_white_space_single_line(ch: char) -> bool {
    matches!(
        ch,
        ' ' | '\t'
            | '\u{000B}' // vertical tab
            | '\u{000C}' // form feed
            | '\u{00A0}' // no-break space
            | '\u{0085}' // next line
            | '\u{1680}' // ogham space mark
            | '\u{2000}'..='\u{200B}'
            | '\u{202F}' // narrow no-break space
            | '\u{205F}' // medium mathematical space
            | '\u{3000}' // ideographic space
            | '\u{FEFF}'
    )
}

#[inline]
pub fn is_white_space_like(ch: char) -> bool {
    is_white_space_single_line(ch) || is_line_break(ch)
}

#[inline]
pub fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

#[inline]
pub fn is_octal_digit(ch: char) -> bool {
    matches!(ch, '0'..='7')
}

#[inline]
pub fn is_binary_digit(ch: char) -> bool {
    matches!(ch, '0' | '1')
}

#[inline]
pub fn is_hex_digit(ch: char) -> bool {
    ch.is_ascii_hexdigit()
}

/// Check if a character can start an identifier.
#[inline]
pub fn is_identifier_start(ch: char) -> bool {
    ch == '_'
        || ch == '$'
        || ch.is_ascii_alphabetic()
        || (!ch.is_ascii() && unicode_xid::UnicodeXID::is_xid_start(ch))
}

/// Check if a character can continue an identifier.
#[inline]
pub fn is_identifier_part(ch: char) -> bool {
    ch == '_'
        || ch == '$'
        || ch.is_ascii_alphanumeric()
        || ch == '\u{200C}'
        || ch == '\u{200D}'
        || (!ch.is_ascii() && unicode_xid::UnicodeXID::is_xid_continue(ch))
}

/// The character starting at byte offset `pos`, if any.
#[inline]
pub fn char_at(text: &str, pos: usize) -> Option<char> {
    text.get(pos..).and_then(|rest| rest.chars().next())
}

/// Whether a merge conflict marker starts at `pos`. Markers must begin a
/// line and repeat the same character seven times.
pub fn is_conflict_marker_trivia(text: &str, pos: usize) -> bool {
    let bytes = text.as_bytes();
    if pos > 0 && !matches!(bytes[pos - 1], b'\n' | b'\r') {
        return false;
    }
    if pos + MERGE_CONFLICT_MARKER_LENGTH > bytes.len() {
        return false;
    }
    let ch = bytes[pos];
    if !matches!(ch, b'<' | b'=' | b'>' | b'|') {
        return false;
    }
    if !bytes[pos..pos + MERGE_CONFLICT_MARKER_LENGTH].iter().all(|&b| b == ch) {
        return false;
    }
    ch == b'=' || bytes.get(pos + MERGE_CONFLICT_MARKER_LENGTH) == Some(&b' ')
}

/// End of the line starting at or after `pos`: the offset of the next line
/// terminator, or the end of text.
pub fn line_end(text: &str, pos: usize) -> usize {
    let bytes = text.as_bytes();
    let mut from = pos;
    while let Some(offset) = memchr::memchr3(b'\n', b'\r', 0xE2, &bytes[from..]) {
        let at = from + offset;
        if bytes[at] != 0xE2 {
            return at;
        }
        // U+2028 and U+2029 encode as E2 80 A8 / E2 80 A9.
        if bytes.get(at + 1) == Some(&0x80) && matches!(bytes.get(at + 2), Some(&0xA8) | Some(&0xA9)) {
            return at;
        }
        from = at + 1;
    }
    bytes.len()
}

/// Length in bytes of the line break starting at `pos` (`\r\n` counts as one).
pub fn line_break_len(text: &str, pos: usize) -> usize {
    match char_at(text, pos) {
        Some('\r') if text.as_bytes().get(pos + 1) == Some(&b'\n') => 2,
        Some(ch) if is_line_break(ch) => ch.len_utf8(),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_classes() {
        assert!(is_white_space_single_line('\u{FEFF}'));
        assert!(is_white_space_single_line('\t'));
        assert!(!is_white_space_single_line('\n'));
        assert!(is_line_break('\u{2028}'));
        assert!(is_white_space_like('\r'));
    }

    #[test]
    fn test_identifier_classes() {
        assert!(is_identifier_start('$'));
        assert!(is_identifier_start('é'));
        assert!(!is_identifier_start('1'));
        assert!(is_identifier_part('1'));
        assert!(!is_identifier_part('-'));
    }

    #[test]
    fn test_line_end() {
        assert_eq!(line_end("abc\ndef", 0), 3);
        assert_eq!(line_end("abc", 1), 3);
        assert_eq!(line_end("a\u{2028}b", 0), 1);
        // An unrelated E2 lead byte is not a line break.
        assert_eq!(line_end("a\u{2022}b\n", 0), 5);
        assert_eq!(line_break_len("\r\nx", 0), 2);
        assert_eq!(line_break_len("x", 0), 0);
    }

    #[test]
    fn test_conflict_markers() {
        assert!(is_conflict_marker_trivia("<<<<<<< HEAD\n", 0));
        assert!(is_conflict_marker_trivia("x\n=======\n", 2));
        assert!(!is_conflict_marker_trivia("a <<<<<<< b", 2));
        assert!(!is_conflict_marker_trivia("<<<<<<<", 0));
    }
}
