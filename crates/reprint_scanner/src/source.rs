//! The immutable source buffer a tree was parsed from.

use crate::comments::{self, CommentRange};
use reprint_core::text::{TextPos, TextRange};

/// Read-only view of a file's text plus the position queries the
/// reprinter relies on. Cheap to copy; it only borrows the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceText<'a> {
    text: &'a str,
}

impl<'a> SourceText<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }

    #[inline]
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Length in bytes.
    #[inline]
    pub fn len(&self) -> TextPos {
        self.text.len() as TextPos
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The text in `range`, or `None` if the range is out of bounds or does
    /// not fall on character boundaries.
    #[inline]
    pub fn slice(&self, range: TextRange) -> Option<&'a str> {
        self.text.get(range.to_range())
    }

    /// The text from `pos` to the end.
    #[inline]
    pub fn rest(&self, pos: TextPos) -> Option<&'a str> {
        self.text.get(pos as usize..)
    }

    /// Whether `needle` occurs exactly at `pos`.
    pub fn starts_with_at(&self, pos: TextPos, needle: &str) -> bool {
        self.rest(pos).is_some_and(|rest| rest.starts_with(needle))
    }

    pub fn leading_comment_ranges(&self, pos: TextPos) -> Vec<CommentRange> {
        comments::leading_comment_ranges(self.text, pos)
    }

    pub fn trailing_comment_ranges(&self, pos: TextPos) -> Vec<CommentRange> {
        comments::trailing_comment_ranges(self.text, pos)
    }

    /// First non-trivia position at or after `pos`.
    pub fn skip_trivia(&self, pos: TextPos) -> TextPos {
        comments::skip_trivia(self.text, pos)
    }

    pub fn shebang_end(&self) -> Option<TextPos> {
        comments::shebang_end(self.text)
    }
}

impl<'a> From<&'a str> for SourceText<'a> {
    fn from(text: &'a str) -> Self {
        Self::new(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_and_prefix() {
        let source = SourceText::new("let é = 1;");
        assert_eq!(source.len(), 11);
        assert_eq!(source.slice(TextRange::new(0, 3)), Some("let"));
        // Splits the two-byte `é`.
        assert_eq!(source.slice(TextRange::new(4, 5)), None);
        assert_eq!(source.slice(TextRange::new(4, 40)), None);
        assert!(source.starts_with_at(7, "= 1"));
        assert!(!source.starts_with_at(7, "=1"));
        assert!(!source.starts_with_at(99, ""));
    }

    #[test]
    fn test_shebang() {
        assert_eq!(SourceText::new("#!/usr/bin/env node\r\nx").shebang_end(), Some(19));
        assert_eq!(SourceText::new("x").shebang_end(), None);
    }
}
