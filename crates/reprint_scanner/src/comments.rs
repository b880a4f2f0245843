//! Trivia queries: comment ranges and trivia skipping over raw text.
//!
//! These never consume anything; callers pass a position and get back
//! offsets. The scanner and the reprinter agree on what counts as trivia
//! because both go through the helpers in this module.

use crate::chars::*;
use crate::scanner::Scanner;
use reprint_ast::SyntaxKind;
use reprint_core::text::{TextPos, TextRange};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentKind {
    /// `// ...` up to (not including) the line terminator.
    SingleLine,
    /// `/* ... */`, possibly spanning lines.
    MultiLine,
}

/// A comment's position in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommentRange {
    pub pos: TextPos,
    pub end: TextPos,
    pub kind: CommentKind,
    /// A line break follows the comment before any other token.
    pub has_trailing_new_line: bool,
}

impl CommentRange {
    #[inline]
    pub fn range(&self) -> TextRange {
        TextRange::new(self.pos, self.end)
    }

    #[inline]
    pub fn len(&self) -> TextPos {
        self.end - self.pos
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pos == self.end
    }

    /// The comment text, delimiters included.
    pub fn text<'a>(&self, source: &'a str) -> Option<&'a str> {
        source.get(self.range().to_range())
    }
}

/// End of a `#!` line at the start of the file.
pub fn shebang_end(text: &str) -> Option<TextPos> {
    if text.starts_with("#!") {
        Some(line_end(text, 2) as TextPos)
    } else {
        None
    }
}

/// End of the block comment starting at `pos` (which holds `/*`). An
/// unterminated comment runs to the end of the text.
pub fn multi_line_comment_end(text: &str, pos: usize) -> usize {
    let body = pos + 2;
    match memchr::memmem::find(&text.as_bytes()[body..], b"*/") {
        Some(offset) => body + offset + 2,
        None => text.len(),
    }
}

/// Skip a merge conflict marker line starting at `pos`.
pub fn skip_conflict_marker(text: &str, pos: usize) -> usize {
    line_end(text, pos)
}

fn comment_at(text: &str, pos: usize) -> Option<CommentRange> {
    let bytes = text.as_bytes();
    if bytes.get(pos) != Some(&b'/') {
        return None;
    }
    let (kind, end) = match bytes.get(pos + 1) {
        Some(b'/') => (CommentKind::SingleLine, line_end(text, pos + 2)),
        Some(b'*') => (CommentKind::MultiLine, multi_line_comment_end(text, pos)),
        _ => return None,
    };
    Some(CommentRange {
        pos: pos as TextPos,
        end: end as TextPos,
        kind,
        has_trailing_new_line: false,
    })
}

/// First non-trivia position at or after `pos`. At offset 0 a shebang line
/// is trivia too.
pub fn skip_trivia(text: &str, pos: TextPos) -> TextPos {
    let mut pos = pos as usize;
    if pos == 0 {
        if let Some(end) = shebang_end(text) {
            pos = end as usize;
        }
    }
    while let Some(ch) = char_at(text, pos) {
        if is_white_space_like(ch) {
            pos += ch.len_utf8();
        } else if let Some(comment) = comment_at(text, pos) {
            pos = comment.end as usize;
        } else if is_conflict_marker_trivia(text, pos) {
            pos = skip_conflict_marker(text, pos);
        } else {
            break;
        }
    }
    pos as TextPos
}

fn comment_ranges(text: &str, pos: TextPos, trailing: bool) -> Vec<CommentRange> {
    let mut ranges: Vec<CommentRange> = Vec::new();
    let mut pos = pos as usize;
    if pos == 0 {
        if let Some(end) = shebang_end(text) {
            pos = end as usize;
        }
    }
    let mut after_comment = false;
    while let Some(ch) = char_at(text, pos) {
        if is_line_break(ch) {
            if after_comment {
                if let Some(last) = ranges.last_mut() {
                    last.has_trailing_new_line = true;
                }
                after_comment = false;
            }
            if trailing {
                break;
            }
            pos += line_break_len(text, pos);
        } else if is_white_space_single_line(ch) {
            pos += ch.len_utf8();
        } else if let Some(comment) = comment_at(text, pos) {
            pos = comment.end as usize;
            ranges.push(comment);
            after_comment = true;
        } else if !trailing && is_conflict_marker_trivia(text, pos) {
            pos = skip_conflict_marker(text, pos);
            after_comment = false;
        } else {
            break;
        }
    }
    ranges
}

/// Comments in the trivia run starting at `pos`, in source order. Scanning
/// stops at the first character that is not trivia.
pub fn leading_comment_ranges(text: &str, pos: TextPos) -> Vec<CommentRange> {
    comment_ranges(text, pos, false)
}

/// Comments after `pos` on the same line. Scanning stops at the first line
/// break or non-trivia character.
pub fn trailing_comment_ranges(text: &str, pos: TextPos) -> Vec<CommentRange> {
    comment_ranges(text, pos, true)
}

/// Whether a token of this kind can end an expression, in which case a
/// following `/` is division rather than the start of a regular expression.
fn can_end_expression(kind: SyntaxKind) -> bool {
    match kind {
        SyntaxKind::Identifier
        | SyntaxKind::PrivateIdentifier
        | SyntaxKind::NumericLiteral
        | SyntaxKind::BigIntLiteral
        | SyntaxKind::StringLiteral
        | SyntaxKind::RegularExpressionLiteral
        | SyntaxKind::NoSubstitutionTemplateLiteral
        | SyntaxKind::TemplateTail
        | SyntaxKind::CloseParenToken
        | SyntaxKind::CloseBracketToken
        | SyntaxKind::CloseBraceToken
        | SyntaxKind::PlusPlusToken
        | SyntaxKind::MinusMinusToken
        | SyntaxKind::ThisKeyword
        | SyntaxKind::SuperKeyword
        | SyntaxKind::NullKeyword
        | SyntaxKind::TrueKeyword
        | SyntaxKind::FalseKeyword => true,
        _ => kind.is_keyword() && !kind.is_reserved_word(),
    }
}

/// Every comment in `text`, in source order, found by scanning the whole
/// file. Comment-like text inside string, template and regular expression
/// literals is not reported.
pub fn collect_comment_ranges(text: &str) -> Vec<CommentRange> {
    let mut scanner = Scanner::new(text);
    let mut comments = Vec::new();
    let mut brace_depth = 0usize;
    let mut template_depths: Vec<usize> = Vec::new();
    let mut previous = SyntaxKind::Unknown;

    loop {
        let mut token = scanner.scan();
        match token {
            SyntaxKind::SlashToken | SyntaxKind::SlashEqualsToken if !can_end_expression(previous) => {
                token = scanner.rescan_slash_token();
            }
            SyntaxKind::OpenBraceToken => brace_depth += 1,
            SyntaxKind::TemplateHead => template_depths.push(brace_depth),
            SyntaxKind::CloseBraceToken => {
                if template_depths.last() == Some(&brace_depth) {
                    token = scanner.rescan_template_token();
                    if token == SyntaxKind::TemplateTail {
                        template_depths.pop();
                    }
                } else {
                    brace_depth = brace_depth.saturating_sub(1);
                }
            }
            _ => {}
        }

        comments.extend(leading_comment_ranges(text, scanner.full_start()));
        if token == SyntaxKind::EndOfFileToken {
            break;
        }
        previous = token;
    }
    comments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_trivia() {
        let text = "  /* a */ // b\n\tx";
        assert_eq!(skip_trivia(text, 0), 16);
        assert_eq!(skip_trivia(text, 16), 16);
        assert_eq!(skip_trivia("#!/bin/node\nx", 0), 12);
        assert_eq!(skip_trivia("\u{FEFF}x", 0), 3);
    }

    #[test]
    fn test_leading_comment_ranges() {
        let text = "x /*a*/ // b\n  /*c*/y";
        let ranges = leading_comment_ranges(text, 1);
        assert_eq!(ranges.len(), 3);
        assert_eq!(ranges[0].range(), TextRange::new(2, 7));
        assert_eq!(ranges[0].kind, CommentKind::MultiLine);
        assert!(!ranges[0].has_trailing_new_line);
        assert_eq!(ranges[1].text(text), Some("// b"));
        assert!(ranges[1].has_trailing_new_line);
        assert_eq!(ranges[2].text(text), Some("/*c*/"));
    }

    #[test]
    fn test_trailing_comment_ranges_stop_at_line_break() {
        let text = "x; // one\n// two\ny";
        let ranges = trailing_comment_ranges(text, 2);
        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges[0].text(text), Some("// one"));
        assert!(ranges[0].has_trailing_new_line);
    }

    #[test]
    fn test_unterminated_block_comment_runs_to_end() {
        let text = "a /* never closed";
        let ranges = leading_comment_ranges(text, 1);
        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges[0].end as usize, text.len());
    }

    #[test]
    fn test_collect_comment_ranges_ignores_literals() {
        let text = "let s = \"/* no */\"; // yes\nlet t = `${a /* in */}// no`; /* end */";
        let comments: Vec<&str> = collect_comment_ranges(text)
            .iter()
            .filter_map(|c| c.text(text))
            .collect();
        assert_eq!(comments, vec!["// yes", "/* in */", "/* end */"]);
    }

    #[test]
    fn test_collect_comment_ranges_regex() {
        let text = "x = /\\/\\//g; // after\ny = a / b / c; /* div */";
        let comments: Vec<&str> = collect_comment_ranges(text)
            .iter()
            .filter_map(|c| c.text(text))
            .collect();
        assert_eq!(comments, vec!["// after", "/* div */"]);
    }
}
