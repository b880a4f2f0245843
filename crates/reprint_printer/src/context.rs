//! Emission context: the output buffer and the one cursor that walks the
//! source buffer.
//!
//! Every byte of output is a copy of the source between the cursor and some
//! later position, so the cursor only ever moves forward. Trivia is claimed
//! by whichever routine first asks for a position past it; once claimed it
//! is behind the cursor and cannot be emitted again.

use crate::{ReprintError, Result, SpanMismatch};
use reprint_ast::NodeData;
use reprint_core::text::{TextPos, TextRange};
use reprint_scanner::{CommentRange, SourceText};
use tracing::debug;

/// How an emitted comment was claimed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentAttachment {
    /// Trivia before the next token.
    Leading,
    /// Same-line comment after a statement or a block close.
    SameLineTrailing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmittedComment {
    pub range: CommentRange,
    pub attachment: CommentAttachment,
}

/// Record of one reprint: every comment in emission order and the cursor
/// at each dispatch entry and exit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmissionTrace {
    pub comments: Vec<EmittedComment>,
    pub cursor_marks: Vec<TextPos>,
}

impl EmissionTrace {
    pub fn comment_ranges(&self) -> impl Iterator<Item = CommentRange> + '_ {
        self.comments.iter().map(|comment| comment.range)
    }

    pub fn count(&self, attachment: CommentAttachment) -> usize {
        self.comments.iter().filter(|comment| comment.attachment == attachment).count()
    }

    /// Whether the recorded cursor never moved backward.
    pub fn is_monotonic(&self) -> bool {
        self.cursor_marks.windows(2).all(|pair| pair[0] <= pair[1])
    }
}

pub struct EmitContext<'s> {
    source: SourceText<'s>,
    cursor: TextPos,
    /// End of the last token or leaf written. Trailing comment claims move
    /// the cursor but not this.
    last_token_end: TextPos,
    out: String,
    trace: Option<EmissionTrace>,
}

impl<'s> EmitContext<'s> {
    pub fn new(source: SourceText<'s>) -> Self {
        Self {
            source,
            cursor: 0,
            last_token_end: 0,
            out: String::with_capacity(source.text().len()),
            trace: None,
        }
    }

    pub fn with_trace(mut self) -> Self {
        self.trace = Some(EmissionTrace::default());
        self
    }

    #[inline]
    pub fn source(&self) -> SourceText<'s> {
        self.source
    }

    #[inline]
    pub fn cursor(&self) -> TextPos {
        self.cursor
    }

    #[inline]
    pub fn last_token_end(&self) -> TextPos {
        self.last_token_end
    }

    pub fn output(&self) -> &str {
        &self.out
    }

    pub fn finish(self) -> (String, Option<EmissionTrace>) {
        (self.out, self.trace)
    }

    fn span_error(&self, expected: TextPos, detail: SpanMismatch) -> ReprintError {
        ReprintError::InconsistentSpan {
            expected,
            cursor: self.cursor,
            detail,
        }
    }

    pub fn mark_cursor(&mut self) {
        if let Some(trace) = self.trace.as_mut() {
            trace.cursor_marks.push(self.cursor);
        }
    }

    /// Copy the source from the cursor up to `end` and move the cursor there.
    fn push_source(&mut self, end: TextPos) -> Result<()> {
        if end < self.cursor {
            return Err(self.span_error(end, SpanMismatch::StartBehindCursor));
        }
        let text = self
            .source
            .slice(TextRange::new(self.cursor, end))
            .ok_or_else(|| self.span_error(end, SpanMismatch::NotCharBoundary))?;
        self.out.push_str(text);
        self.cursor = end;
        self.last_token_end = end;
        Ok(())
    }

    /// Emit the trivia between the cursor and `target` verbatim. The gap
    /// must be whitespace and whole comments only.
    pub fn emit_trivia_to(&mut self, target: TextPos, attachment: CommentAttachment) -> Result<()> {
        if target < self.cursor {
            return Err(self.span_error(target, SpanMismatch::StartBehindCursor));
        }
        if target == self.cursor {
            return Ok(());
        }
        if self.source.skip_trivia(self.cursor) < target {
            return Err(self.span_error(target, SpanMismatch::NonTriviaGap));
        }
        let gap = self
            .source
            .slice(TextRange::new(self.cursor, target))
            .ok_or_else(|| self.span_error(target, SpanMismatch::NotCharBoundary))?;
        for comment in self.source.leading_comment_ranges(self.cursor) {
            if comment.pos >= target {
                break;
            }
            if comment.end > target {
                return Err(self.span_error(target, SpanMismatch::NonTriviaGap));
            }
            if let Some(trace) = self.trace.as_mut() {
                trace.comments.push(EmittedComment { range: comment, attachment });
            }
        }
        self.out.push_str(gap);
        self.cursor = target;
        Ok(())
    }

    /// Write a token the grammar requires here. It must be the next
    /// non-trivia text in the buffer.
    pub fn write_token(&mut self, token: &'static str) -> Result<()> {
        let at = self.source.skip_trivia(self.cursor);
        if !self.source.starts_with_at(at, token) {
            return Err(self.span_error(at, SpanMismatch::TokenNotFound(token)));
        }
        self.emit_trivia_to(at, CommentAttachment::Leading)?;
        self.push_source(at + token.len() as TextPos)
    }

    /// Copy a leaf (identifier, literal, variable token) from its span.
    pub fn emit_leaf(&mut self, data: &NodeData) -> Result<()> {
        self.emit_trivia_to(data.start, CommentAttachment::Leading)?;
        self.push_source(data.range.end)
    }

    /// Peek past trivia for `token` without consuming anything. A match
    /// that would end after `limit` does not count.
    pub fn sniff(&self, token: &str, limit: TextPos) -> Option<TextPos> {
        let at = self.source.skip_trivia(self.cursor);
        let end = at.checked_add(token.len() as TextPos)?;
        (end <= limit && self.source.starts_with_at(at, token)).then_some(at)
    }

    /// Write `token` if [`sniff`](Self::sniff) finds it. Absence is not an error.
    pub fn write_optional(&mut self, token: &'static str, limit: TextPos) -> Result<bool> {
        let Some(at) = self.sniff(token, limit) else {
            return Ok(false);
        };
        debug!(token, at, "optional token present");
        self.emit_trivia_to(at, CommentAttachment::Leading)?;
        self.push_source(at + token.len() as TextPos)?;
        Ok(true)
    }

    /// Claim the comments on the rest of the current line.
    pub fn claim_trailing_comments(&mut self) -> Result<()> {
        if let Some(last) = self.source.trailing_comment_ranges(self.cursor).last() {
            self.emit_trivia_to(last.end, CommentAttachment::SameLineTrailing)?;
        }
        Ok(())
    }

    /// A `#!` first line is copied as is.
    pub fn emit_shebang(&mut self) -> Result<()> {
        match self.source.shebang_end() {
            Some(end) if self.cursor == 0 => self.push_source(end),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reprint_ast::SyntaxKind;

    fn context(text: &str) -> EmitContext<'_> {
        EmitContext::new(SourceText::new(text)).with_trace()
    }

    #[test]
    fn test_write_token_carries_leading_trivia() {
        let mut ctx = context("  /*a*/ ( x");
        ctx.write_token("(").unwrap();
        assert_eq!(ctx.output(), "  /*a*/ (");
        assert_eq!(ctx.cursor(), 9);
        assert_eq!(ctx.last_token_end(), 9);
        let (_, trace) = ctx.finish();
        let trace = trace.unwrap();
        assert_eq!(trace.comments.len(), 1);
        assert_eq!(trace.comments[0].range.range(), TextRange::new(2, 7));
        assert_eq!(trace.comments[0].attachment, CommentAttachment::Leading);
    }

    #[test]
    fn test_write_token_rejects_other_text() {
        let mut ctx = context("x )");
        let err = ctx.write_token("(").unwrap_err();
        assert_eq!(
            err,
            ReprintError::InconsistentSpan {
                expected: 0,
                cursor: 0,
                detail: SpanMismatch::TokenNotFound("("),
            }
        );
        assert_eq!(ctx.output(), "");
    }

    #[test]
    fn test_sniff_respects_limit() {
        let mut ctx = context("x  ;");
        ctx.emit_leaf(&NodeData::new(SyntaxKind::Identifier, 0, 0, 1)).unwrap();
        assert_eq!(ctx.sniff(";", 4), Some(3));
        assert_eq!(ctx.sniff(";", 3), None);
        assert_eq!(ctx.sniff(",", 4), None);
        // Peeking consumes nothing.
        assert_eq!(ctx.cursor(), 1);
    }

    #[test]
    fn test_write_optional() {
        let mut ctx = context("a /*c*/ ; b");
        ctx.emit_leaf(&NodeData::new(SyntaxKind::Identifier, 0, 0, 1)).unwrap();
        assert!(!ctx.write_optional(",", 9).unwrap());
        assert!(ctx.write_optional(";", 9).unwrap());
        assert_eq!(ctx.output(), "a /*c*/ ;");
        assert!(!ctx.write_optional(";", 11).unwrap());
    }

    #[test]
    fn test_emit_trivia_to_rejects_tokens_in_gap() {
        let mut ctx = context("a b");
        let err = ctx.emit_trivia_to(2, CommentAttachment::Leading).unwrap_err();
        assert!(matches!(
            err,
            ReprintError::InconsistentSpan { detail: SpanMismatch::NonTriviaGap, .. }
        ));
    }

    #[test]
    fn test_emit_trivia_to_rejects_split_comment() {
        let mut ctx = context("/* long */x");
        let err = ctx.emit_trivia_to(4, CommentAttachment::Leading).unwrap_err();
        assert!(matches!(
            err,
            ReprintError::InconsistentSpan { detail: SpanMismatch::NonTriviaGap, .. }
        ));
    }

    #[test]
    fn test_cursor_never_moves_back() {
        let mut ctx = context("abc def");
        ctx.emit_leaf(&NodeData::new(SyntaxKind::Identifier, 0, 4, 7)).unwrap_err();
        ctx.emit_leaf(&NodeData::new(SyntaxKind::Identifier, 0, 0, 3)).unwrap();
        let err = ctx.emit_leaf(&NodeData::new(SyntaxKind::Identifier, 0, 1, 3)).unwrap_err();
        assert!(matches!(
            err,
            ReprintError::InconsistentSpan { detail: SpanMismatch::StartBehindCursor, .. }
        ));
        assert_eq!(ctx.output(), "abc");
    }

    #[test]
    fn test_claim_trailing_comments_stops_at_line_end() {
        let mut ctx = context("x; // one\n// two\n");
        ctx.write_token("x").unwrap();
        ctx.write_token(";").unwrap();
        ctx.claim_trailing_comments().unwrap();
        assert_eq!(ctx.output(), "x; // one");
        let (_, trace) = ctx.finish();
        let trace = trace.unwrap();
        assert_eq!(trace.count(CommentAttachment::SameLineTrailing), 1);
        assert_eq!(trace.count(CommentAttachment::Leading), 0);
    }

    #[test]
    fn test_shebang_and_marks() {
        let mut ctx = context("#!/usr/bin/env node\nx");
        ctx.mark_cursor();
        ctx.emit_shebang().unwrap();
        ctx.mark_cursor();
        ctx.write_token("x").unwrap();
        ctx.mark_cursor();
        let (text, trace) = ctx.finish();
        assert_eq!(text, "#!/usr/bin/env node\nx");
        let trace = trace.unwrap();
        assert_eq!(trace.cursor_marks, vec![0, 19, 21]);
        assert!(trace.is_monotonic());
    }
}
