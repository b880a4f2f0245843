//! reprint_printer: Lossless reprinting of a syntax tree against its source.
//!
//! The printer walks the tree depth-first with a single cursor into the
//! source buffer. Fixed tokens are located in the buffer, leaves are copied
//! from their spans, and every byte in between (whitespace, comments, a
//! shebang or byte-order mark) is claimed by whichever routine reaches it
//! first. The result is the original text, byte for byte.

mod context;
mod expressions;
mod statements;
mod types;

pub use context::{CommentAttachment, EmissionTrace, EmitContext, EmittedComment};

use reprint_ast::{HasNodeData, NodeArray, NodeData, SourceFile, SyntaxKind};
use reprint_core::text::TextPos;
use reprint_scanner::SourceText;
use std::fmt;
use tracing::{debug, info_span};

pub type Result<T> = std::result::Result<T, ReprintError>;

/// Why a reprint stopped. Output produced before the error is discarded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReprintError {
    /// A statement or expression the printer has no rule for, such as a
    /// placeholder left by error recovery.
    #[error("cannot print node of kind {kind:?} at {pos}")]
    UnknownNodeKind { kind: SyntaxKind, pos: TextPos },
    #[error("cannot print type node of kind {kind:?} at {pos}")]
    UnknownTypeNodeKind { kind: SyntaxKind, pos: TextPos },
    /// The tree's spans do not describe the source buffer.
    #[error("tree does not match source at {expected} (cursor at {cursor}): {detail}")]
    InconsistentSpan {
        expected: TextPos,
        cursor: TextPos,
        detail: SpanMismatch,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanMismatch {
    StartBehindCursor,
    TokenNotFound(&'static str),
    NonTriviaGap,
    EndNotReached,
    LengthMismatch,
    NotCharBoundary,
}

impl fmt::Display for SpanMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpanMismatch::StartBehindCursor => f.write_str("node starts before text already printed"),
            SpanMismatch::TokenNotFound(token) => write!(f, "expected `{}`", token),
            SpanMismatch::NonTriviaGap => f.write_str("gap before node contains more than trivia"),
            SpanMismatch::EndNotReached => f.write_str("node end differs from its last token"),
            SpanMismatch::LengthMismatch => f.write_str("source file span differs from buffer length"),
            SpanMismatch::NotCharBoundary => f.write_str("span is not on a character boundary"),
        }
    }
}

/// Who owns a comment that sits after a statement on the same line.
///
/// Both policies produce the same text; they differ only in how the
/// comment is attributed in the [`EmissionTrace`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrailingCommentPolicy {
    /// The statement (or block) just closed claims it.
    #[default]
    SameLineTrailing,
    /// It is left for the next token as leading trivia.
    LeadingOnly,
}

/// Printer options.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrinterOptions {
    pub trailing_comments: TrailingCommentPolicy,
    /// Record claimed comments and cursor positions.
    pub record_trace: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reprint {
    pub text: String,
    /// Empty unless `record_trace` was set.
    pub trace: EmissionTrace,
}

/// A single-use printer bound to one source buffer.
pub struct Printer<'s> {
    ctx: EmitContext<'s>,
    options: PrinterOptions,
}

impl<'s> Printer<'s> {
    pub fn new(source: SourceText<'s>) -> Self {
        Self::with_options(source, PrinterOptions::default())
    }

    pub fn with_options(source: SourceText<'s>, options: PrinterOptions) -> Self {
        let ctx = EmitContext::new(source);
        let ctx = if options.record_trace { ctx.with_trace() } else { ctx };
        Self { ctx, options }
    }

    /// Reprint `file`, which must have been parsed from this printer's
    /// source buffer.
    pub fn print_source_file(mut self, file: &SourceFile<'_>) -> Result<Reprint> {
        let _span = info_span!("reprint", file = %file.file_name).entered();
        let len = self.ctx.source().len();
        if file.end() != len {
            return Err(ReprintError::InconsistentSpan {
                expected: len,
                cursor: file.end(),
                detail: SpanMismatch::LengthMismatch,
            });
        }

        self.ctx.mark_cursor();
        self.ctx.emit_shebang()?;
        for statement in &file.statements {
            self.print_statement(statement)?;
        }
        // Whatever follows the last statement: comments, blank lines.
        self.ctx.emit_trivia_to(len, CommentAttachment::Leading)?;
        self.ctx.mark_cursor();

        let (text, trace) = self.ctx.finish();
        debug!(bytes = text.len(), "reprint complete");
        Ok(Reprint {
            text,
            trace: trace.unwrap_or_default(),
        })
    }

    // ========================================================================
    // Shared helpers
    // ========================================================================

    /// A node is finished when its last token ends where the node does.
    fn check_end(&self, data: &NodeData) -> Result<()> {
        let printed = self.ctx.last_token_end();
        if printed == data.range.end {
            Ok(())
        } else {
            Err(ReprintError::InconsistentSpan {
                expected: data.range.end,
                cursor: printed,
                detail: SpanMismatch::EndNotReached,
            })
        }
    }

    fn claim_trailing_comments(&mut self) -> Result<()> {
        match self.options.trailing_comments {
            TrailingCommentPolicy::SameLineTrailing => self.ctx.claim_trailing_comments(),
            TrailingCommentPolicy::LeadingOnly => Ok(()),
        }
    }

    /// Comma-separated list; the separator follows every element but the
    /// last, and the last too when the source had a trailing comma.
    fn print_list<T>(
        &mut self,
        list: &NodeArray<'_, T>,
        mut print_element: impl FnMut(&mut Self, &T) -> Result<()>,
    ) -> Result<()> {
        let count = list.len();
        for (index, element) in list.iter().enumerate() {
            print_element(self, element)?;
            if index + 1 < count || list.has_trailing_comma {
                self.ctx.write_token(",")?;
            }
        }
        Ok(())
    }

    fn print_optional_semicolon(&mut self, data: &NodeData) -> Result<()> {
        self.ctx.write_optional(";", data.range.end).map(drop)
    }

    /// `;` or `,` after a member or signature.
    fn print_member_terminator(&mut self, data: &NodeData) -> Result<()> {
        if !self.ctx.write_optional(";", data.range.end)? {
            self.ctx.write_optional(",", data.range.end)?;
        }
        Ok(())
    }

    fn print_optional_leaf(&mut self, node: Option<&impl HasNodeData>) -> Result<()> {
        match node {
            Some(node) => self.ctx.emit_leaf(node.data()),
            None => Ok(()),
        }
    }
}

/// Fixed text of an operator or keyword stored by kind.
fn fixed_text(kind: SyntaxKind, pos: TextPos) -> Result<&'static str> {
    kind.token_text().ok_or(ReprintError::UnknownNodeKind { kind, pos })
}

/// Reprint `file` against the buffer it was parsed from.
pub fn reprint(file: &SourceFile<'_>, source: SourceText<'_>) -> Result<String> {
    print_with(file, source, PrinterOptions::default()).map(|reprint| reprint.text)
}

/// Reprint and return the emission trace alongside the text.
pub fn reprint_with_trace(file: &SourceFile<'_>, source: SourceText<'_>) -> Result<Reprint> {
    let options = PrinterOptions {
        record_trace: true,
        ..PrinterOptions::default()
    };
    print_with(file, source, options)
}

fn print_with(file: &SourceFile<'_>, source: SourceText<'_>, options: PrinterOptions) -> Result<Reprint> {
    Printer::with_options(source, options)
        .print_source_file(file)
        .map_err(|err| {
            debug!(%err, "reprint failed");
            err
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = PrinterOptions::default();
        assert_eq!(options.trailing_comments, TrailingCommentPolicy::SameLineTrailing);
        assert!(!options.record_trace);
    }

    #[test]
    fn test_fixed_text() {
        assert_eq!(fixed_text(SyntaxKind::KeyOfKeyword, 0), Ok("keyof"));
        assert_eq!(fixed_text(SyntaxKind::PlusPlusToken, 0), Ok("++"));
        assert_eq!(
            fixed_text(SyntaxKind::Identifier, 7),
            Err(ReprintError::UnknownNodeKind {
                kind: SyntaxKind::Identifier,
                pos: 7
            })
        );
    }

    #[test]
    fn test_error_messages() {
        let err = ReprintError::InconsistentSpan {
            expected: 4,
            cursor: 2,
            detail: SpanMismatch::TokenNotFound(")"),
        };
        assert_eq!(
            err.to_string(),
            "tree does not match source at 4 (cursor at 2): expected `)`"
        );
        let err = ReprintError::UnknownTypeNodeKind {
            kind: SyntaxKind::MissingType,
            pos: 9,
        };
        assert_eq!(err.to_string(), "cannot print type node of kind MissingType at 9");
    }
}
