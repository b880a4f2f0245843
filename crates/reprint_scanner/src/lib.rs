//! reprint_scanner: Tokenizer and source buffer queries.
//!
//! - `Scanner` turns text into tokens, tracking each token's full start
//!   (end of the previous token) and trimmed start.
//! - `SourceText` is the read-only buffer the reprinter walks, with comment
//!   and trivia queries that agree with the scanner's notion of trivia.

pub mod chars;
pub mod comments;
mod scanner;
mod source;

pub use comments::{
    collect_comment_ranges, leading_comment_ranges, skip_trivia, trailing_comment_ranges, CommentKind,
    CommentRange,
};
pub use scanner::{Scanner, ScannerState};
pub use source::SourceText;
