//! reprint_core: Core position types shared by every reprint crate.
//!
//! Offsets are byte positions into UTF-8 source text.

pub mod text;

pub use text::{LineAndColumn, LineMap, TextPos, TextRange, TextSpan};
