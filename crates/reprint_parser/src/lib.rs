//! reprint_parser: Recursive descent parser for TypeScript.
//!
//! Builds an arena-allocated tree whose nodes carry exact full and trimmed
//! spans, so that the tree can be reprinted against its source text.

mod parser;
mod precedence;
mod utilities;

pub use parser::{ParseResult, Parser};
