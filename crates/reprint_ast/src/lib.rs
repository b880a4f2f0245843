//! reprint_ast: Syntax tree consumed by the reprinter.
//!
//! Nodes are arena-allocated and carry both a full span (leading trivia
//! included) and a trimmed start. List children are `NodeArray`s that
//! remember whether the source had a trailing comma.

pub mod node;
pub mod syntax_kind;
pub mod types;

pub use node::*;
pub use syntax_kind::SyntaxKind;
pub use types::*;
