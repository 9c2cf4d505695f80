//! Concrete syntax for C3.
//!
//! [`parse`] never fails. Input it cannot make sense of ends up in
//! [`NodeKind::Error`] nodes and parsing continues with the next
//! declaration, so one broken declaration never hides the rest of the
//! file from the index.

mod kind;
pub mod lexer;
mod line_index;
mod parser;
mod stack;
mod tree;

pub use kind::{Field, NodeKind};
pub use lexer::{ident_class, lex, IdentClass, LexError, Token, TokenKind};
pub use line_index::LineIndex;
pub use parser::parse;
pub use stack::ensure_sufficient_stack;
pub use tree::{Node, NodeId, SyntaxNode, SyntaxTree};
