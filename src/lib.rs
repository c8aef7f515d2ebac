//! Lexer, recursive-descent parser, and tree printer for a small
//! C-like teaching language.
//!
//! The language has `void`, `int` and `bool` declarations, functions,
//! `if`/`else`, `return` and `Print` statements, and expressions
//! written with the operator first (`+ a 1`, `<= x 10`, `! done`).
//!
//! # Quick start
//!
//! ```
//! use decaf_parser::{format, parse, tokenize};
//!
//! let input = "void f(int a, bool b) { return a; }";
//! let tokens = tokenize(input).unwrap();
//! let tree = parse(&tokens).unwrap();
//! let output = format(&tree);
//! assert_eq!(
//!     output,
//!     "Program:\n    Function: f\n        Parameter: int a\n        \
//!      Parameter: bool b\n        Return:\n            FieldAccess: a\n"
//! );
//! ```
//!
//! ## Walk the tree
//!
//! ```
//! use decaf_parser::{NodeKind, parse_str};
//!
//! let tree = parse_str("int x; int y;").unwrap();
//! let names: Vec<_> = tree
//!     .iter()
//!     .filter_map(|(_, node)| match &node.kind {
//!         NodeKind::Declaration { name, .. } => Some(name.as_str()),
//!         _ => None,
//!     })
//!     .collect();
//! assert_eq!(names, ["x", "y"]);
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod ast;
pub mod formatter;
pub mod lexer;
pub mod parser;
pub mod token;

pub use ast::{
    ArithmeticOp, LogicalOp, NodeId, NodeKind, Preorder, RelationalOp, SyntaxNode, SyntaxTree,
    TypeName,
};
pub use formatter::format;
pub use lexer::{LexError, LexErrorKind, tokenize};
pub use parser::{MAX_NESTING_DEPTH, ParseError, ParseErrorKind, parse};
pub use token::{Span, Token, TokenKind};

/// Unified error type covering both lexing and parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A lexer error.
    #[error("{0}")]
    Lex(#[from] LexError),
    /// A parser error.
    #[error("{0}")]
    Parse(#[from] ParseError),
}

/// Tokenize and parse source text in one step.
pub fn parse_str(input: &str) -> Result<SyntaxTree, Error> {
    let tokens = tokenize(input)?;
    Ok(parse(&tokens)?)
}
