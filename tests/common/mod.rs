#![allow(dead_code)]

use decaf_parser::{SyntaxTree, format, parse, parse_str, tokenize};

/// Tokenize, parse and render `input`.
pub fn render(input: &str) -> String {
    let tokens = tokenize(input).expect("tokenize failed");
    let tree = parse(&tokens).expect("parse failed");
    format(&tree)
}

/// Assert that `input` renders to exactly `expected`.
pub fn assert_renders(input: &str, expected: &str) {
    let output = render(input);
    assert_eq!(
        output, expected,
        "render mismatch:\n--- expected ---\n{expected}\n--- got ---\n{output}"
    );
}

pub fn parse_ok(input: &str) -> SyntaxTree {
    parse_str(input).unwrap_or_else(|e| panic!("failed to parse {input:?}: {e}"))
}
