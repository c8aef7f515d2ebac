use std::fmt;

use crate::token::{Span, Token, TokenKind};

/// Reserved words, tried in this order before identifiers.
const KEYWORDS: [(&str, TokenKind); 8] = [
    ("void", TokenKind::Void),
    ("int", TokenKind::Int),
    ("bool", TokenKind::Bool),
    ("if", TokenKind::If),
    ("else", TokenKind::Else),
    ("for", TokenKind::For),
    ("return", TokenKind::Return),
    ("Print", TokenKind::Print),
];

const COMPARISONS: [&str; 4] = ["<=", ">=", "==", "!="];

/// Classifies a lexer error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    /// Character that cannot start any token.
    UnexpectedCharacter(char),
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedCharacter(ch) => {
                write!(f, "unexpected character {ch:?}")
            }
        }
    }
}

/// Error produced during lexing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at line {}, column {}", span.line, span.start_col)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

/// Tokenize source text into a sequence of tokens.
///
/// Spaces, tabs, and newlines separate tokens and are never emitted.
///
/// # Errors
///
/// Returns `LexError` at the first character that matches no token
/// pattern. Scanning stops there.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(input).tokenize()
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

struct Lexer {
    input: Vec<char>,
    pos: usize,
    line: usize,
    // offset of the first character on the current line
    line_start: usize,
}

impl Lexer {
    fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            pos: 0,
            line: 1,
            line_start: 0,
        }
    }

    fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        while let Some(ch) = self.peek() {
            match ch {
                '\n' => {
                    self.pos += 1;
                    self.line += 1;
                    self.line_start = self.pos;
                }
                ' ' | '\t' => {
                    self.pos += 1;
                }
                _ => {
                    tokens.push(self.read_token()?);
                }
            }
        }

        Ok(tokens)
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.input.get(self.pos + offset).copied()
    }

    fn starts_with(&self, word: &str) -> bool {
        let mut rest = self.input[self.pos..].iter();
        word.chars().all(|c| rest.next() == Some(&c))
    }

    fn read_token(&mut self) -> Result<Token, LexError> {
        let matched = self
            .match_keyword()
            .or_else(|| self.match_comparison())
            .or_else(|| self.match_operator())
            .or_else(|| self.match_int())
            .or_else(|| self.match_string())
            .or_else(|| self.match_identifier());

        let Some((kind, len)) = matched else {
            return Err(self.mismatch());
        };

        Ok(self.make_token(kind, len))
    }

    fn match_keyword(&self) -> Option<(TokenKind, usize)> {
        // a keyword must not continue a preceding word
        if self.pos > 0 && is_word_char(self.input[self.pos - 1]) {
            return None;
        }

        KEYWORDS.iter().find_map(|&(word, kind)| {
            let len = word.len();
            let whole_word = self.starts_with(word)
                && !self.peek_at(len).is_some_and(is_word_char);
            whole_word.then_some((kind, len))
        })
    }

    fn match_comparison(&self) -> Option<(TokenKind, usize)> {
        COMPARISONS
            .iter()
            .any(|op| self.starts_with(op))
            .then_some((TokenKind::Comparison, 2))
    }

    fn match_operator(&self) -> Option<(TokenKind, usize)> {
        let kind = match self.peek()? {
            '=' => TokenKind::Assign,
            '<' => TokenKind::Less,
            '>' => TokenKind::Greater,
            '+' => TokenKind::Add,
            '-' => TokenKind::Sub,
            '*' => TokenKind::Mul,
            '/' => TokenKind::Div,
            '%' => TokenKind::Mod,
            '&' if self.peek_at(1) == Some('&') => return Some((TokenKind::And, 2)),
            '|' if self.peek_at(1) == Some('|') => return Some((TokenKind::Or, 2)),
            '!' => TokenKind::Not,
            ';' => TokenKind::Semicolon,
            ',' => TokenKind::Comma,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            _ => return None,
        };
        Some((kind, 1))
    }

    fn match_int(&self) -> Option<(TokenKind, usize)> {
        let len = self.run_length(self.pos, |c| c.is_ascii_digit());
        (len > 0).then_some((TokenKind::IntConstant, len))
    }

    fn match_string(&self) -> Option<(TokenKind, usize)> {
        if self.peek()? != '"' {
            return None;
        }
        // an unterminated literal matches nothing, leaving the quote
        // to be reported as a mismatch
        let body = self.run_length(self.pos + 1, |c| c != '"');
        let closed = self.input.get(self.pos + 1 + body) == Some(&'"');
        closed.then_some((TokenKind::StringConstant, body + 2))
    }

    fn match_identifier(&self) -> Option<(TokenKind, usize)> {
        let first = self.peek()?;
        if !(first.is_ascii_alphabetic() || first == '_') {
            return None;
        }
        let len = 1 + self.run_length(self.pos + 1, is_word_char);
        Some((TokenKind::Identifier, len))
    }

    fn run_length(&self, from: usize, pred: impl Fn(char) -> bool) -> usize {
        self.input
            .get(from..)
            .map_or(0, |rest| rest.iter().take_while(|&&c| pred(c)).count())
    }

    fn make_token(&mut self, kind: TokenKind, len: usize) -> Token {
        let start = self.pos;
        let end = start + len;
        let text: String = self.input[start..end].iter().collect();

        let token = Token {
            kind,
            span: Span {
                line: self.line,
                start_col: start - self.line_start + 1,
                end_col: end - self.line_start,
            },
            text,
        };

        // string literals may span lines
        for offset in start..end {
            if self.input[offset] == '\n' {
                self.line += 1;
                self.line_start = offset + 1;
            }
        }
        self.pos = end;

        token
    }

    fn mismatch(&self) -> LexError {
        let col = self.pos - self.line_start + 1;
        LexError {
            kind: LexErrorKind::UnexpectedCharacter(self.input[self.pos]),
            span: Span {
                line: self.line,
                start_col: col,
                end_col: col,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input)
            .expect("should tokenize")
            .iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn declaration() {
        let tokens = tokenize("int x;").expect("should tokenize");
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].kind, TokenKind::Int);
        assert_eq!(tokens[0].text, "int");
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
        assert_eq!(tokens[1].text, "x");
        assert_eq!(tokens[2].kind, TokenKind::Semicolon);
        assert_eq!(tokens[2].text, ";");
        assert!(tokens.iter().all(|t| t.span.line == 1));
    }

    #[test]
    fn comparison_is_one_token() {
        let tokens = tokenize("<=").expect("should tokenize");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Comparison);
        assert_eq!(tokens[0].text, "<=");
    }

    #[test]
    fn all_comparisons_share_a_kind() {
        assert_eq!(kinds("<= >= == !="), vec![TokenKind::Comparison; 4]);
    }

    #[test]
    fn single_char_operators() {
        assert_eq!(
            kinds("= < > + - * / %"),
            vec![
                TokenKind::Assign,
                TokenKind::Less,
                TokenKind::Greater,
                TokenKind::Add,
                TokenKind::Sub,
                TokenKind::Mul,
                TokenKind::Div,
                TokenKind::Mod,
            ]
        );
    }

    #[test]
    fn logical_operators() {
        assert_eq!(
            kinds("&& || !x"),
            vec![
                TokenKind::And,
                TokenKind::Or,
                TokenKind::Not,
                TokenKind::Identifier
            ]
        );
    }

    #[test]
    fn keyword_prefix_is_identifier() {
        let tokens = tokenize("integer voided Printer").expect("should tokenize");
        assert!(tokens.iter().all(|t| t.kind == TokenKind::Identifier));
        assert_eq!(tokens[0].text, "integer");
    }

    #[test]
    fn keyword_after_digits_is_identifier() {
        // no word boundary between `1` and `int`
        let tokens = tokenize("1int").expect("should tokenize");
        assert_eq!(tokens[0].kind, TokenKind::IntConstant);
        assert_eq!(tokens[0].text, "1");
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
        assert_eq!(tokens[1].text, "int");
    }

    #[test]
    fn keywords_are_case_sensitive() {
        assert_eq!(kinds("print Print"), vec![TokenKind::Identifier, TokenKind::Print]);
    }

    #[test]
    fn string_constant_keeps_quotes() {
        let tokens = tokenize("Print \"hi there\";").expect("should tokenize");
        assert_eq!(tokens[1].kind, TokenKind::StringConstant);
        assert_eq!(tokens[1].text, "\"hi there\"");
        assert_eq!(tokens[1].span.start_col, 7);
        assert_eq!(tokens[1].span.end_col, 16);
    }

    #[test]
    fn unterminated_string_fails_at_quote() {
        let err = tokenize("x = \"open").unwrap_err();
        assert_eq!(err.kind, LexErrorKind::UnexpectedCharacter('"'));
        assert_eq!(err.span.line, 1);
        assert_eq!(err.span.start_col, 5);
    }

    #[test]
    fn multiline_string_advances_line() {
        let tokens = tokenize("\"a\nb\" x").expect("should tokenize");
        assert_eq!(tokens[0].span.line, 1);
        assert_eq!(tokens[1].span.line, 2);
        assert_eq!(tokens[1].span.start_col, 4);
    }

    #[test]
    fn span_tracking() {
        let tokens = tokenize("int abc;\n  return 42;").expect("should tokenize");
        assert_eq!(tokens[1].span.start_col, 5);
        assert_eq!(tokens[1].span.end_col, 7);
        assert_eq!(tokens[3].span.line, 2);
        assert_eq!(tokens[3].span.start_col, 3);
        assert_eq!(tokens[3].span.end_col, 8);
        assert_eq!(tokens[4].span.start_col, 10);
        assert_eq!(tokens[4].span.end_col, 11);
    }

    #[test]
    fn tabs_advance_column() {
        let tokens = tokenize("\t\tx").expect("should tokenize");
        assert_eq!(tokens[0].span.start_col, 3);
    }

    #[test]
    fn lone_ampersand_is_error() {
        let err = tokenize("a & b").unwrap_err();
        assert_eq!(err.kind, LexErrorKind::UnexpectedCharacter('&'));
    }

    #[test]
    fn carriage_return_is_error() {
        let err = tokenize("int x;\r\n").unwrap_err();
        assert_eq!(err.kind, LexErrorKind::UnexpectedCharacter('\r'));
    }

    #[test]
    fn error_reports_line() {
        let err = tokenize("int x;\nint y;\n  @").unwrap_err();
        assert_eq!(err.span.line, 3);
        assert_eq!(err.span.start_col, 3);
    }

    #[test]
    fn unicode_columns_count_chars() {
        let tokens = tokenize("x_é y").expect("should tokenize");
        assert_eq!(tokens[0].text, "x_é");
        assert_eq!(tokens[1].span.start_col, 5);
    }
}
