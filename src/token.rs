use std::fmt;

/// Source location of a token: 1-based line and inclusive column span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub line: usize,
    pub start_col: usize,
    pub end_col: usize,
}

/// Token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `void`
    Void,
    /// `int`
    Int,
    /// `bool`
    Bool,
    /// `if`
    If,
    /// `else`
    Else,
    /// `for`
    For,
    /// `return`
    Return,
    /// `Print`
    Print,
    /// Two-character comparison: `<=`, `>=`, `==` or `!=`.
    Comparison,
    /// `=`
    Assign,
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Mod,
    /// `&&`
    And,
    /// `||`
    Or,
    /// `!`
    Not,
    /// `;`
    Semicolon,
    /// `,`
    Comma,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// Decimal digits.
    IntConstant,
    /// Double-quoted string, quotes included in the text.
    StringConstant,
    /// Letter or underscore followed by word characters.
    Identifier,
}

impl TokenKind {
    /// Canonical display name, e.g. `T_Int`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Void => "T_Void",
            Self::Int => "T_Int",
            Self::Bool => "T_Bool",
            Self::If => "T_If",
            Self::Else => "T_Else",
            Self::For => "T_For",
            Self::Return => "T_Return",
            Self::Print => "T_Print",
            Self::Comparison => "T_Comparison",
            Self::Assign => "T_Assign",
            Self::Less => "T_Less",
            Self::Greater => "T_Greater",
            Self::Add => "T_Add",
            Self::Sub => "T_Sub",
            Self::Mul => "T_Mul",
            Self::Div => "T_Div",
            Self::Mod => "T_Mod",
            Self::And => "T_And",
            Self::Or => "T_Or",
            Self::Not => "T_Not",
            Self::Semicolon => "T_Semicolon",
            Self::Comma => "T_Comma",
            Self::LParen => "T_LParen",
            Self::RParen => "T_RParen",
            Self::LBrace => "T_LBrace",
            Self::RBrace => "T_RBrace",
            Self::IntConstant => "T_IntConstant",
            Self::StringConstant => "T_StringConstant",
            Self::Identifier => "T_Identifier",
        }
    }

    /// Source spelling for kinds with a fixed one, used in diagnostics.
    #[must_use]
    pub const fn symbol(self) -> Option<&'static str> {
        let symbol = match self {
            Self::Void => "void",
            Self::Int => "int",
            Self::Bool => "bool",
            Self::If => "if",
            Self::Else => "else",
            Self::For => "for",
            Self::Return => "return",
            Self::Print => "Print",
            Self::Assign => "=",
            Self::Less => "<",
            Self::Greater => ">",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::And => "&&",
            Self::Or => "||",
            Self::Not => "!",
            Self::Semicolon => ";",
            Self::Comma => ",",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::LBrace => "{",
            Self::RBrace => "}",
            Self::Comparison | Self::IntConstant | Self::StringConstant | Self::Identifier => {
                return None;
            }
        };
        Some(symbol)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single token with its kind, text, and source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({:?}) {}:{}-{}",
            self.kind, self.text, self.span.line, self.span.start_col, self.span.end_col
        )
    }
}
