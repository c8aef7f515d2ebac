use std::fmt;

use crate::ast::{
    ArithmeticOp, LogicalOp, NodeId, NodeKind, RelationalOp, SyntaxTree, TreeBuilder, TypeName,
};
use crate::token::{Span, Token, TokenKind};

/// Deepest nesting of blocks and operator expressions the parser accepts.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Classifies a parser error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A specific token was required, found something else or EOF.
    Expected {
        expected: TokenKind,
        found: Option<String>,
    },
    /// Parameter list entry did not start with `int` or `bool`.
    ExpectedParameterType { found: Option<String> },
    /// An operand or condition was required but no expression starts here.
    ExpectedExpression { found: Option<String> },
    /// Blocks or operators nested past `MAX_NESTING_DEPTH`.
    NestingTooDeep { limit: usize },
}

fn write_found(f: &mut fmt::Formatter<'_>, found: Option<&str>) -> fmt::Result {
    match found {
        Some(text) => write!(f, ", got '{text}'"),
        None => write!(f, ", got end of input"),
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expected { expected, found } => {
                match expected.symbol() {
                    Some(symbol) => write!(f, "expected '{symbol}'")?,
                    None => write!(f, "expected {expected}")?,
                }
                write_found(f, found.as_deref())
            }
            Self::ExpectedParameterType { found } => {
                write!(f, "expected parameter type 'int' or 'bool'")?;
                write_found(f, found.as_deref())
            }
            Self::ExpectedExpression { found } => {
                write!(f, "expected expression")?;
                write_found(f, found.as_deref())
            }
            Self::NestingTooDeep { limit } => {
                write!(f, "nesting deeper than {limit} levels")
            }
        }
    }
}

/// Error produced during parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at line {}, column {}", span.line, span.start_col)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
}

/// Parse a token stream into a syntax tree rooted at `Program`.
///
/// Top-level tokens other than `int`/`void` are skipped, as are
/// tokens inside a block that start no statement.
///
/// # Errors
///
/// Returns `ParseError` when a required token, parameter type, or
/// operand is missing, or when nesting exceeds `MAX_NESTING_DEPTH`.
pub fn parse(tokens: &[Token]) -> Result<SyntaxTree, ParseError> {
    Parser::new(tokens).parse()
}

/// Outcome of one grammar production.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Production {
    /// A node was built.
    Node(NodeId),
    /// One unrecognized token was consumed.
    Skipped,
    /// Nothing was built; the cursor stays where the production stopped.
    Malformed,
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
    builder: TreeBuilder,
}

impl<'a> Parser<'a> {
    const fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
            builder: TreeBuilder::new(),
        }
    }

    fn parse(mut self) -> Result<SyntaxTree, ParseError> {
        let mut items = Vec::new();

        while self.current().is_some() {
            if let Production::Node(id) = self.top_level()? {
                items.push(id);
            }
        }

        Ok(self.builder.finish(items))
    }

    fn top_level(&mut self) -> Result<Production, ParseError> {
        match self.current_kind() {
            Some(TokenKind::Int | TokenKind::Void) => self.declaration_or_function(),
            _ => Ok(self.skip()),
        }
    }

    fn declaration_or_function(&mut self) -> Result<Production, ParseError> {
        let ty = match self.current_kind() {
            Some(TokenKind::Int) => TypeName::Int,
            Some(TokenKind::Void) => TypeName::Void,
            _ => return Ok(Production::Malformed),
        };
        self.advance();
        let name = self.expect(TokenKind::Identifier)?.text.clone();

        match self.current_kind() {
            Some(TokenKind::LParen) => self.function(ty, name).map(Production::Node),
            Some(TokenKind::Semicolon) => {
                self.advance();
                let id = self.builder.leaf(NodeKind::Declaration { ty, name });
                Ok(Production::Node(id))
            }
            // initializers and other declarators are not part of the grammar
            _ => Ok(Production::Malformed),
        }
    }

    fn function(&mut self, return_type: TypeName, name: String) -> Result<NodeId, ParseError> {
        self.expect(TokenKind::LParen)?;

        let mut children = Vec::new();
        while self.current_kind() != Some(TokenKind::RParen) {
            children.push(self.parameter()?);
            if self.current_kind() == Some(TokenKind::Comma) {
                self.advance();
            }
        }
        self.expect(TokenKind::RParen)?;

        let has_body = self.current_kind() == Some(TokenKind::LBrace);
        if has_body {
            children.extend(self.block_body()?);
        }

        let kind = NodeKind::Function {
            return_type,
            name,
            has_body,
        };
        Ok(self.builder.push(kind, children))
    }

    fn parameter(&mut self) -> Result<NodeId, ParseError> {
        let ty = match self.current_kind() {
            Some(TokenKind::Int) => TypeName::Int,
            Some(TokenKind::Bool) => TypeName::Bool,
            _ => {
                return Err(
                    self.error_here(|found| ParseErrorKind::ExpectedParameterType { found })
                );
            }
        };
        self.advance();
        let name = self.expect(TokenKind::Identifier)?.text.clone();
        Ok(self.builder.leaf(NodeKind::Parameter { ty, name }))
    }

    fn block(&mut self) -> Result<NodeId, ParseError> {
        let statements = self.block_body()?;
        Ok(self.builder.push(NodeKind::Block, statements))
    }

    /// `{ statement* }`, returning the statements in order.
    fn block_body(&mut self) -> Result<Vec<NodeId>, ParseError> {
        self.expect(TokenKind::LBrace)?;
        self.enter()?;

        let mut statements = Vec::new();
        while let Some(token) = self.current() {
            if token.kind == TokenKind::RBrace {
                break;
            }
            if let Production::Node(id) = self.statement()? {
                statements.push(id);
            }
        }

        self.expect(TokenKind::RBrace)?;
        self.leave();
        Ok(statements)
    }

    fn statement(&mut self) -> Result<Production, ParseError> {
        match self.current_kind() {
            Some(TokenKind::Int | TokenKind::Void) => self.declaration_or_function(),
            Some(TokenKind::If) => self.if_else().map(Production::Node),
            Some(TokenKind::Return) => self
                .keyword_statement(TokenKind::Return, NodeKind::Return)
                .map(Production::Node),
            Some(TokenKind::Print) => self
                .keyword_statement(TokenKind::Print, NodeKind::Print)
                .map(Production::Node),
            Some(TokenKind::Identifier) => self.expression_statement().map(Production::Node),
            _ => Ok(self.skip()),
        }
    }

    fn if_else(&mut self) -> Result<NodeId, ParseError> {
        self.expect(TokenKind::If)?;
        let condition = self.required_expression()?;
        let then_block = self.block()?;

        let mut children = vec![condition, then_block];
        if self.current_kind() == Some(TokenKind::Else) {
            self.advance();
            children.push(self.block()?);
        }

        Ok(self.builder.push(NodeKind::IfElse, children))
    }

    /// `return expr? ;` and `Print expr? ;`
    fn keyword_statement(
        &mut self,
        keyword: TokenKind,
        kind: NodeKind,
    ) -> Result<NodeId, ParseError> {
        self.expect(keyword)?;
        let children = match self.expression()? {
            Production::Node(id) => vec![id],
            Production::Skipped | Production::Malformed => Vec::new(),
        };
        self.skip_stray();
        self.expect(TokenKind::Semicolon)?;
        Ok(self.builder.push(kind, children))
    }

    fn expression_statement(&mut self) -> Result<NodeId, ParseError> {
        let left = self.required_expression()?;

        if self.current_kind() != Some(TokenKind::Assign) {
            self.skip_stray();
            self.expect(TokenKind::Semicolon)?;
            return Ok(left);
        }

        self.advance();
        let right = self.required_expression()?;
        self.expect(TokenKind::Semicolon)?;

        let assign = self.builder.push(NodeKind::AssignExpr, vec![left, right]);
        Ok(self.builder.push(NodeKind::ExpressionStatement, vec![assign]))
    }

    /// Operators come before their operands: `+ a 1`, `! x`.
    fn expression(&mut self) -> Result<Production, ParseError> {
        let Some(token) = self.current() else {
            return Ok(Production::Malformed);
        };

        let kind = match token.kind {
            TokenKind::IntConstant | TokenKind::Identifier => {
                self.advance();
                let id = self.builder.leaf(NodeKind::FieldAccess(token.text.clone()));
                return Ok(Production::Node(id));
            }
            TokenKind::Add => NodeKind::ArithmeticExpr(ArithmeticOp::Add),
            TokenKind::Sub => NodeKind::ArithmeticExpr(ArithmeticOp::Sub),
            TokenKind::And => NodeKind::LogicalExpr(LogicalOp::And),
            TokenKind::Or => NodeKind::LogicalExpr(LogicalOp::Or),
            TokenKind::Not => NodeKind::LogicalExpr(LogicalOp::Not),
            TokenKind::Comparison => match RelationalOp::from_symbol(&token.text) {
                Some(op) => NodeKind::RelationalExpr(op),
                None => return Ok(Production::Malformed),
            },
            _ => return Ok(Production::Malformed),
        };
        self.advance();
        self.enter()?;

        let mut operands = vec![self.required_expression()?];
        if !matches!(kind, NodeKind::LogicalExpr(LogicalOp::Not)) {
            operands.push(self.required_expression()?);
        }

        self.leave();
        Ok(Production::Node(self.builder.push(kind, operands)))
    }

    fn required_expression(&mut self) -> Result<NodeId, ParseError> {
        match self.expression()? {
            Production::Node(id) => Ok(id),
            Production::Skipped | Production::Malformed => {
                Err(self.error_here(|found| ParseErrorKind::ExpectedExpression { found }))
            }
        }
    }

    fn current(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn current_kind(&self) -> Option<TokenKind> {
        self.current().map(|t| t.kind)
    }

    const fn advance(&mut self) {
        self.pos += 1;
    }

    const fn skip(&mut self) -> Production {
        self.advance();
        Production::Skipped
    }

    /// Step over one token that starts no expression before a
    /// statement's `;`. A `;`, `}` or end of input is left in place.
    fn skip_stray(&mut self) {
        if !matches!(
            self.current_kind(),
            None | Some(TokenKind::Semicolon | TokenKind::RBrace)
        ) {
            self.advance();
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<&'a Token, ParseError> {
        match self.current() {
            Some(token) if token.kind == kind => {
                self.advance();
                Ok(token)
            }
            _ => Err(self.error_here(|found| ParseErrorKind::Expected {
                expected: kind,
                found,
            })),
        }
    }

    fn enter(&mut self) -> Result<(), ParseError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(self.error_here(|_| ParseErrorKind::NestingTooDeep {
                limit: MAX_NESTING_DEPTH,
            }));
        }
        self.depth += 1;
        Ok(())
    }

    const fn leave(&mut self) {
        self.depth -= 1;
    }

    fn error_here(&self, kind: impl FnOnce(Option<String>) -> ParseErrorKind) -> ParseError {
        let current = self.current();
        ParseError {
            kind: kind(current.map(|t| t.text.clone())),
            span: current.map_or_else(|| self.eof_span(), |t| t.span),
        }
    }

    fn eof_span(&self) -> Span {
        self.tokens.last().map_or(
            Span {
                line: 1,
                start_col: 1,
                end_col: 1,
            },
            |last| last.span,
        )
    }
}
