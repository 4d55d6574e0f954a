//! Parser state and the token-level helpers the grammar functions share.
//!
//! The parser reads its token source on demand and keeps exactly one token of
//! lookahead (`current`) plus the token it consumed last (`previous`). The
//! grammar itself lives in free functions in the sibling modules:
//!
//! - `decl`: program, block and declaration sections
//! - `stmt`: statements
//! - `expr`: the expression precedence chain

use std::{mem, rc::Rc};

use crate::{
    ast::ast::Program,
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Position, SourceFile,
};

use super::decl::parse_program;

/// The main parser structure that maintains parsing state.
pub struct Parser {
    /// The token source, read one token at a time
    tokens: Box<dyn Iterator<Item = Token>>,
    /// The lookahead token
    current: Token,
    /// The most recently consumed token
    previous: Token,
    /// The compilation unit, attached to every diagnostic
    source: Rc<SourceFile>,
}

impl Parser {
    /// Creates a new Parser and reads the first lookahead token.
    ///
    /// # Arguments
    ///
    /// * `tokens` - The token source; an exhausted source reads as `EOF`
    /// * `source` - The compilation unit the tokens came from
    pub fn new<I>(tokens: I, source: Rc<SourceFile>) -> Self
    where
        I: IntoIterator<Item = Token>,
        I::IntoIter: 'static,
    {
        let mut tokens: Box<dyn Iterator<Item = Token>> = Box::new(tokens.into_iter());
        let current = tokens
            .next()
            .unwrap_or_else(|| Token::new(TokenKind::EOF, "EOF", Position::new(1, 1)));

        Parser {
            tokens,
            previous: current.clone(),
            current,
            source,
        }
    }

    /// Returns the lookahead token without consuming it.
    pub fn current_token(&self) -> &Token {
        &self.current
    }

    /// Returns the kind of the lookahead token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current.kind
    }

    /// Returns the most recently consumed token.
    pub fn previous_token(&self) -> &Token {
        &self.previous
    }

    /// Advances to the next token and returns the one just consumed.
    pub fn advance(&mut self) -> &Token {
        let position = self.current.position;
        let next = self
            .tokens
            .next()
            .unwrap_or_else(|| Token::new(TokenKind::EOF, "EOF", position));
        self.previous = mem::replace(&mut self.current, next);
        &self.previous
    }

    /// Checks the lookahead against `kinds` without consuming it.
    pub fn peek(&self, kinds: &[TokenKind]) -> bool {
        self.current.is_one_of_many(kinds)
    }

    /// Consumes the lookahead if it is one of `kinds`.
    pub fn consume(&mut self, kinds: &[TokenKind]) -> bool {
        if self.peek(kinds) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Expects a token of one of the given kinds, with optional custom error.
    ///
    /// Returns the consumed token, or the custom error (or a default
    /// "expecting ..." error) if the lookahead does not match.
    pub fn expect_error(
        &mut self,
        expected_kinds: &[TokenKind],
        error: Option<ErrorImpl>,
    ) -> Result<Token, Error> {
        if self.consume(expected_kinds) {
            return Ok(self.previous.clone());
        }

        let error = error.unwrap_or_else(|| ErrorImpl::ExpectedToken {
            expected: expected_kinds
                .iter()
                .map(|kind| kind.to_string())
                .collect::<Vec<_>>()
                .join(" or "),
            found: self.current.to_string(),
        });
        Err(self.error(error))
    }

    /// Expects a token of the specified kind with default error message.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        self.expect_error(&[expected_kind], None)
    }

    /// Expects a token of any of the specified kinds with default error message.
    pub fn expect_one_of(&mut self, expected_kinds: &[TokenKind]) -> Result<Token, Error> {
        self.expect_error(expected_kinds, None)
    }

    /// Builds a diagnostic at the lookahead token.
    ///
    /// A lexer error token always wins: its message replaces whatever the
    /// grammar expected, since it explains why the expected token is missing.
    pub fn error(&self, error: ErrorImpl) -> Error {
        let error = if self.current.kind == TokenKind::Error {
            ErrorImpl::LexicalError {
                message: self.current.value.clone(),
            }
        } else {
            error
        };

        Error::new(error, self.current.position)
            .with_token(self.current.value.clone())
            .with_source(Rc::clone(&self.source))
    }

    /// The diagnostic for a lookahead token no grammar rule accepts here.
    pub fn unexpected(&self) -> Error {
        self.error(ErrorImpl::UnexpectedToken {
            token: self.current.to_string(),
        })
    }

    pub fn get_position(&self) -> Position {
        self.current.position
    }
}

/// Parses a token stream into a Program node.
///
/// This is the main entry point for parsing. The whole stream must form one
/// program: anything after the final `.` other than end-of-input is an error.
/// Parsing stops at the first error.
///
/// # Arguments
///
/// * `tokens` - The token source
/// * `source` - The compilation unit, for diagnostics
pub fn parse<I>(tokens: I, source: Rc<SourceFile>) -> Result<Program, Error>
where
    I: IntoIterator<Item = Token>,
    I::IntoIter: 'static,
{
    let mut parser = Parser::new(tokens, source);
    let program = parse_program(&mut parser)?;

    if parser.current_token_kind() != TokenKind::EOF {
        return Err(parser.unexpected());
    }

    tracing::trace!("parsed program `{}`", program.name.value);
    Ok(program)
}
