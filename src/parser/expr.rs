//! The expression precedence chain, loosest binding first:
//!
//! | level      | operators                | shape                 |
//! |------------|--------------------------|-----------------------|
//! | equality   | `=` `<>`                 | at most one operator  |
//! | comparison | `<` `<=` `>` `>=`        | at most one operator  |
//! | term       | `+` `-` `or`             | left-associative      |
//! | factor     | `*` `/` `and` `mod`      | left-associative      |
//! | unary      | prefix `+` `-`           | right-recursive       |
//! | primary    | names, calls, literals, `not`, parentheses |      |

use crate::{
    ast::expressions::Expr,
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::parser::Parser;

const EQUALITY: &[TokenKind] = &[TokenKind::Equals, TokenKind::NotEquals];
const COMPARISON: &[TokenKind] = &[
    TokenKind::Less,
    TokenKind::LessEquals,
    TokenKind::Greater,
    TokenKind::GreaterEquals,
];
const TERM: &[TokenKind] = &[TokenKind::Plus, TokenKind::Dash, TokenKind::Or];
const FACTOR: &[TokenKind] = &[TokenKind::Star, TokenKind::Slash, TokenKind::And, TokenKind::Mod];
const LITERALS: &[TokenKind] = &[
    TokenKind::IntLiteral,
    TokenKind::RealLiteral,
    TokenKind::BoolLiteral,
    TokenKind::StringLiteral,
    TokenKind::CharLiteral,
];

pub fn parse_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parse_equality(parser)
}

/// `a = b = c` does not parse: the second `=` is left for the caller to reject.
fn parse_equality(parser: &mut Parser) -> Result<Expr, Error> {
    let left = parse_comparison(parser)?;

    if parser.consume(EQUALITY) {
        let operator = parser.previous_token().clone();
        let right = parse_comparison(parser)?;
        return Ok(Expr::binary(left, operator, right));
    }

    Ok(left)
}

fn parse_comparison(parser: &mut Parser) -> Result<Expr, Error> {
    let left = parse_term(parser)?;

    if parser.consume(COMPARISON) {
        let operator = parser.previous_token().clone();
        let right = parse_term(parser)?;
        return Ok(Expr::binary(left, operator, right));
    }

    Ok(left)
}

fn parse_term(parser: &mut Parser) -> Result<Expr, Error> {
    let mut left = parse_factor(parser)?;

    while parser.consume(TERM) {
        let operator = parser.previous_token().clone();
        let right = parse_factor(parser)?;
        left = Expr::binary(left, operator, right);
    }

    Ok(left)
}

fn parse_factor(parser: &mut Parser) -> Result<Expr, Error> {
    let mut left = parse_unary(parser)?;

    while parser.consume(FACTOR) {
        let operator = parser.previous_token().clone();
        let right = parse_unary(parser)?;
        left = Expr::binary(left, operator, right);
    }

    Ok(left)
}

fn parse_unary(parser: &mut Parser) -> Result<Expr, Error> {
    if parser.consume(&[TokenKind::Plus, TokenKind::Dash]) {
        let operator = parser.previous_token().clone();
        let operand = parse_unary(parser)?;
        return Ok(Expr::unary(operator, operand));
    }

    parse_primary(parser)
}

/// `not` binds tighter than every binary operator: `not a and b` is `(not a) and b`.
fn parse_primary(parser: &mut Parser) -> Result<Expr, Error> {
    if parser.consume(&[TokenKind::Identifier]) {
        let name = parser.previous_token().clone();
        if parser.peek(&[TokenKind::OpenParen]) {
            let arguments = parse_arg_list(parser)?;
            return Ok(Expr::fn_call(name, arguments));
        }
        return Ok(Expr::identifier(name));
    }

    if parser.consume(LITERALS) {
        return Ok(Expr::literal(parser.previous_token().clone()));
    }

    if parser.consume(&[TokenKind::Not]) {
        let operator = parser.previous_token().clone();
        let operand = parse_primary(parser)?;
        return Ok(Expr::unary(operator, operand));
    }

    let found = parser.current_token().to_string();
    parser.expect_error(&[TokenKind::OpenParen], Some(ErrorImpl::ExpectedPrimary { found }))?;
    let expr = parse_expr(parser)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(expr)
}

/// `( [expr {, expr}] )`
pub fn parse_arg_list(parser: &mut Parser) -> Result<Vec<Expr>, Error> {
    let mut arguments = Vec::new();
    parser.expect(TokenKind::OpenParen)?;

    if !parser.peek(&[TokenKind::CloseParen]) {
        arguments.push(parse_expr(parser)?);
        while parser.consume(&[TokenKind::Comma]) {
            arguments.push(parse_expr(parser)?);
        }
    }

    parser.expect(TokenKind::CloseParen)?;
    Ok(arguments)
}
