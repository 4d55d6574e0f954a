use crate::{
    ast::{
        ast::{Block, ConstDecl, Declarations, FnDecl, Program, VarDecl},
        expressions::Expr,
        types::Type,
    },
    errors::errors::Error,
    lexer::tokens::{Token, TokenKind},
};

use super::{parser::Parser, stmt::parse_stmt};

const LITERALS: &[TokenKind] = &[
    TokenKind::IntLiteral,
    TokenKind::RealLiteral,
    TokenKind::BoolLiteral,
    TokenKind::StringLiteral,
    TokenKind::CharLiteral,
];

const TYPE_KEYWORDS: &[TokenKind] = &[
    TokenKind::Integer,
    TokenKind::Real,
    TokenKind::Boolean,
    TokenKind::String,
    TokenKind::Char,
];

/// `program NAME ; block .`
pub fn parse_program(parser: &mut Parser) -> Result<Program, Error> {
    parser.expect(TokenKind::Program)?;
    let name = parser.expect(TokenKind::Identifier)?;
    parser.expect(TokenKind::Semicolon)?;

    let block = parse_block(parser)?;
    parser.expect(TokenKind::Period)?;

    Ok(Program { name, block })
}

pub fn parse_block(parser: &mut Parser) -> Result<Block, Error> {
    let declarations = parse_declarations(parser)?;
    let body = parse_stmt(parser)?;

    Ok(Block { declarations, body })
}

/// Reads declaration sections until the lookahead starts a statement.
///
/// Sections may repeat and appear in any order; each list keeps source order.
pub fn parse_declarations(parser: &mut Parser) -> Result<Declarations, Error> {
    let mut declarations = Declarations::default();

    loop {
        match parser.current_token_kind() {
            TokenKind::Const => {
                parser.advance();
                loop {
                    declarations.consts.push(parse_const_decl(parser)?);
                    if !parser.peek(&[TokenKind::Identifier]) {
                        break;
                    }
                }
            }
            TokenKind::Var => {
                parser.advance();
                loop {
                    declarations.vars.extend(parse_var_decls(parser)?);
                    parser.expect(TokenKind::Semicolon)?;
                    if !parser.peek(&[TokenKind::Identifier]) {
                        break;
                    }
                }
            }
            TokenKind::Function | TokenKind::Procedure => {
                declarations.funcs.push(parse_fn_decl(parser)?);
            }
            _ => break,
        }
    }

    Ok(declarations)
}

/// `NAME = literal ;`
pub fn parse_const_decl(parser: &mut Parser) -> Result<ConstDecl, Error> {
    let name = parser.expect(TokenKind::Identifier)?;
    parser.expect(TokenKind::Equals)?;
    let value = parser.expect_one_of(LITERALS)?;
    parser.expect(TokenKind::Semicolon)?;

    tracing::trace!("const `{}` at {}", name.value, name.position);
    Ok(ConstDecl {
        name,
        value: Expr::literal(value),
    })
}

/// `a, b, c : type`, one declaration per name, all sharing the type.
pub fn parse_var_decls(parser: &mut Parser) -> Result<Vec<VarDecl>, Error> {
    let names = parse_ident_list(parser)?;
    parser.expect(TokenKind::Colon)?;
    let ty = parse_type(parser)?;

    Ok(names
        .into_iter()
        .map(|name| VarDecl { name, ty })
        .collect())
}

pub fn parse_ident_list(parser: &mut Parser) -> Result<Vec<Token>, Error> {
    let mut names = vec![parser.expect(TokenKind::Identifier)?];

    while parser.consume(&[TokenKind::Comma]) {
        names.push(parser.expect(TokenKind::Identifier)?);
    }

    Ok(names)
}

/// `function NAME (params) : type ; block ;` or `procedure NAME (params) ; block ;`
pub fn parse_fn_decl(parser: &mut Parser) -> Result<FnDecl, Error> {
    let is_procedure = parser.advance().kind == TokenKind::Procedure;
    let name = parser.expect(TokenKind::Identifier)?;
    let params = parse_param_list(parser)?;

    let return_type = if is_procedure {
        Type::Void
    } else {
        parser.expect(TokenKind::Colon)?;
        parse_type(parser)?
    };
    parser.expect(TokenKind::Semicolon)?;

    tracing::trace!(
        "{} `{}` with {} parameter(s)",
        if is_procedure { "procedure" } else { "function" },
        name.value,
        params.len()
    );

    let block = parse_block(parser)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(FnDecl {
        is_procedure,
        name,
        params,
        return_type,
        block,
    })
}

/// `( [a, b : type {; c : type}] )`
fn parse_param_list(parser: &mut Parser) -> Result<Vec<VarDecl>, Error> {
    let mut params = Vec::new();
    parser.expect(TokenKind::OpenParen)?;

    if !parser.peek(&[TokenKind::CloseParen]) {
        params.extend(parse_var_decls(parser)?);
        while parser.consume(&[TokenKind::Semicolon]) {
            params.extend(parse_var_decls(parser)?);
        }
    }

    parser.expect(TokenKind::CloseParen)?;
    Ok(params)
}

pub fn parse_type(parser: &mut Parser) -> Result<Type, Error> {
    let token = parser.expect_one_of(TYPE_KEYWORDS)?;
    Ok(Type::from_keyword(token.kind).unwrap_or(Type::Error))
}
