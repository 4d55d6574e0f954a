use crate::{
    ast::statements::{
        AssignStmt, CallStmt, CompoundStmt, ForStmt, IfStmt, ReadStmt, RepeatStmt, Stmt,
        WhileStmt, WriteStmt,
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{
    decl::parse_ident_list,
    expr::{parse_arg_list, parse_expr},
    parser::Parser,
};

/// Dispatches on the lookahead token to the matching statement rule.
///
/// Terminating semicolons are owned by the rule that needs them: `read`,
/// `if` and `while` consume their own; a compound statement allows one after
/// each member.
pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    tracing::trace!(
        "statement at {} starting with {}",
        parser.get_position(),
        parser.current_token()
    );

    match parser.current_token_kind() {
        TokenKind::Begin => parse_compound_stmt(parser),
        TokenKind::Write | TokenKind::Writeln => parse_write_stmt(parser),
        TokenKind::Read => parse_read_stmt(parser),
        TokenKind::If => parse_if_stmt(parser),
        TokenKind::For => parse_for_stmt(parser),
        TokenKind::While => parse_while_stmt(parser),
        TokenKind::Repeat => parse_repeat_stmt(parser),
        TokenKind::Identifier => parse_ident_stmt(parser),
        _ => Err(parser.unexpected()),
    }
}

pub fn parse_compound_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.advance();
    let mut statements = Vec::new();

    while !parser.consume(&[TokenKind::End]) {
        statements.push(parse_stmt(parser)?);
        parser.consume(&[TokenKind::Semicolon]);
    }

    Ok(Stmt::Compound(CompoundStmt { statements }))
}

pub fn parse_write_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let new_line = parser.advance().kind == TokenKind::Writeln;
    let exprs = parse_arg_list(parser)?;

    Ok(Stmt::Write(WriteStmt { new_line, exprs }))
}

/// `read ( a, b ) ;`
pub fn parse_read_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.advance();
    parser.expect(TokenKind::OpenParen)?;
    let vars = parse_ident_list(parser)?;
    parser.expect(TokenKind::CloseParen)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::Read(ReadStmt { vars }))
}

/// An identifier starts either a call (`name(...)`) or an assignment (`name := expr`).
fn parse_ident_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let name = parser.advance().clone();

    if parser.peek(&[TokenKind::OpenParen]) {
        let arguments = parse_arg_list(parser)?;
        return Ok(Stmt::Call(CallStmt { name, arguments }));
    }

    parser.expect(TokenKind::Assign)?;
    let expr = parse_expr(parser)?;

    Ok(Stmt::Assign(AssignStmt { name, expr }))
}

/// `if cond then stmt ; [else stmt ;]`
pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.advance();
    let condition = parse_expr(parser)?;
    parser.expect(TokenKind::Then)?;
    let then_stmt = Box::new(parse_stmt(parser)?);
    parser.expect(TokenKind::Semicolon)?;

    let else_stmt = if parser.consume(&[TokenKind::Else]) {
        let stmt = parse_stmt(parser)?;
        parser.expect(TokenKind::Semicolon)?;
        Some(Box::new(stmt))
    } else {
        None
    };

    Ok(Stmt::If(IfStmt {
        condition,
        then_stmt,
        else_stmt,
    }))
}

/// `for var := start to|downto end do stmt`
pub fn parse_for_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.advance();
    let var = parser.expect(TokenKind::Identifier)?;
    parser.expect(TokenKind::Assign)?;
    let start = parse_expr(parser)?;
    let direction = parser.expect_one_of(&[TokenKind::To, TokenKind::Downto])?;
    let end = parse_expr(parser)?;
    parser.expect(TokenKind::Do)?;
    let body = Box::new(parse_stmt(parser)?);

    Ok(Stmt::For(ForStmt {
        var,
        start,
        descending: direction.kind == TokenKind::Downto,
        end,
        body,
    }))
}

/// `while cond do stmt ;`
pub fn parse_while_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.advance();
    let condition = parse_expr(parser)?;
    parser.expect(TokenKind::Do)?;
    let body = Box::new(parse_stmt(parser)?);
    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::While(WhileStmt { condition, body }))
}

/// `repeat stmt ; { stmt ; } until cond`
pub fn parse_repeat_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.advance();
    let mut statements = Vec::new();

    loop {
        statements.push(parse_stmt(parser)?);
        parser.expect(TokenKind::Semicolon)?;
        if parser.consume(&[TokenKind::Until]) {
            break;
        }
    }

    let condition = parse_expr(parser)?;
    Ok(Stmt::Repeat(RepeatStmt {
        statements,
        condition,
    }))
}
