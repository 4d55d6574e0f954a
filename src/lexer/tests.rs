//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords and identifiers
//! - Numeric, boolean, string and char literals
//! - Operators and punctuation
//! - Comments and position tracking
//! - Error tokens

use crate::Position;

use super::{
    lexer::{tokenize, Lexer},
    tokens::{TokenCategory, TokenKind},
};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source).iter().map(|t| t.kind).collect()
}

#[test]
fn test_tokenize_keywords() {
    let tokens = kinds(
        "program var const function procedure begin end if then else while do for to downto repeat until",
    );

    assert_eq!(
        tokens,
        vec![
            TokenKind::Program,
            TokenKind::Var,
            TokenKind::Const,
            TokenKind::Function,
            TokenKind::Procedure,
            TokenKind::Begin,
            TokenKind::End,
            TokenKind::If,
            TokenKind::Then,
            TokenKind::Else,
            TokenKind::While,
            TokenKind::Do,
            TokenKind::For,
            TokenKind::To,
            TokenKind::Downto,
            TokenKind::Repeat,
            TokenKind::Until,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_type_and_io_keywords() {
    let tokens = kinds("write writeln read not or and mod integer real boolean string char");

    assert_eq!(tokens[0], TokenKind::Write);
    assert_eq!(tokens[1], TokenKind::Writeln);
    assert_eq!(tokens[2], TokenKind::Read);
    assert_eq!(tokens[3], TokenKind::Not);
    assert_eq!(tokens[4], TokenKind::Or);
    assert_eq!(tokens[5], TokenKind::And);
    assert_eq!(tokens[6], TokenKind::Mod);
    assert_eq!(tokens[7], TokenKind::Integer);
    assert_eq!(tokens[8], TokenKind::Real);
    assert_eq!(tokens[9], TokenKind::Boolean);
    assert_eq!(tokens[10], TokenKind::String);
    assert_eq!(tokens[11], TokenKind::Char);
    assert_eq!(tokens[12], TokenKind::EOF);
}

#[test]
fn test_keywords_are_case_insensitive() {
    let tokens = tokenize("BEGIN WriteLn End");

    assert_eq!(tokens[0].kind, TokenKind::Begin);
    assert_eq!(tokens[0].value, "BEGIN");
    assert_eq!(tokens[1].kind, TokenKind::Writeln);
    assert_eq!(tokens[2].kind, TokenKind::End);
}

#[test]
fn test_tokenize_identifiers() {
    let tokens = tokenize("foo bar baz_123 _underscore CamelCase");

    for (token, expected) in tokens
        .iter()
        .zip(["foo", "bar", "baz_123", "_underscore", "CamelCase"])
    {
        assert_eq!(token.kind, TokenKind::Identifier);
        assert_eq!(token.value, expected);
    }
    assert_eq!(tokens[5].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_numbers() {
    let tokens = tokenize("42 3.14 0 1e5 2.5E-3");

    assert_eq!(tokens[0].kind, TokenKind::IntLiteral);
    assert_eq!(tokens[0].value, "42");
    assert_eq!(tokens[1].kind, TokenKind::RealLiteral);
    assert_eq!(tokens[1].value, "3.14");
    assert_eq!(tokens[2].kind, TokenKind::IntLiteral);
    assert_eq!(tokens[3].kind, TokenKind::RealLiteral);
    assert_eq!(tokens[3].value, "1e5");
    assert_eq!(tokens[4].kind, TokenKind::RealLiteral);
    assert_eq!(tokens[4].value, "2.5E-3");
    assert_eq!(tokens[5].kind, TokenKind::EOF);
}

#[test]
fn test_integer_before_period_stays_integer() {
    let tokens = kinds("1.");
    assert_eq!(tokens, vec![TokenKind::IntLiteral, TokenKind::Period, TokenKind::EOF]);
}

#[test]
fn test_tokenize_literals() {
    let tokens = tokenize(r#""hello world" 'c' true FALSE"#);

    assert_eq!(tokens[0].kind, TokenKind::StringLiteral);
    assert_eq!(tokens[0].value, "hello world");
    assert_eq!(tokens[1].kind, TokenKind::CharLiteral);
    assert_eq!(tokens[1].value, "c");
    assert_eq!(tokens[2].kind, TokenKind::BoolLiteral);
    assert_eq!(tokens[2].value, "true");
    assert_eq!(tokens[3].kind, TokenKind::BoolLiteral);
    assert_eq!(tokens[3].value, "false");
}

#[test]
fn test_tokenize_operators() {
    let tokens = kinds("+ - * / = <> < <= > >= :=");

    assert_eq!(
        tokens,
        vec![
            TokenKind::Plus,
            TokenKind::Dash,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Equals,
            TokenKind::NotEquals,
            TokenKind::Less,
            TokenKind::LessEquals,
            TokenKind::Greater,
            TokenKind::GreaterEquals,
            TokenKind::Assign,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_punctuation() {
    let tokens = kinds("; . , ( ) :");

    assert_eq!(
        tokens,
        vec![
            TokenKind::Semicolon,
            TokenKind::Period,
            TokenKind::Comma,
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::Colon,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_comments() {
    let tokens = tokenize("a { block\ncomment } b // line comment\nc");

    assert_eq!(tokens.len(), 4);
    assert_eq!(tokens[0].value, "a");
    assert_eq!(tokens[1].value, "b");
    assert_eq!(tokens[1].position, Position::new(2, 11));
    assert_eq!(tokens[2].value, "c");
    assert_eq!(tokens[2].position, Position::new(3, 1));
}

#[test]
fn test_token_positions() {
    let tokens = tokenize("program P;\n  var x: integer;");

    assert_eq!(tokens[0].position, Position::new(1, 1));
    assert_eq!(tokens[1].position, Position::new(1, 9));
    assert_eq!(tokens[2].position, Position::new(1, 10));
    assert_eq!(tokens[3].position, Position::new(2, 3));
    assert_eq!(tokens[4].position, Position::new(2, 7));
}

#[test]
fn test_columns_count_characters() {
    let tokens = tokenize("\"héllo\" x");
    assert_eq!(tokens[1].position, Position::new(1, 9));
}

#[test]
fn test_current_position_follows_consumed_tokens() {
    let mut lexer = Lexer::new("ab\n  cd");
    assert_eq!(lexer.current_position(), Position::new(1, 1));

    let first = lexer.next().expect("first token");
    assert_eq!(first.position, Position::new(1, 1));
    assert_eq!(lexer.current_position(), Position::new(1, 3));

    let second = lexer.next().expect("second token");
    assert_eq!(second.position, Position::new(2, 3));
    assert_eq!(lexer.current_position(), Position::new(2, 5));
}

#[test]
fn test_unknown_symbol_yields_error_token_then_eof() {
    let tokens = tokenize("a @ b");

    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[1].kind, TokenKind::Error);
    assert_eq!(tokens[1].value, "Unknown symbol `@`");
    assert_eq!(tokens[1].position, Position::new(1, 3));
    assert_eq!(tokens[2].kind, TokenKind::EOF);
}

#[test]
fn test_unterminated_string() {
    let tokens = tokenize("x := \"abc\ny");

    assert_eq!(tokens[2].kind, TokenKind::Error);
    assert_eq!(tokens[2].value, "Unterminated string");
    assert_eq!(tokens[3].kind, TokenKind::EOF);
}

#[test]
fn test_bad_char_literal() {
    let tokens = tokenize("'ab'");
    assert_eq!(tokens[0].kind, TokenKind::Error);
}

#[test]
fn test_unterminated_comment() {
    let tokens = tokenize("a { never closed");
    assert_eq!(tokens[1].kind, TokenKind::Error);
    assert_eq!(tokens[1].value, "Unterminated comment");
}

#[test]
fn test_lexer_is_not_restartable() {
    let mut lexer = Lexer::new("x");

    assert_eq!(lexer.next().map(|t| t.kind), Some(TokenKind::Identifier));
    assert_eq!(lexer.next().map(|t| t.kind), Some(TokenKind::EOF));
    assert!(lexer.next().is_none());
    assert!(lexer.next().is_none());
}

#[test]
fn test_token_categories() {
    assert_eq!(TokenKind::Program.category(), TokenCategory::Keyword);
    assert_eq!(TokenKind::Mod.category(), TokenCategory::Keyword);
    assert_eq!(TokenKind::Assign.category(), TokenCategory::Operator);
    assert_eq!(TokenKind::NotEquals.category(), TokenCategory::Operator);
    assert_eq!(TokenKind::Colon.category(), TokenCategory::Punctuation);
    assert_eq!(TokenKind::Identifier.category(), TokenCategory::Terminal);
    assert_eq!(TokenKind::Error.category(), TokenCategory::Terminal);
}

#[test]
fn test_token_display() {
    let tokens = tokenize("begin \"s\" 'c' x");

    assert_eq!(tokens[0].to_string(), "\u{ab}begin\u{bb}");
    assert_eq!(tokens[1].to_string(), "\"s\"");
    assert_eq!(tokens[2].to_string(), "'c'");
    assert_eq!(tokens[3].to_string(), "x");
    assert_eq!(tokens[4].to_string(), "EOF");
}
