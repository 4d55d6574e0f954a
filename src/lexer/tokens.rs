use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Position;

lazy_static! {
    /// Reserved words, keyed by their lower-case spelling.
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("program", TokenKind::Program);
        map.insert("var", TokenKind::Var);
        map.insert("const", TokenKind::Const);
        map.insert("function", TokenKind::Function);
        map.insert("procedure", TokenKind::Procedure);
        map.insert("begin", TokenKind::Begin);
        map.insert("end", TokenKind::End);
        map.insert("if", TokenKind::If);
        map.insert("then", TokenKind::Then);
        map.insert("else", TokenKind::Else);
        map.insert("while", TokenKind::While);
        map.insert("do", TokenKind::Do);
        map.insert("for", TokenKind::For);
        map.insert("to", TokenKind::To);
        map.insert("downto", TokenKind::Downto);
        map.insert("repeat", TokenKind::Repeat);
        map.insert("until", TokenKind::Until);
        map.insert("write", TokenKind::Write);
        map.insert("writeln", TokenKind::Writeln);
        map.insert("read", TokenKind::Read);
        map.insert("not", TokenKind::Not);
        map.insert("or", TokenKind::Or);
        map.insert("and", TokenKind::And);
        map.insert("mod", TokenKind::Mod);
        map.insert("integer", TokenKind::Integer);
        map.insert("real", TokenKind::Real);
        map.insert("boolean", TokenKind::Boolean);
        map.insert("string", TokenKind::String);
        map.insert("char", TokenKind::Char);
        map.insert("true", TokenKind::BoolLiteral);
        map.insert("false", TokenKind::BoolLiteral);
        map
    };
}

/// The four groups the token kinds fall into.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TokenCategory {
    Keyword,
    Operator,
    Punctuation,
    Terminal,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    // Keywords
    Program,
    Var,
    Const,
    Function,
    Procedure,
    Begin,
    End,
    If,
    Then,
    Else,
    While,
    Do,
    For,
    To,
    Downto,
    Repeat,
    Until,
    Write,
    Writeln,
    Read,
    Not,
    Or,
    And,
    Mod,
    Integer,
    Real,
    Boolean,
    String,
    Char,

    // Operators
    Plus,
    Dash,
    Star,
    Slash,
    Equals,
    NotEquals,
    Less,
    LessEquals,
    Greater,
    GreaterEquals,
    Assign,

    // Punctuation
    Semicolon,
    Period,
    Comma,
    OpenParen,
    CloseParen,
    Colon,

    // Terminals
    Identifier,
    IntLiteral,
    RealLiteral,
    BoolLiteral,
    StringLiteral,
    CharLiteral,
    EOF,
    Error,
}

impl TokenKind {
    pub fn category(&self) -> TokenCategory {
        use TokenKind::*;
        match self {
            Program | Var | Const | Function | Procedure | Begin | End | If | Then | Else
            | While | Do | For | To | Downto | Repeat | Until | Write | Writeln | Read | Not
            | Or | And | Mod | Integer | Real | Boolean | String | Char => TokenCategory::Keyword,
            Plus | Dash | Star | Slash | Equals | NotEquals | Less | LessEquals | Greater
            | GreaterEquals | Assign => TokenCategory::Operator,
            Semicolon | Period | Comma | OpenParen | CloseParen | Colon => {
                TokenCategory::Punctuation
            }
            Identifier | IntLiteral | RealLiteral | BoolLiteral | StringLiteral | CharLiteral
            | EOF | Error => TokenCategory::Terminal,
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub position: Position,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>, position: Position) -> Self {
        Token {
            kind,
            value: value.into(),
            position,
        }
    }

    pub fn is_one_of_many(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }
}

/// Prints a token the way diagnostics quote it.
impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TokenKind::EOF | TokenKind::Error => write!(f, "{}", self.kind),
            TokenKind::StringLiteral => write!(f, "\"{}\"", self.value),
            TokenKind::CharLiteral => write!(f, "'{}'", self.value),
            kind if kind.category() == TokenCategory::Keyword => {
                write!(f, "\u{ab}{}\u{bb}", self.value.to_lowercase())
            }
            _ => write!(f, "{}", self.value),
        }
    }
}
