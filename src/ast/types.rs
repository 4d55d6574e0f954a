//! Type system definitions for the AST.
//!
//! The language has five value types plus two markers: `Void` is the
//! "return type" of a procedure, and `Error` is what the operator table
//! yields when no rule matches. Neither marker survives a successful analysis
//! on an expression node.

use std::fmt::Display;

use crate::lexer::tokens::TokenKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Integer,
    Real,
    Boolean,
    String,
    Char,
    Void,
    Error,
}

impl Type {
    pub fn is_numeric(&self) -> bool {
        matches!(self, Type::Integer | Type::Real)
    }

    /// Numeric, string or char: the types the ordering operators accept.
    pub fn is_ordered(&self) -> bool {
        matches!(self, Type::Integer | Type::Real | Type::String | Type::Char)
    }

    /// True for the five types a well-formed expression can have.
    pub fn is_value(&self) -> bool {
        !matches!(self, Type::Void | Type::Error)
    }

    /// Maps a type keyword token onto its type.
    pub fn from_keyword(kind: TokenKind) -> Option<Type> {
        match kind {
            TokenKind::Integer => Some(Type::Integer),
            TokenKind::Real => Some(Type::Real),
            TokenKind::Boolean => Some(Type::Boolean),
            TokenKind::String => Some(Type::String),
            TokenKind::Char => Some(Type::Char),
            _ => None,
        }
    }

    /// Maps a literal token onto the type of the value it spells.
    pub fn from_literal(kind: TokenKind) -> Type {
        match kind {
            TokenKind::IntLiteral => Type::Integer,
            TokenKind::RealLiteral => Type::Real,
            TokenKind::BoolLiteral => Type::Boolean,
            TokenKind::StringLiteral => Type::String,
            TokenKind::CharLiteral => Type::Char,
            _ => Type::Error,
        }
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Type::Integer => "integer",
            Type::Real => "real",
            Type::Boolean => "boolean",
            Type::String => "string",
            Type::Char => "char",
            Type::Void => "void",
            Type::Error => "error",
        };
        write!(f, "{}", name)
    }
}
