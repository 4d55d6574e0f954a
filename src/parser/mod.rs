//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! A recursive-descent parser with one token of lookahead. It pulls tokens
//! from the lexer as it needs them and stops at the first error:
//!
//! - Program, block and declaration sections
//! - Statements, each owning its terminating semicolon where it needs one
//! - Expressions through a fixed precedence chain

pub mod decl;
pub mod expr;
pub mod parser;
pub mod stmt;

#[cfg(test)]
mod tests;
