//! Lexical analysis module for the compiler.
//!
//! This module contains the lexer (tokenizer) that converts source text
//! into a stream of tokens for parsing. It handles:
//!
//! - Tokenization of source text using an ordered table of regex patterns
//! - Recognition of keywords (case-insensitively), identifiers, literals and operators
//! - Line/column tracking for error reporting
//! - `{ ... }` and `// ...` comments and whitespace
//!
//! Lexical errors are not raised here: the lexer emits an `Error` token carrying the
//! message and lets the parser report it.

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
