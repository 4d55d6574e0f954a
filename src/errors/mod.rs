//! Error types and error handling for the compiler.
//!
//! This module defines the diagnostics raised while compiling a unit:
//!
//! - Error structures with source position and the offending token
//! - Syntax variants raised by the parser (and the lexer's error tokens)
//! - Semantic variants raised by the type checker
//! - Helpful suggestions attached to each variant
//!
//! Every diagnostic is terminal for the compilation unit that raised it.

pub mod errors;
