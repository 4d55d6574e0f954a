//! Type checking and semantic analysis module.
//!
//! This module walks the parsed tree once, in source order, and:
//!
//! - Resolves every name against a stack of block scopes
//! - Rejects duplicate declarations within one block
//! - Types every expression and checks operator operands
//! - Checks call arity and argument types
//! - Makes implicit promotions explicit as `TypeCast` nodes
//!
//! The pass consumes the tree and hands back a rewritten one; it stops at
//! the first error.

pub mod symbol_table;
pub mod type_checker;
