/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: Program, block and declaration nodes
/// - expressions: Expression variants, each with an inferred-type slot
/// - statements: Statement variants
/// - types: The closed set of value types
/// - visitor: The traversal contract consumers implement
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;
pub mod visitor;
