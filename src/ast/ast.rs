use crate::lexer::tokens::Token;

use super::{expressions::Expr, statements::Stmt, types::Type};

/// The root of the tree: `program NAME; block.`
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub name: Token,
    pub block: Block,
}

/// Declarations followed by the statement they scope over.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub declarations: Declarations,
    pub body: Stmt,
}

/// Everything declared ahead of a block's body, each list in source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Declarations {
    pub consts: Vec<ConstDecl>,
    pub vars: Vec<VarDecl>,
    pub funcs: Vec<FnDecl>,
}

impl Declarations {
    pub fn is_empty(&self) -> bool {
        self.consts.is_empty() && self.vars.is_empty() && self.funcs.is_empty()
    }
}

/// A named constant. `value` is always a literal expression.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstDecl {
    pub name: Token,
    pub value: Expr,
}

/// A variable or a routine parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub name: Token,
    pub ty: Type,
}

/// A function, or a procedure when `is_procedure` is set (its `return_type` is then `Void`).
#[derive(Debug, Clone, PartialEq)]
pub struct FnDecl {
    pub is_procedure: bool,
    pub name: Token,
    pub params: Vec<VarDecl>,
    pub return_type: Type,
    pub block: Block,
}
