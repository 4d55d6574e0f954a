//! The traversal contract tree consumers implement.
//!
//! A consumer provides one method per concrete node kind; none has a default,
//! so adding a node kind breaks every consumer until it handles it. The
//! `accept` methods dispatch on the variant tag.

use super::{
    ast::{Block, ConstDecl, Declarations, FnDecl, Program, VarDecl},
    expressions::{
        BinaryExpr, Expr, FnCallExpr, IdentifierExpr, LiteralExpr, TypeCastExpr, UnaryExpr,
    },
    statements::{
        AssignStmt, CallStmt, CompoundStmt, ForStmt, IfStmt, ReadStmt, RepeatStmt, Stmt,
        WhileStmt, WriteStmt,
    },
};

pub trait Visitor {
    type Output;

    fn visit_program(&mut self, program: &Program) -> Self::Output;
    fn visit_block(&mut self, block: &Block) -> Self::Output;
    fn visit_declarations(&mut self, declarations: &Declarations) -> Self::Output;
    fn visit_const_decl(&mut self, decl: &ConstDecl) -> Self::Output;
    fn visit_var_decl(&mut self, decl: &VarDecl) -> Self::Output;
    fn visit_fn_decl(&mut self, decl: &FnDecl) -> Self::Output;

    fn visit_compound_stmt(&mut self, stmt: &CompoundStmt) -> Self::Output;
    fn visit_write_stmt(&mut self, stmt: &WriteStmt) -> Self::Output;
    fn visit_assign_stmt(&mut self, stmt: &AssignStmt) -> Self::Output;
    fn visit_read_stmt(&mut self, stmt: &ReadStmt) -> Self::Output;
    fn visit_call_stmt(&mut self, stmt: &CallStmt) -> Self::Output;
    fn visit_if_stmt(&mut self, stmt: &IfStmt) -> Self::Output;
    fn visit_for_stmt(&mut self, stmt: &ForStmt) -> Self::Output;
    fn visit_while_stmt(&mut self, stmt: &WhileStmt) -> Self::Output;
    fn visit_repeat_stmt(&mut self, stmt: &RepeatStmt) -> Self::Output;

    fn visit_literal(&mut self, expr: &LiteralExpr) -> Self::Output;
    fn visit_identifier(&mut self, expr: &IdentifierExpr) -> Self::Output;
    fn visit_unary(&mut self, expr: &UnaryExpr) -> Self::Output;
    fn visit_binary(&mut self, expr: &BinaryExpr) -> Self::Output;
    fn visit_fn_call(&mut self, expr: &FnCallExpr) -> Self::Output;
    fn visit_type_cast(&mut self, expr: &TypeCastExpr) -> Self::Output;
}

impl Program {
    pub fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_program(self)
    }
}

impl Block {
    pub fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_block(self)
    }
}

impl Declarations {
    pub fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_declarations(self)
    }
}

impl ConstDecl {
    pub fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_const_decl(self)
    }
}

impl VarDecl {
    pub fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_var_decl(self)
    }
}

impl FnDecl {
    pub fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_fn_decl(self)
    }
}

impl Stmt {
    pub fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output {
        match self {
            Stmt::Compound(stmt) => visitor.visit_compound_stmt(stmt),
            Stmt::Write(stmt) => visitor.visit_write_stmt(stmt),
            Stmt::Assign(stmt) => visitor.visit_assign_stmt(stmt),
            Stmt::Read(stmt) => visitor.visit_read_stmt(stmt),
            Stmt::Call(stmt) => visitor.visit_call_stmt(stmt),
            Stmt::If(stmt) => visitor.visit_if_stmt(stmt),
            Stmt::For(stmt) => visitor.visit_for_stmt(stmt),
            Stmt::While(stmt) => visitor.visit_while_stmt(stmt),
            Stmt::Repeat(stmt) => visitor.visit_repeat_stmt(stmt),
        }
    }
}

impl Expr {
    pub fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output {
        match self {
            Expr::Literal(expr) => visitor.visit_literal(expr),
            Expr::Identifier(expr) => visitor.visit_identifier(expr),
            Expr::Unary(expr) => visitor.visit_unary(expr),
            Expr::Binary(expr) => visitor.visit_binary(expr),
            Expr::FnCall(expr) => visitor.visit_fn_call(expr),
            Expr::TypeCast(expr) => visitor.visit_type_cast(expr),
        }
    }
}
