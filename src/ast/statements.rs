use crate::lexer::tokens::Token;

use super::expressions::Expr;

/// Statement Types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StmtType {
    Compound,
    Write,
    Assign,
    Read,
    Call,
    If,
    For,
    While,
    Repeat,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Compound(CompoundStmt),
    Write(WriteStmt),
    Assign(AssignStmt),
    Read(ReadStmt),
    Call(CallStmt),
    If(IfStmt),
    For(ForStmt),
    While(WhileStmt),
    Repeat(RepeatStmt),
}

impl Stmt {
    pub fn get_stmt_type(&self) -> StmtType {
        match self {
            Stmt::Compound(_) => StmtType::Compound,
            Stmt::Write(_) => StmtType::Write,
            Stmt::Assign(_) => StmtType::Assign,
            Stmt::Read(_) => StmtType::Read,
            Stmt::Call(_) => StmtType::Call,
            Stmt::If(_) => StmtType::If,
            Stmt::For(_) => StmtType::For,
            Stmt::While(_) => StmtType::While,
            Stmt::Repeat(_) => StmtType::Repeat,
        }
    }
}

/// `begin { stmt [;] } end`
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundStmt {
    pub statements: Vec<Stmt>,
}

/// `write(...)`, or `writeln(...)` when `new_line` is set.
#[derive(Debug, Clone, PartialEq)]
pub struct WriteStmt {
    pub new_line: bool,
    pub exprs: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignStmt {
    pub name: Token,
    pub expr: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReadStmt {
    pub vars: Vec<Token>,
}

/// A procedure (or function) call in statement position.
#[derive(Debug, Clone, PartialEq)]
pub struct CallStmt {
    pub name: Token,
    pub arguments: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_stmt: Box<Stmt>,
    pub else_stmt: Option<Box<Stmt>>,
}

/// `for var := start to|downto end do body`
#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub var: Token,
    pub start: Expr,
    pub descending: bool,
    pub end: Expr,
    pub body: Box<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub condition: Expr,
    pub body: Box<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RepeatStmt {
    pub statements: Vec<Stmt>,
    pub condition: Expr,
}
