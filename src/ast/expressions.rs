use crate::{lexer::tokens::Token, Position};

use super::types::Type;

/// Expression Types
///
/// The discriminant of [`Expr`], for callers that only need to know the shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExprType {
    Literal,
    Identifier,
    Unary,
    Binary,
    FnCall,
    TypeCast,
}

/// An expression node.
///
/// Every variant carries a `ty` slot that stays `None` until the type checker
/// visits the node. The checker is the only pass that writes it.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(LiteralExpr),
    Identifier(IdentifierExpr),
    Unary(UnaryExpr),
    Binary(BinaryExpr),
    FnCall(FnCallExpr),
    TypeCast(TypeCastExpr),
}

// LITERALS

/// Literal Expression
/// An integer, real, boolean, string or char literal.
#[derive(Debug, Clone, PartialEq)]
pub struct LiteralExpr {
    pub value: Token,
    pub ty: Option<Type>,
}

/// Identifier Expression
/// A reference to a variable, constant or parameterless function.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentifierExpr {
    pub name: Token,
    pub ty: Option<Type>,
}

// COMPLEX

/// Unary Expression
/// `+x`, `-x` or `not x`.
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    pub operator: Token,
    pub expr: Box<Expr>,
    pub ty: Option<Type>,
}

/// Binary Expression
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub operator: Token,
    pub right: Box<Expr>,
    pub ty: Option<Type>,
}

/// Function Call Expression
#[derive(Debug, Clone, PartialEq)]
pub struct FnCallExpr {
    pub name: Token,
    pub arguments: Vec<Expr>,
    pub ty: Option<Type>,
}

/// Type Cast Expression
/// An implicit promotion made explicit. Only the type checker creates these,
/// so the target type is always known.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeCastExpr {
    pub expr: Box<Expr>,
    pub ty: Type,
}

impl Expr {
    pub fn literal(value: Token) -> Self {
        Expr::Literal(LiteralExpr { value, ty: None })
    }

    pub fn identifier(name: Token) -> Self {
        Expr::Identifier(IdentifierExpr { name, ty: None })
    }

    pub fn unary(operator: Token, expr: Expr) -> Self {
        Expr::Unary(UnaryExpr {
            operator,
            expr: Box::new(expr),
            ty: None,
        })
    }

    pub fn binary(left: Expr, operator: Token, right: Expr) -> Self {
        Expr::Binary(BinaryExpr {
            left: Box::new(left),
            operator,
            right: Box::new(right),
            ty: None,
        })
    }

    pub fn fn_call(name: Token, arguments: Vec<Expr>) -> Self {
        Expr::FnCall(FnCallExpr {
            name,
            arguments,
            ty: None,
        })
    }

    pub fn type_cast(expr: Expr, ty: Type) -> Self {
        Expr::TypeCast(TypeCastExpr {
            expr: Box::new(expr),
            ty,
        })
    }

    pub fn get_expr_type(&self) -> ExprType {
        match self {
            Expr::Literal(_) => ExprType::Literal,
            Expr::Identifier(_) => ExprType::Identifier,
            Expr::Unary(_) => ExprType::Unary,
            Expr::Binary(_) => ExprType::Binary,
            Expr::FnCall(_) => ExprType::FnCall,
            Expr::TypeCast(_) => ExprType::TypeCast,
        }
    }

    /// The inferred type, or `None` before type checking.
    pub fn get_type(&self) -> Option<Type> {
        match self {
            Expr::Literal(literal) => literal.ty,
            Expr::Identifier(identifier) => identifier.ty,
            Expr::Unary(unary) => unary.ty,
            Expr::Binary(binary) => binary.ty,
            Expr::FnCall(call) => call.ty,
            Expr::TypeCast(cast) => Some(cast.ty),
        }
    }

    /// The token diagnostics about this expression point at.
    pub fn get_token(&self) -> &Token {
        match self {
            Expr::Literal(literal) => &literal.value,
            Expr::Identifier(identifier) => &identifier.name,
            Expr::Unary(unary) => &unary.operator,
            Expr::Binary(binary) => &binary.operator,
            Expr::FnCall(call) => &call.name,
            Expr::TypeCast(cast) => cast.expr.get_token(),
        }
    }

    pub fn get_position(&self) -> Position {
        self.get_token().position
    }
}
