use std::rc::Rc;

use crate::{
    ast::{
        ast::{Block, ConstDecl, Declarations, FnDecl, Program, VarDecl},
        expressions::{BinaryExpr, Expr, FnCallExpr, IdentifierExpr, LiteralExpr, TypeCastExpr, UnaryExpr},
        statements::{
            AssignStmt, CallStmt, CompoundStmt, ForStmt, IfStmt, RepeatStmt, Stmt,
            WhileStmt, WriteStmt,
        },
        types::Type,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    SourceFile,
};

use super::symbol_table::{FnSignature, Symbol, SymbolTable};

/// State carried through one analysis pass.
#[derive(Debug)]
pub struct TypeChecker {
    pub symbols: SymbolTable,
    source: Rc<SourceFile>,
}

impl TypeChecker {
    pub fn new(source: Rc<SourceFile>) -> Self {
        TypeChecker {
            symbols: SymbolTable::new(),
            source,
        }
    }

    /// Builds a diagnostic pointing at `token`.
    pub fn error(&self, error: ErrorImpl, token: &Token) -> Error {
        Error::new(error, token.position)
            .with_token(token.value.clone())
            .with_source(Rc::clone(&self.source))
    }

    fn declare(&mut self, name: &Token, symbol: Symbol) -> Result<(), Error> {
        self.symbols
            .declare(name, symbol)
            .map_err(|error| error.with_source(Rc::clone(&self.source)))
    }
}

/// Analyses a parsed program and returns it with every expression typed.
///
/// Implicit promotions become explicit `TypeCast` nodes in the returned tree.
/// The first semantic error aborts the pass.
pub fn type_check(program: Program, source: Rc<SourceFile>) -> Result<Program, Error> {
    let mut type_checker = TypeChecker::new(source);
    let block = type_check_block(&mut type_checker, program.block, &[])?;

    tracing::debug!("type checked program `{}`", program.name.value);
    Ok(Program {
        name: program.name,
        block,
    })
}

/// Checks a block in a fresh scope. `params` are declared in that scope ahead of the block's own names.
pub fn type_check_block(
    type_checker: &mut TypeChecker,
    block: Block,
    params: &[VarDecl],
) -> Result<Block, Error> {
    type_checker.symbols.enter_scope();
    tracing::debug!("entering scope {}", type_checker.symbols.depth());

    for param in params {
        type_checker.declare(&param.name, Symbol::Variable(param.ty))?;
    }

    let declarations = type_check_declarations(type_checker, block.declarations)?;
    let body = type_check_stmt(type_checker, block.body)?;

    tracing::debug!("leaving scope {}", type_checker.symbols.depth());
    type_checker.symbols.exit_scope();

    Ok(Block { declarations, body })
}

pub fn type_check_declarations(
    type_checker: &mut TypeChecker,
    declarations: Declarations,
) -> Result<Declarations, Error> {
    let consts = declarations
        .consts
        .into_iter()
        .map(|decl| type_check_const_decl(type_checker, decl))
        .collect::<Result<Vec<_>, _>>()?;

    for var in &declarations.vars {
        type_checker.declare(&var.name, Symbol::Variable(var.ty))?;
    }

    let funcs = declarations
        .funcs
        .into_iter()
        .map(|decl| type_check_fn_decl(type_checker, decl))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Declarations {
        consts,
        vars: declarations.vars,
        funcs,
    })
}

fn type_check_const_decl(type_checker: &mut TypeChecker, decl: ConstDecl) -> Result<ConstDecl, Error> {
    let value = type_check_expr(type_checker, decl.value)?;
    type_checker.declare(&decl.name, Symbol::Constant(type_of(&value)))?;

    Ok(ConstDecl {
        name: decl.name,
        value,
    })
}

/// Registers the routine before checking its body, so the body may call it.
fn type_check_fn_decl(type_checker: &mut TypeChecker, decl: FnDecl) -> Result<FnDecl, Error> {
    let FnDecl {
        is_procedure,
        name,
        params,
        return_type,
        block,
    } = decl;

    let signature = FnSignature {
        params: params.iter().map(|param| param.ty).collect(),
        return_type,
        is_procedure,
    };
    type_checker.declare(&name, Symbol::Function(signature))?;

    let block = type_check_block(type_checker, block, &params)?;

    Ok(FnDecl {
        is_procedure,
        name,
        params,
        return_type,
        block,
    })
}

pub fn type_check_stmt(type_checker: &mut TypeChecker, stmt: Stmt) -> Result<Stmt, Error> {
    match stmt {
        Stmt::Compound(compound) => {
            let statements = type_check_stmts(type_checker, compound.statements)?;
            Ok(Stmt::Compound(CompoundStmt { statements }))
        }
        Stmt::Write(write) => {
            let exprs = type_check_exprs(type_checker, write.exprs)?;
            Ok(Stmt::Write(WriteStmt {
                new_line: write.new_line,
                exprs,
            }))
        }
        Stmt::Assign(assign) => {
            let target = type_checker.symbols.lookup(&assign.name.value, false);
            let expr = type_check_expr(type_checker, assign.expr)?;

            let expr = match target {
                Some(Symbol::Variable(ty)) => add_type_cast(type_checker, &assign.name, expr, ty)?,
                Some(Symbol::Constant(_)) | Some(Symbol::Function(_)) => expr,
                None => {
                    return Err(type_checker.error(
                        ErrorImpl::UnknownVariable {
                            name: assign.name.value.clone(),
                        },
                        &assign.name,
                    ))
                }
            };

            Ok(Stmt::Assign(AssignStmt {
                name: assign.name,
                expr,
            }))
        }
        Stmt::Read(read) => {
            for var in &read.vars {
                resolve_name(type_checker, var)?;
            }
            Ok(Stmt::Read(read))
        }
        Stmt::Call(call) => {
            let (arguments, _) = type_check_call(type_checker, &call.name, call.arguments)?;
            Ok(Stmt::Call(CallStmt {
                name: call.name,
                arguments,
            }))
        }
        Stmt::If(stmt) => {
            let condition = type_check_expr(type_checker, stmt.condition)?;
            let then_stmt = Box::new(type_check_stmt(type_checker, *stmt.then_stmt)?);
            let else_stmt = match stmt.else_stmt {
                Some(else_stmt) => Some(Box::new(type_check_stmt(type_checker, *else_stmt)?)),
                None => None,
            };

            Ok(Stmt::If(IfStmt {
                condition,
                then_stmt,
                else_stmt,
            }))
        }
        Stmt::For(stmt) => {
            resolve_name(type_checker, &stmt.var)?;
            let start = type_check_expr(type_checker, stmt.start)?;
            let end = type_check_expr(type_checker, stmt.end)?;
            let body = Box::new(type_check_stmt(type_checker, *stmt.body)?);

            Ok(Stmt::For(ForStmt {
                var: stmt.var,
                start,
                descending: stmt.descending,
                end,
                body,
            }))
        }
        Stmt::While(stmt) => {
            let condition = type_check_expr(type_checker, stmt.condition)?;
            let body = Box::new(type_check_stmt(type_checker, *stmt.body)?);
            Ok(Stmt::While(WhileStmt { condition, body }))
        }
        Stmt::Repeat(stmt) => {
            let statements = type_check_stmts(type_checker, stmt.statements)?;
            let condition = type_check_expr(type_checker, stmt.condition)?;
            Ok(Stmt::Repeat(RepeatStmt {
                statements,
                condition,
            }))
        }
    }
}

fn type_check_stmts(type_checker: &mut TypeChecker, stmts: Vec<Stmt>) -> Result<Vec<Stmt>, Error> {
    stmts
        .into_iter()
        .map(|stmt| type_check_stmt(type_checker, stmt))
        .collect()
}

/// Types `expr` and everything below it, returning the possibly rewritten node.
pub fn type_check_expr(type_checker: &mut TypeChecker, expr: Expr) -> Result<Expr, Error> {
    match expr {
        Expr::Literal(literal) => {
            let ty = Type::from_literal(literal.value.kind);
            Ok(Expr::Literal(LiteralExpr {
                value: literal.value,
                ty: Some(ty),
            }))
        }
        Expr::Identifier(identifier) => {
            let ty = match resolve_name(type_checker, &identifier.name)? {
                Symbol::Variable(ty) | Symbol::Constant(ty) => ty,
                Symbol::Function(signature) => {
                    check_returns_value(type_checker, &identifier.name, &signature)?;
                    signature.return_type
                }
            };

            Ok(Expr::Identifier(IdentifierExpr {
                name: identifier.name,
                ty: Some(ty),
            }))
        }
        Expr::Unary(unary) => {
            let operand = type_check_expr(type_checker, *unary.expr)?;
            let ty = type_of(&operand);

            Ok(Expr::Unary(UnaryExpr {
                operator: unary.operator,
                expr: Box::new(operand),
                ty: Some(ty),
            }))
        }
        Expr::Binary(binary) => type_check_binary(type_checker, binary),
        Expr::FnCall(call) => {
            let (arguments, signature) = type_check_call(type_checker, &call.name, call.arguments)?;
            check_returns_value(type_checker, &call.name, &signature)?;

            Ok(Expr::FnCall(FnCallExpr {
                name: call.name,
                arguments,
                ty: Some(signature.return_type),
            }))
        }
        Expr::TypeCast(cast) => {
            let inner = type_check_expr(type_checker, *cast.expr)?;
            Ok(Expr::TypeCast(TypeCastExpr {
                expr: Box::new(inner),
                ty: cast.ty,
            }))
        }
    }
}

fn type_check_exprs(type_checker: &mut TypeChecker, exprs: Vec<Expr>) -> Result<Vec<Expr>, Error> {
    exprs
        .into_iter()
        .map(|expr| type_check_expr(type_checker, expr))
        .collect()
}

fn type_check_binary(type_checker: &mut TypeChecker, binary: BinaryExpr) -> Result<Expr, Error> {
    let left = type_check_expr(type_checker, *binary.left)?;
    let right = type_check_expr(type_checker, *binary.right)?;
    let (left_ty, right_ty) = (type_of(&left), type_of(&right));

    let ty = binary_result_type(binary.operator.kind, left_ty, right_ty);
    if ty == Type::Error {
        return Err(type_checker.error(
            ErrorImpl::InvalidOperands {
                operator: binary.operator.value.clone(),
                left: left_ty.to_string(),
                right: right_ty.to_string(),
            },
            &binary.operator,
        ));
    }

    let (left_cast, right_cast) = binary_casts(left_ty, right_ty);
    let left = match left_cast {
        Some(target) => cast(left, target),
        None => left,
    };
    let right = match right_cast {
        Some(target) => cast(right, target),
        None => right,
    };

    Ok(Expr::Binary(BinaryExpr {
        left: Box::new(left),
        operator: binary.operator,
        right: Box::new(right),
        ty: Some(ty),
    }))
}

/// Resolves the callee, checks arity and coerces each argument to its parameter type.
fn type_check_call(
    type_checker: &mut TypeChecker,
    name: &Token,
    arguments: Vec<Expr>,
) -> Result<(Vec<Expr>, FnSignature), Error> {
    let signature = match type_checker.symbols.lookup(&name.value, false) {
        Some(Symbol::Function(signature)) => signature,
        _ => {
            return Err(type_checker.error(
                ErrorImpl::UnknownFunction {
                    name: name.value.clone(),
                },
                name,
            ))
        }
    };

    if signature.params.len() != arguments.len() {
        return Err(type_checker.error(
            ErrorImpl::ParameterCountMismatch {
                function: name.value.clone(),
                expected: signature.params.len(),
                received: arguments.len(),
            },
            name,
        ));
    }

    let mut checked = Vec::with_capacity(arguments.len());
    for (argument, &param) in arguments.into_iter().zip(signature.params.iter()) {
        let argument = type_check_expr(type_checker, argument)?;
        let argument = add_type_cast(type_checker, name, argument, param)?;

        let ty = type_of(&argument);
        if ty != param {
            return Err(type_checker.error(
                ErrorImpl::ParameterTypeMismatch {
                    function: name.value.clone(),
                    expected: param.to_string(),
                    received: ty.to_string(),
                },
                name,
            ));
        }
        checked.push(argument);
    }

    Ok((checked, signature))
}

fn resolve_name(type_checker: &TypeChecker, name: &Token) -> Result<Symbol, Error> {
    type_checker
        .symbols
        .lookup(&name.value, false)
        .ok_or_else(|| {
            type_checker.error(
                ErrorImpl::UnknownVariable {
                    name: name.value.clone(),
                },
                name,
            )
        })
}

fn check_returns_value(
    type_checker: &TypeChecker,
    name: &Token,
    signature: &FnSignature,
) -> Result<(), Error> {
    if signature.is_procedure || !signature.return_type.is_value() {
        return Err(type_checker.error(
            ErrorImpl::ProcedureInExpression {
                name: name.value.clone(),
            },
            name,
        ));
    }
    Ok(())
}

/// The type of an expression the checker has already visited.
fn type_of(expr: &Expr) -> Type {
    expr.get_type().unwrap_or(Type::Error)
}

fn cast(expr: Expr, target: Type) -> Expr {
    tracing::trace!(
        "promoting `{}` at {} to {}",
        expr.get_token().value,
        expr.get_position(),
        target
    );
    Expr::type_cast(expr, target)
}

/// The implicit promotions allowed when a value is stored or passed.
pub fn can_promote(from: Type, to: Type) -> bool {
    matches!(
        (from, to),
        (Type::Integer, Type::Real) | (Type::Char, Type::Integer) | (Type::Char, Type::String)
    )
}

/// Converts `expr` to `target`, wrapping it in a cast when a promotion is needed.
///
/// An expression that already has the target type comes back unchanged, so
/// applying this twice never stacks casts.
pub fn add_type_cast(
    type_checker: &TypeChecker,
    token: &Token,
    expr: Expr,
    target: Type,
) -> Result<Expr, Error> {
    let ty = type_of(&expr);
    if ty == target {
        return Ok(expr);
    }

    if !can_promote(ty, target) {
        return Err(type_checker.error(
            ErrorImpl::InvalidType {
                from: ty.to_string(),
                to: target.to_string(),
            },
            token,
        ));
    }

    Ok(cast(expr, target))
}

/// The result type of a binary operator, or `Type::Error` when no rule applies.
///
/// Rules are tried in order and the first match wins.
pub fn binary_result_type(operator: TokenKind, left: Type, right: Type) -> Type {
    use TokenKind::{
        And, Dash, Equals, Greater, GreaterEquals, Less, LessEquals, Mod, NotEquals, Or, Plus,
        Slash, Star,
    };

    match (operator, left, right) {
        (Plus | Dash | Star | Slash, l, r) if l.is_numeric() && r.is_numeric() => {
            if l == r {
                l
            } else {
                Type::Real
            }
        }
        (Mod, Type::Integer, Type::Integer) => Type::Integer,
        (Plus, Type::String, _) | (Plus, _, Type::String) => Type::String,
        (Less | LessEquals | Greater | GreaterEquals, l, r) if l.is_numeric() && r.is_numeric() => {
            Type::Boolean
        }
        (Less | LessEquals | Greater | GreaterEquals, l, r) if l.is_ordered() && l == r => {
            Type::Boolean
        }
        (Equals | NotEquals, l, r) if l == r => Type::Boolean,
        (Equals | NotEquals, l, r) if l.is_numeric() && r.is_numeric() => Type::Boolean,
        (And | Or, l, r) if matches!(l, Type::Integer | Type::Boolean) && l == r => l,
        _ => Type::Error,
    }
}

/// The casts a well-typed binary expression needs on its (left, right) operands.
pub fn binary_casts(left: Type, right: Type) -> (Option<Type>, Option<Type>) {
    match (left, right) {
        (Type::Integer, Type::Real) => (Some(Type::Real), None),
        (Type::Real, Type::Integer) => (None, Some(Type::Real)),
        (Type::String, r) if r != Type::String => (None, Some(Type::String)),
        (l, Type::String) if l != Type::String => (Some(Type::String), None),
        _ => (None, None),
    }
}
