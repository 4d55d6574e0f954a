//! Unit tests for the parser module.
//!
//! This module contains tests for parsing:
//! - Program structure and declaration sections
//! - Statements and their semicolon rules
//! - Expression precedence and associativity
//! - Syntax errors and their positions

use crate::{
    ast::{
        ast::Program,
        expressions::{Expr, ExprType},
        statements::{Stmt, StmtType},
        types::Type,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    parse_source,
    Position,
};

fn parse_ok(source: &str) -> Program {
    match parse_source(source, "test.pas") {
        Ok(program) => program,
        Err(error) => panic!("unexpected parse error: {}", error),
    }
}

fn parse_err(source: &str) -> Error {
    match parse_source(source, "test.pas") {
        Ok(program) => panic!("expected a parse error, got {:?}", program),
        Err(error) => error,
    }
}

fn body(program: &Program) -> &[Stmt] {
    match &program.block.body {
        Stmt::Compound(compound) => &compound.statements,
        other => panic!("expected a compound body, got {:?}", other),
    }
}

/// Parses `expr` as the right-hand side of an assignment and returns it.
fn parse_rhs(expr: &str) -> Expr {
    let program = parse_ok(&format!("program T; begin x := {} end.", expr));
    match &body(&program)[0] {
        Stmt::Assign(assign) => assign.expr.clone(),
        other => panic!("expected an assignment, got {:?}", other),
    }
}

fn binary_parts(expr: &Expr) -> (&Expr, &str, &Expr) {
    match expr {
        Expr::Binary(binary) => (&binary.left, binary.operator.value.as_str(), &binary.right),
        other => panic!("expected a binary expression, got {:?}", other),
    }
}

fn name_of(expr: &Expr) -> &str {
    &expr.get_token().value
}

#[test]
fn test_parse_minimal_program() {
    let program = parse_ok("program Hello; begin end.");

    assert_eq!(program.name.value, "Hello");
    assert!(program.block.declarations.is_empty());
    assert!(body(&program).is_empty());
}

#[test]
fn test_parse_var_groups_share_type() {
    let program = parse_ok("program T; var a, b: integer; c: string; begin end.");
    let vars = &program.block.declarations.vars;

    assert_eq!(vars.len(), 3);
    assert_eq!(vars[0].name.value, "a");
    assert_eq!(vars[0].ty, Type::Integer);
    assert_eq!(vars[1].name.value, "b");
    assert_eq!(vars[1].ty, Type::Integer);
    assert_eq!(vars[2].name.value, "c");
    assert_eq!(vars[2].ty, Type::String);
}

#[test]
fn test_parse_const_section() {
    let program = parse_ok("program T; const max = 10; greeting = \"hi\"; begin end.");
    let consts = &program.block.declarations.consts;

    assert_eq!(consts.len(), 2);
    assert_eq!(consts[0].name.value, "max");
    assert_eq!(consts[0].value.get_token().kind, TokenKind::IntLiteral);
    assert_eq!(consts[1].value.get_token().kind, TokenKind::StringLiteral);
}

#[test]
fn test_parse_const_requires_literal() {
    let error = parse_err("program T; const max = other; begin end.");
    assert!(matches!(
        error.get_error_impl(),
        ErrorImpl::ExpectedToken { .. }
    ));
}

#[test]
fn test_parse_sections_repeat_in_any_order() {
    let program = parse_ok(
        "program T;
         var a: integer;
         procedure p(); begin end;
         var b: real;
         const c = 1;
         begin end.",
    );
    let declarations = &program.block.declarations;

    assert_eq!(declarations.vars.len(), 2);
    assert_eq!(declarations.funcs.len(), 1);
    assert_eq!(declarations.consts.len(), 1);
}

#[test]
fn test_parse_function_declaration() {
    let program = parse_ok(
        "program T;
         function add(a, b: integer; scale: real): real;
         var tmp: real;
         begin tmp := a + b end;
         begin end.",
    );
    let function = &program.block.declarations.funcs[0];

    assert!(!function.is_procedure);
    assert_eq!(function.name.value, "add");
    assert_eq!(function.return_type, Type::Real);
    let params: Vec<(&str, Type)> = function
        .params
        .iter()
        .map(|param| (param.name.value.as_str(), param.ty))
        .collect();
    assert_eq!(
        params,
        vec![("a", Type::Integer), ("b", Type::Integer), ("scale", Type::Real)]
    );
    assert_eq!(function.block.declarations.vars.len(), 1);
}

#[test]
fn test_parse_procedure_has_void_return() {
    let program = parse_ok("program T; procedure show(); begin end; begin end.");
    let procedure = &program.block.declarations.funcs[0];

    assert!(procedure.is_procedure);
    assert!(procedure.params.is_empty());
    assert_eq!(procedure.return_type, Type::Void);
}

#[test]
fn test_parse_function_requires_return_type() {
    let error = parse_err("program T; function f(); begin end; begin end.");
    assert_eq!(error.message(), "expecting Colon");
}

#[test]
fn test_parse_assignment_and_call_statements() {
    let program = parse_ok("program T; begin x := 1; show(x, 2); done() end.");
    let statements = body(&program);

    assert_eq!(statements[0].get_stmt_type(), StmtType::Assign);
    match &statements[1] {
        Stmt::Call(call) => {
            assert_eq!(call.name.value, "show");
            assert_eq!(call.arguments.len(), 2);
        }
        other => panic!("expected a call, got {:?}", other),
    }
    match &statements[2] {
        Stmt::Call(call) => assert!(call.arguments.is_empty()),
        other => panic!("expected a call, got {:?}", other),
    }
}

#[test]
fn test_parse_identifier_without_assign_fails() {
    let error = parse_err("program T; begin x y end.");

    assert_eq!(
        error.get_error_impl(),
        &ErrorImpl::ExpectedToken {
            expected: "Assign".to_string(),
            found: "y".to_string(),
        }
    );
    assert_eq!(error.get_position(), Position::new(1, 20));
}

#[test]
fn test_parse_if_else_semicolons() {
    let program = parse_ok("program T; begin if a then x := 1; else x := 2; end.");

    match &body(&program)[0] {
        Stmt::If(stmt) => {
            assert_eq!(stmt.then_stmt.get_stmt_type(), StmtType::Assign);
            assert!(stmt.else_stmt.is_some());
        }
        other => panic!("expected an if statement, got {:?}", other),
    }
}

#[test]
fn test_parse_if_requires_semicolon_after_then_branch() {
    let error = parse_err("program T; begin if a then x := 1 end.");
    assert_eq!(error.message(), "expecting Semicolon");
}

#[test]
fn test_parse_while_and_for_loops() {
    let program = parse_ok(
        "program T;
         begin
            while i < 10 do i := i + 1;
            for i := 10 downto 1 do write(i)
         end.",
    );
    let statements = body(&program);

    assert_eq!(statements[0].get_stmt_type(), StmtType::While);
    match &statements[1] {
        Stmt::For(stmt) => {
            assert_eq!(stmt.var.value, "i");
            assert!(stmt.descending);
            assert_eq!(stmt.body.get_stmt_type(), StmtType::Write);
        }
        other => panic!("expected a for loop, got {:?}", other),
    }
}

#[test]
fn test_parse_repeat_until() {
    let program = parse_ok("program T; begin repeat i := i + 1; write(i); until i = 3 end.");

    match &body(&program)[0] {
        Stmt::Repeat(stmt) => {
            assert_eq!(stmt.statements.len(), 2);
            assert_eq!(stmt.condition.get_expr_type(), ExprType::Binary);
        }
        other => panic!("expected a repeat loop, got {:?}", other),
    }
}

#[test]
fn test_parse_repeat_requires_semicolons() {
    let error = parse_err("program T; begin repeat i := i + 1 until i = 3 end.");
    assert_eq!(error.message(), "expecting Semicolon");
}

#[test]
fn test_parse_write_and_read() {
    let program = parse_ok("program T; begin read(a, b); writeln(\"sum\", a + b); write() end.");
    let statements = body(&program);

    match &statements[0] {
        Stmt::Read(stmt) => assert_eq!(stmt.vars.len(), 2),
        other => panic!("expected a read, got {:?}", other),
    }
    match &statements[1] {
        Stmt::Write(stmt) => {
            assert!(stmt.new_line);
            assert_eq!(stmt.exprs.len(), 2);
        }
        other => panic!("expected a writeln, got {:?}", other),
    }
    match &statements[2] {
        Stmt::Write(stmt) => {
            assert!(!stmt.new_line);
            assert!(stmt.exprs.is_empty());
        }
        other => panic!("expected a write, got {:?}", other),
    }
}

#[test]
fn test_parse_read_requires_semicolon() {
    let error = parse_err("program T; begin read(a) end.");
    assert_eq!(error.message(), "expecting Semicolon");
}

#[test]
fn test_parse_precedence_factor_over_term() {
    let expr = parse_rhs("a + b * c");
    let (left, operator, right) = binary_parts(&expr);

    assert_eq!(operator, "+");
    assert_eq!(name_of(left), "a");
    let (_, inner, _) = binary_parts(right);
    assert_eq!(inner, "*");
}

#[test]
fn test_parse_term_is_left_associative() {
    let expr = parse_rhs("a - b - c");
    let (left, operator, right) = binary_parts(&expr);

    assert_eq!(operator, "-");
    assert_eq!(name_of(right), "c");
    let (inner_left, inner, inner_right) = binary_parts(left);
    assert_eq!(inner, "-");
    assert_eq!(name_of(inner_left), "a");
    assert_eq!(name_of(inner_right), "b");
}

#[test]
fn test_parse_not_binds_to_primary() {
    let expr = parse_rhs("not a and b");
    let (left, operator, right) = binary_parts(&expr);

    assert_eq!(operator, "and");
    assert_eq!(left.get_expr_type(), ExprType::Unary);
    assert_eq!(name_of(right), "b");
}

#[test]
fn test_parse_unary_minus_inside_factor() {
    let expr = parse_rhs("-x * y");
    let (left, operator, _) = binary_parts(&expr);

    assert_eq!(operator, "*");
    match left {
        Expr::Unary(unary) => {
            assert_eq!(unary.operator.value, "-");
            assert_eq!(name_of(&unary.expr), "x");
        }
        other => panic!("expected a unary expression, got {:?}", other),
    }
}

#[test]
fn test_parse_comparison_below_equality() {
    let expr = parse_rhs("a < b = c > d");
    let (left, operator, right) = binary_parts(&expr);

    assert_eq!(operator, "=");
    assert_eq!(binary_parts(left).1, "<");
    assert_eq!(binary_parts(right).1, ">");
}

#[test]
fn test_parse_parentheses_override_precedence() {
    let expr = parse_rhs("(a + b) * c");
    let (left, operator, _) = binary_parts(&expr);

    assert_eq!(operator, "*");
    assert_eq!(binary_parts(left).1, "+");
}

#[test]
fn test_parse_function_call_in_expression() {
    let expr = parse_rhs("f(1, g(2)) + 3");
    let (left, _, _) = binary_parts(&expr);

    match left {
        Expr::FnCall(call) => {
            assert_eq!(call.name.value, "f");
            assert_eq!(call.arguments.len(), 2);
            assert_eq!(call.arguments[1].get_expr_type(), ExprType::FnCall);
        }
        other => panic!("expected a call, got {:?}", other),
    }
}

#[test]
fn test_parse_chained_equality_fails() {
    let error = parse_err("program T; begin x := a = b = c end.");
    assert!(matches!(
        error.get_error_impl(),
        ErrorImpl::UnexpectedToken { .. }
    ));
}

#[test]
fn test_parse_chained_comparison_fails() {
    assert!(parse_source("program T; begin x := a < b < c end.", "test.pas").is_err());
}

#[test]
fn test_parse_missing_operand() {
    let error = parse_err("program T; begin x := ; end.");

    assert_eq!(
        error.get_error_impl(),
        &ErrorImpl::ExpectedPrimary {
            found: ";".to_string()
        }
    );
    assert_eq!(error.message(), "expecting identifier or literal");
}

#[test]
fn test_parse_trailing_tokens_after_period() {
    let error = parse_err("program T; begin end. x");

    assert!(matches!(
        error.get_error_impl(),
        ErrorImpl::UnexpectedToken { .. }
    ));
    assert_eq!(error.get_token(), Some("x"));
}

#[test]
fn test_parse_empty_source() {
    let error = parse_err("");
    assert_eq!(error.message(), "expecting Program");
}

#[test]
fn test_parse_reports_lexical_error() {
    let error = parse_err("program T; begin x := \"open end.");

    assert_eq!(
        error.get_error_impl(),
        &ErrorImpl::LexicalError {
            message: "Unterminated string".to_string()
        }
    );
    assert_eq!(error.get_position(), Position::new(1, 23));
}

#[test]
fn test_parse_error_carries_source() {
    let error = parse_err("program T;\nbegin\n  x := 1 +\nend.");
    let source = error.get_source().expect("parse errors carry their source");

    assert_eq!(source.name, "test.pas");
    assert_eq!(error.get_position().line, 4);
}

#[test]
fn test_parse_keywords_are_case_insensitive() {
    let program = parse_ok("PROGRAM T; VAR a: INTEGER; BEGIN a := 1 END.");
    assert_eq!(program.block.declarations.vars[0].ty, Type::Integer);
}
