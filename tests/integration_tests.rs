//! Integration tests for the whole front end.
//!
//! These tests drive source text through the lexer, parser and type checker
//! using only the public API, and check what the tree consumers see.

use std::{fs, path::PathBuf, rc::Rc};

use psi::{
    ast::{
        expressions::{Expr, ExprType},
        statements::Stmt,
        types::Type,
    },
    compile,
    errors::errors::{ErrorImpl, ErrorKind},
    format_error,
    lexer::lexer::Lexer,
    parser::parser::parse,
    printer::{pretty::PrettyPrinter, xml::XmlWriter},
    type_checker::type_checker::type_check,
    SourceFile,
};

fn demo(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos").join(name);
    fs::read_to_string(path).expect("demo program exists")
}

fn first_assignment(source: &str) -> Expr {
    let program = compile(source, "test.pas").expect("program checks");
    match program.block.body {
        Stmt::Compound(compound) => match compound.statements.into_iter().next() {
            Some(Stmt::Assign(assign)) => assign.expr,
            other => panic!("expected an assignment, got {:?}", other),
        },
        other => panic!("expected a compound body, got {:?}", other),
    }
}

#[test]
fn test_pipeline_by_hand() {
    let text = "program P; var a: real; begin a := 1; end.";
    let source = Rc::new(SourceFile::new("by_hand.pas", text));

    let program = parse(Lexer::new(text), Rc::clone(&source)).expect("program parses");
    assert_eq!(program.block.declarations.vars.len(), 1);

    let program = type_check(program, source).expect("program checks");
    let printed = PrettyPrinter::print(&program);
    assert!(printed.contains("a := real(1);"));
}

#[test]
fn test_scenario_literal_matches_variable() {
    let expr = first_assignment("program P; var a: integer; begin a := 1; end.");

    assert_eq!(expr.get_expr_type(), ExprType::Literal);
    assert_eq!(expr.get_type(), Some(Type::Integer));
}

#[test]
fn test_scenario_integer_literal_promoted_to_real() {
    let expr = first_assignment("program P; var a: real; begin a := 1; end.");

    assert_eq!(expr.get_expr_type(), ExprType::TypeCast);
    assert_eq!(expr.get_type(), Some(Type::Real));
}

#[test]
fn test_scenario_string_to_integer_is_invalid() {
    let error = compile(
        "program P; var a: integer; b: string; begin a := b; end.",
        "test.pas",
    )
    .expect_err("string does not convert to integer");

    assert_eq!(error.get_kind(), ErrorKind::Semantic);
    assert!(matches!(error.get_error_impl(), ErrorImpl::InvalidType { .. }));
}

#[test]
fn test_scenario_duplicate_declaration() {
    let error = compile("program P; var a: integer; a: real; begin end.", "test.pas")
        .expect_err("duplicate declaration");

    assert_eq!(
        error.get_error_impl(),
        &ErrorImpl::DuplicateDeclaration {
            kind: "Variable".to_string(),
            name: "a".to_string(),
        }
    );
}

#[test]
fn test_scenario_unknown_function() {
    let error = compile("program P; var x: integer; begin x := foo(1, 2) end.", "test.pas")
        .expect_err("foo is not declared");

    assert!(matches!(error.get_error_impl(), ErrorImpl::UnknownFunction { .. }));
}

#[test]
fn test_scenario_parameter_count_mismatch() {
    let error = compile(
        "program P;
         var x: integer;
         function add(a, b: integer): integer; begin add := a + b end;
         begin x := add(1, 2, 3) end.",
        "test.pas",
    )
    .expect_err("too many arguments");

    assert!(matches!(
        error.get_error_impl(),
        ErrorImpl::ParameterCountMismatch { function, .. } if function == "add"
    ));
}

#[test]
fn test_syntax_errors_stop_before_analysis() {
    // `b` is unknown, but the missing `then` is found first.
    let error = compile("program P; begin if b x := 1; end.", "test.pas")
        .expect_err("missing then");

    assert_eq!(error.get_kind(), ErrorKind::Syntax);
    assert_eq!(error.message(), "expecting Then");
}

#[test]
fn test_demo_program_checks() {
    let text = demo("primes.pas");
    let program = compile(&text, "primes.pas").expect("demo program checks");

    assert_eq!(program.name.value, "Primes");
    assert_eq!(program.block.declarations.funcs.len(), 2);

    let printed = PrettyPrinter::print(&program);
    assert!(printed.contains("average := real((count / limit));"));
    assert!(printed.contains("report(\"count\", real(count));"));

    let xml = XmlWriter::write(&program);
    assert!(xml.contains("<Function Name=\"isPrime\" Return=\"boolean\">"));
}

#[test]
fn test_demo_error_report() {
    let text = demo("mismatch.pas");
    let error = compile(&text, "mismatch.pas").expect_err("demo program fails");
    let report = format_error(&error);
    let lines: Vec<&str> = report.lines().collect();

    assert_eq!(lines[0], "File: mismatch.pas");
    assert!(lines.contains(&"   6│   total := name;"));
    assert!(lines.contains(&"   8│end."));
    assert!(!lines.iter().any(|line| line.starts_with("   3│")));
    assert_eq!(
        lines.last().copied(),
        Some("InvalidType: invalid type: cannot convert string to integer")
    );
}

#[test]
fn test_each_unit_is_independent() {
    let sources = [
        "program A; var x: integer; begin x := 1 end.",
        "program B; begin x := 1 end.",
        "program C; var x: string; begin x := 'c' end.",
    ];

    let results: Vec<bool> = sources
        .iter()
        .map(|source| compile(source, "unit.pas").is_ok())
        .collect();
    assert_eq!(results, vec![true, false, true]);
}
