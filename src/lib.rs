#![allow(clippy::module_inception)]

use std::{fmt, rc::Rc};

use crate::{
    ast::ast::Program,
    errors::errors::Error,
    lexer::lexer::Lexer,
    parser::parser::parse,
    type_checker::type_checker::type_check,
};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod printer;
pub mod type_checker;

extern crate regex;

/// A 1-based line and column inside a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Position { line, column }
    }

    pub fn null() -> Self {
        Position { line: 0, column: 0 }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// The identity and line table of one compilation unit.
#[derive(Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub name: String,
    pub lines: Vec<String>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, text: &str) -> Self {
        SourceFile {
            name: name.into(),
            lines: text.lines().map(String::from).collect(),
        }
    }

    /// Returns the text of a 1-based line, if the file has it.
    pub fn get_line(&self, line: u32) -> Option<&str> {
        if line == 0 {
            return None;
        }
        self.lines.get(line as usize - 1).map(String::as_str)
    }
}

// The line table is noise in test failure output.
impl fmt::Debug for SourceFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceFile")
            .field("name", &self.name)
            .field("lines", &self.lines.len())
            .finish()
    }
}

/// Lexes and parses one compilation unit without analysing it.
pub fn parse_source(text: &str, file_name: &str) -> Result<Program, Error> {
    let source = Rc::new(SourceFile::new(file_name, text));
    parse(Lexer::new(text), source)
}

/// Runs the whole front end over one compilation unit: lexing, parsing and type analysis.
///
/// The first diagnostic aborts the unit; no partial tree is returned.
pub fn compile(text: &str, file_name: &str) -> Result<Program, Error> {
    let source = Rc::new(SourceFile::new(file_name, text));
    let program = parse(Lexer::new(text), Rc::clone(&source))?;
    tracing::debug!("parsed program `{}` from {}", program.name.value, file_name);
    type_check(program, source)
}

/// Renders a diagnostic with a window of surrounding source lines.
///
/// ```text
/// File: demo.pas
/// ──────────────
///    1│program P;
///    2│var a: integer; b: string;
///    3│begin a := b; end.
///            ^
///            a
/// InvalidType: invalid type: cannot convert string to integer
/// ```
pub fn format_error(error: &Error) -> String {
    let position = error.get_position();
    let source = match error.get_source() {
        Some(source) => source,
        None => {
            return format!(
                "{}: {} (at {})",
                error.get_error_name(),
                error.message(),
                position
            )
        }
    };

    let mut out = String::new();
    let header = format!("File: {}", source.name);
    out.push_str(&header);
    out.push('\n');
    out.push_str(&"─".repeat(header.chars().count()));
    out.push('\n');

    let first = position.line.saturating_sub(2).max(1);
    let last = position.line + 2;
    for line in first..=last {
        let Some(text) = source.get_line(line) else {
            continue;
        };
        out.push_str(&format!("{:>4}│{}\n", line, text));

        if line == position.line {
            // Four digits of line number plus the bar.
            let caret = position.column as usize + 4;
            out.push_str(&" ".repeat(caret));
            out.push_str("^\n");
            if let Some(token) = error.get_token() {
                let half = token.chars().count() / 2;
                out.push_str(&" ".repeat(caret.saturating_sub(half)));
                out.push_str(token);
                out.push('\n');
            }
        }
    }

    out.push_str(&format!("{}: {}", error.get_error_name(), error.message()));
    out
}
