use std::{fmt::Display, rc::Rc};

use thiserror::Error;

use crate::{Position, SourceFile};

/// Which pass raised a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Syntax,
    Semantic,
}

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
    token: Option<String>,
    source: Option<Rc<SourceFile>>,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
            token: None,
            source: None,
        }
    }

    /// Records the text of the token the diagnostic points at.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Attaches the compilation unit so the diagnostic can show surrounding lines.
    pub fn with_source(mut self, source: Rc<SourceFile>) -> Self {
        self.source = Some(source);
        self
    }

    pub fn get_position(&self) -> Position {
        self.position
    }

    pub fn get_token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn get_source(&self) -> Option<&SourceFile> {
        self.source.as_deref()
    }

    pub fn get_error_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn message(&self) -> String {
        self.internal_error.to_string()
    }

    pub fn get_kind(&self) -> ErrorKind {
        match &self.internal_error {
            ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::ExpectedToken { .. }
            | ErrorImpl::ExpectedPrimary { .. }
            | ErrorImpl::LexicalError { .. } => ErrorKind::Syntax,
            _ => ErrorKind::Semantic,
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::ExpectedToken { .. } => "ExpectedToken",
            ErrorImpl::ExpectedPrimary { .. } => "ExpectedPrimary",
            ErrorImpl::LexicalError { .. } => "LexicalError",
            ErrorImpl::DuplicateDeclaration { .. } => "DuplicateDeclaration",
            ErrorImpl::UnknownVariable { .. } => "UnknownVariable",
            ErrorImpl::UnknownFunction { .. } => "UnknownFunction",
            ErrorImpl::ParameterCountMismatch { .. } => "ParameterCountMismatch",
            ErrorImpl::ParameterTypeMismatch { .. } => "ParameterTypeMismatch",
            ErrorImpl::InvalidType { .. } => "InvalidType",
            ErrorImpl::InvalidOperands { .. } => "InvalidOperands",
            ErrorImpl::ProcedureInExpression { .. } => "ProcedureInExpression",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, did you miss a semicolon?",
                token
            )),
            ErrorImpl::ExpectedToken { expected, found } => {
                ErrorTip::Suggestion(format!("Expected {}, found `{}`", expected, found))
            }
            ErrorImpl::ExpectedPrimary { found } => ErrorTip::Suggestion(format!(
                "`{}` cannot start an expression",
                found
            )),
            ErrorImpl::LexicalError { .. } => ErrorTip::None,
            ErrorImpl::DuplicateDeclaration { name, .. } => ErrorTip::Suggestion(format!(
                "Rename `{}` or move it into a nested routine",
                name
            )),
            ErrorImpl::UnknownVariable { name } => {
                ErrorTip::Suggestion(format!("Declare `{}` in a var section", name))
            }
            ErrorImpl::UnknownFunction { name } => {
                ErrorTip::Suggestion(format!("Declare `{}` before its first call", name))
            }
            ErrorImpl::ParameterCountMismatch {
                expected, received, ..
            } => ErrorTip::Suggestion(format!(
                "Expected {} arguments, received {}",
                expected, received
            )),
            ErrorImpl::ParameterTypeMismatch {
                expected, received, ..
            } => ErrorTip::Suggestion(format!(
                "Expected argument type `{}`, received `{}`",
                expected, received
            )),
            ErrorImpl::InvalidType { .. } => ErrorTip::Suggestion(String::from(
                "Only integer to real, char to integer and char to string are converted implicitly",
            )),
            ErrorImpl::InvalidOperands { .. } => ErrorTip::None,
            ErrorImpl::ProcedureInExpression { .. } => ErrorTip::Suggestion(String::from(
                "Call a procedure as a statement, or declare it as a function",
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.source {
            Some(source) => write!(f, "{}:{}: {}", source.name, self.position, self.internal_error),
            None => write!(f, "{}: {}", self.position, self.internal_error),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.internal_error)
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    // Syntax
    #[error("unexpected {token}")]
    UnexpectedToken { token: String },
    #[error("expecting {expected}")]
    ExpectedToken { expected: String, found: String },
    #[error("expecting identifier or literal")]
    ExpectedPrimary { found: String },
    #[error("{message}")]
    LexicalError { message: String },

    // Semantic
    #[error("{kind} with the same name `{name}` declared in the same block")]
    DuplicateDeclaration { kind: String, name: String },
    #[error("unknown variable `{name}`")]
    UnknownVariable { name: String },
    #[error("unknown function `{name}`")]
    UnknownFunction { name: String },
    #[error("mismatch in the number of parameters to `{function}`: expected {expected}, received {received}")]
    ParameterCountMismatch {
        function: String,
        expected: usize,
        received: usize,
    },
    #[error("mismatch in the type of parameters to `{function}`: expected {expected}, received {received}")]
    ParameterTypeMismatch {
        function: String,
        expected: String,
        received: String,
    },
    #[error("invalid type: cannot convert {from} to {to}")]
    InvalidType { from: String, to: String },
    #[error("invalid operands: {left} {operator} {right}")]
    InvalidOperands {
        operator: String,
        left: String,
        right: String,
    },
    #[error("procedure `{name}` does not return a value")]
    ProcedureInExpression { name: String },
}
