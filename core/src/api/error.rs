//! Public error types for the Jam API.
//!
//! Internal errors ([`SyntaxError`], [`ExecutionError`]) are converted to
//! these public types at the API boundary.

use std::fmt;

use crate::diagnostics::{Diagnostic, Severity};
use crate::evaluator::{ExecutionError, ExecutionErrorKind};
use crate::syntax::SyntaxError;

/// Public error type for all Jam operations that can fail.
///
/// [`execute`](super::execute) never returns one: it renders every failure
/// into the output text instead.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The program could not be split into blocks.
    ///
    /// Contains one or more diagnostics with line numbers.
    Syntax { diagnostics: Vec<Diagnostic> },

    /// The program stopped with a fatal error (an unresolved expression, an
    /// unknown function, an invalid operation).
    Runtime { line: usize, message: String },

    /// Resource limits exceeded (call depth, loop iterations).
    ResourceExceeded { line: usize, message: String },
}

impl Error {
    /// Line of the first problem.
    pub fn line(&self) -> usize {
        match self {
            Error::Syntax { diagnostics } => diagnostics.first().map_or(0, |d| d.line),
            Error::Runtime { line, .. } | Error::ResourceExceeded { line, .. } => *line,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Syntax { diagnostics } => {
                let error_count = diagnostics
                    .iter()
                    .filter(|d| d.severity == Severity::Error)
                    .count();
                write!(f, "Syntax check failed with {} error(s)", error_count)
            }
            Error::Runtime { line, message } => {
                write!(f, "Runtime error (line {}): {}", line, message)
            }
            Error::ResourceExceeded { line, message } => {
                write!(f, "Resource limit exceeded (line {}): {}", line, message)
            }
        }
    }
}

impl std::error::Error for Error {}

// ============================================================================
// Conversion from internal errors
// ============================================================================

impl From<SyntaxError> for Error {
    fn from(err: SyntaxError) -> Self {
        Error::Syntax {
            diagnostics: vec![Diagnostic::error(err.line(), err.to_string())],
        }
    }
}

impl From<ExecutionError> for Error {
    fn from(err: ExecutionError) -> Self {
        let line = err.line;
        let message = err.kind.to_string();
        if err.is_resource_exceeded() {
            return Error::ResourceExceeded { line, message };
        }
        match err.kind {
            ExecutionErrorKind::UnterminatedBlock => Error::Syntax {
                diagnostics: vec![Diagnostic::error(line, message)],
            },
            _ => Error::Runtime { line, message },
        }
    }
}
