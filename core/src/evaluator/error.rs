//! Run-fatal execution errors.
//!
//! Every error carries the line of the statement that was running. A run that
//! hits one stops; output produced before it is kept.
//!
//! # Error Categories
//!
//! - **Structural errors**: the program cannot be split into blocks, an
//!   expression cannot be resolved, a loop bound is invalid or a function is
//!   unknown.
//!
//! - **Invalid operations**: operands of the wrong kind, division by zero and
//!   similar value-level failures.
//!
//! - **Resource exceeded errors**: call depth or total loop iterations went
//!   past the configured limits, or an expression nests too deeply to parse.

use thiserror::Error;

use crate::expression::EvalError;
use crate::syntax::SyntaxError;

/// An execution error with the line it happened on.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("line {line}: {kind}")]
pub struct ExecutionError {
    pub kind: ExecutionErrorKind,
    pub line: usize,
}

impl ExecutionError {
    pub fn new(kind: impl Into<ExecutionErrorKind>, line: usize) -> Self {
        Self {
            kind: kind.into(),
            line,
        }
    }

    pub fn is_resource_exceeded(&self) -> bool {
        matches!(self.kind, ExecutionErrorKind::ResourceExceeded(_))
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExecutionErrorKind {
    #[error("This block is never closed with '}}'")]
    UnterminatedBlock,

    #[error("Cannot work out the value of '{text}'")]
    UnresolvedExpression { text: String },

    #[error("There is nothing to choose from")]
    EmptyChoice,

    #[error("Repeat needs a whole number of times (0 or more), not '{count}'")]
    InvalidLoopBound { count: String },

    #[error("There is no function called '{name}'")]
    UnknownFunction { name: String },

    #[error("{message}")]
    InvalidOperation { message: String },

    #[error(transparent)]
    ResourceExceeded(#[from] ResourceExceeded),
}

impl ExecutionErrorKind {
    pub fn invalid_operation(message: impl Into<String>) -> Self {
        ExecutionErrorKind::InvalidOperation {
            message: message.into(),
        }
    }
}

/// Resource limit exceeded errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ResourceExceeded {
    /// Function calls nested deeper than allowed.
    #[error("Too many nested function calls (limit is {max_depth})")]
    CallDepth { max_depth: usize },

    /// Loops ran more iterations in total than allowed.
    #[error("Loops ran too many times (limit is {max_iterations})")]
    Iterations { max_iterations: usize },

    /// An expression nested deeper than the parser can follow.
    #[error("Expression is nested too deeply")]
    ExpressionDepth,
}

impl From<EvalError> for ExecutionErrorKind {
    fn from(error: EvalError) -> Self {
        match error {
            EvalError::Unresolved { text } => ExecutionErrorKind::UnresolvedExpression { text },
            EvalError::TooDeep => ResourceExceeded::ExpressionDepth.into(),
            other => ExecutionErrorKind::invalid_operation(other.to_string()),
        }
    }
}

impl From<SyntaxError> for ExecutionError {
    fn from(error: SyntaxError) -> Self {
        match error {
            SyntaxError::UnterminatedBlock { line } => {
                ExecutionError::new(ExecutionErrorKind::UnterminatedBlock, line)
            }
        }
    }
}
