//! Expression evaluation errors.
//!
//! These carry no line information; the evaluator attaches the line of the
//! statement that was running when it converts them into an
//! [`ExecutionError`](crate::evaluator::ExecutionError).

use thiserror::Error;

use crate::values::ValueKind;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// The text is not a literal, a known variable, or a well-formed expression.
    #[error("Cannot work out the value of '{text}'")]
    Unresolved { text: String },

    /// A binary operator applied to operands of the wrong kind.
    #[error("'{op}' cannot be used with {left} and {right}")]
    TypeMismatch {
        op: &'static str,
        left: ValueKind,
        right: ValueKind,
    },

    /// A unary operator applied to an operand of the wrong kind.
    #[error("'{op}' cannot be used with {operand}")]
    UnaryTypeMismatch { op: &'static str, operand: ValueKind },

    #[error("Division by zero")]
    DivisionByZero,

    /// The expression is nested deeper than the parser can follow.
    #[error("Expression is nested too deeply")]
    TooDeep,
}

impl EvalError {
    pub fn unresolved(text: impl Into<String>) -> Self {
        EvalError::Unresolved { text: text.into() }
    }
}
