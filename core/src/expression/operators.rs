//! Binary, comparison and unary operator implementations.
//!
//! Numeric tower: Integer op Integer stays Integer (except `/`, which is true
//! division and always yields Float); a Float on either side promotes the
//! result to Float. `+` never concatenates text.

use core::cmp::Ordering;

use super::error::EvalError;
use super::parsed_expr::{BinaryOp, ComparisonOp, UnaryOp};
use crate::values::Value;

/// Evaluate an arithmetic operator on two values.
pub(crate) fn eval_binary(op: BinaryOp, left: &Value, right: &Value) -> Result<Value, EvalError> {
    match (left, right) {
        (Value::Integer(l), Value::Integer(r)) => eval_binary_int(op, *l, *r),
        _ => match (left.as_number(), right.as_number()) {
            (Some(l), Some(r)) => eval_binary_float(op, l, r).map(Value::Float),
            _ => Err(EvalError::TypeMismatch {
                op: op.symbol(),
                left: left.kind(),
                right: right.kind(),
            }),
        },
    }
}

/// Evaluate a binary operation on two integers.
///
/// Uses wrapping arithmetic to prevent panics on overflow.
/// Division by zero returns an error.
pub(crate) fn eval_binary_int(op: BinaryOp, left: i64, right: i64) -> Result<Value, EvalError> {
    match op {
        BinaryOp::Add => Ok(Value::Integer(left.wrapping_add(right))),
        BinaryOp::Sub => Ok(Value::Integer(left.wrapping_sub(right))),
        BinaryOp::Mul => Ok(Value::Integer(left.wrapping_mul(right))),
        BinaryOp::Div => eval_binary_float(op, left as f64, right as f64).map(Value::Float),
    }
}

/// Evaluate a binary operation on two floats.
///
/// Division by zero is an error rather than an infinity.
pub(crate) fn eval_binary_float(op: BinaryOp, left: f64, right: f64) -> Result<f64, EvalError> {
    match op {
        BinaryOp::Add => Ok(left + right),
        BinaryOp::Sub => Ok(left - right),
        BinaryOp::Mul => Ok(left * right),
        BinaryOp::Div => {
            if right == 0.0 {
                Err(EvalError::DivisionByZero)
            } else {
                Ok(left / right)
            }
        }
    }
}

/// Evaluate a comparison.
///
/// `==` and `!=` accept any pair of values (different kinds are unequal);
/// ordering comparisons need two numbers or two texts.
pub(crate) fn eval_comparison(
    op: ComparisonOp,
    left: &Value,
    right: &Value,
) -> Result<bool, EvalError> {
    match op {
        ComparisonOp::Eq => return Ok(left == right),
        ComparisonOp::Neq => return Ok(left != right),
        _ => {}
    }

    let ordering = match (left, right) {
        (Value::Integer(l), Value::Integer(r)) => Some(l.cmp(r)),
        (Value::Text(l), Value::Text(r)) => Some(l.as_str().cmp(r.as_str())),
        _ => match (left.as_number(), right.as_number()) {
            (Some(l), Some(r)) => l.partial_cmp(&r),
            _ => {
                return Err(EvalError::TypeMismatch {
                    op: op.symbol(),
                    left: left.kind(),
                    right: right.kind(),
                });
            }
        },
    };

    // NaN compares false with everything.
    let Some(ordering) = ordering else {
        return Ok(false);
    };

    Ok(match op {
        ComparisonOp::Lt => ordering == Ordering::Less,
        ComparisonOp::Le => ordering != Ordering::Greater,
        ComparisonOp::Gt => ordering == Ordering::Greater,
        ComparisonOp::Ge => ordering != Ordering::Less,
        ComparisonOp::Eq | ComparisonOp::Neq => unreachable!("handled above"),
    })
}

/// Evaluate a unary operator.
pub(crate) fn eval_unary(op: UnaryOp, operand: &Value) -> Result<Value, EvalError> {
    match (op, operand) {
        (UnaryOp::Neg, Value::Integer(i)) => Ok(Value::Integer(i.wrapping_neg())),
        (UnaryOp::Neg, Value::Float(x)) => Ok(Value::Float(-x)),
        (UnaryOp::Not, Value::Boolean(b)) => Ok(Value::Boolean(!b)),
        (op, operand) => Err(EvalError::UnaryTypeMismatch {
            op: op.symbol(),
            operand: operand.kind(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::ValueKind;

    #[test]
    fn test_int_add() {
        assert_eq!(eval_binary_int(BinaryOp::Add, 2, 3).unwrap(), Value::Integer(5));
        assert_eq!(eval_binary_int(BinaryOp::Add, -5, 3).unwrap(), Value::Integer(-2));
    }

    #[test]
    fn test_int_sub_and_mul() {
        assert_eq!(eval_binary_int(BinaryOp::Sub, 3, 10).unwrap(), Value::Integer(-7));
        assert_eq!(eval_binary_int(BinaryOp::Mul, -2, 5).unwrap(), Value::Integer(-10));
    }

    #[test]
    fn test_int_div_is_true_division() {
        assert!(matches!(
            eval_binary_int(BinaryOp::Div, 7, 2).unwrap(),
            Value::Float(x) if x == 3.5
        ));
        assert!(matches!(
            eval_binary_int(BinaryOp::Div, 6, 2).unwrap(),
            Value::Float(x) if x == 3.0
        ));
    }

    #[test]
    fn test_div_by_zero() {
        assert_eq!(
            eval_binary_int(BinaryOp::Div, 1, 0),
            Err(EvalError::DivisionByZero)
        );
        assert_eq!(
            eval_binary_float(BinaryOp::Div, 1.0, 0.0),
            Err(EvalError::DivisionByZero)
        );
    }

    #[test]
    fn test_int_wrapping_overflow() {
        assert_eq!(
            eval_binary_int(BinaryOp::Add, i64::MAX, 1).unwrap(),
            Value::Integer(i64::MIN)
        );
    }

    #[test]
    fn test_mixed_promotes_to_float() {
        let result = eval_binary(BinaryOp::Add, &Value::Integer(1), &Value::Float(0.5)).unwrap();
        assert!(matches!(result, Value::Float(x) if x == 1.5));
    }

    #[test]
    fn test_text_plus_is_rejected() {
        assert_eq!(
            eval_binary(BinaryOp::Add, &Value::text("a"), &Value::text("b")),
            Err(EvalError::TypeMismatch {
                op: "+",
                left: ValueKind::Text,
                right: ValueKind::Text,
            })
        );
        assert!(eval_binary(BinaryOp::Mul, &Value::text("a"), &Value::Integer(3)).is_err());
    }

    #[test]
    fn test_comparisons() {
        let one = Value::Integer(1);
        let two = Value::Float(2.0);
        assert!(eval_comparison(ComparisonOp::Lt, &one, &two).unwrap());
        assert!(eval_comparison(ComparisonOp::Le, &two, &two).unwrap());
        assert!(!eval_comparison(ComparisonOp::Gt, &one, &two).unwrap());
        assert!(eval_comparison(ComparisonOp::Ge, &two, &one).unwrap());
        assert!(
            eval_comparison(ComparisonOp::Lt, &Value::text("apple"), &Value::text("banana"))
                .unwrap()
        );
    }

    #[test]
    fn test_equality_across_kinds() {
        assert!(eval_comparison(ComparisonOp::Eq, &Value::Integer(2), &Value::Float(2.0)).unwrap());
        assert!(
            eval_comparison(ComparisonOp::Neq, &Value::text("2"), &Value::Integer(2)).unwrap()
        );
        assert!(eval_comparison(ComparisonOp::Lt, &Value::text("2"), &Value::Integer(2)).is_err());
        assert!(
            eval_comparison(ComparisonOp::Gt, &Value::Boolean(true), &Value::Boolean(false))
                .is_err()
        );
    }

    #[test]
    fn test_nan_comparisons_are_false() {
        let nan = Value::Float(f64::NAN);
        assert!(!eval_comparison(ComparisonOp::Lt, &nan, &Value::Integer(1)).unwrap());
        assert!(!eval_comparison(ComparisonOp::Ge, &nan, &Value::Integer(1)).unwrap());
    }

    #[test]
    fn test_unary() {
        assert_eq!(eval_unary(UnaryOp::Neg, &Value::Integer(3)).unwrap(), Value::Integer(-3));
        assert_eq!(
            eval_unary(UnaryOp::Not, &Value::Boolean(true)).unwrap(),
            Value::Boolean(false)
        );
        assert_eq!(
            eval_unary(UnaryOp::Not, &Value::Integer(1)),
            Err(EvalError::UnaryTypeMismatch {
                op: "not",
                operand: ValueKind::Integer,
            })
        );
    }
}
