//! Expression evaluation.
//!
//! Text is tried against a fixed sequence of recognizers, first match wins:
//! boolean, quoted text, list, integer, float, known variable, arrow
//! function, and finally the arithmetic/comparison grammar. Anything left
//! over is [`EvalError::Unresolved`].

use tracing::trace;

use super::error::EvalError;
use super::operators::{eval_binary, eval_comparison, eval_unary};
use super::parsed_expr::{BoolOp, Expr, Literal};
use super::parser;
use super::scan::{is_enclosed, is_identifier, quoted_text, split_top_level};
use crate::environment::Environment;
use crate::values::{Closure, Value};

/// Evaluate expression text against an environment.
pub fn evaluate(text: &str, env: &Environment) -> Result<Value, EvalError> {
    let text = text.trim();

    match text {
        "true" => return Ok(Value::Boolean(true)),
        "false" => return Ok(Value::Boolean(false)),
        _ => {}
    }

    if let Some(inner) = quoted_text(text) {
        return Ok(Value::text(inner));
    }

    if is_enclosed(text, '[', ']') {
        return evaluate_list(text, env);
    }

    if let Some(value) = integer_literal(text) {
        return Ok(Value::Integer(value));
    }

    if let Some(value) = float_literal(text) {
        return Ok(Value::Float(value));
    }

    if let Some(value) = env.get(text) {
        return Ok(value.clone());
    }

    if let Some((param, body)) = parse_arrow(text) {
        return Ok(Value::closure(param, body, env.snapshot()));
    }

    trace!(text, "falling back to expression grammar");
    let expr = parser::parse(text)?;
    eval_expr(&expr, env)
}

fn evaluate_list(text: &str, env: &Environment) -> Result<Value, EvalError> {
    let inner = text[1..text.len() - 1].trim();
    if inner.is_empty() {
        return Ok(Value::list(Vec::new()));
    }
    let items = split_top_level(inner, ',')
        .into_iter()
        .map(|item| {
            if item.is_empty() {
                Err(EvalError::unresolved(text))
            } else {
                evaluate(item, env)
            }
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Value::list(items))
}

fn integer_literal(text: &str) -> Option<i64> {
    let digits = text.strip_prefix('-').unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

fn float_literal(text: &str) -> Option<f64> {
    let unsigned = text.strip_prefix('-').unwrap_or(text);
    let (whole, fraction) = unsigned.split_once('.')?;
    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !digits(whole) || !digits(fraction) {
        return None;
    }
    text.parse().ok()
}

/// Recognize single-parameter arrow syntax: `(name) => expr`.
///
/// Returns the parameter name and the body text, or `None` if the text does
/// not have that shape.
pub fn parse_arrow(text: &str) -> Option<(String, String)> {
    let rest = text.trim().strip_prefix('(')?;
    let (param, rest) = rest.split_once(')')?;
    let param = param.trim();
    if !is_identifier(param) {
        return None;
    }
    let body = rest.trim_start().strip_prefix("=>")?.trim();
    if body.is_empty() {
        return None;
    }
    Some((param.to_string(), body.to_string()))
}

/// Apply a closure to a single argument.
///
/// The body runs in the captured environment with the parameter bound.
pub fn apply_closure(closure: &Closure, argument: Value) -> Result<Value, EvalError> {
    let mut env = closure.captured.snapshot();
    env.set(closure.param.clone(), argument);
    evaluate(&closure.body, &env)
}

/// Evaluate a parsed expression.
pub fn eval_expr(expr: &Expr, env: &Environment) -> Result<Value, EvalError> {
    match expr {
        Expr::Literal(literal) => Ok(match literal {
            Literal::Int(i) => Value::Integer(*i),
            Literal::Float(x) => Value::Float(*x),
            Literal::Bool(b) => Value::Boolean(*b),
            Literal::Str(s) => Value::text(s.clone()),
        }),

        Expr::Ident(name) => env
            .get(name)
            .cloned()
            .ok_or_else(|| EvalError::unresolved(name.clone())),

        Expr::List(items) => {
            let values = items
                .iter()
                .map(|item| eval_expr(item, env))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Value::list(values))
        }

        Expr::Unary { op, expr } => {
            let operand = eval_expr(expr, env)?;
            eval_unary(*op, &operand)
        }

        Expr::Binary { op, left, right } => {
            let left = eval_expr(left, env)?;
            let right = eval_expr(right, env)?;
            eval_binary(*op, &left, &right)
        }

        Expr::Comparison { op, left, right } => {
            let left = eval_expr(left, env)?;
            let right = eval_expr(right, env)?;
            eval_comparison(*op, &left, &right).map(Value::Boolean)
        }

        Expr::Boolean { op, left, right } => {
            let left_value = eval_expr(left, env)?;
            let Some(l) = left_value.as_bool() else {
                return Err(EvalError::TypeMismatch {
                    op: op.symbol(),
                    left: left_value.kind(),
                    right: eval_expr(right, env)?.kind(),
                });
            };

            // Short-circuit.
            match (op, l) {
                (BoolOp::And, false) => return Ok(Value::Boolean(false)),
                (BoolOp::Or, true) => return Ok(Value::Boolean(true)),
                _ => {}
            }

            let right_value = eval_expr(right, env)?;
            match right_value.as_bool() {
                Some(r) => Ok(Value::Boolean(r)),
                None => Err(EvalError::TypeMismatch {
                    op: op.symbol(),
                    left: left_value.kind(),
                    right: right_value.kind(),
                }),
            }
        }
    }
}
