//! Unit tests for expression evaluation.

use super::*;
use crate::environment::Environment;
use crate::values::{Value, ValueKind};

fn eval(text: &str) -> Result<Value, EvalError> {
    evaluate(text, &Environment::new())
}

fn eval_in(text: &str, env: &Environment) -> Value {
    evaluate(text, env).unwrap_or_else(|e| panic!("evaluating '{}' failed: {}", text, e))
}

// ============================================================================
// Literals
// ============================================================================

#[test]
fn test_boolean_literals() {
    assert_eq!(eval("true"), Ok(Value::Boolean(true)));
    assert_eq!(eval("  false "), Ok(Value::Boolean(false)));
}

#[test]
fn test_text_literals() {
    assert_eq!(eval("\"hello\""), Ok(Value::text("hello")));
    assert_eq!(eval("'single'"), Ok(Value::text("single")));
    assert_eq!(eval("\"x > 3\""), Ok(Value::text("x > 3")));
    assert_eq!(eval("\"\""), Ok(Value::text("")));
}

#[test]
fn test_numeric_literals() {
    assert_eq!(eval("42"), Ok(Value::Integer(42)));
    assert_eq!(eval("-7"), Ok(Value::Integer(-7)));
    assert!(matches!(eval("2.5"), Ok(Value::Float(x)) if x == 2.5));
    assert!(matches!(eval("-0.25"), Ok(Value::Float(x)) if x == -0.25));
}

#[test]
fn test_float_needs_digits_on_both_sides() {
    assert!(eval("3.").is_err());
    assert!(eval(".5").is_err());
    assert!(eval("1.2.3").is_err());
}

#[test]
fn test_list_literals() {
    let value = eval("[1, \"two\", [3]]").unwrap();
    assert_eq!(value.to_string(), "[1, \"two\", [3]]");
    assert_eq!(eval("[]").unwrap().list_items(), Some(vec![]));
}

#[test]
fn test_list_rejects_trailing_comma() {
    assert_eq!(eval("[1, 2,]"), Err(EvalError::unresolved("[1, 2,]")));
    assert_eq!(eval("[,]"), Err(EvalError::unresolved("[,]")));
}

#[test]
fn test_list_elements_are_expressions() {
    let env = Environment::from([("x", Value::Integer(2))]);
    let value = eval_in("[x, x * 3]", &env);
    assert_eq!(
        value.list_items(),
        Some(vec![Value::Integer(2), Value::Integer(6)])
    );
}

// ============================================================================
// Variables and arithmetic
// ============================================================================

#[test]
fn test_known_variable() {
    let env = Environment::from([("name", Value::text("Ada"))]);
    assert_eq!(eval_in("name", &env), Value::text("Ada"));
}

#[test]
fn test_unknown_variable_is_unresolved() {
    assert_eq!(eval("ghost"), Err(EvalError::unresolved("ghost")));
    assert_eq!(eval("ghost + 1"), Err(EvalError::unresolved("ghost")));
}

#[test]
fn test_arithmetic_precedence() {
    assert_eq!(eval("2 + 3 * 4"), Ok(Value::Integer(14)));
    assert_eq!(eval("(2 + 3) * 4"), Ok(Value::Integer(20)));
    assert_eq!(eval("10 - 4 - 3"), Ok(Value::Integer(3)));
    assert_eq!(eval("-2 * 3"), Ok(Value::Integer(-6)));
}

#[test]
fn test_division_is_float() {
    assert!(matches!(eval("7 / 2"), Ok(Value::Float(x)) if x == 3.5));
    assert_eq!(eval("1 / 0"), Err(EvalError::DivisionByZero));
}

#[test]
fn test_float_promotion() {
    let env = Environment::from([("x", Value::Integer(1))]);
    assert!(matches!(eval_in("x + 0.5", &env), Value::Float(v) if v == 1.5));
}

#[test]
fn test_text_addition_is_rejected() {
    assert_eq!(
        eval("\"a\" + 1"),
        Err(EvalError::TypeMismatch {
            op: "+",
            left: ValueKind::Text,
            right: ValueKind::Integer,
        })
    );
}

// ============================================================================
// Comparisons and logic
// ============================================================================

#[test]
fn test_comparisons() {
    let env = Environment::from([("x", Value::Integer(5))]);
    assert_eq!(eval_in("x > 3", &env), Value::Boolean(true));
    assert_eq!(eval_in("x <= 4", &env), Value::Boolean(false));
    assert_eq!(eval_in("x == 5.0", &env), Value::Boolean(true));
    assert_eq!(eval_in("x != 5", &env), Value::Boolean(false));
    assert_eq!(eval_in("\"a\" < \"b\"", &env), Value::Boolean(true));
}

#[test]
fn test_logical_operators() {
    let env = Environment::from([("x", Value::Integer(5))]);
    assert_eq!(eval_in("x > 3 and x < 10", &env), Value::Boolean(true));
    assert_eq!(eval_in("x > 30 or x == 5", &env), Value::Boolean(true));
    assert_eq!(eval_in("not x > 3", &env), Value::Boolean(false));
}

#[test]
fn test_logical_short_circuit() {
    // The right side would be unresolved if it were evaluated.
    assert_eq!(eval("false and ghost"), Ok(Value::Boolean(false)));
    assert_eq!(eval("true or ghost"), Ok(Value::Boolean(true)));
}

#[test]
fn test_logical_operands_must_be_boolean() {
    assert!(matches!(
        eval("1 and true"),
        Err(EvalError::TypeMismatch { op: "and", .. })
    ));
    assert!(matches!(
        eval("false or 1"),
        Err(EvalError::TypeMismatch { op: "or", .. })
    ));
}

// ============================================================================
// Arrow functions
// ============================================================================

#[test]
fn test_parse_arrow() {
    assert_eq!(
        parse_arrow("(n) => n * 2"),
        Some(("n".to_string(), "n * 2".to_string()))
    );
    assert_eq!(
        parse_arrow("( item )=>item"),
        Some(("item".to_string(), "item".to_string()))
    );
    assert_eq!(parse_arrow("(a, b) => a + b"), None);
    assert_eq!(parse_arrow("(n) =>"), None);
    assert_eq!(parse_arrow("(n) * 2"), None);
    assert_eq!(parse_arrow("n => n"), None);
}

#[test]
fn test_arrow_evaluates_to_closure() {
    let value = eval("(n) => n * 2").unwrap();
    assert_eq!(value.kind(), ValueKind::Closure);
    assert_eq!(value.to_string(), "<function (n) => n * 2>");
}

#[test]
fn test_apply_closure() {
    let Value::Closure(closure) = eval("(n) => n * 2").unwrap() else {
        panic!("expected a closure");
    };
    assert_eq!(
        apply_closure(&closure, Value::Integer(21)),
        Ok(Value::Integer(42))
    );
}

#[test]
fn test_closure_captures_environment() {
    let mut env = Environment::from([("factor", Value::Integer(3))]);
    let Value::Closure(closure) = eval_in("(n) => n * factor", &env) else {
        panic!("expected a closure");
    };

    // Later rebinding does not affect the captured value.
    env.set("factor", Value::Integer(100));
    assert_eq!(
        apply_closure(&closure, Value::Integer(2)),
        Ok(Value::Integer(6))
    );
}

// ============================================================================
// Host-language escapes
// ============================================================================

#[test]
fn test_no_host_evaluation() {
    for text in [
        "__import__('os').system('ls')",
        "len([1, 2])",
        "x = 5",
        "print(1)",
        "1 if True else 2",
    ] {
        assert!(
            matches!(eval(text), Err(EvalError::Unresolved { .. })),
            "expected '{}' to be unresolved",
            text
        );
    }
}
