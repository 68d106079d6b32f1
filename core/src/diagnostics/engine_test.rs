use indoc::indoc;
use pretty_assertions::assert_eq;

use super::*;
use crate::syntax::Program;
use crate::values::Value;

fn first(identifier: &str, line_text: &str) -> Option<Diagnostic> {
    let diagnostics = check(identifier, 1, line_text);
    assert!(diagnostics.len() <= 1, "checks stop at the first match");
    diagnostics.into_iter().next()
}

fn severity(identifier: &str) -> Option<Severity> {
    let line_text = format!("set {} = 1", identifier);
    first(identifier, &line_text).map(|d| d.severity)
}

// ============================================================================
// Identifier checks
// ============================================================================

#[test]
fn test_valid_names_pass() {
    assert_eq!(severity("score"), None);
    assert_eq!(severity("_hidden"), None);
    assert_eq!(severity("player2"), None);
}

#[test]
fn test_empty_name() {
    let diagnostic = first("", "set = 5").unwrap();
    assert_eq!(diagnostic.severity, Severity::Error);
    assert_eq!(diagnostic.message, "Missing variable name");
}

#[test]
fn test_sensitive_name() {
    assert_eq!(severity("my_password"), Some(Severity::Warning));
    assert_eq!(severity("SecretCode"), Some(Severity::Warning));
}

#[test]
fn test_unbalanced_braces() {
    let diagnostic = first("x", "set x = {").unwrap();
    assert_eq!(diagnostic.severity, Severity::Error);
    assert_eq!(first("x", "set x = \"{\""), None);
    assert_eq!(
        first("x", "set x = }{").map(|d| d.severity),
        Some(Severity::Error)
    );
}

#[test]
fn test_keyword_typo() {
    let diagnostic = first("prnt", "set prnt = 1").unwrap();
    assert_eq!(diagnostic.severity, Severity::Hint);
    assert_eq!(diagnostic.help.as_deref(), Some("Did you mean 'print'?"));
}

#[test]
fn test_invalid_characters() {
    assert_eq!(severity("my-var"), Some(Severity::Error));
    assert_eq!(severity("2fast"), Some(Severity::Error));
}

#[test]
fn test_reserved_words() {
    assert_eq!(severity("print"), Some(Severity::Error));
    assert_eq!(severity("true"), Some(Severity::Error));
    assert_eq!(severity("repeat"), Some(Severity::Error));
}

#[test]
fn test_rule_order() {
    // Sensitive beats invalid characters.
    assert_eq!(severity("secret-thing"), Some(Severity::Warning));
    // Unbalanced braces beat the typo table.
    assert_eq!(
        first("prnt", "set prnt = {").map(|d| d.severity),
        Some(Severity::Error)
    );
    // The typo table beats invalid characters.
    assert_eq!(severity("prnt-x"), Some(Severity::Hint));
}

// ============================================================================
// Numeric bounds
// ============================================================================

#[test]
fn test_repeat_count_bounds() {
    let context = NumericContext::RepeatCount { line: 4 };
    assert_eq!(check_numeric_bounds(&Value::Integer(1000), &context), None);
    let diagnostic = check_numeric_bounds(&Value::Integer(1001), &context).unwrap();
    assert_eq!(diagnostic.severity, Severity::Warning);
    assert_eq!(diagnostic.line, 4);
    assert_eq!(diagnostic.message, "Repeat count 1001 is very large");
}

#[test]
fn test_magnitude_bounds() {
    let context = NumericContext::Assignment { name: "x", line: 2 };
    assert_eq!(check_numeric_bounds(&Value::Integer(0), &context), None);
    assert_eq!(check_numeric_bounds(&Value::Float(1e10), &context), None);
    assert_eq!(
        check_numeric_bounds(&Value::Integer(20_000_000_000), &context)
            .map(|d| d.message),
        Some("The value of 'x' (20000000000) is extremely large".to_string())
    );
    assert!(check_numeric_bounds(&Value::Float(-1e11), &context).is_some());
    assert!(check_numeric_bounds(&Value::Float(1e-11), &context).is_some());
    assert_eq!(check_numeric_bounds(&Value::text("big"), &context), None);
}

// ============================================================================
// Commands
// ============================================================================

#[test]
fn test_check_command() {
    let diagnostic = check_command(3, "prnt \"hi\"");
    assert_eq!(diagnostic.severity, Severity::Warning);
    assert_eq!(
        diagnostic.to_string(),
        "Warning (line 3): Unknown command: prnt \"hi\"\n  help: Did you mean 'print'?"
    );

    let diagnostic = check_command(5, "dance wildly");
    assert_eq!(diagnostic.help, None);
    assert_eq!(
        diagnostic.to_string(),
        "Warning (line 5): Unknown command: dance wildly"
    );
}

// ============================================================================
// Lint
// ============================================================================

#[test]
fn test_lint_program() {
    let program = Program::parse(indoc! {r#"
        set x = 5
        set print = 1
        repeat 5000 {
            set x = "five"
        }
        dance
    "#})
    .unwrap();

    let rendered: Vec<String> = lint(&program).iter().map(ToString::to_string).collect();
    assert_eq!(
        rendered,
        vec![
            "Error (line 2): 'print' is a reserved word and cannot be a variable name".to_string(),
            "Warning (line 3): Repeat count 5000 is very large\n  help: Loops over 1000 times can make a program slow".to_string(),
            "Concept (line 4): Type mismatch for 'x': previously Integer, now Text\n  help: A variable can change type, but it is often a mistake".to_string(),
            "Warning (line 6): Unknown command: dance".to_string(),
        ]
    );
}

#[test]
fn test_lint_clean_program() {
    let program = Program::parse("set total = 0\nadd total and 1 into total\nprint total").unwrap();
    assert_eq!(lint(&program), vec![]);
}
