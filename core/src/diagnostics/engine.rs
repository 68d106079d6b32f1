//! Identifier, literal and command checks.

use super::diagnostic::Diagnostic;
use super::keywords::{is_reserved, sensitive_word, suggest_keyword};
use crate::expression::scan::is_identifier;
use crate::syntax::first_word;
use crate::values::Value;

/// Repeat counts above this are flagged.
pub const MAX_QUIET_REPEAT: i64 = 1000;
/// Magnitudes above this are flagged.
pub const LARGE_MAGNITUDE: f64 = 1e10;
/// Nonzero magnitudes below this are flagged.
pub const SMALL_MAGNITUDE: f64 = 1e-10;

/// Check a variable name about to be bound on `line`.
///
/// Rules run in a fixed order and the first one that fires is the only one
/// reported: missing name, sensitive name, unbalanced braces on the line,
/// keyword typo, invalid characters, reserved word.
pub fn check(identifier: &str, line: usize, line_text: &str) -> Vec<Diagnostic> {
    check_identifier(identifier, line, line_text)
        .into_iter()
        .collect()
}

fn check_identifier(identifier: &str, line: usize, line_text: &str) -> Option<Diagnostic> {
    if identifier.is_empty() {
        return Some(
            Diagnostic::error(line, "Missing variable name")
                .with_help("Write a name before '=', like: set score = 0"),
        );
    }

    if let Some(word) = sensitive_word(identifier) {
        return Some(
            Diagnostic::warning(
                line,
                format!("'{}' looks like it stores private data ({})", identifier, word),
            )
            .with_help("Never put real passwords or secrets in a program"),
        );
    }

    if !braces_balanced(line_text) {
        return Some(
            Diagnostic::error(line, "Unbalanced braces on this line")
                .with_help("Every '{' needs a matching '}'"),
        );
    }

    if let Some(keyword) = suggest_keyword(identifier) {
        return Some(
            Diagnostic::hint(
                line,
                format!("'{}' looks like a misspelling of '{}'", identifier, keyword),
            )
            .with_help(format!("Did you mean '{}'?", keyword)),
        );
    }

    if !is_identifier(identifier) {
        return Some(
            Diagnostic::error(line, format!("'{}' is not a valid variable name", identifier))
                .with_help(
                    "Names start with a letter or '_' and use only letters, digits and '_'",
                ),
        );
    }

    if is_reserved(identifier) {
        return Some(Diagnostic::error(
            line,
            format!("'{}' is a reserved word and cannot be a variable name", identifier),
        ));
    }

    None
}

/// Whether `{` and `}` pair up outside quoted text.
fn braces_balanced(text: &str) -> bool {
    let mut quote = None;
    let mut depth = 0i64;
    for c in text.chars() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '{') => depth += 1,
            (None, '}') => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}

/// Where a number being checked came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NumericContext<'a> {
    RepeatCount { line: usize },
    Assignment { name: &'a str, line: usize },
}

impl NumericContext<'_> {
    fn line(&self) -> usize {
        match self {
            NumericContext::RepeatCount { line } | NumericContext::Assignment { line, .. } => *line,
        }
    }

    fn describe(&self) -> String {
        match self {
            NumericContext::RepeatCount { .. } => "repeat count".to_string(),
            NumericContext::Assignment { name, .. } => format!("value of '{}'", name),
        }
    }
}

/// Flag numbers that are probably mistakes. Never blocks execution.
pub fn check_numeric_bounds(value: &Value, context: &NumericContext<'_>) -> Option<Diagnostic> {
    let line = context.line();

    if let (NumericContext::RepeatCount { .. }, Value::Integer(count)) = (context, value) {
        if *count > MAX_QUIET_REPEAT {
            return Some(
                Diagnostic::warning(line, format!("Repeat count {} is very large", count))
                    .with_help(format!(
                        "Loops over {} times can make a program slow",
                        MAX_QUIET_REPEAT
                    )),
            );
        }
    }

    let magnitude = value.as_number()?.abs();
    if magnitude > LARGE_MAGNITUDE {
        Some(Diagnostic::warning(
            line,
            format!("The {} ({}) is extremely large", context.describe(), value),
        ))
    } else if magnitude > 0.0 && magnitude < SMALL_MAGNITUDE {
        Some(Diagnostic::warning(
            line,
            format!("The {} ({}) is extremely small", context.describe(), value),
        ))
    } else {
        None
    }
}

/// Diagnostic for a line that is not a statement.
pub fn check_command(line: usize, text: &str) -> Diagnostic {
    let diagnostic = Diagnostic::warning(line, format!("Unknown command: {}", text));
    let (word, _) = first_word(text);
    match suggest_keyword(word) {
        Some(keyword) => diagnostic.with_help(format!("Did you mean '{}'?", keyword)),
        None => diagnostic,
    }
}
