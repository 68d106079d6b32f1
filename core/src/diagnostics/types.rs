//! Type drift: a variable that holds one kind of value and later another.

use hashbrown::HashMap;

use super::diagnostic::Diagnostic;
use crate::expression::scan::{is_enclosed, quoted_text};
use crate::values::ValueKind;

/// Last kind seen for each variable.
///
/// Owned by one run or one render, never shared between them.
#[derive(Debug, Clone, Default)]
pub struct TypeObservations {
    kinds: HashMap<String, ValueKind>,
}

impl TypeObservations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `name` now holds a `kind` value.
    ///
    /// Returns a [`Severity::Concept`](super::Severity::Concept) diagnostic
    /// when the kind differs from the previous observation.
    pub fn observe(&mut self, name: &str, kind: ValueKind, line: usize) -> Option<Diagnostic> {
        match self.kinds.insert(name.to_string(), kind) {
            Some(previous) if previous != kind => Some(
                Diagnostic::concept(
                    line,
                    format!(
                        "Type mismatch for '{}': previously {}, now {}",
                        name, previous, kind
                    ),
                )
                .with_help("A variable can change type, but it is often a mistake"),
            ),
            _ => None,
        }
    }

    pub fn get(&self, name: &str) -> Option<ValueKind> {
        self.kinds.get(name).copied()
    }

    /// Kind of a value from its source text alone, without evaluating it.
    ///
    /// Recognizes literals, and names already observed. Anything else is
    /// unknown.
    pub fn infer(&self, text: &str) -> Option<ValueKind> {
        let text = text.trim();
        let unsigned = text.strip_prefix('-').unwrap_or(text);
        let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());

        if digits(unsigned) {
            return Some(ValueKind::Integer);
        }
        if let Some((whole, fraction)) = unsigned.split_once('.') {
            if digits(whole) && digits(fraction) {
                return Some(ValueKind::Float);
            }
        }
        match text {
            "true" | "false" => return Some(ValueKind::Boolean),
            _ => {}
        }
        if quoted_text(text).is_some() {
            return Some(ValueKind::Text);
        }
        if is_enclosed(text, '[', ']') {
            return Some(ValueKind::List);
        }
        self.get(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Severity;

    #[test]
    fn test_first_observation_is_silent() {
        let mut types = TypeObservations::new();
        assert_eq!(types.observe("x", ValueKind::Integer, 1), None);
        assert_eq!(types.observe("x", ValueKind::Integer, 2), None);
    }

    #[test]
    fn test_kind_change_is_reported() {
        let mut types = TypeObservations::new();
        types.observe("x", ValueKind::Integer, 1);
        let diagnostic = types.observe("x", ValueKind::Text, 2).unwrap();
        assert_eq!(diagnostic.severity, Severity::Concept);
        assert_eq!(diagnostic.line, 2);
        assert_eq!(
            diagnostic.message,
            "Type mismatch for 'x': previously Integer, now Text"
        );
        // The new kind is now the reference.
        assert_eq!(types.observe("x", ValueKind::Text, 3), None);
    }

    #[test]
    fn test_infer_from_literal_text() {
        let mut types = TypeObservations::new();
        assert_eq!(types.infer("42"), Some(ValueKind::Integer));
        assert_eq!(types.infer("-3.5"), Some(ValueKind::Float));
        assert_eq!(types.infer("true"), Some(ValueKind::Boolean));
        assert_eq!(types.infer("'hi'"), Some(ValueKind::Text));
        assert_eq!(types.infer("[1, 2]"), Some(ValueKind::List));
        assert_eq!(types.infer("x + 1"), None);

        types.observe("name", ValueKind::Text, 1);
        assert_eq!(types.infer("name"), Some(ValueKind::Text));
    }
}
