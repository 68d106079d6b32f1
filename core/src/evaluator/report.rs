use super::error::ExecutionError;
use crate::diagnostics::Diagnostic;

/// Everything a run produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    /// Printed lines in order, including rendered diagnostics.
    pub lines: Vec<String>,
    /// Diagnostics raised during the run, in order.
    pub diagnostics: Vec<Diagnostic>,
    /// The error that stopped the run, if any.
    pub error: Option<ExecutionError>,
}

impl RunReport {
    pub fn from_error(error: ExecutionError) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }

    /// The captured output: one `\n`-terminated line per printed line, with
    /// the fatal error, if any, rendered as the last line.
    pub fn output(&self) -> String {
        let mut output = String::new();
        for line in &self.lines {
            output.push_str(line);
            output.push('\n');
        }
        if let Some(error) = &self.error {
            output.push_str(&format!("Error (line {}): {}\n", error.line, error.kind));
        }
        output
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}
