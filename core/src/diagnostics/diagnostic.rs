use core::fmt;

/// How serious a diagnostic is.
///
/// Only [`Severity::Error`] changes what a program does: it cancels the
/// statement that produced it. Everything else is advice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// A likely typo.
    Hint,
    /// Suspicious but legal.
    Warning,
    /// The statement cannot run.
    Error,
    /// A language concept worth learning about, such as a variable changing type.
    Concept,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Hint => write!(f, "Hint"),
            Severity::Warning => write!(f, "Warning"),
            Severity::Error => write!(f, "Error"),
            Severity::Concept => write!(f, "Concept"),
        }
    }
}

/// A message about one line of a program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    /// 1-based source line.
    pub line: usize,
    pub message: String,
    /// Optional suggestion shown under the message.
    pub help: Option<String>,
}

impl Diagnostic {
    pub fn new(severity: Severity, line: usize, message: impl Into<String>) -> Self {
        Self {
            severity,
            line,
            message: message.into(),
            help: None,
        }
    }

    pub fn hint(line: usize, message: impl Into<String>) -> Self {
        Self::new(Severity::Hint, line, message)
    }

    pub fn warning(line: usize, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, line, message)
    }

    pub fn error(line: usize, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, line, message)
    }

    pub fn concept(line: usize, message: impl Into<String>) -> Self {
        Self::new(Severity::Concept, line, message)
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// `Warning (line 3): message`, followed by an indented `help:` line when
/// there is one. No trailing newline.
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (line {}): {}", self.severity, self.line, self.message)?;
        if let Some(help) = &self.help {
            write!(f, "\n  help: {}", help)?;
        }
        Ok(())
    }
}
