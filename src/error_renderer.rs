//! Rich diagnostic rendering using ariadne
//!
//! This module renders Jam diagnostics and errors with the offending source
//! line underlined and any help text attached.

use std::io::Write;
use std::ops::Range;

use ariadne::{Color, ColorGenerator, Label, Report, ReportKind, Source};

use crate::{Diagnostic, Error, Severity};

const SOURCE_ID: &str = "<program>";

/// Render an error with rich formatting to stderr
///
/// # Example
/// ```no_run
/// use jam::{render_error, transpile};
///
/// let source = "repeat 3 {\nprint 1";
/// if let Err(e) = transpile(source) {
///     render_error(&e, source);
/// }
/// ```
pub fn render_error(error: &Error, source: &str) {
    render_error_to_writer(error, source, &mut std::io::stderr(), true).ok();
}

/// Render an error to a specific writer
pub fn render_error_to(error: &Error, source: &str, writer: &mut dyn Write) -> std::io::Result<()> {
    render_error_to_writer(error, source, writer, true)
}

/// Render an error to a String (useful for web UIs, logs, etc.)
pub fn render_error_to_string(error: &Error, source: &str) -> String {
    let mut buf = Vec::new();
    render_error_to_writer(error, source, &mut buf, true).ok();
    String::from_utf8_lossy(&buf).to_string()
}

/// Render an error to a String without color codes (useful for tests)
pub fn render_error_to_string_no_color(error: &Error, source: &str) -> String {
    let mut buf = Vec::new();
    render_error_to_writer(error, source, &mut buf, false).ok();
    String::from_utf8_lossy(&buf).to_string()
}

/// Render non-fatal diagnostics (hints, warnings, concepts) to a String
///
/// # Example
/// ```
/// use jam::{Engine, render_diagnostics_to_string};
///
/// let source = "set prnt = 1";
/// let diagnostics = Engine::default().lint(source).unwrap();
/// let output = render_diagnostics_to_string(&diagnostics, source, false);
/// assert!(output.contains("Did you mean 'print'?"));
/// ```
pub fn render_diagnostics_to_string(diagnostics: &[Diagnostic], source: &str, use_color: bool) -> String {
    let mut buf = Vec::new();
    render_diagnostics(source, diagnostics, &mut buf, use_color).ok();
    String::from_utf8_lossy(&buf).to_string()
}

fn render_error_to_writer(
    error: &Error,
    source: &str,
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    match error {
        Error::Syntax { diagnostics } => render_diagnostics(source, diagnostics, writer, use_color),
        Error::Runtime { line, message } => {
            let diagnostic = Diagnostic::error(*line, message.clone());
            render_diagnostics(source, &[diagnostic], writer, use_color)
        }
        Error::ResourceExceeded { line, message } => {
            let diagnostic = Diagnostic::error(*line, format!("Resource limit exceeded: {}", message));
            render_diagnostics(source, &[diagnostic], writer, use_color)
        }
    }
}

fn render_diagnostics(
    source: &str,
    diagnostics: &[Diagnostic],
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    for diag in diagnostics {
        let mut colors = ColorGenerator::new();
        colors.next(); // Skip the first color.

        let kind = match diag.severity {
            Severity::Error => ReportKind::Error,
            Severity::Warning => ReportKind::Warning,
            Severity::Hint => ReportKind::Advice,
            Severity::Concept => ReportKind::Custom("Concept", Color::Cyan),
        };

        let span = line_span(source, diag.line);
        let mut report = Report::build(kind, (SOURCE_ID, span.clone()))
            .with_message(&diag.message)
            .with_config(ariadne::Config::default().with_color(use_color));

        report = report.with_label(
            Label::new((SOURCE_ID, span))
                .with_message(&diag.message)
                .with_color(colors.next()),
        );

        if let Some(help) = &diag.help {
            report = report.with_help(help);
        }

        report.finish().write((SOURCE_ID, Source::from(source)), &mut *writer)?;
    }

    Ok(())
}

/// Byte range of the trimmed text of 1-based `line`, or an empty range at
/// the end of `source` when there is no such line.
fn line_span(source: &str, line: usize) -> Range<usize> {
    let mut offset = 0;
    for (index, text) in source.split('\n').enumerate() {
        if index + 1 == line {
            let text = text.trim_end();
            let start = offset + (text.len() - text.trim_start().len());
            return start..offset + text.len();
        }
        offset += text.len() + 1;
    }
    source.len()..source.len()
}
