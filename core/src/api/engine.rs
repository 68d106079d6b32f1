//! The Jam engine.

use tracing::debug;

use super::{EngineOptions, Error};
use crate::codegen;
use crate::diagnostics::{self, Diagnostic};
use crate::evaluator::{self, RunReport};
use crate::syntax::Program;

/// Runs, renders and lints Jam programs with one set of options.
///
/// The engine holds no state between calls: every run gets a fresh
/// environment, function table, random number generator and type
/// observations.
///
/// # Example
///
/// ```
/// use jam_core::api::{Engine, EngineOptions};
///
/// let engine = Engine::new(EngineOptions::default());
///
/// let report = engine.run("set x = 5\nprint x + 1");
/// assert_eq!(report.output(), "6\n");
///
/// let js = engine.transpile("set x = 5\nprint x + 1").unwrap();
/// assert_eq!(js, "let x = 5;\nconsole.log(x + 1);");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Engine {
    options: EngineOptions,
}

impl Engine {
    pub fn new(options: EngineOptions) -> Self {
        Self { options }
    }

    /// Access the engine options.
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Parse a program without running it.
    pub fn parse(&self, source: &str) -> Result<Program, Error> {
        Ok(Program::parse(source)?)
    }

    /// Run a program and capture everything it prints.
    ///
    /// Never fails: a program that cannot be parsed produces a report whose
    /// only content is the error.
    pub fn run(&self, source: &str) -> RunReport {
        match Program::parse(source) {
            Ok(program) => evaluator::run(&program, &self.options.execution),
            Err(err) => {
                debug!(%err, "program rejected before running");
                RunReport::from_error(err.into())
            }
        }
    }

    /// Render a program as JavaScript.
    pub fn transpile(&self, source: &str) -> Result<String, Error> {
        let program = Program::parse(source)?;
        Ok(codegen::render(&program, &self.options.generator))
    }

    /// Check a program for likely mistakes without running it.
    pub fn lint(&self, source: &str) -> Result<Vec<Diagnostic>, Error> {
        let program = Program::parse(source)?;
        Ok(diagnostics::lint(&program))
    }
}
