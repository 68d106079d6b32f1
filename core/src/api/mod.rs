//! Public API for the Jam language.
//!
//! Two free functions cover the common cases:
//!
//! - [`execute`] runs a program and returns its captured output. It never
//!   fails; problems become lines in the output.
//! - [`transpile`] renders a program as JavaScript.
//!
//! [`Engine`] does the same with custom [`EngineOptions`] and also exposes
//! structured results ([`RunReport`]) and standalone linting.
//!
//! # Example
//!
//! ```
//! use jam_core::api::{execute, transpile};
//!
//! let source = "set x = 5\nif x > 3 {\nprint \"big\"\n} else {\nprint \"small\"\n}";
//!
//! assert_eq!(execute(source), "big\n");
//! assert_eq!(
//!     transpile(source).unwrap(),
//!     "let x = 5;\nif (x > 3) {\nconsole.log(\"big\");\n}\nelse {\nconsole.log(\"small\");\n}"
//! );
//! ```

pub mod engine;
pub mod error;
pub mod options;

pub use crate::evaluator::RunReport;
pub use engine::Engine;
pub use error::Error;
pub use options::{EngineOptions, ExecutionOptions, GeneratorOptions};

/// Run a program with default options and return everything it printed.
///
/// Diagnostics appear in the output where they were raised; a fatal error
/// ends the output with an `Error (line N): ...` line.
pub fn execute(source: &str) -> String {
    Engine::default().run(source).output()
}

/// Render a program as JavaScript with default options.
pub fn transpile(source: &str) -> Result<String, Error> {
    Engine::default().transpile(source)
}
