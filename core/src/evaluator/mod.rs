//! Tree-walking evaluator for Jam programs.
//!
//! The evaluator executes a parsed [`Program`] statement by statement and
//! captures everything it prints into a [`RunReport`].
//!
//! ## Design Principles
//!
//! - **Never panic**: every failure becomes an [`ExecutionError`] in the report
//! - **Stack-safe**: call depth and total loop iterations are bounded by
//!   [`ExecutionOptions`]
//! - **Isolated**: every run gets its own environment, function table, type
//!   observations, random number generator and timer
//!
//! ## Example
//!
//! ```
//! use jam_core::api::ExecutionOptions;
//! use jam_core::evaluator;
//! use jam_core::syntax::Program;
//!
//! let program = Program::parse("set x = 2\nprint x * 21").unwrap();
//! let report = evaluator::run(&program, &ExecutionOptions::default());
//! assert_eq!(report.output(), "42\n");
//! ```

mod error;
mod eval;
mod report;


pub use error::{ExecutionError, ExecutionErrorKind, ResourceExceeded};
pub use eval::Interpreter;
pub use report::RunReport;

use crate::api::ExecutionOptions;
use crate::syntax::Program;

/// Run a parsed program with the given options.
pub fn run(program: &Program, options: &ExecutionOptions) -> RunReport {
    Interpreter::new(options).run(program)
}
