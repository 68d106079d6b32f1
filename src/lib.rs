//! Jam - a keyword-sentence scripting language for beginners
//!
//! # Overview
//!
//! Jam programs read like short English instructions:
//!
//! ```text
//! set name = "Ada"
//! repeat 3 times {
//!     print "hello", name
//! }
//! ```
//!
//! One front end feeds two back ends: a tree-walking evaluator that runs the
//! program and captures what it prints, and a code generator that renders the
//! same program as JavaScript. Along the way a diagnostics layer points out
//! likely beginner mistakes (misspelled keywords, unsafe variable names,
//! suspicious numbers, variables that change type).
//!
//! # Quick Start
//!
//! ```
//! use jam::{execute, transpile};
//!
//! let source = "set x = 5\nif x > 3 {\nprint \"big\"\n} else {\nprint \"small\"\n}";
//!
//! assert_eq!(execute(source), "big\n");
//! assert!(transpile(source).unwrap().starts_with("let x = 5;"));
//! ```
//!
//! # Configuration
//!
//! [`Engine`] takes [`EngineOptions`] for resource limits, a fixed random
//! seed, scripted answers to `ask`, and the indentation of generated code:
//!
//! ```
//! use jam::{Engine, EngineOptions, ExecutionOptions};
//!
//! let engine = Engine::new(EngineOptions {
//!     execution: ExecutionOptions {
//!         seed: Some(7),
//!         answers: vec!["Ada".to_string()],
//!         ..ExecutionOptions::default()
//!     },
//!     ..EngineOptions::default()
//! });
//!
//! let report = engine.run("ask \"Name?\" into name\nprint name");
//! assert_eq!(report.lines, ["(input requested: Name?)", "Ada"]);
//! ```

// Re-export public API from jam_core
pub use jam_core::api::{
    Engine, EngineOptions, Error, ExecutionOptions, GeneratorOptions, RunReport, execute,
    transpile,
};

// Re-export commonly used types and values
pub use jam_core::diagnostics::{Diagnostic, Severity};
pub use jam_core::syntax::Program;
pub use jam_core::values::{self, Value, ValueKind};

pub mod error_renderer;

pub use error_renderer::{
    render_diagnostics_to_string, render_error, render_error_to, render_error_to_string,
    render_error_to_string_no_color,
};
