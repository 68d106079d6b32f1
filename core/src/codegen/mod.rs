//! JavaScript code generator.
//!
//! Renders a parsed [`Program`] as JavaScript, one output line per emitted
//! statement. Generation never fails: statements the front end did not
//! recognize become comments, and expression text outside the grammar is
//! copied through as written.
//!
//! Variables that change kind between assignments are listed in a trailing
//! `Type Warnings:` block comment.
//!
//! ## Example
//!
//! ```
//! use jam_core::api::GeneratorOptions;
//! use jam_core::codegen;
//! use jam_core::syntax::Program;
//!
//! let program = Program::parse("set x = 5\nprint x * 2").unwrap();
//! let js = codegen::render(&program, &GeneratorOptions::default());
//! assert_eq!(js, "let x = 5;\nconsole.log(x * 2);");
//! ```

mod expr;
mod render;


pub use expr::{render_expr, render_expression};
pub use render::JsGenerator;

use crate::api::GeneratorOptions;
use crate::syntax::Program;

/// Render a parsed program as JavaScript.
pub fn render(program: &Program, options: &GeneratorOptions) -> String {
    JsGenerator::new(options).render(program)
}
