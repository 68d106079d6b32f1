//! Core of the Jam language: block splitting, the statement model, expression
//! evaluation, beginner diagnostics, the tree-walking evaluator and the
//! JavaScript code generator.
//!
//! Most users want [`api::execute`] (run a program, get its output) or
//! [`api::transpile`] (render a program as JavaScript).

pub mod api;
pub mod codegen;
pub mod diagnostics;
pub mod environment;
pub mod evaluator;
pub mod expression;
pub mod syntax;
pub mod values;

pub use api::{execute, transpile};

/// Test utilities for enabling logging in tests
#[cfg(test)]
pub mod test_utils {
    /// Initialize tracing subscriber for tests with DEBUG level
    /// Call this at the start of tests where you want to see logging output
    ///
    /// # Example
    /// ```ignore
    /// #[test]
    /// fn test_repeat_loop() {
    ///     test_utils::init_test_logging();
    ///     // ... your test code
    /// }
    /// ```
    pub fn init_test_logging() {
        use tracing_subscriber::{EnvFilter, fmt};

        // Try to initialize, ignore error if already initialized
        let _ = fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .with_test_writer()
            .try_init();
    }
}
