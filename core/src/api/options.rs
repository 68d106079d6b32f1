//! Configuration options for the Jam engine.

/// Configuration options for running programs.
///
/// These options control resource limits and the sources of outside input
/// (randomness and answers to `ask`).
///
/// # Example
///
/// ```
/// use jam_core::api::ExecutionOptions;
///
/// let options = ExecutionOptions {
///     seed: Some(7),
///     answers: vec!["Ada".to_string()],
///     ..ExecutionOptions::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct ExecutionOptions {
    /// Maximum depth of nested `call`s (for recursion protection).
    ///
    /// Default: 200
    pub max_call_depth: usize,

    /// Maximum number of loop iterations in one run, across all loops (if Some).
    ///
    /// Set to `None` for unlimited iterations (be careful with untrusted code!).
    ///
    /// Default: Some(1_000_000)
    pub max_iterations: Option<usize>,

    /// Seed for `random between` and `choose from`. `None` seeds from the OS.
    ///
    /// Default: None
    pub seed: Option<u64>,

    /// Scripted answers handed to `ask` statements, in order. Once they run
    /// out, `ask` binds an empty text.
    ///
    /// Default: empty
    pub answers: Vec<String>,
}

impl Default for ExecutionOptions {
    fn default() -> Self {
        Self {
            max_call_depth: 200,
            max_iterations: Some(1_000_000),
            seed: None,
            answers: Vec::new(),
        }
    }
}

/// Configuration options for JavaScript generation.
///
/// # Example
///
/// ```
/// use jam_core::api::GeneratorOptions;
///
/// let options = GeneratorOptions { indent_width: 2 };
/// ```
#[derive(Debug, Clone, Default)]
pub struct GeneratorOptions {
    /// Spaces per nesting level in generated code. Zero keeps every line flush
    /// left.
    ///
    /// Default: 0
    pub indent_width: usize,
}

/// Configuration options for the Jam engine.
///
/// # Example
///
/// ```
/// use jam_core::api::{EngineOptions, ExecutionOptions, GeneratorOptions};
///
/// let options = EngineOptions {
///     execution: ExecutionOptions {
///         max_call_depth: 50,
///         ..ExecutionOptions::default()
///     },
///     generator: GeneratorOptions { indent_width: 4 },
/// };
/// ```
#[derive(Debug, Clone, Default)]
pub struct EngineOptions {
    pub execution: ExecutionOptions,
    pub generator: GeneratorOptions,
}
