use thiserror::Error;

/// Structural errors found while splitting a program into blocks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    /// A block opened with `{` was never closed.
    #[error("This block is never closed with '}}'")]
    UnterminatedBlock { line: usize },
}

impl SyntaxError {
    pub fn line(&self) -> usize {
        match self {
            SyntaxError::UnterminatedBlock { line } => *line,
        }
    }
}
