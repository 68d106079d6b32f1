//! Block splitting.
//!
//! A block opens with a line ending in `{` and closes with a line that is
//! exactly `}`. Conditional chains may also close a block with a line like
//! `} else {`, which ends the current body and opens the next one.

use tracing::trace;

use super::error::SyntaxError;

/// One line of program text with its 1-based line number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLine<'a> {
    pub number: usize,
    /// Trimmed text.
    pub text: &'a str,
}

impl<'a> SourceLine<'a> {
    /// Blank lines and `#` comments carry no statement.
    pub fn is_skipped(&self) -> bool {
        self.text.is_empty() || self.text.starts_with('#')
    }

    pub fn opens_block(&self) -> bool {
        self.text.ends_with('{')
    }

    pub fn is_closer(&self) -> bool {
        self.text == "}"
    }

    /// `} else {`, `} else if x > 1 {` and the like.
    pub fn is_chained_closer(&self) -> bool {
        self.text.len() > 1 && self.text.starts_with('}') && self.text.ends_with('{')
    }
}

/// Number and trim every line of `source`.
pub fn source_lines(source: &str) -> Vec<SourceLine<'_>> {
    source
        .lines()
        .enumerate()
        .map(|(i, text)| SourceLine {
            number: i + 1,
            text: text.trim(),
        })
        .collect()
}

/// Collect the body of the block whose first line is `lines[start]`.
///
/// Returns the body lines (blank lines and comments dropped, nested blocks
/// kept verbatim) and the index of the line that closed the block.
pub fn split<'a>(
    lines: &[SourceLine<'a>],
    start: usize,
) -> Result<(Vec<SourceLine<'a>>, usize), SyntaxError> {
    let mut block = Vec::new();
    let mut depth = 0usize;

    for (index, line) in lines.iter().enumerate().skip(start) {
        if line.is_skipped() {
            continue;
        }

        if line.is_chained_closer() {
            if depth == 0 {
                trace!(start, end = index, "block closed by chained closer");
                return Ok((block, index));
            }
        } else if line.opens_block() {
            depth += 1;
        } else if line.is_closer() {
            if depth == 0 {
                trace!(start, end = index, "block closed");
                return Ok((block, index));
            }
            depth -= 1;
        }
        block.push(*line);
    }

    let line = start
        .checked_sub(1)
        .and_then(|opener| lines.get(opener))
        .or_else(|| lines.last())
        .map_or(1, |line| line.number);
    Err(SyntaxError::UnterminatedBlock { line })
}
