//! Quote- and bracket-aware scanning helpers.
//!
//! Statement heads and list literals are split on separators that only count
//! at the top level: a comma inside `"a, b"` or `[1, 2]` is not a separator.

/// Tracks whether a scan position is inside quotes or brackets.
#[derive(Debug, Default)]
struct Nesting {
    quote: Option<char>,
    depth: usize,
}

impl Nesting {
    /// Feed one character. Returns true when the character sits at the top level.
    fn step(&mut self, c: char) -> bool {
        if let Some(q) = self.quote {
            if c == q {
                self.quote = None;
            }
            return false;
        }
        match c {
            '"' | '\'' => {
                self.quote = Some(c);
                false
            }
            '[' | '(' | '{' => {
                self.depth += 1;
                false
            }
            ']' | ')' | '}' => {
                self.depth = self.depth.saturating_sub(1);
                false
            }
            _ => self.depth == 0,
        }
    }
}

/// Split `text` on `sep` wherever it appears outside quotes and brackets.
///
/// Pieces are trimmed. An empty input yields a single empty piece.
pub fn split_top_level(text: &str, sep: char) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut nesting = Nesting::default();
    let mut start = 0;
    for (i, c) in text.char_indices() {
        if nesting.step(c) && c == sep {
            pieces.push(text[start..i].trim());
            start = i + c.len_utf8();
        }
    }
    pieces.push(text[start..].trim());
    pieces
}

/// Byte offset of the first top-level occurrence of the keyword `word`,
/// surrounded by whitespace.
pub fn find_top_level_word(text: &str, word: &str) -> Option<usize> {
    let mut nesting = Nesting::default();
    let mut prev_is_space = false;
    for (i, c) in text.char_indices() {
        let top = nesting.step(c);
        if top && prev_is_space && text[i..].starts_with(word) {
            let rest = &text[i + word.len()..];
            if rest.starts_with(char::is_whitespace) {
                return Some(i);
            }
        }
        prev_is_space = c.is_whitespace() && nesting.quote.is_none();
    }
    None
}

/// Split `text` around the first top-level keyword `word`.
///
/// `split_on_word("a and b", "and")` is `Some(("a", "b"))`.
pub fn split_on_word<'a>(text: &'a str, word: &str) -> Option<(&'a str, &'a str)> {
    let at = find_top_level_word(text, word)?;
    Some((text[..at].trim(), text[at + word.len()..].trim()))
}

/// Split `text` around the last top-level keyword `word`.
pub fn rsplit_on_word<'a>(text: &'a str, word: &str) -> Option<(&'a str, &'a str)> {
    let mut last = None;
    let mut offset = 0;
    while let Some(at) = find_top_level_word(&text[offset..], word) {
        last = Some(offset + at);
        offset += at + word.len();
    }
    let at = last?;
    Some((text[..at].trim(), text[at + word.len()..].trim()))
}

/// Whether `text` is wrapped in `open`/`close` with the opener matched by the
/// final character, as in `[1, [2]]` but not `[1] + [2]`.
pub fn is_enclosed(text: &str, open: char, close: char) -> bool {
    if !text.starts_with(open) || !text.ends_with(close) || text.len() < 2 {
        return false;
    }
    let mut quote = None;
    let mut depth = 0usize;
    for (i, c) in text.char_indices() {
        if let Some(q) = quote {
            if c == q {
                quote = None;
            }
            continue;
        }
        if c == '"' || c == '\'' {
            quote = Some(c);
        } else if c == open {
            depth += 1;
        } else if c == close {
            depth = depth.saturating_sub(1);
            if depth == 0 {
                return i + c.len_utf8() == text.len();
            }
        }
    }
    false
}

/// `[A-Za-z_][A-Za-z0-9_]*`
pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Contents of a quoted text literal: `"..."` or `'...'` with no interior
/// quote of the same kind.
pub fn quoted_text(text: &str) -> Option<&str> {
    let quote = text.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    if text.len() < 2 || !text.ends_with(quote) {
        return None;
    }
    let inner = &text[1..text.len() - 1];
    (!inner.contains(quote)).then_some(inner)
}
