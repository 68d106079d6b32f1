//! Statement head classification.
//!
//! Every statement starts with a keyword of one or two words. The head is
//! tokenized once, before any statement-specific parsing, so `else if` is never
//! mistaken for `else` and `set_x = 1` is never mistaken for `set`.

/// Statement keywords, including the two-word forms.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Keyword {
    Set,
    Let,
    Print,
    Say,
    Ask,
    Add,
    Multiply,
    LengthOf,
    Uppercase,
    Lowercase,
    Reverse,
    SquareOf,
    SqrtOf,
    RandomBetween,
    ChooseFrom,
    TimerStart,
    TimerStop,
    Wait,
    Function,
    Return,
    Call,
    If,
    ElseIf,
    Else,
    Otherwise,
    Repeat,
}

/// Words a statement may start with.
pub const STATEMENT_WORDS: &[&str] = &[
    "set",
    "let",
    "print",
    "say",
    "ask",
    "add",
    "multiply",
    "length",
    "uppercase",
    "lowercase",
    "reverse",
    "square",
    "sqrt",
    "random",
    "choose",
    "timer",
    "wait",
    "function",
    "return",
    "call",
    "if",
    "else",
    "otherwise",
    "repeat",
];

/// Split off the leading word (`[A-Za-z0-9_]+`). The remainder is trimmed.
pub fn first_word(text: &str) -> (&str, &str) {
    let end = text
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(text.len());
    (&text[..end], text[end..].trim())
}

/// Tokenize the head of a statement into its keyword and the remaining text.
///
/// Returns `None` when the line does not start with a keyword.
pub fn classify(text: &str) -> Option<(Keyword, &str)> {
    let (word, rest) = first_word(text);
    let (next, after_next) = first_word(rest);

    let single = |keyword| Some((keyword, rest));
    let double = |keyword| Some((keyword, after_next));

    match (word, next) {
        ("set", _) => single(Keyword::Set),
        ("let", _) => single(Keyword::Let),
        ("print", _) => single(Keyword::Print),
        ("say", _) => single(Keyword::Say),
        ("ask", _) => single(Keyword::Ask),
        ("add", _) => single(Keyword::Add),
        ("multiply", _) => single(Keyword::Multiply),
        ("length", "of") => double(Keyword::LengthOf),
        ("uppercase", _) => single(Keyword::Uppercase),
        ("lowercase", _) => single(Keyword::Lowercase),
        ("reverse", _) => single(Keyword::Reverse),
        ("square", "of") => double(Keyword::SquareOf),
        ("sqrt", "of") => double(Keyword::SqrtOf),
        ("random", "between") => double(Keyword::RandomBetween),
        ("choose", "from") => double(Keyword::ChooseFrom),
        ("timer", "start") => double(Keyword::TimerStart),
        ("timer", "stop") => double(Keyword::TimerStop),
        ("wait", _) => single(Keyword::Wait),
        ("function", _) => single(Keyword::Function),
        ("return", _) => single(Keyword::Return),
        ("call", _) => single(Keyword::Call),
        ("if", _) => single(Keyword::If),
        ("else", "if") => double(Keyword::ElseIf),
        ("else", _) => single(Keyword::Else),
        ("otherwise", _) => single(Keyword::Otherwise),
        ("repeat", _) => single(Keyword::Repeat),
        _ => None,
    }
}
