//! Word tables used by the identifier checks.

use crate::syntax::STATEMENT_WORDS;

/// Words that may not be used as variable names besides the statement
/// keywords.
const LITERAL_WORDS: &[&str] = &["true", "false", "and", "or", "not"];

/// Substrings that suggest a variable holds something private.
pub const SENSITIVE_WORDS: &[&str] = &[
    "password",
    "passwd",
    "secret",
    "token",
    "apikey",
    "api_key",
    "credit_card",
    "creditcard",
    "ssn",
];

/// Common misspellings of each keyword. A word that starts with one of these
/// is probably a typo for the keyword.
///
/// Entries must not be prefixes of ordinary English words ("sett" would flag
/// `settings`).
const MISSPELLINGS: &[(&str, &[&str])] = &[
    ("print", &["prnt", "pritn", "prnit", "pirnt", "prit", "printt"]),
    ("repeat", &["repet", "repaet", "reapeat", "rpeat", "repat"]),
    (
        "function",
        &["funtion", "fucntion", "functon", "fuction", "funciton"],
    ),
    ("return", &["retrun", "reutrn", "retun", "returm"]),
    ("call", &["calll", "clal"]),
    ("if", &["iff"]),
    ("else", &["esle"]),
    ("say", &["sya"]),
    ("ask", &["aks"]),
    ("multiply", &["mulitply", "multipy", "multply"]),
    ("uppercase", &["uppercse", "upercase"]),
    ("lowercase", &["lowercse", "lowecase"]),
    ("reverse", &["reverce", "revrese"]),
    ("random", &["radnom", "randon", "ranodm"]),
    ("choose", &["chooes", "chosoe"]),
    ("timer", &["timre", "tiemr"]),
    ("wait", &["wiat", "wati"]),
];

/// The keyword `word` most likely misspells, if any.
pub fn suggest_keyword(word: &str) -> Option<&'static str> {
    let word = word.to_lowercase();
    MISSPELLINGS
        .iter()
        .find(|(_, typos)| typos.iter().any(|typo| word.starts_with(typo)))
        .map(|(keyword, _)| *keyword)
}

/// The sensitive substring contained in `name`, if any.
pub fn sensitive_word(name: &str) -> Option<&'static str> {
    let name = name.to_lowercase();
    SENSITIVE_WORDS
        .iter()
        .find(|word| name.contains(*word))
        .copied()
}

pub fn is_reserved(word: &str) -> bool {
    STATEMENT_WORDS.contains(&word) || LITERAL_WORDS.contains(&word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggest_keyword() {
        assert_eq!(suggest_keyword("prnt"), Some("print"));
        assert_eq!(suggest_keyword("Pritn_total"), Some("print"));
        assert_eq!(suggest_keyword("retrun"), Some("return"));
        assert_eq!(suggest_keyword("total"), None);
        assert_eq!(suggest_keyword("print"), None);
    }

    #[test]
    fn test_misspellings_are_not_keyword_prefixes() {
        for (keyword, typos) in MISSPELLINGS {
            for typo in *typos {
                assert!(!keyword.starts_with(typo), "{} flags {}", typo, keyword);
            }
        }
    }

    #[test]
    fn test_sensitive_word() {
        assert_eq!(sensitive_word("user_Password"), Some("password"));
        assert_eq!(sensitive_word("API_KEY"), Some("api_key"));
        assert_eq!(sensitive_word("score"), None);
    }

    #[test]
    fn test_is_reserved() {
        assert!(is_reserved("print"));
        assert!(is_reserved("true"));
        assert!(is_reserved("length"));
        assert!(!is_reserved("total"));
    }
}
