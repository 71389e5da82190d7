//! Input tokenizing for the REPL.

use std::sync::OnceLock;

use regex::Regex;

// Words, optionally joined by hyphens: "canalave-city-area", "mr-mime"
const TOKEN_PATTERN: &str = r"[[:alpha:]]+(?:-[[:alnum:]]+)*";

fn tokenizer() -> &'static Regex {
    static TOKENIZER: OnceLock<Regex> = OnceLock::new();
    TOKENIZER.get_or_init(|| Regex::new(TOKEN_PATTERN).expect("token pattern is valid"))
}

/// Lowercases a line of input and splits it into command tokens.
///
/// Punctuation and whitespace separate tokens and are dropped.
pub fn clean_input(line: &str) -> Vec<String> {
    let lower = line.to_lowercase();
    tokenizer()
        .find_iter(&lower)
        .map(|m| m.as_str().to_string())
        .collect()
}
