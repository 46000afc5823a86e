//! Splitting an input line into command tokens.

/// Upper bound on the number of tokens produced from a single line.
pub const MAX_TOKENS: usize = 64;

/// Split a line into tokens on the space character.
///
/// Runs of consecutive spaces yield no empty tokens, and tabs are ordinary
/// word characters, not delimiters. At most [`MAX_TOKENS`] tokens are
/// produced; anything past the cap is silently dropped.
pub fn split_into_tokens(line: &str) -> Vec<&str> {
    line.split(' ')
        .filter(|token| !token.is_empty())
        .take(MAX_TOKENS)
        .collect()
}
