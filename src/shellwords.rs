//! Shell-style argument tokenization
//!
//! Extra CMake arguments arrive from the command line as a single string
//! (`--config-args "-DWITH_CUDA=ON -DFOO='a b'"`) and must be split into an
//! argument vector before being appended to the computed arguments.
//!
//! Quoting rules (POSIX-like):
//! - unquoted whitespace separates words
//! - single quotes preserve their contents literally
//! - double quotes preserve their contents, except that `\"` and `\\` are
//!   escapes
//! - a backslash outside quotes escapes the next character
//! - an unterminated quote or a trailing backslash is an error

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SplitError {
    #[error("unterminated quote in argument string")]
    UnterminatedQuote,

    #[error("trailing backslash in argument string")]
    TrailingBackslash,
}

/// Split a shell-style string into words.
pub fn split(input: &str) -> Result<Vec<String>, SplitError> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        match c {
            c if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            '\'' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some('\'') => break,
                        Some(c) => current.push(c),
                        None => return Err(SplitError::UnterminatedQuote),
                    }
                }
            }
            '"' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some(c @ ('"' | '\\')) => current.push(c),
                            Some(c) => {
                                // Backslash is literal before anything else
                                current.push('\\');
                                current.push(c);
                            }
                            None => return Err(SplitError::UnterminatedQuote),
                        },
                        Some(c) => current.push(c),
                        None => return Err(SplitError::UnterminatedQuote),
                    }
                }
            }
            '\\' => {
                in_word = true;
                match chars.next() {
                    Some(c) => current.push(c),
                    None => return Err(SplitError::TrailingBackslash),
                }
            }
            c => {
                in_word = true;
                current.push(c);
            }
        }
    }

    if in_word {
        words.push(current);
    }

    Ok(words)
}

/// Join words into a single string such that `split` recovers the original
/// word boundaries.
pub fn join<S: AsRef<str>>(words: &[S]) -> String {
    words
        .iter()
        .map(|word| quote(word.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}

fn quote(word: &str) -> String {
    if word.is_empty() {
        return "''".to_string();
    }

    let needs_quoting = word
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '\'' | '"' | '\\'));

    if !needs_quoting {
        return word.to_string();
    }

    // Single-quote the word, splicing embedded single quotes as '\''
    let escaped = word.replace('\'', "'\\''");
    format!("'{escaped}'")
}
