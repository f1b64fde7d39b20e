//! Text normalization and n-gram extraction.
//!
//! The same [`Analyzer`] is applied to catalog questions at build time and
//! to every incoming query, so both sides land in the same term space.
//!
//! # Rules
//!
//! 1. Lowercase the text (Unicode-aware).
//! 2. Split into tokens: maximal runs of alphanumeric or `_` characters.
//!    Everything else (whitespace, punctuation, apostrophes) separates.
//! 3. Drop tokens shorter than two characters.
//! 4. For each `n` in `min_n..=max_n`, emit every window of `n` consecutive
//!    tokens joined by a single space. Shorter n-grams come first.
//!
//! # Example
//!
//! ```rust
//! use support_bot_core::analyzer::Analyzer;
//!
//! let terms = Analyzer::default().terms("Where's my package?");
//! assert_eq!(terms, vec!["where", "my", "package", "where my", "my package"]);
//! ```

use crate::error::{EngineError, Result};

/// Shortest token (in characters) that survives tokenization.
const MIN_TOKEN_CHARS: usize = 2;

/// Tokenizer plus n-gram window configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Analyzer {
    min_n: usize,
    max_n: usize,
}

impl Default for Analyzer {
    /// Unigrams and bigrams.
    fn default() -> Self {
        Self { min_n: 1, max_n: 2 }
    }
}

impl Analyzer {
    /// Create an analyzer emitting n-grams for every `n` in `min_n..=max_n`.
    pub fn new(min_n: usize, max_n: usize) -> Result<Self> {
        if min_n == 0 || min_n > max_n {
            return Err(EngineError::InvalidConfig(format!(
                "ngram range must satisfy 1 <= min <= max, got ({}, {})",
                min_n, max_n
            )));
        }
        Ok(Self { min_n, max_n })
    }

    pub fn ngram_range(&self) -> (usize, usize) {
        (self.min_n, self.max_n)
    }

    /// Lowercased word tokens, in text order.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        text.to_lowercase()
            .split(|c: char| !(c.is_alphanumeric() || c == '_'))
            .filter(|t| t.chars().count() >= MIN_TOKEN_CHARS)
            .map(str::to_string)
            .collect()
    }

    /// All n-gram terms for `text`. Repeats are kept; callers count them.
    pub fn terms(&self, text: &str) -> Vec<String> {
        let tokens = self.tokenize(text);
        let mut terms = Vec::new();
        for n in self.min_n..=self.max_n {
            if n > tokens.len() {
                break;
            }
            if n == 1 {
                terms.extend(tokens.iter().cloned());
            } else {
                terms.extend(tokens.windows(n).map(|w| w.join(" ")));
            }
        }
        terms
    }
}
