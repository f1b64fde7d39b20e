//! Core data types that flow between the catalog, the engine, and the host.

use serde::{Deserialize, Serialize};

/// One canned question with its answer.
///
/// Entries are immutable once loaded; their position in the catalog is the
/// stable index that ties a question's vector to its answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub question: String,
    pub answer: String,
}

impl CatalogEntry {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// The answer returned for a single user message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    /// Matched catalog answer, or the fallback text.
    pub answer: String,
    /// Similarity of the match in `[0.0, 1.0]`; exactly `0.0` on fallback.
    pub confidence: f64,
    /// Catalog index of the matched entry (`None` on fallback).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched: Option<usize>,
    /// Scoring breakdown (populated when `explain` is requested).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explain: Option<ScoreExplanation>,
}

impl Response {
    /// True when no catalog entry cleared the threshold.
    pub fn is_fallback(&self) -> bool {
        self.matched.is_none()
    }
}

/// Scoring breakdown for a [`Response`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreExplanation {
    /// Index of the highest-scoring entry, even if it lost to the threshold.
    pub best_index: usize,
    /// Question text of that entry.
    pub best_question: String,
    /// Raw best cosine similarity before the threshold was applied.
    pub similarity: f64,
    /// Threshold the similarity had to strictly exceed.
    pub threshold: f64,
    /// Query terms that exist in the vocabulary.
    pub query_terms: Vec<String>,
    /// Number of dimensions in the vector space.
    pub vocabulary_size: usize,
}
