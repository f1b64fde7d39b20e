//! Best-match retrieval over a TF-IDF vector space.
//!
//! The engine has two states. A freshly constructed engine is
//! [`EngineState::Unbuilt`] and rejects queries with
//! [`EngineError::NotReady`]. After [`RetrievalEngine::build`] succeeds it is
//! [`EngineState::Ready`] and every query returns a value.
//!
//! # Query Algorithm
//!
//! 1. Analyze the query with the same rules used at build time; terms
//!    outside the vocabulary are dropped.
//! 2. Weight the remaining terms with the frozen IDF and L2-normalize.
//! 3. Score every catalog question with cosine similarity (`0.0` when the
//!    query has no known terms).
//! 4. Take the highest score; ties go to the earliest catalog entry.
//! 5. If `score > threshold` (strict), return that entry's answer and the
//!    score. Otherwise return the fallback text with confidence `0.0`.
//!
//! # Concurrency
//!
//! `build` takes `&mut self`, so construction is serialized by the borrow
//! checker; the host runs it once at startup, or behind a one-time
//! initialization guard. Queries take `&self`, allocate only per-call
//! vectors, and can run from many threads at once through an `Arc`.

use tracing::{debug, info};

use crate::analyzer::Analyzer;
use crate::corpus::Corpus;
use crate::error::{EngineError, Result};
use crate::models::{Response, ScoreExplanation};
use crate::similarity::{best_match, cosine_similarity};
use crate::vectorizer::TfIdfVectorizer;

/// Default similarity a match must strictly exceed.
pub const DEFAULT_THRESHOLD: f64 = 0.3;

/// Default cap on vocabulary size.
pub const DEFAULT_MAX_FEATURES: usize = 500;

/// Generic help message returned when nothing in the catalog is close enough.
pub const FALLBACK_TEXT: &str = "I'm not entirely sure about that. Let me help you with common topics:

**Orders**: \"Where is my order?\" | \"Cancel my order\"
**Returns**: \"How to return?\" | \"Refund policy\"
**Payments**: \"Payment methods\" | \"Is payment secure?\"
**Shipping**: \"Shipping charges\" | \"Free shipping\"
**Products**: \"Product details\" | \"Reviews\"
**Contact**: \"Talk to human\" | \"Customer service\"

Please rephrase your question or choose a topic above!";

/// Retrieval tuning parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// A match is returned only when its similarity is strictly greater.
    pub threshold: f64,
    /// Inclusive `(min, max)` n-gram sizes.
    pub ngram_range: (usize, usize),
    /// Keep only the most frequent terms; `None` keeps all of them.
    pub max_features: Option<usize>,
    /// Answer returned when no entry clears the threshold.
    pub fallback_text: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            ngram_range: (1, 2),
            max_features: Some(DEFAULT_MAX_FEATURES),
            fallback_text: FALLBACK_TEXT.to_string(),
        }
    }
}

impl EngineConfig {
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.threshold.is_finite() || !(0.0..=1.0).contains(&self.threshold) {
            return Err(EngineError::InvalidConfig(format!(
                "threshold must be in [0.0, 1.0], got {}",
                self.threshold
            )));
        }
        if self.max_features == Some(0) {
            return Err(EngineError::InvalidConfig(
                "max_features must be > 0 (use None for no cap)".to_string(),
            ));
        }
        Analyzer::new(self.ngram_range.0, self.ngram_range.1)?;
        Ok(())
    }
}

/// Per-call overrides for [`RetrievalEngine::query_with`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryOptions {
    /// Replaces the configured threshold for this call.
    pub threshold: Option<f64>,
    /// If true, populate [`ScoreExplanation`] on the response.
    pub explain: bool,
}

/// Lifecycle of a [`RetrievalEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Unbuilt,
    Ready,
}

/// The single operation a host needs: one user message in, one answer out.
///
/// Hosts hold a `dyn Responder` (or a generic) so tests can substitute a
/// canned implementation for the real engine.
pub trait Responder: Send + Sync {
    fn respond(&self, text: &str) -> Result<Response>;
}

/// Everything produced by a successful build. Read-only afterwards.
#[derive(Debug, Clone)]
struct VectorSpace {
    corpus: Corpus,
    vectorizer: TfIdfVectorizer,
    matrix: Vec<Vec<f64>>,
    fingerprint: String,
}

/// TF-IDF best-match engine over a question/answer catalog.
#[derive(Debug, Clone)]
pub struct RetrievalEngine {
    config: EngineConfig,
    space: Option<VectorSpace>,
}

impl Default for RetrievalEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl RetrievalEngine {
    /// Create an engine in the [`EngineState::Unbuilt`] state.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            space: None,
        }
    }

    /// Create an engine and build it from `corpus` in one step.
    pub fn from_corpus(config: EngineConfig, corpus: Corpus) -> Result<Self> {
        let mut engine = Self::new(config);
        engine.build(corpus)?;
        Ok(engine)
    }

    /// Compute the vocabulary and document-term matrix for `corpus`.
    ///
    /// Calling `build` again discards the previous vector space and rebuilds
    /// from scratch; the same corpus always yields the same space. On error
    /// the engine keeps whatever state it had before the call.
    pub fn build(&mut self, corpus: Corpus) -> Result<()> {
        if corpus.is_empty() {
            return Err(EngineError::EmptyCorpus);
        }
        self.config.validate()?;
        let analyzer = Analyzer::new(self.config.ngram_range.0, self.config.ngram_range.1)?;

        let (vectorizer, matrix) =
            TfIdfVectorizer::fit_transform(analyzer, self.config.max_features, corpus.questions());
        let fingerprint = corpus.fingerprint();

        info!(
            entries = corpus.len(),
            vocabulary = vectorizer.dims(),
            fingerprint = %fingerprint,
            "retrieval engine built"
        );

        self.space = Some(VectorSpace {
            corpus,
            vectorizer,
            matrix,
            fingerprint,
        });
        Ok(())
    }

    pub fn state(&self) -> EngineState {
        if self.space.is_some() {
            EngineState::Ready
        } else {
            EngineState::Unbuilt
        }
    }

    pub fn is_ready(&self) -> bool {
        self.space.is_some()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The catalog the engine was built from.
    pub fn corpus(&self) -> Option<&Corpus> {
        self.space.as_ref().map(|s| &s.corpus)
    }

    /// Fingerprint of the built catalog (see [`Corpus::fingerprint`]).
    pub fn fingerprint(&self) -> Option<&str> {
        self.space.as_ref().map(|s| s.fingerprint.as_str())
    }

    pub fn vocabulary_size(&self) -> Option<usize> {
        self.space.as_ref().map(|s| s.vectorizer.dims())
    }

    /// Answer `text` against the catalog with an explicit threshold.
    ///
    /// Returns `(answer, confidence)`; the fallback text comes back with
    /// confidence `0.0`.
    pub fn query(&self, text: &str, threshold: f64) -> Result<(String, f64)> {
        let response = self.query_with(
            text,
            &QueryOptions {
                threshold: Some(threshold),
                explain: false,
            },
        )?;
        Ok((response.answer, response.confidence))
    }

    /// Answer `text` with per-call options.
    pub fn query_with(&self, text: &str, opts: &QueryOptions) -> Result<Response> {
        let space = self.space.as_ref().ok_or(EngineError::NotReady)?;
        let threshold = opts.threshold.unwrap_or(self.config.threshold);

        let scores = score_all(space, text);
        let (best_index, similarity) = best_match(&scores).unwrap_or((0, 0.0));

        debug!(best_index, similarity, threshold, "query scored");

        let explain = if opts.explain {
            Some(ScoreExplanation {
                best_index,
                best_question: space
                    .corpus
                    .question_at(best_index)
                    .unwrap_or_default()
                    .to_string(),
                similarity,
                threshold,
                query_terms: space.vectorizer.known_terms(text),
                vocabulary_size: space.vectorizer.dims(),
            })
        } else {
            None
        };

        let response = match space.corpus.answer_at(best_index) {
            Some(answer) if similarity > threshold => Response {
                answer: answer.to_string(),
                confidence: similarity.clamp(0.0, 1.0),
                matched: Some(best_index),
                explain,
            },
            _ => Response {
                answer: self.config.fallback_text.clone(),
                confidence: 0.0,
                matched: None,
                explain,
            },
        };
        Ok(response)
    }

    /// Cosine similarity of `text` against every catalog question, in
    /// catalog order.
    pub fn similarities(&self, text: &str) -> Result<Vec<f64>> {
        let space = self.space.as_ref().ok_or(EngineError::NotReady)?;
        Ok(score_all(space, text))
    }
}

impl Responder for RetrievalEngine {
    /// Answer `text` using the configured threshold.
    fn respond(&self, text: &str) -> Result<Response> {
        self.query_with(text, &QueryOptions::default())
    }
}

fn score_all(space: &VectorSpace, text: &str) -> Vec<f64> {
    let query_vec = space.vectorizer.transform(text);
    space
        .matrix
        .iter()
        .map(|row| cosine_similarity(&query_vec, row))
        .collect()
}
