//! TF-IDF vector space over catalog questions.
//!
//! [`TfIdfVectorizer::fit_transform`] freezes a [`Vocabulary`] and the
//! per-term IDF weights from the corpus, and returns one weighted row per
//! question (the document-term matrix). [`TfIdfVectorizer::transform`]
//! projects any later text into the same space without touching the fitted
//! state.
//!
//! # Weighting
//!
//! 1. Analyze each question into n-gram terms (see [`Analyzer`]).
//! 2. Count each term's total frequency and document frequency `df`.
//! 3. With a feature cap `k`, keep the `k` most frequent terms; ties go to
//!    the lexicographically smaller term.
//! 4. Assign dimensions in lexicographic term order.
//! 5. `idf(t) = ln((1 + n) / (1 + df(t))) + 1`, where `n` is the corpus size.
//! 6. Row weight = raw term count × idf, then L2-normalized.
//!
//! Terms outside the vocabulary are dropped, so an unseen word contributes
//! nothing rather than failing.

use std::collections::{HashMap, HashSet};

use crate::analyzer::Analyzer;

/// Frozen mapping from term to dimension index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    index: HashMap<String, usize>,
    terms: Vec<String>,
}

impl Vocabulary {
    /// Build a vocabulary from terms already in dimension order.
    fn from_sorted(terms: Vec<String>) -> Self {
        let index = terms
            .iter()
            .enumerate()
            .map(|(i, t)| (t.clone(), i))
            .collect();
        Self { index, terms }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn get(&self, term: &str) -> Option<usize> {
        self.index.get(term).copied()
    }

    pub fn contains(&self, term: &str) -> bool {
        self.index.contains_key(term)
    }

    /// Terms in dimension order.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }
}

/// Fitted TF-IDF model: analyzer, vocabulary, and IDF weights.
#[derive(Debug, Clone, PartialEq)]
pub struct TfIdfVectorizer {
    analyzer: Analyzer,
    vocabulary: Vocabulary,
    idf: Vec<f64>,
}

impl TfIdfVectorizer {
    /// Fit the vector space on `docs` and return it with the document-term
    /// matrix, one L2-normalized row per document in input order.
    ///
    /// `max_features = None` keeps every term.
    pub fn fit_transform<'a, I>(
        analyzer: Analyzer,
        max_features: Option<usize>,
        docs: I,
    ) -> (Self, Vec<Vec<f64>>)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let analyzed: Vec<Vec<String>> = docs.into_iter().map(|d| analyzer.terms(d)).collect();
        let n_docs = analyzed.len();

        let mut total_freq: HashMap<&str, usize> = HashMap::new();
        let mut doc_freq: HashMap<&str, usize> = HashMap::new();
        for terms in &analyzed {
            let mut seen: HashSet<&str> = HashSet::new();
            for term in terms {
                *total_freq.entry(term.as_str()).or_insert(0) += 1;
                if seen.insert(term.as_str()) {
                    *doc_freq.entry(term.as_str()).or_insert(0) += 1;
                }
            }
        }

        let mut ranked: Vec<(&str, usize)> = total_freq.into_iter().collect();
        if let Some(limit) = max_features {
            if ranked.len() > limit {
                ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
                ranked.truncate(limit);
            }
        }
        let mut kept: Vec<String> = ranked.into_iter().map(|(t, _)| t.to_string()).collect();
        kept.sort();

        let idf = kept
            .iter()
            .map(|t| {
                let df = doc_freq.get(t.as_str()).copied().unwrap_or(0);
                smooth_idf(n_docs, df)
            })
            .collect();

        let vectorizer = Self {
            analyzer,
            vocabulary: Vocabulary::from_sorted(kept),
            idf,
        };
        let matrix = analyzed.iter().map(|terms| vectorizer.weigh(terms)).collect();
        (vectorizer, matrix)
    }

    /// Project `text` into the fitted space.
    ///
    /// Returns an all-zero vector when no term of `text` is in the
    /// vocabulary (including empty text).
    pub fn transform(&self, text: &str) -> Vec<f64> {
        self.weigh(&self.analyzer.terms(text))
    }

    /// Distinct in-vocabulary terms of `text`, in first-seen order.
    pub fn known_terms(&self, text: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        self.analyzer
            .terms(text)
            .into_iter()
            .filter(|t| self.vocabulary.contains(t) && seen.insert(t.clone()))
            .collect()
    }

    pub fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// IDF weight per dimension.
    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    pub fn dims(&self) -> usize {
        self.vocabulary.len()
    }

    fn weigh(&self, terms: &[String]) -> Vec<f64> {
        let mut row = vec![0.0; self.dims()];
        for term in terms {
            if let Some(i) = self.vocabulary.get(term) {
                row[i] += 1.0;
            }
        }
        for (w, idf) in row.iter_mut().zip(&self.idf) {
            *w *= idf;
        }
        l2_normalize(&mut row);
        row
    }
}

/// Smoothed inverse document frequency, as if one extra document held
/// every term once.
fn smooth_idf(n_docs: usize, df: usize) -> f64 {
    ((1.0 + n_docs as f64) / (1.0 + df as f64)).ln() + 1.0
}

/// Scale `v` to unit length in place. Zero vectors are left untouched.
pub fn l2_normalize(v: &mut [f64]) {
    let norm = v.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm > f64::EPSILON {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}
