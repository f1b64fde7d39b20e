//! The immutable question/answer catalog.
//!
//! A [`Corpus`] is an ordered list of [`CatalogEntry`] values. Questions and
//! answers are exposed as two aligned sequences sharing the same index, so
//! the engine can score question vectors and hand back the answer at the
//! winning position.
//!
//! Construction never fails; whether an empty corpus is usable is the
//! engine's decision. There is no mutation after construction, which makes
//! a `Corpus` safe to share across threads for reading.

use sha2::{Digest, Sha256};

use crate::models::CatalogEntry;

/// Ordered, read-only question/answer catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    entries: Vec<CatalogEntry>,
}

impl Corpus {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// Build a corpus from a compiled-in `(question, answer)` table.
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self::new(
            pairs
                .iter()
                .map(|(q, a)| CatalogEntry::new(*q, *a))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Questions in catalog order.
    pub fn questions(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|e| e.question.as_str())
    }

    /// Answers in catalog order, aligned with [`questions`](Self::questions).
    pub fn answers(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|e| e.answer.as_str())
    }

    pub fn question_at(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(|e| e.question.as_str())
    }

    /// Answer stored at `index`, or `None` past the end of the catalog.
    pub fn answer_at(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(|e| e.answer.as_str())
    }

    /// SHA-256 over every entry in order, as lowercase hex.
    ///
    /// Each field is length-prefixed so that moving text between a question
    /// and its answer changes the digest. Two corpora with the same
    /// fingerprint build identical vector spaces.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for entry in &self.entries {
            for field in [&entry.question, &entry.answer] {
                hasher.update((field.len() as u64).to_le_bytes());
                hasher.update(field.as_bytes());
            }
        }
        format!("{:x}", hasher.finalize())
    }
}

impl From<Vec<CatalogEntry>> for Corpus {
    fn from(entries: Vec<CatalogEntry>) -> Self {
        Self::new(entries)
    }
}

impl FromIterator<CatalogEntry> for Corpus {
    fn from_iter<I: IntoIterator<Item = CatalogEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
