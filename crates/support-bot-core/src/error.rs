use thiserror::Error;

/// Failures surfaced by the retrieval engine.
///
/// A low-confidence query is not an error: it returns the fallback answer
/// with zero confidence. Callers tell "no good match" apart from "system
/// failure" by matching on these variants versus a normal return value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// `build` was given a catalog with zero entries.
    #[error("cannot build a retrieval engine from an empty corpus")]
    EmptyCorpus,

    /// A query arrived before any successful `build`.
    #[error("retrieval engine is not ready: call build() first")]
    NotReady,

    #[error("invalid engine configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
