//! # Support Bot Core
//!
//! Pure retrieval logic for Support Bot: the question/answer catalog,
//! text analysis, the TF-IDF vector space, cosine scoring, and the
//! best-match engine with its fallback answer.
//!
//! This crate contains no tokio, filesystem I/O, or network code. The
//! host application loads a catalog, hands it to
//! [`RetrievalEngine::build`](engine::RetrievalEngine::build) once at
//! startup, and then calls [`Responder::respond`](engine::Responder::respond)
//! for every user message.
//!
//! ```rust
//! use support_bot_core::corpus::Corpus;
//! use support_bot_core::engine::{EngineConfig, Responder, RetrievalEngine};
//!
//! let corpus = Corpus::from_pairs(&[
//!     ("Where is my order", "Check 'My Orders' for tracking."),
//!     ("Refund policy", "Refunds take 7-10 business days."),
//! ]);
//! let engine = RetrievalEngine::from_corpus(EngineConfig::default(), corpus).unwrap();
//! let reply = engine.respond("where is my order?").unwrap();
//! assert_eq!(reply.answer, "Check 'My Orders' for tracking.");
//! assert!(reply.confidence > 0.3);
//! ```

pub mod analyzer;
pub mod corpus;
pub mod engine;
pub mod error;
pub mod models;
pub mod similarity;
pub mod vectorizer;

pub use corpus::Corpus;
pub use engine::{EngineConfig, EngineState, QueryOptions, Responder, RetrievalEngine};
pub use error::{EngineError, Result};
pub use models::{CatalogEntry, Response, ScoreExplanation};
