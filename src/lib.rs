//! # Support Bot
//!
//! A customer-support answer bot. It keeps a catalog of canned
//! question/answer pairs and matches each incoming message against the
//! catalog questions with TF-IDF cosine similarity. Matches above a
//! confidence threshold return the catalog answer; everything else gets a
//! generic help message.
//!
//! The retrieval core lives in the `support-bot-core` crate and has no I/O.
//! This crate is the host around it: configuration, catalog loading, the
//! terminal chat, one-shot commands, and an HTTP service.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   ┌──────────────────┐
//! │  Catalog    │──▶│ RetrievalEngine   │
//! │ builtin/file│   │ TF-IDF + cosine  │
//! └─────────────┘   └────────┬─────────┘
//!                            │ Responder
//!          ┌─────────────────┼─────────────────┐
//!          ▼                 ▼                 ▼
//!    ┌──────────┐      ┌──────────┐      ┌──────────┐
//!    │   chat   │      │ ask/...  │      │   HTTP   │
//!    └──────────┘      └──────────┘      └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! supportbot ask "How do I track my order?"
//! supportbot chat
//! supportbot serve --config ./supportbot.toml
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`catalog`] | Built-in catalog and catalog files |
//! | [`bot`] | Engine construction |
//! | [`conversation`] | Chat history |
//! | [`chat`] | Interactive terminal session |
//! | [`ask`] | One-shot commands |
//! | [`server`] | HTTP answer service |
//! | [`logging`] | Tracing subscriber setup |

pub mod ask;
pub mod bot;
pub mod catalog;
pub mod chat;
pub mod config;
pub mod conversation;
pub mod logging;
pub mod server;
