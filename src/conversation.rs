//! Per-session conversation history.
//!
//! A [`Conversation`] is owned by exactly one session (a terminal chat, a
//! UI tab). It forwards each user message verbatim to a [`Responder`] and
//! appends both sides as [`Turn`]s. Turns are append-only; [`clear`]
//! replaces the history with a fresh greeting.
//!
//! [`clear`]: Conversation::clear

use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use uuid::Uuid;

use support_bot_core::engine::Responder;
use support_bot_core::error::Result;

/// Opening assistant message for every new or cleared conversation.
pub const GREETING: &str = "Hello! I'm your customer support assistant. \
I match your question against our help catalog to find the best answer. \
How can I help you today?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One message in the history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    /// Match confidence; only set on assistant turns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl Turn {
    fn user(content: &str) -> Self {
        Self {
            role: Role::User,
            content: content.to_string(),
            timestamp: Utc::now(),
            confidence: None,
        }
    }

    fn assistant(content: String, confidence: f64) -> Self {
        Self {
            role: Role::Assistant,
            content,
            timestamp: Utc::now(),
            confidence: Some(confidence),
        }
    }

    /// Local wall-clock time as `HH:MM`.
    pub fn clock(&self) -> String {
        self.timestamp
            .with_timezone(&Local)
            .format("%H:%M")
            .to_string()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Conversation {
    pub id: Uuid,
    turns: Vec<Turn>,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl Conversation {
    /// Start a session seeded with the greeting.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            turns: vec![greeting()],
        }
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// Send one user message and record the reply.
    ///
    /// The user turn is recorded before the responder runs, so a failed
    /// lookup still leaves the question in the history.
    pub fn ask<R: Responder + ?Sized>(&mut self, responder: &R, text: &str) -> Result<&Turn> {
        self.turns.push(Turn::user(text));
        let response = responder.respond(text)?;
        self.turns
            .push(Turn::assistant(response.answer, response.confidence));
        Ok(&self.turns[self.turns.len() - 1])
    }

    /// Drop all turns and start over with the greeting.
    pub fn clear(&mut self) {
        self.turns = vec![greeting()];
    }
}

fn greeting() -> Turn {
    Turn::assistant(GREETING.to_string(), 1.0)
}

/// Confidence as a whole percentage, or `None` when there was no match.
pub fn format_confidence(confidence: f64) -> Option<String> {
    if confidence > 0.0 {
        Some(format!("{:.0}%", confidence * 100.0))
    } else {
        None
    }
}
