//! Session transcript: the ordered history of turns for one chat session.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

impl TurnRole {
    pub fn as_str(self) -> &'static str {
        match self {
            TurnRole::User => "user",
            TurnRole::Assistant => "assistant",
        }
    }

    pub fn is_user(self) -> bool {
        self == TurnRole::User
    }

    pub fn is_assistant(self) -> bool {
        self == TurnRole::Assistant
    }
}

/// One message in the conversation, immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub role: TurnRole,
    pub content: String,
}

impl Turn {
    pub fn new(role: TurnRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(TurnRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(TurnRole::Assistant, content)
    }
}

/// Append-only log of turns. Storage keeps insertion order; [`snapshot`]
/// reverses it for most-recent-first display. Dropped with the session, no
/// persistence.
///
/// [`snapshot`]: Transcript::snapshot
#[derive(Debug, Default)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Turns in insertion order.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Most-recent-first view for display. Read-only; does not disturb the
    /// underlying insertion order.
    pub fn snapshot(&self) -> Vec<Turn> {
        self.turns.iter().rev().cloned().collect()
    }
}
