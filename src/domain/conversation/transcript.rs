//! Transcript - the client-side record of a conversation.
//!
//! Entries are immutable once appended and are replayed in append order
//! whenever the conversation is redisplayed.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

/// Role of a transcript entry's author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// User input.
    User,
    /// Assistant response (including the greeting and failure sentinel).
    Assistant,
}

impl Role {
    /// Returns the wire name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One exchanged turn.
///
/// # Invariants
///
/// - fields are private and there are no mutators
/// - `created_at` is set at construction and never changes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    role: Role,
    text: String,
    created_at: Timestamp,
}

impl TranscriptEntry {
    fn new(role: Role, text: String) -> Self {
        Self {
            role,
            text,
            created_at: Timestamp::now(),
        }
    }

    /// Returns the role.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns the text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns when the entry was appended.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }
}

/// Append-only, ordered history of one session's turns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    /// Creates an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry and returns a reference to it.
    pub fn append(&mut self, role: Role, text: impl Into<String>) -> &TranscriptEntry {
        self.entries.push(TranscriptEntry::new(role, text.into()));
        &self.entries[self.entries.len() - 1]
    }

    /// All entries in append order.
    pub fn all(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    /// Entries appended at or after `cursor`; empty if the cursor is past the end.
    pub fn since(&self, cursor: usize) -> &[TranscriptEntry] {
        self.entries.get(cursor..).unwrap_or(&[])
    }

    /// The most recently appended entry.
    pub fn last(&self) -> Option<&TranscriptEntry> {
        self.entries.last()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been appended yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
