use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Speaker {
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationRecord {
    pub speaker: Speaker,
    pub text: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl ConversationRecord {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.into(),
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Assistant,
            text: text.into(),
            timestamp: chrono::Utc::now(),
        }
    }
}

impl fmt::Display for ConversationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.speaker {
            Speaker::User => write!(f, "You: {}", self.text),
            Speaker::Assistant => write!(f, "Assistant: {}", self.text),
        }
    }
}

/// Append-only history of turns, oldest first.
///
/// Records are never removed or reordered; display code reads a tail of it
/// through [`ConversationLog::recent`].
#[derive(Debug, Default)]
pub struct ConversationLog {
    records: Vec<ConversationRecord>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, record: ConversationRecord) {
        self.records.push(record);
    }

    pub fn add_user_message(&mut self, text: impl Into<String>) {
        self.append(ConversationRecord::user(text));
    }

    pub fn add_assistant_message(&mut self, text: impl Into<String>) {
        self.append(ConversationRecord::assistant(text));
    }

    pub fn records(&self) -> &[ConversationRecord] {
        &self.records
    }

    /// The last `count` records in chronological order.
    pub fn recent(&self, count: usize) -> &[ConversationRecord] {
        let start = self.records.len().saturating_sub(count);
        &self.records[start..]
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last_assistant_message(&self) -> Option<&str> {
        self.records
            .iter()
            .rev()
            .find(|record| record.speaker == Speaker::Assistant)
            .map(|record| record.text.as_str())
    }
}
