//! Capped, append-only message log for one locale.

use std::collections::BTreeMap;

use super::locale::Locale;
use super::message::Message;
use crate::error::CoreError;

/// Most messages retained per locale, in memory and on disk.
pub const MAX_HISTORY: usize = 50;

/// The persisted shape: every locale's transcript under one storage key.
pub type HistoryMap = BTreeMap<Locale, Vec<Message>>;

/// Ordered conversation history for one locale.
///
/// Messages are never edited or removed individually. Once the log holds
/// [`MAX_HISTORY`] entries, each push evicts the oldest one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopt a previously persisted log, keeping only the newest entries.
    pub fn from_messages(mut messages: Vec<Message>) -> Self {
        if messages.len() > MAX_HISTORY {
            messages.drain(..messages.len() - MAX_HISTORY);
        }
        Self { messages }
    }

    /// Append a message and return it.
    ///
    /// The timestamp is clamped so it never precedes the previous entry.
    pub fn push(&mut self, mut message: Message) -> &Message {
        if let Some(last) = self.messages.last() {
            message.timestamp = message.timestamp.max(last.timestamp);
        }
        self.messages.push(message);
        if self.messages.len() > MAX_HISTORY {
            self.messages.remove(0);
        }
        &self.messages[self.messages.len() - 1]
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Parse a persisted history blob.
pub fn decode_history(bytes: &[u8]) -> Result<HistoryMap, CoreError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Serialize a history map, trimming every locale to [`MAX_HISTORY`].
pub fn encode_history(history: &HistoryMap) -> Result<Vec<u8>, CoreError> {
    let trimmed: BTreeMap<&Locale, &[Message]> = history
        .iter()
        .map(|(locale, messages)| {
            let start = messages.len().saturating_sub(MAX_HISTORY);
            (locale, &messages[start..])
        })
        .collect();
    Ok(serde_json::to_vec(&trimmed)?)
}
