use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::action::Action;
use super::reply::ReplyPayload;

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Role {
    User,
    Assistant,
}

/// One turn in a widget conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Message {
    pub id: Uuid,
    pub role: Role,
    /// Display text. Multi-line replies keep their embedded newlines.
    pub content: String,
    /// Suggested follow-ups. Always empty for user messages.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<Action>,
    pub timestamp: jiff::Timestamp,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: Role::User,
            content: content.into(),
            actions: Vec::new(),
            timestamp: jiff::Timestamp::now(),
        }
    }

    pub fn assistant(content: impl Into<String>, actions: Vec<Action>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: Role::Assistant,
            content: content.into(),
            actions,
            timestamp: jiff::Timestamp::now(),
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}

impl From<ReplyPayload> for Message {
    fn from(reply: ReplyPayload) -> Self {
        Message::assistant(reply.text, reply.actions)
    }
}
