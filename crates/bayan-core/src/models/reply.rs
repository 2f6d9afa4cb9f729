use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::action::Action;

/// What the assistant says back: text plus up to two suggested actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReplyPayload {
    pub text: String,
    pub actions: Vec<Action>,
}
