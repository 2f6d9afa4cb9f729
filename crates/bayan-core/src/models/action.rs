use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::locale::Locale;
use crate::links;

/// How an [`Action`] is carried out when the visitor picks it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ActionKind {
    /// In-app navigation to a locale-prefixed page.
    Internal,
    /// WhatsApp deep link, opened in a new browsing context.
    Whatsapp,
}

/// A suggested follow-up attached to an assistant message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Action {
    pub label: String,
    pub kind: ActionKind,
    /// Target path or URI. An action without one is inert.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl Action {
    /// Link to `/{locale}/{page}`.
    pub fn internal(label: impl Into<String>, locale: Locale, page: &str) -> Self {
        Self {
            label: label.into(),
            kind: ActionKind::Internal,
            href: Some(links::page(locale, page)),
        }
    }

    /// WhatsApp deep link with `text` prefilled in the composer.
    pub fn whatsapp(label: impl Into<String>, text: &str) -> Self {
        Self {
            label: label.into(),
            kind: ActionKind::Whatsapp,
            href: Some(links::whatsapp(text)),
        }
    }
}
