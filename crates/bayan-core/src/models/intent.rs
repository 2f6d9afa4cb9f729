use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// What a visitor is asking about.
///
/// Variants are declared in classification priority order: when an
/// utterance mentions several topics, the earliest variant wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Intent {
    Contact,
    Pricing,
    Timeline,
    Landing,
    Store,
    System,
    Website,
    Fallback,
}

impl Intent {
    /// Every intent that is tested against keywords, highest priority first.
    /// `Fallback` is not listed: it is what remains when nothing matches.
    pub const PRIORITY: [Intent; 7] = [
        Intent::Contact,
        Intent::Pricing,
        Intent::Timeline,
        Intent::Landing,
        Intent::Store,
        Intent::System,
        Intent::Website,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Contact => "contact",
            Intent::Pricing => "pricing",
            Intent::Timeline => "timeline",
            Intent::Landing => "landing",
            Intent::Store => "store",
            Intent::System => "system",
            Intent::Website => "website",
            Intent::Fallback => "fallback",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
