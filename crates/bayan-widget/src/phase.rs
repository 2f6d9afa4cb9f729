use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How long the open/close animation runs before a transition settles.
pub const TRANSITION_DELAY: Duration = Duration::from_millis(200);

/// Widget lifecycle.
///
/// ```text
/// Closed ──toggle──▶ Opening ──settle──▶ Open
///    ▲                                     │ close / toggle
///    └──────settle────── Closing ◀─────────┘
///                           │ toggle
///                           └──────────────▶ Open   (pending close cancelled)
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetPhase {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

impl WidgetPhase {
    /// Phase reached by the open/close button.
    pub fn toggled(self) -> WidgetPhase {
        match self {
            WidgetPhase::Closed => WidgetPhase::Opening,
            WidgetPhase::Closing => WidgetPhase::Open,
            WidgetPhase::Opening | WidgetPhase::Open => WidgetPhase::Closing,
        }
    }

    /// Phase reached by an explicit close (button, Escape).
    pub fn closed(self) -> WidgetPhase {
        match self {
            WidgetPhase::Opening | WidgetPhase::Open => WidgetPhase::Closing,
            other => other,
        }
    }

    /// Phase reached once the running animation ends.
    pub fn settled(self) -> WidgetPhase {
        match self {
            WidgetPhase::Opening => WidgetPhase::Open,
            WidgetPhase::Closing => WidgetPhase::Closed,
            other => other,
        }
    }

    pub fn is_open(self) -> bool {
        matches!(self, WidgetPhase::Opening | WidgetPhase::Open)
    }

    /// The panel stays in the tree while it animates out.
    pub fn is_mounted(self) -> bool {
        self != WidgetPhase::Closed
    }

    /// Input, send, quick replies and action buttons accept focus and
    /// events only in this phase.
    pub fn is_interactive(self) -> bool {
        self == WidgetPhase::Open
    }
}
