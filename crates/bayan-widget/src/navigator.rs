use crate::error::WidgetError;

/// Host capability for following suggested actions.
pub trait Navigator: Send + Sync {
    /// In-app navigation to an application path such as `/en/pricing`.
    fn navigate(&self, href: &str) -> Result<(), WidgetError>;

    /// Open an external URI in a new browsing context with no reference
    /// back to the page.
    fn open_external(&self, href: &str) -> Result<(), WidgetError>;
}
