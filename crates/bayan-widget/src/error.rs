use thiserror::Error;

#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("navigation to {href} failed: {reason}")]
    Navigation { href: String, reason: String },
}
