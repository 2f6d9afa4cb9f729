//! Site path and deep-link conventions.
//!
//! Pure string functions. These define every URL the assistant hands out.

use crate::models::locale::Locale;

/// Agency WhatsApp number in international format, no `+`.
pub const AGENCY_WHATSAPP: &str = "966555014422";

pub const WHATSAPP_BASE: &str = "https://wa.me";

/// Storage key under which the per-locale history map is persisted. File
/// backed stores name their file after it.
pub const HISTORY_KEY: &str = "bayan.chat.history";

pub mod pages {
    pub const SERVICES: &str = "services";
    pub const PRICING: &str = "pricing";
    pub const PORTFOLIO: &str = "portfolio";
    pub const CONTACT: &str = "contact";
}

/// Application-relative path of `page` under `locale`, e.g. `/en/pricing`.
pub fn page(locale: Locale, page: &str) -> String {
    format!("/{locale}/{page}")
}

/// `https://wa.me/<number>?text=<percent-encoded text>`.
pub fn whatsapp(text: &str) -> String {
    format!(
        "{WHATSAPP_BASE}/{AGENCY_WHATSAPP}?text={}",
        urlencoding::encode(text)
    )
}

/// True when `href` is an application path for `locale`.
pub fn is_internal_for(href: &str, locale: Locale) -> bool {
    href.starts_with(&format!("/{locale}/"))
}
