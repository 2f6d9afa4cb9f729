use bayan_core::links::{self, pages};
use bayan_core::models::action::{Action, ActionKind};
use bayan_core::models::locale::Locale;

#[test]
fn page_paths_are_locale_prefixed() {
    assert_eq!(links::page(Locale::En, pages::PRICING), "/en/pricing");
    assert_eq!(links::page(Locale::Ar, pages::CONTACT), "/ar/contact");
    assert!(links::is_internal_for("/ar/contact", Locale::Ar));
    assert!(!links::is_internal_for("/ar/contact", Locale::En));
}

#[test]
fn whatsapp_link_percent_encodes_text() {
    let href = links::whatsapp("Hi, I'd like a quote & timeline");
    assert!(href.starts_with("https://wa.me/966555014422?text="));
    assert!(href.ends_with("Hi%2C%20I%27d%20like%20a%20quote%20%26%20timeline"));
}

#[test]
fn whatsapp_link_encodes_arabic_as_utf8() {
    let href = links::whatsapp("مرحبا");
    assert!(href.ends_with("?text=%D9%85%D8%B1%D8%AD%D8%A8%D8%A7"));
}

#[test]
fn action_constructors_fill_href() {
    let action = Action::internal("Pricing", Locale::En, pages::PRICING);
    assert_eq!(action.kind, ActionKind::Internal);
    assert_eq!(action.href.as_deref(), Some("/en/pricing"));

    let action = Action::whatsapp("WhatsApp", "hello");
    assert_eq!(action.kind, ActionKind::Whatsapp);
    assert_eq!(
        action.href.as_deref(),
        Some("https://wa.me/966555014422?text=hello")
    );
}

#[test]
fn inert_action_round_trips_without_href() {
    let json = r#"{"label":"Later","kind":"internal"}"#;
    let action: Action = serde_json::from_str(json).unwrap();
    assert_eq!(action.href, None);
    assert_eq!(serde_json::to_string(&action).unwrap(), json);
}
