use std::collections::HashMap;

use bayan_console::config::{ConsoleConfig, ModeSetting, load_config_from, save_config_to};
use bayan_assistant::completion::DEFAULT_TIMEOUT;
use bayan_core::models::locale::Locale;
use bayan_widget::widget::{ReplyMode, TYPING_DELAY};

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_config_from(&dir.path().join("config.json")).unwrap();
    assert_eq!(config, ConsoleConfig::default());
    assert_eq!(config.locale, Locale::Ar);
    assert_eq!(config.mode, ModeSetting::RuleBased);
    assert_eq!(config.typing_delay_ms, 600);
}

#[test]
fn defaults_follow_library_constants() {
    let config = ConsoleConfig::default();
    assert_eq!(config.request_timeout_secs, DEFAULT_TIMEOUT.as_secs());
    assert_eq!(config.typing_delay(), TYPING_DELAY);
}

#[test]
fn unversioned_config_is_migrated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{"locale":"en","ai":true,"ai_endpoint":"http://localhost/chat"}"#,
    )
    .unwrap();

    let config = load_config_from(&path).unwrap();
    assert_eq!(config.config_version, 1);
    assert_eq!(config.locale, Locale::En);
    assert_eq!(config.mode, ModeSetting::Ai);
    assert_eq!(config.endpoint.as_deref(), Some("http://localhost/chat"));
    assert_eq!(config.typing_delay_ms, 600);
    assert_eq!(config.request_timeout_secs, 30);
}

#[test]
fn unversioned_rule_based_flag_is_migrated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"ai":false}"#).unwrap();

    let config = load_config_from(&path).unwrap();
    assert_eq!(config.mode, ModeSetting::RuleBased);
    assert_eq!(config.endpoint, None);
}

#[test]
fn current_version_keys_are_left_alone() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{"config_version":1,"mode":"ai","endpoint":"http://localhost/chat"}"#,
    )
    .unwrap();

    let config = load_config_from(&path).unwrap();
    assert_eq!(config.mode, ModeSetting::Ai);
    assert_eq!(config.endpoint.as_deref(), Some("http://localhost/chat"));
}

#[test]
fn newer_config_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"config_version":99}"#).unwrap();

    let err = load_config_from(&path).unwrap_err();
    assert!(err.to_string().contains("newer than this build"));
}

#[test]
fn save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.json");
    let config = ConsoleConfig {
        config_version: 0,
        locale: Locale::En,
        typing_delay_ms: 50,
        log_json: true,
        ..ConsoleConfig::default()
    };

    save_config_to(&path, &config).unwrap();
    assert!(!path.with_extension("json.tmp").exists());

    let loaded = load_config_from(&path).unwrap();
    assert_eq!(loaded.config_version, 1);
    assert_eq!(loaded.locale, Locale::En);
    assert_eq!(loaded.typing_delay_ms, 50);
    assert!(loaded.log_json);
}

#[cfg(unix)]
#[test]
fn saved_config_is_private() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    save_config_to(&path, &ConsoleConfig::default()).unwrap();

    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
fn env_overrides_apply() {
    let mut config = ConsoleConfig::default();
    config
        .apply_env(env(&[
            ("BAYAN_LOCALE", "en-US"),
            ("BAYAN_MODE", "AI"),
            ("BAYAN_ENDPOINT", "http://127.0.0.1:9/chat"),
        ]))
        .unwrap();

    assert_eq!(config.locale, Locale::En);
    assert_eq!(config.mode, ModeSetting::Ai);
    assert_eq!(config.endpoint.as_deref(), Some("http://127.0.0.1:9/chat"));
}

#[test]
fn bad_env_values_are_errors() {
    let mut config = ConsoleConfig::default();
    assert!(config.apply_env(env(&[("BAYAN_LOCALE", "fr")])).is_err());
    assert!(config.apply_env(env(&[("BAYAN_MODE", "psychic")])).is_err());
}

#[test]
fn reply_mode_follows_setting() {
    let config = ConsoleConfig::default();
    assert!(matches!(config.reply_mode().unwrap(), ReplyMode::RuleBased));

    let ai_without_endpoint = ConsoleConfig {
        mode: ModeSetting::Ai,
        ..ConsoleConfig::default()
    };
    assert!(ai_without_endpoint.reply_mode().is_err());

    let ai = ConsoleConfig {
        mode: ModeSetting::Ai,
        endpoint: Some("http://127.0.0.1:9/chat".into()),
        ..ConsoleConfig::default()
    };
    assert!(matches!(ai.reply_mode().unwrap(), ReplyMode::Ai(_)));
}

#[test]
fn history_path_override() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.json");
    let config = ConsoleConfig {
        history_path: Some(path.clone()),
        ..ConsoleConfig::default()
    };
    assert_eq!(config.history_store().unwrap().path(), path);
}
