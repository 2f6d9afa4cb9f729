use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use bayan_assistant::completion::{DEFAULT_TIMEOUT, HttpCompletionClient};
use bayan_core::models::locale::Locale;
use bayan_storage::file::FileStore;
use bayan_widget::widget::{ReplyMode, TYPING_DELAY};
use serde::{Deserialize, Serialize};

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

const DEFAULT_TIMEOUT_SECS: u64 = DEFAULT_TIMEOUT.as_secs();
const DEFAULT_TYPING_DELAY_MS: u64 = TYPING_DELAY.as_millis() as u64;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeSetting {
    #[default]
    RuleBased,
    Ai,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    #[serde(default)]
    pub locale: Locale,
    /// Replaced the v0 `ai` boolean.
    #[serde(default)]
    pub mode: ModeSetting,
    /// Completion endpoint URL. Required in AI mode. Named `ai_endpoint`
    /// in v0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_typing_delay_ms")]
    pub typing_delay_ms: u64,
    /// Overrides the history file location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history_path: Option<PathBuf>,
    #[serde(default)]
    pub log_json: bool,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_typing_delay_ms() -> u64 {
    DEFAULT_TYPING_DELAY_MS
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            locale: Locale::default(),
            mode: ModeSetting::default(),
            endpoint: None,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            typing_delay_ms: DEFAULT_TYPING_DELAY_MS,
            history_path: None,
            log_json: false,
        }
    }
}

impl ConsoleConfig {
    pub fn typing_delay(&self) -> Duration {
        Duration::from_millis(self.typing_delay_ms)
    }

    /// Apply `BAYAN_LOCALE`, `BAYAN_MODE` and `BAYAN_ENDPOINT` overrides.
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) -> eyre::Result<()> {
        if let Some(locale) = var("BAYAN_LOCALE") {
            self.locale = locale.parse()?;
        }
        if let Some(mode) = var("BAYAN_MODE") {
            self.mode = match mode.trim().to_ascii_lowercase().as_str() {
                "rule_based" | "rule-based" | "rules" => ModeSetting::RuleBased,
                "ai" => ModeSetting::Ai,
                other => return Err(eyre::eyre!("unknown BAYAN_MODE: {other}")),
            };
        }
        if let Some(endpoint) = var("BAYAN_ENDPOINT") {
            self.endpoint = Some(endpoint);
        }
        Ok(())
    }

    /// Build the reply strategy this config selects.
    pub fn reply_mode(&self) -> eyre::Result<ReplyMode> {
        match self.mode {
            ModeSetting::RuleBased => Ok(ReplyMode::RuleBased),
            ModeSetting::Ai => {
                let endpoint = self
                    .endpoint
                    .as_deref()
                    .filter(|e| !e.trim().is_empty())
                    .ok_or_else(|| eyre::eyre!("AI mode requires an endpoint"))?;
                let client = HttpCompletionClient::new(
                    endpoint,
                    Duration::from_secs(self.request_timeout_secs),
                )?;
                tracing::info!(endpoint = client.endpoint(), "AI replies enabled");
                Ok(ReplyMode::Ai(Arc::new(client)))
            }
        }
    }

    pub fn history_store(&self) -> eyre::Result<FileStore> {
        match &self.history_path {
            Some(path) => Ok(FileStore::at(path)),
            None => Ok(FileStore::in_dir(config_dir()?)),
        }
    }
}

fn config_dir() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("com.bayan.console"))
}

pub fn config_path() -> eyre::Result<PathBuf> {
    Ok(config_dir()?.join("config.json"))
}

/// Load the config from the platform config dir, or defaults if none
/// has been saved.
pub fn load_config() -> eyre::Result<ConsoleConfig> {
    load_config_from(&config_path()?)
}

/// Like [`load_config`], but writes the defaults out on first run so there
/// is a file to edit.
pub fn load_or_init_config() -> eyre::Result<ConsoleConfig> {
    if config_path()?.exists() {
        return load_config();
    }
    let config = ConsoleConfig::default();
    save_config(&config)?;
    Ok(config)
}

pub fn load_config_from(path: &Path) -> eyre::Result<ConsoleConfig> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(ConsoleConfig::default());
    }

    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;

    let migrated = migrate(json, on_disk_version)?;
    let config: ConsoleConfig = serde_json::from_value(migrated)?;
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update Bayan."
        ));
    }

    // v0 → v1: `ai: bool` became `mode`, `ai_endpoint` became `endpoint`
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        if let Some(ai) = obj.remove("ai") {
            let mode = if ai.as_bool().unwrap_or(false) {
                "ai"
            } else {
                "rule_based"
            };
            obj.entry("mode")
                .or_insert(serde_json::Value::String(mode.to_string()));
        }
        if let Some(endpoint) = obj.remove("ai_endpoint") {
            obj.entry("endpoint").or_insert(endpoint);
        }
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (ai flag → mode, ai_endpoint → endpoint)");
    }

    Ok(json)
}

pub fn save_config(config: &ConsoleConfig) -> eyre::Result<()> {
    save_config_to(&config_path()?, config)
}

pub fn save_config_to(path: &Path, config: &ConsoleConfig) -> eyre::Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;

    let json = serde_json::to_string_pretty(&stamped)?;

    // Write to a temp file then rename for atomicity
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&tmp_path, path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}
