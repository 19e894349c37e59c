//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across threads.
//! Missing fields in a settings file fall back to their defaults.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;

// ---------------------------------------------------------------------------
// ProviderKind
// ---------------------------------------------------------------------------

/// Which translation backend to talk to.
///
/// | Variant    | Wire format                      | Default model   |
/// |------------|----------------------------------|-----------------|
/// | `OpenAi`   | `/v1/chat/completions`           | `gpt-3.5-turbo` |
/// | `DeepSeek` | `/v1/chat/completions`           | `deepseek-chat` |
/// | `Ollama`   | native `/api/chat`               | `deepseek-r1`   |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProviderKind {
    OpenAi,
    DeepSeek,
    Ollama,
}

impl Default for ProviderKind {
    fn default() -> Self {
        Self::OpenAi
    }
}

impl ProviderKind {
    /// Parse the `LLM_TRANSLATE_API_PROVIDER` value (`openai`, `deepseek`,
    /// `ollama`, case-insensitive).
    pub fn from_env_value(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "openai" => Some(Self::OpenAi),
            "deepseek" => Some(Self::DeepSeek),
            "ollama" => Some(Self::Ollama),
            _ => None,
        }
    }

    pub fn default_base_url(self) -> &'static str {
        match self {
            Self::OpenAi => "https://api.openai.com",
            Self::DeepSeek => "https://api.deepseek.com",
            Self::Ollama => "http://localhost:11434",
        }
    }

    pub fn default_model(self) -> &'static str {
        match self {
            Self::OpenAi => "gpt-3.5-turbo",
            Self::DeepSeek => "deepseek-chat",
            Self::Ollama => "deepseek-r1",
        }
    }
}

// ---------------------------------------------------------------------------
// ProviderConfig
// ---------------------------------------------------------------------------

/// Settings for the translation backend.
///
/// `base_url` and `model` are optional; when absent the per-kind defaults
/// from [`ProviderKind`] apply, so switching `kind` alone is enough.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    pub base_url: Option<String>,
    /// API key; `None` for local providers (Ollama).
    pub api_key: Option<String>,
    pub model: Option<String>,
    /// Sampling temperature.  `0.0` keeps translations deterministic.
    pub temperature: f32,
    /// Maximum seconds to wait for one backend response.
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: ProviderKind::default(),
            base_url: None,
            api_key: None,
            model: None,
            temperature: 0.0,
            timeout_secs: 30,
        }
    }
}

impl ProviderConfig {
    /// Base URL without a trailing slash.
    pub fn resolved_base_url(&self) -> String {
        self.base_url
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(self.kind.default_base_url())
            .trim_end_matches('/')
            .to_string()
    }

    pub fn resolved_model(&self) -> String {
        self.model
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(self.kind.default_model())
            .to_string()
    }
}

// ---------------------------------------------------------------------------
// LanguageConfig
// ---------------------------------------------------------------------------

/// Target-language rotation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageConfig {
    /// Two-letter ISO 639-1 codes, in rotation order.
    pub targets: Vec<String>,
    /// Code assumed when language detection fails.
    pub default_source: String,
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            targets: vec!["ja".into(), "en".into(), "zh".into()],
            default_source: "en".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// HotkeyConfig
// ---------------------------------------------------------------------------

/// Global hotkey bindings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HotkeyConfig {
    /// Key of the trigger chord (e.g. `"C"`).
    pub trigger_key: String,
    /// Modifier held with `trigger_key` (`"Ctrl"`, `"Alt"`, `"Shift"`,
    /// `"Meta"`).  Empty means the bare key.
    pub trigger_modifier: String,
    /// Two triggers closer than this many milliseconds fire a translation.
    pub double_press_ms: u64,
    /// Key that advances the target language.
    pub switch_language_key: String,
}

impl Default for HotkeyConfig {
    fn default() -> Self {
        Self {
            trigger_key: "C".into(),
            trigger_modifier: "Ctrl".into(),
            double_press_ms: 500,
            switch_language_key: "F8".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// UiConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Cadence at which a polling consumer drains the result queue.
    pub poll_interval_ms: u64,
    /// How long language-switch notices stay on screen.
    pub info_duration_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 100,
            info_duration_ms: 1500,
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// ```rust,no_run
/// use clip_translate::config::AppConfig;
///
/// // Load (writing defaults on first run), then apply env overrides.
/// let mut config = AppConfig::load_or_create().unwrap();
/// config.apply_env_overrides(|key| std::env::var(key).ok());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub provider: ProviderConfig,
    pub languages: LanguageConfig,
    pub hotkey: HotkeyConfig,
    pub ui: UiConfig,
}

impl AppConfig {
    /// Load the platform-appropriate `settings.toml`, writing the defaults
    /// there first if it does not exist yet.
    pub fn load_or_create() -> Result<Self> {
        Self::load_or_create_at(&AppPaths::new().settings_file)
    }

    /// [`load_or_create`](Self::load_or_create) against an explicit path.
    pub fn load_or_create_at(path: &std::path::Path) -> Result<Self> {
        if path.exists() {
            return Self::load_from(path);
        }
        let config = Self::default();
        config.save_to(path)?;
        log::info!("config: wrote default settings to {}", path.display());
        Ok(config)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Apply the `LLM_TRANSLATE_*` environment overrides.
    ///
    /// `lookup` is `std::env::var(..).ok()` in production; tests pass a map.
    /// The provider is switched first so the matching key variable is used.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(value) = non_empty("LLM_TRANSLATE_API_PROVIDER") {
            match ProviderKind::from_env_value(&value) {
                Some(kind) => self.provider.kind = kind,
                None => log::warn!("config: unknown LLM_TRANSLATE_API_PROVIDER {value:?}, ignored"),
            }
        }

        match self.provider.kind {
            ProviderKind::OpenAi => {
                if let Some(key) = non_empty("LLM_TRANSLATE_OPENAI_API_KEY") {
                    self.provider.api_key = Some(key);
                }
            }
            ProviderKind::DeepSeek => {
                if let Some(key) = non_empty("LLM_TRANSLATE_DEEPSEEK_API_KEY") {
                    self.provider.api_key = Some(key);
                }
            }
            ProviderKind::Ollama => {
                if let Some(model) = non_empty("LLM_TRANSLATE_OLLAMA_MODEL") {
                    self.provider.model = Some(model);
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    /// `load_from` on a non-existent path must return `Default` without error.
    #[test]
    fn load_missing_returns_default() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nonexistent.toml");

        let config = AppConfig::load_from(&path).expect("should not error");
        let default = AppConfig::default();

        assert_eq!(config.provider.kind, default.provider.kind);
        assert_eq!(config.languages.targets, default.languages.targets);
        assert_eq!(config.hotkey.double_press_ms, default.hotkey.double_press_ms);
    }

    #[test]
    fn default_values() {
        let cfg = AppConfig::default();

        assert_eq!(cfg.provider.kind, ProviderKind::OpenAi);
        assert_eq!(cfg.provider.resolved_base_url(), "https://api.openai.com");
        assert_eq!(cfg.provider.resolved_model(), "gpt-3.5-turbo");
        assert!(cfg.provider.api_key.is_none());
        assert_eq!(cfg.languages.targets, vec!["ja", "en", "zh"]);
        assert_eq!(cfg.languages.default_source, "en");
        assert_eq!(cfg.hotkey.trigger_key, "C");
        assert_eq!(cfg.hotkey.trigger_modifier, "Ctrl");
        assert_eq!(cfg.hotkey.double_press_ms, 500);
        assert_eq!(cfg.ui.poll_interval_ms, 100);
    }

    /// Verify that modified non-default values survive a round trip.
    #[test]
    fn round_trip_modified_values() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("settings.toml");

        let mut cfg = AppConfig::default();
        cfg.provider.kind = ProviderKind::Ollama;
        cfg.provider.model = Some("qwen2.5:7b".into());
        cfg.languages.targets = vec!["en".into(), "ko".into()];
        cfg.hotkey.trigger_modifier = String::new();
        cfg.hotkey.double_press_ms = 350;

        cfg.save_to(&path).expect("save");
        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(loaded.provider.kind, ProviderKind::Ollama);
        assert_eq!(loaded.provider.resolved_model(), "qwen2.5:7b");
        assert_eq!(loaded.provider.resolved_base_url(), "http://localhost:11434");
        assert_eq!(loaded.languages.targets, vec!["en", "ko"]);
        assert_eq!(loaded.hotkey.trigger_modifier, "");
        assert_eq!(loaded.hotkey.double_press_ms, 350);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "[provider]\nkind = \"DeepSeek\"\n").unwrap();

        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(loaded.provider.kind, ProviderKind::DeepSeek);
        assert_eq!(loaded.provider.resolved_model(), "deepseek-chat");
        assert_eq!(loaded.provider.timeout_secs, 30);
        assert_eq!(loaded.languages.default_source, "en");
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let cfg = ProviderConfig {
            base_url: Some("http://127.0.0.1:8080/".into()),
            ..ProviderConfig::default()
        };
        assert_eq!(cfg.resolved_base_url(), "http://127.0.0.1:8080");
    }

    #[test]
    fn env_selects_deepseek_and_its_key() {
        let mut cfg = AppConfig::default();
        cfg.apply_env_overrides(env(&[
            ("LLM_TRANSLATE_API_PROVIDER", "DeepSeek"),
            ("LLM_TRANSLATE_OPENAI_API_KEY", "sk-openai"),
            ("LLM_TRANSLATE_DEEPSEEK_API_KEY", "sk-deepseek"),
        ]));

        assert_eq!(cfg.provider.kind, ProviderKind::DeepSeek);
        assert_eq!(cfg.provider.api_key.as_deref(), Some("sk-deepseek"));
    }

    #[test]
    fn env_ollama_model() {
        let mut cfg = AppConfig::default();
        cfg.apply_env_overrides(env(&[
            ("LLM_TRANSLATE_API_PROVIDER", "ollama"),
            ("LLM_TRANSLATE_OLLAMA_MODEL", "llama3"),
        ]));

        assert_eq!(cfg.provider.kind, ProviderKind::Ollama);
        assert_eq!(cfg.provider.resolved_model(), "llama3");
        assert!(cfg.provider.api_key.is_none());
    }

    #[test]
    fn unknown_or_empty_env_values_are_ignored() {
        let mut cfg = AppConfig::default();
        cfg.apply_env_overrides(env(&[
            ("LLM_TRANSLATE_API_PROVIDER", "gemini"),
            ("LLM_TRANSLATE_OPENAI_API_KEY", "  "),
        ]));

        assert_eq!(cfg.provider.kind, ProviderKind::OpenAi);
        assert!(cfg.provider.api_key.is_none());
    }

    #[test]
    fn first_run_writes_defaults() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("clip-translate").join("settings.toml");

        let created = AppConfig::load_or_create_at(&path).expect("create");
        assert!(path.exists());
        assert_eq!(created.hotkey.trigger_modifier, "Ctrl");

        let reloaded = AppConfig::load_from(&path).expect("load");
        assert_eq!(reloaded.languages.targets, vec!["ja", "en", "zh"]);
        assert_eq!(reloaded.hotkey.trigger_key, "C");
        assert_eq!(reloaded.ui.info_duration_ms, 1500);
    }

    #[test]
    fn existing_file_is_not_overwritten() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "[hotkey]\ntrigger_modifier = \"\"\ndouble_press_ms = 400\n").unwrap();

        let loaded = AppConfig::load_or_create_at(&path).expect("load");
        assert_eq!(loaded.hotkey.trigger_modifier, "");
        assert_eq!(loaded.hotkey.double_press_ms, 400);
        assert!(std::fs::read_to_string(&path).unwrap().contains("400"));
    }
}
