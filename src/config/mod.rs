//! Configuration module.
//!
//! Provides `AppConfig` (top-level settings), sub-configs for each subsystem,
//! `AppPaths` for the platform config directory, TOML persistence via
//! `AppConfig::load_or_create` / `AppConfig::save_to`, and the `LLM_TRANSLATE_*`
//! environment overrides.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{AppConfig, HotkeyConfig, LanguageConfig, ProviderConfig, ProviderKind, UiConfig};
