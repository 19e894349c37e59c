//! Translation backends.
//!
//! This module provides:
//! * [`TranslationProvider`]: async trait the dispatcher calls.
//! * [`ChatBackend`]: one chat round-trip against an LLM endpoint.
//! * [`ApiBackend`]: OpenAI-compatible `/v1/chat/completions` (OpenAI,
//!   DeepSeek).
//! * [`OllamaBackend`]: Ollama's native `/api/chat`.
//! * [`ChatTranslator`]: turns any [`ChatBackend`] into a provider using the
//!   detection and translation prompts.
//! * [`DetectFallback`]: wraps a provider so detection never fails.
//! * [`ProviderError`]: error variants for backend calls.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use clip_translate::config::AppConfig;
//! use clip_translate::provider::build_provider;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::default();
//!     let provider = build_provider(&config.provider, &config.languages.default_source);
//!
//!     let src = provider.detect_language("こんにちは").await.unwrap();
//!     let out = provider.translate("こんにちは", &src, "en").await.unwrap();
//!     println!("{out}");
//! }
//! ```

pub mod api;
pub mod fallback;
pub mod ollama;
pub mod prompt;
pub mod translator;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use api::ApiBackend;
pub use fallback::DetectFallback;
pub use ollama::OllamaBackend;
pub use translator::ChatTranslator;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::{ProviderConfig, ProviderKind};

// ---------------------------------------------------------------------------
// ProviderError
// ---------------------------------------------------------------------------

/// Errors that can occur while talking to a translation backend.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// HTTP transport or connection error.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("translation request timed out")]
    Timeout,

    /// The backend answered with a non-success status.
    #[error("backend returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body could not be parsed as expected JSON.
    #[error("failed to parse backend response: {0}")]
    Parse(String),

    /// The backend returned no usable text.
    #[error("backend returned an empty response")]
    EmptyResponse,
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ProviderError::Timeout
        } else {
            ProviderError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

/// Language detection and translation.
///
/// Implementors must be `Send + Sync` so they can be shared by concurrent
/// job tasks behind an `Arc<dyn TranslationProvider>`.  Calls are never
/// serialised by the caller.
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Two-letter, lower-case ISO 639-1 code of `text`.
    async fn detect_language(&self, text: &str) -> Result<String, ProviderError>;

    /// Translate `text` from `src` to `tgt`.
    async fn translate(&self, text: &str, src: &str, tgt: &str) -> Result<String, ProviderError>;
}

/// A single system + user chat exchange with an LLM endpoint.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Return the assistant's reply, trimmed and non-empty.
    async fn chat(&self, system: &str, user: &str) -> Result<String, ProviderError>;
}

// ---------------------------------------------------------------------------
// build_provider
// ---------------------------------------------------------------------------

/// Build the configured provider, with detection falling back to
/// `default_source`.
pub fn build_provider(config: &ProviderConfig, default_source: &str) -> Arc<dyn TranslationProvider> {
    log::info!(
        "provider: {:?} at {} (model {})",
        config.kind,
        config.resolved_base_url(),
        config.resolved_model()
    );

    match config.kind {
        ProviderKind::OpenAi | ProviderKind::DeepSeek => Arc::new(DetectFallback::new(
            ChatTranslator::new(ApiBackend::from_config(config)),
            default_source,
        )),
        ProviderKind::Ollama => Arc::new(DetectFallback::new(
            ChatTranslator::new(OllamaBackend::from_config(config)),
            default_source,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_every_kind() {
        for kind in [ProviderKind::OpenAi, ProviderKind::DeepSeek, ProviderKind::Ollama] {
            let config = ProviderConfig {
                kind,
                ..ProviderConfig::default()
            };
            let _provider = build_provider(&config, "en");
        }
    }

    #[test]
    fn error_messages_are_readable() {
        let err = ProviderError::Status {
            status: 401,
            body: "invalid api key".into(),
        };
        assert_eq!(err.to_string(), "backend returned HTTP 401: invalid api key");
        assert_eq!(ProviderError::Timeout.to_string(), "translation request timed out");
    }
}
