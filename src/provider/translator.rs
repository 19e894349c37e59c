//! [`TranslationProvider`] built on top of any [`ChatBackend`].

use async_trait::async_trait;

use super::prompt::{
    detection_prompt, normalize_lang_code, translation_prompt, DETECT_SYSTEM, TRANSLATE_SYSTEM,
};
use super::{ChatBackend, ProviderError, TranslationProvider};

/// Prompts a chat backend for detection and translation.
pub struct ChatTranslator<B: ChatBackend> {
    backend: B,
}

impl<B: ChatBackend> ChatTranslator<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

#[async_trait]
impl<B: ChatBackend> TranslationProvider for ChatTranslator<B> {
    async fn detect_language(&self, text: &str) -> Result<String, ProviderError> {
        let reply = self.backend.chat(DETECT_SYSTEM, &detection_prompt(text)).await?;
        normalize_lang_code(&reply).ok_or(ProviderError::EmptyResponse)
    }

    async fn translate(&self, text: &str, src: &str, tgt: &str) -> Result<String, ProviderError> {
        self.backend
            .chat(TRANSLATE_SYSTEM, &translation_prompt(text, src, tgt))
            .await
    }
}
