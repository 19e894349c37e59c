//! Detection fallback: wraps any [`TranslationProvider`] so that
//! `detect_language` never fails.
//!
//! A failed or unusable detection returns the configured default code
//! (`"en"` unless configured otherwise).  Translation errors pass through
//! untouched: those are the ones the user must see.

use async_trait::async_trait;

use super::{ProviderError, TranslationProvider};

pub struct DetectFallback<P: TranslationProvider> {
    inner: P,
    default_code: String,
}

impl<P: TranslationProvider> DetectFallback<P> {
    pub fn new(inner: P, default_code: impl Into<String>) -> Self {
        Self {
            inner,
            default_code: default_code.into(),
        }
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }
}

#[async_trait]
impl<P: TranslationProvider> TranslationProvider for DetectFallback<P> {
    /// This implementation never returns `Err(_)`.
    async fn detect_language(&self, text: &str) -> Result<String, ProviderError> {
        match self.inner.detect_language(text).await {
            Ok(code) if !code.is_empty() => Ok(code),
            Ok(_) => Ok(self.default_code.clone()),
            Err(e) => {
                log::warn!(
                    "provider: language detection failed ({e}), assuming {}",
                    self.default_code
                );
                Ok(self.default_code.clone())
            }
        }
    }

    async fn translate(&self, text: &str, src: &str, tgt: &str) -> Result<String, ProviderError> {
        self.inner.translate(text, src, tgt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(&'static str);

    #[async_trait]
    impl TranslationProvider for Fixed {
        async fn detect_language(&self, _text: &str) -> Result<String, ProviderError> {
            Ok(self.0.to_string())
        }

        async fn translate(&self, text: &str, _src: &str, tgt: &str) -> Result<String, ProviderError> {
            Ok(format!("{text}->{tgt}"))
        }
    }

    struct Broken;

    #[async_trait]
    impl TranslationProvider for Broken {
        async fn detect_language(&self, _text: &str) -> Result<String, ProviderError> {
            Err(ProviderError::Timeout)
        }

        async fn translate(&self, _t: &str, _s: &str, _g: &str) -> Result<String, ProviderError> {
            Err(ProviderError::Timeout)
        }
    }

    #[tokio::test]
    async fn passes_through_detection() {
        let provider = DetectFallback::new(Fixed("ja"), "en");
        assert_eq!(provider.detect_language("x").await.unwrap(), "ja");
    }

    #[tokio::test]
    async fn empty_detection_uses_default() {
        let provider = DetectFallback::new(Fixed(""), "en");
        assert_eq!(provider.detect_language("x").await.unwrap(), "en");
    }

    #[tokio::test]
    async fn failed_detection_uses_default() {
        let provider = DetectFallback::new(Broken, "zh");
        assert_eq!(provider.detect_language("x").await.unwrap(), "zh");
    }

    #[tokio::test]
    async fn translation_errors_still_propagate() {
        let provider = DetectFallback::new(Broken, "en");
        assert!(matches!(
            provider.translate("x", "en", "ja").await,
            Err(ProviderError::Timeout)
        ));
    }

    #[test]
    fn fallback_is_object_safe() {
        let _: Box<dyn TranslationProvider> = Box::new(DetectFallback::new(Fixed("en"), "en"));
    }
}
