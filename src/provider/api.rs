//! OpenAI-compatible `/v1/chat/completions` backend.
//!
//! Serves OpenAI and DeepSeek (and any other endpoint speaking the same wire
//! format).  All connection details come from [`ProviderConfig`].

use async_trait::async_trait;

use super::{ChatBackend, ProviderError};
use crate::config::ProviderConfig;

pub struct ApiBackend {
    client: reqwest::Client,
    url: String,
    api_key: Option<String>,
    model: String,
    temperature: f32,
}

impl ApiBackend {
    /// Build a backend whose HTTP client carries the per-request timeout
    /// from `config.timeout_secs`.
    pub fn from_config(config: &ProviderConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            url: format!("{}/v1/chat/completions", config.resolved_base_url()),
            api_key: config.api_key.clone().filter(|k| !k.is_empty()),
            model: config.resolved_model(),
            temperature: config.temperature,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ChatBackend for ApiBackend {
    /// The `Authorization: Bearer …` header is attached only when an API key
    /// is configured.
    async fn chat(&self, system: &str, user: &str) -> Result<String, ProviderError> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user",   "content": user   }
            ],
            "stream": false,
            "temperature": self.temperature
        });

        let mut req = self.client.post(&self.url).json(&body);
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }

        let response = req.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        extract_content(&json)
    }
}

fn extract_content(json: &serde_json::Value) -> Result<String, ProviderError> {
    let content = json["choices"][0]["message"]["content"]
        .as_str()
        .ok_or(ProviderError::EmptyResponse)?
        .trim()
        .to_string();

    if content.is_empty() {
        return Err(ProviderError::EmptyResponse);
    }
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProviderKind;

    #[test]
    fn url_follows_provider_kind() {
        let config = ProviderConfig {
            kind: ProviderKind::DeepSeek,
            ..ProviderConfig::default()
        };
        let backend = ApiBackend::from_config(&config);
        assert_eq!(backend.url(), "https://api.deepseek.com/v1/chat/completions");
    }

    #[test]
    fn empty_api_key_is_dropped() {
        let config = ProviderConfig {
            api_key: Some(String::new()),
            ..ProviderConfig::default()
        };
        assert!(ApiBackend::from_config(&config).api_key.is_none());
    }

    #[test]
    fn extracts_first_choice() {
        let json = serde_json::json!({
            "choices": [{ "message": { "role": "assistant", "content": "  こんにちは \n" } }]
        });
        assert_eq!(extract_content(&json).unwrap(), "こんにちは");
    }

    #[test]
    fn missing_or_blank_content_is_empty_response() {
        let missing = serde_json::json!({ "choices": [] });
        assert!(matches!(extract_content(&missing), Err(ProviderError::EmptyResponse)));

        let blank = serde_json::json!({
            "choices": [{ "message": { "content": "   " } }]
        });
        assert!(matches!(extract_content(&blank), Err(ProviderError::EmptyResponse)));
    }

    #[test]
    fn backend_is_object_safe() {
        let backend: Box<dyn ChatBackend> = Box::new(ApiBackend::from_config(&ProviderConfig::default()));
        drop(backend);
    }
}
