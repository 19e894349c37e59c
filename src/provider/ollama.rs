//! Ollama backend using the native `/api/chat` endpoint.
//!
//! Reasoning models served by Ollama (e.g. `deepseek-r1`) prefix their reply
//! with a `<think>…</think>` block; only the text after it is returned.

use async_trait::async_trait;

use super::prompt::strip_reasoning;
use super::{ChatBackend, ProviderError};
use crate::config::ProviderConfig;

pub struct OllamaBackend {
    client: reqwest::Client,
    url: String,
    model: String,
    temperature: f32,
}

impl OllamaBackend {
    pub fn from_config(config: &ProviderConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            url: format!("{}/api/chat", config.resolved_base_url()),
            model: config.resolved_model(),
            temperature: config.temperature,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ChatBackend for OllamaBackend {
    async fn chat(&self, system: &str, user: &str) -> Result<String, ProviderError> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user",   "content": user   }
            ],
            "stream": false,
            "options": { "temperature": self.temperature }
        });

        let response = self.client.post(&self.url).json(&body).send().await?;
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

        extract_message(&json)
    }
}

fn extract_message(json: &serde_json::Value) -> Result<String, ProviderError> {
    let raw = json["message"]["content"]
        .as_str()
        .ok_or(ProviderError::EmptyResponse)?;

    let answer = strip_reasoning(raw);
    if answer.is_empty() {
        return Err(ProviderError::EmptyResponse);
    }
    Ok(answer.to_string())
}
