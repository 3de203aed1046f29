//! Text-completion transport

use crate::error::ExtractError;
use medlog_core::LlmConfig;
use std::time::Duration;
use tracing::info;

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// One synchronous text-completion call
pub trait CompletionClient {
    fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, ExtractError>;
}

/// Messages API client
pub struct ClaudeClient {
    http: reqwest::blocking::Client,
    api_key: String,
    model: String,
    temperature: f64,
    base_url: String,
}

impl ClaudeClient {
    /// Construction succeeds without an API key; calls then fail and the
    /// extractor falls back.
    pub fn new(config: &LlmConfig) -> Result<Self, ExtractError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        info!(model = %config.model, "extraction client ready");
        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self) -> String {
        format!("{}/v1/messages", self.base_url)
    }
}

impl CompletionClient for ClaudeClient {
    fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, ExtractError> {
        if self.api_key.is_empty() {
            return Err(ExtractError::MissingApiKey);
        }

        let response = self
            .http
            .post(self.url())
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&serde_json::json!({
                "model": self.model,
                "max_tokens": max_tokens,
                "temperature": self.temperature,
                "messages": [{"role": "user", "content": prompt}]
            }))
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ExtractError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: serde_json::Value = response.json()?;
        body["content"][0]["text"]
            .as_str()
            .map(String::from)
            .ok_or(ExtractError::EmptyReply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_fails_without_network() {
        let client = ClaudeClient::new(&LlmConfig::new()).unwrap();
        assert!(matches!(
            client.complete("hello", 16),
            Err(ExtractError::MissingApiKey)
        ));
    }

    #[test]
    fn test_url_trims_trailing_slash() {
        let mut config = LlmConfig::new();
        config.base_url = "http://localhost:8080/".to_string();
        let client = ClaudeClient::new(&config).unwrap();
        assert_eq!(client.url(), "http://localhost:8080/v1/messages");
    }
}
