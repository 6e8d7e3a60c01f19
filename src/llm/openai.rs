// src/llm/openai.rs
// OpenAI-compatible chat completions backend implementation

use super::{BackendError, BackendSession, LanguageBackend};
use crate::config::RiddleConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

pub struct OpenAiBackend {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    max_tokens: usize,
    temperature: f32,
}

impl OpenAiBackend {
    pub fn new(
        base_url: String,
        api_key: String,
        model: String,
        max_tokens: usize,
        temperature: f32,
    ) -> Self {
        Self {
            client: Client::new(),
            base_url,
            api_key,
            model,
            max_tokens,
            temperature,
        }
    }

    pub fn from_config(config: &RiddleConfig) -> Self {
        Self::new(
            config.backend_base_url.clone(),
            config.backend_api_key.clone(),
            config.model.clone(),
            config.max_output_tokens,
            config.temperature,
        )
    }
}

#[async_trait]
impl LanguageBackend for OpenAiBackend {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn start_session(
        &self,
        instructions: &str,
    ) -> Result<Box<dyn BackendSession>, BackendError> {
        if self.api_key.trim().is_empty() {
            return Err(BackendError::Unavailable(
                "no API key configured".to_string(),
            ));
        }

        Ok(Box::new(OpenAiSession {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            api_key: self.api_key.clone(),
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            instructions: instructions.to_string(),
        }))
    }
}

/// Stateless per-prompt session: the instructions ride along as the system
/// message on every request.
struct OpenAiSession {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    max_tokens: usize,
    temperature: f32,
    instructions: String,
}

#[async_trait]
impl BackendSession for OpenAiSession {
    async fn generate(&self, input: &str) -> Result<String, BackendError> {
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": self.instructions },
                { "role": "user", "content": input }
            ],
            "max_tokens": self.max_tokens,
            "temperature": self.temperature,
        });

        debug!("openai request: model={}", self.model);

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| BackendError::InvocationFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(BackendError::InvocationFailed(format!(
                "API error {}: {}",
                status, error_text
            )));
        }

        let raw_response = response
            .json::<Value>()
            .await
            .map_err(|e| BackendError::InvocationFailed(e.to_string()))?;

        let content = raw_response["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| {
                BackendError::InvocationFailed("no content in response".to_string())
            })?
            .to_string();

        Ok(content)
    }
}
