//! Ollama client for local inference.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::llm::{error::ProviderError, Client, HasProvider};

/// Marker type for the Ollama provider
pub struct Ollama;

/// Configuration for the Ollama client
#[derive(Clone, Debug)]
pub struct OllamaConfig {
    /// Ollama server URL (default: http://localhost:11434)
    pub host: String,
    /// Default model (default: llama3)
    pub default_model: String,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            host: "http://localhost:11434".to_string(),
            default_model: "llama3".to_string(),
        }
    }
}

/// Request structure for Ollama chat completions
#[derive(Debug, Serialize)]
pub struct OllamaChatRequest {
    pub model: String,
    pub messages: Vec<OllamaMessage>,
    pub stream: bool,
    /// "json" constrains generation to a JSON object.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

/// A message in Ollama's chat format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaMessage {
    pub role: String,
    pub content: String,
}

impl OllamaMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Response from Ollama's chat endpoint
#[derive(Debug, Deserialize)]
pub struct OllamaChatResponse {
    pub model: String,
    pub created_at: DateTime<Utc>,
    pub message: OllamaMessage,
    pub done: bool,
    #[serde(default)]
    pub total_duration: u64,
    #[serde(default)]
    pub eval_count: u32,
}

impl<S> Client<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// Call Ollama's chat endpoint.
    pub async fn call_ollama_chat(
        &self,
        model: impl Into<String>,
        messages: Vec<OllamaMessage>,
        json_mode: bool,
    ) -> Result<OllamaChatResponse, ProviderError> {
        let config = self
            .ollama_config
            .as_ref()
            .ok_or_else(|| ProviderError::ProviderNotConfigured("Ollama not configured".to_string()))?;

        let request = OllamaChatRequest {
            model: model.into(),
            messages,
            stream: false,
            format: json_mode.then(|| "json".to_string()),
        };

        let response = self
            .client
            .post(format!("{}/api/chat", config.host))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(ProviderError::OllamaError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let chat_response: OllamaChatResponse = response.json().await?;
        Ok(chat_response)
    }

    pub(crate) async fn ollama_generate_internal(
        &self,
        prompt: &str,
    ) -> Result<String, ProviderError> {
        let config = self
            .ollama_config
            .as_ref()
            .ok_or_else(|| ProviderError::ProviderNotConfigured("Ollama not configured".to_string()))?;
        let model = config.default_model.clone();

        let response = self
            .call_ollama_chat(model, vec![OllamaMessage::user(prompt)], true)
            .await?;
        Ok(response.message.content)
    }

    /// Single-turn JSON-mode generation against Ollama.
    pub async fn ollama_generate(&self, prompt: &str) -> Result<String, ProviderError>
    where
        S: HasProvider<Ollama>,
    {
        self.ollama_generate_internal(prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_mode_sets_format_field() {
        let request = OllamaChatRequest {
            model: "llama3".to_string(),
            messages: vec![OllamaMessage::user("Test")],
            stream: false,
            format: Some("json".to_string()),
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains(r#""format":"json""#));
    }

    #[test]
    fn test_format_omitted_outside_json_mode() {
        let request = OllamaChatRequest {
            model: "llama3".to_string(),
            messages: vec![OllamaMessage::user("Test")],
            stream: false,
            format: None,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("format"));
    }
}
