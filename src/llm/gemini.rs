//! Google Gemini client.
//!
//! The hosted default backend. Structured output is requested through the
//! `responseMimeType` generation setting; the invoker still validates every
//! response against the declared shape.

use serde::{Deserialize, Serialize};

use crate::llm::{error::ProviderError, Client, HasProvider};

/// Marker type for the Gemini provider
pub struct Gemini;

/// Configuration for the Gemini client
#[derive(Clone, Debug)]
pub struct GeminiConfig {
    /// API key for authentication
    pub api_key: String,
    /// Base URL (default: https://generativelanguage.googleapis.com)
    pub base_url: String,
    /// Default model (default: gemini-2.0-flash)
    pub default_model: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            default_model: "gemini-2.0-flash".to_string(),
        }
    }
}

/// Request structure for Gemini generateContent
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiRequest {
    pub contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GeminiGenerationConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub parts: Vec<GeminiPart>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiPart {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl GeminiContent {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![GeminiPart {
                text: Some(text.into()),
            }],
        }
    }
}

/// Generation configuration for Gemini
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
    /// Set to "application/json" to request structured output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
}

/// Response from Gemini generateContent
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiResponse {
    pub candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    pub usage_metadata: Option<GeminiUsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiCandidate {
    pub content: GeminiContent,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiUsageMetadata {
    pub prompt_token_count: u32,
    pub candidates_token_count: u32,
    pub total_token_count: u32,
}

impl<S> Client<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// Call Gemini's generateContent API.
    pub async fn call_gemini(
        &self,
        model: impl Into<String>,
        contents: Vec<GeminiContent>,
        generation_config: Option<GeminiGenerationConfig>,
    ) -> Result<GeminiResponse, ProviderError> {
        let config = self
            .gemini_config
            .as_ref()
            .ok_or_else(|| ProviderError::ProviderNotConfigured("Gemini not configured".to_string()))?;

        let model_name = model.into();
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            config.base_url, model_name, config.api_key
        );

        let request = GeminiRequest {
            contents,
            generation_config,
        };

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(ProviderError::GeminiError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let gemini_response: GeminiResponse = response.json().await?;
        Ok(gemini_response)
    }

    pub(crate) async fn gemini_generate_internal(
        &self,
        prompt: &str,
    ) -> Result<String, ProviderError> {
        let config = self
            .gemini_config
            .as_ref()
            .ok_or_else(|| ProviderError::ProviderNotConfigured("Gemini not configured".to_string()))?;
        let model = config.default_model.clone();

        let generation_config = Some(GeminiGenerationConfig {
            temperature: None,
            max_output_tokens: None,
            response_mime_type: Some("application/json".to_string()),
        });

        let response = self
            .call_gemini(model, vec![GeminiContent::user(prompt)], generation_config)
            .await?;

        response
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .and_then(|p| p.text.clone())
            .ok_or_else(|| ProviderError::InvalidResponse("No text in response".to_string()))
    }

    /// Single-turn JSON-mode generation against Gemini.
    pub async fn gemini_generate(&self, prompt: &str) -> Result<String, ProviderError>
    where
        S: HasProvider<Gemini>,
    {
        self.gemini_generate_internal(prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gemini_request_serialization() {
        let request = GeminiRequest {
            contents: vec![GeminiContent::user("Test")],
            generation_config: Some(GeminiGenerationConfig {
                temperature: Some(0.5),
                max_output_tokens: None,
                response_mime_type: Some("application/json".to_string()),
            }),
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("contents"));
        assert!(json.contains("generationConfig"));
        assert!(json.contains("responseMimeType"));
        assert!(!json.contains("maxOutputTokens"));
    }

    #[test]
    fn test_gemini_response_deserialization() {
        let raw = r#"{
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "{\"summary\":\"ok\"}"}]},
                "finishReason": "STOP"
            }],
            "usageMetadata": {
                "promptTokenCount": 10,
                "candidatesTokenCount": 5,
                "totalTokenCount": 15
            }
        }"#;
        let response: GeminiResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(
            response.candidates[0].content.parts[0].text.as_deref(),
            Some("{\"summary\":\"ok\"}")
        );
    }
}
