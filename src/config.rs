//! Process-wide engine configuration.
//!
//! Loaded once at startup from the environment and passed explicitly into
//! client construction; nothing here is ambient global state.

use std::env;

use crate::llm::{Client, GenerationService};

/// Provider settings read from the environment.
///
/// Recognized variables: `GEMINI_API_KEY`, `GEMINI_MODEL`, `OLLAMA_HOST`,
/// `OLLAMA_MODEL`. At least one provider should be configured or every
/// invocation will fail with a provider-not-configured error.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub gemini_api_key: Option<String>,
    pub gemini_model: Option<String>,
    pub ollama_host: Option<String>,
    pub ollama_model: Option<String>,
}

impl EngineConfig {
    pub fn from_env() -> Self {
        let config = Self {
            gemini_api_key: non_empty(env::var("GEMINI_API_KEY").ok()),
            gemini_model: non_empty(env::var("GEMINI_MODEL").ok()),
            ollama_host: non_empty(env::var("OLLAMA_HOST").ok()),
            ollama_model: non_empty(env::var("OLLAMA_MODEL").ok()),
        };
        if !config.has_provider() {
            log::warn!(
                "no generation provider configured; set GEMINI_API_KEY or OLLAMA_HOST"
            );
        }
        config
    }

    pub fn has_provider(&self) -> bool {
        self.gemini_api_key.is_some() || self.ollama_host.is_some()
    }

    /// Build the generation service this configuration describes.
    ///
    /// Boxed because the client's provider typestate differs per branch.
    /// With no provider configured the service still constructs, and every
    /// call fails with a provider-not-configured error.
    pub fn into_service(self) -> Box<dyn GenerationService> {
        match (self.gemini_api_key, self.ollama_host) {
            (Some(key), Some(host)) => {
                let mut client = Client::new().with_gemini(key).with_ollama_at(host);
                if let Some(model) = self.gemini_model {
                    client = client.gemini_model(model);
                }
                if let Some(model) = self.ollama_model {
                    client = client.ollama_model(model);
                }
                Box::new(client)
            }
            (Some(key), None) => {
                let mut client = Client::new().with_gemini(key);
                if let Some(model) = self.gemini_model {
                    client = client.gemini_model(model);
                }
                Box::new(client)
            }
            (None, Some(host)) => {
                let mut client = Client::new().with_ollama_at(host);
                if let Some(model) = self.ollama_model {
                    client = client.ollama_model(model);
                }
                Box::new(client)
            }
            (None, None) => Box::new(Client::new()),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_values_are_treated_as_unset() {
        assert_eq!(non_empty(Some("  ".to_string())), None);
        assert_eq!(non_empty(Some("key".to_string())), Some("key".to_string()));
        assert_eq!(non_empty(None), None);
    }

    #[test]
    fn test_default_config_has_no_provider() {
        assert!(!EngineConfig::default().has_provider());
    }
}
