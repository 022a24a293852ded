//! Client for the external text-generation service.
//!
//! A typestate [`Client`] wraps `reqwest::Client` and tracks at compile time
//! which providers are configured. Two backends are supported: Gemini (the
//! hosted default) and Ollama (local inference). Generation is always a
//! single request-response call in JSON mode; there is no streaming and no
//! multi-turn state.

pub mod error;
pub mod gemini;
pub mod ollama;

use std::marker::PhantomData;

use async_trait::async_trait;

pub use error::ProviderError;
pub use gemini::{Gemini, GeminiConfig};
pub use ollama::{Ollama, OllamaConfig};

/// The boundary contract with the external generation service: submit
/// rendered prompt text, receive raw response text.
///
/// The invoker only talks to this trait; the concrete [`Client`] implements
/// it, as do test doubles.
#[async_trait]
pub trait GenerationService: Send + Sync {
    /// One outbound call. The prompt already carries the output-shape
    /// instruction; the response is expected (but not trusted) to be a JSON
    /// object.
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;
}

/// Generation client wrapper around `reqwest::Client`.
/// Uses a typestate to track which providers are configured.
#[derive(Clone)]
pub struct Client<S> {
    pub(crate) client: reqwest::Client,
    pub(crate) state: PhantomData<S>,
    pub(crate) gemini_config: Option<GeminiConfig>,
    pub(crate) ollama_config: Option<OllamaConfig>,
}

// ============================================================================
// Type States
// ============================================================================

/// Marker indicating a provider is enabled
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Enabled;

/// Marker indicating a provider is disabled
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Disabled;

/// Provider state container; each type parameter tracks whether a specific
/// provider is configured.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Providers<GeminiState, OllamaState> {
    _gemini: PhantomData<GeminiState>,
    _ollama: PhantomData<OllamaState>,
}

/// Trait to check if a provider is available on this client
pub trait HasProvider<Provider> {}

impl<O> HasProvider<Gemini> for Providers<Enabled, O> {}
impl<G> HasProvider<Ollama> for Providers<G, Enabled> {}

// ============================================================================
// Client constructors and builders
// ============================================================================

impl Client<Providers<Disabled, Disabled>> {
    /// Create a new client with no providers configured
    pub fn new() -> Self {
        Client {
            client: reqwest::Client::new(),
            state: PhantomData,
            gemini_config: None,
            ollama_config: None,
        }
    }
}

impl Default for Client<Providers<Disabled, Disabled>> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O> Client<Providers<Disabled, O>> {
    /// Enable the Gemini provider with an API key and the default base URL
    pub fn with_gemini(self, api_key: impl Into<String>) -> Client<Providers<Enabled, O>> {
        self.with_gemini_at(api_key, "https://generativelanguage.googleapis.com")
    }

    /// Enable the Gemini provider with an API key and a custom base URL
    pub fn with_gemini_at(
        self,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Client<Providers<Enabled, O>> {
        Client {
            client: self.client,
            state: PhantomData,
            gemini_config: Some(GeminiConfig {
                api_key: api_key.into(),
                base_url: base_url.into(),
                ..Default::default()
            }),
            ollama_config: self.ollama_config,
        }
    }
}

impl<G> Client<Providers<G, Disabled>> {
    /// Enable the Ollama provider with the default host (http://localhost:11434)
    pub fn with_ollama(self) -> Client<Providers<G, Enabled>> {
        self.with_ollama_at("http://localhost:11434")
    }

    /// Enable the Ollama provider with a custom host URL
    pub fn with_ollama_at(self, host: impl Into<String>) -> Client<Providers<G, Enabled>> {
        Client {
            client: self.client,
            state: PhantomData,
            gemini_config: self.gemini_config,
            ollama_config: Some(OllamaConfig {
                host: host.into(),
                ..Default::default()
            }),
        }
    }
}

impl<O> Client<Providers<Enabled, O>> {
    /// Override the Gemini default model
    pub fn gemini_model(mut self, model: impl Into<String>) -> Self {
        if let Some(ref mut config) = self.gemini_config {
            config.default_model = model.into();
        }
        self
    }
}

impl<G> Client<Providers<G, Enabled>> {
    /// Override the Ollama default model
    pub fn ollama_model(mut self, model: impl Into<String>) -> Self {
        if let Some(ref mut config) = self.ollama_config {
            config.default_model = model.into();
        }
        self
    }
}

impl<S: Clone + Send + Sync + 'static> Client<S> {
    /// Dispatch a single JSON-mode generation to the first configured
    /// provider. Gemini takes precedence when both are configured.
    pub(crate) async fn dispatch_generate(&self, prompt: &str) -> Result<String, ProviderError> {
        if self.gemini_config.is_some() {
            return self.gemini_generate_internal(prompt).await;
        }

        if self.ollama_config.is_some() {
            return self.ollama_generate_internal(prompt).await;
        }

        Err(ProviderError::ProviderNotConfigured(
            "No generation provider available".to_string(),
        ))
    }
}

#[async_trait]
impl<S: Clone + Send + Sync + 'static> GenerationService for Client<S> {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        self.dispatch_generate(prompt).await
    }
}

#[async_trait]
impl GenerationService for Box<dyn GenerationService> {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        (**self).generate(prompt).await
    }
}
