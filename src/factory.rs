use tracing::{info, warn};

use crate::error::Error;
use crate::provider::TextProvider;
use crate::providers::{GroqProvider, HuggingFaceProvider, MockProvider};
use crate::types::{GenerationParams, Settings};

/// Supported providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderType {
    Groq,
    HuggingFace,
    Mock,
}

impl ProviderType {
    /// Name reported in HTTP envelopes.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderType::Groq => "groq",
            ProviderType::HuggingFace => "huggingface",
            ProviderType::Mock => "mock",
        }
    }
}

/// Configuration for creating a provider.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub provider_type: ProviderType,
    pub api_key: Option<String>,
    pub model: Option<String>,
}

impl ProviderConfig {
    /// Create configuration for the Groq provider.
    pub fn groq(api_key: String, model: Option<String>) -> Self {
        Self {
            provider_type: ProviderType::Groq,
            api_key: Some(api_key),
            model,
        }
    }

    /// Create configuration for the Hugging Face provider.
    ///
    /// The API key is optional: the client runs in a degraded unauthenticated
    /// mode without one.
    pub fn huggingface(api_key: Option<String>, model: Option<String>) -> Self {
        Self {
            provider_type: ProviderType::HuggingFace,
            api_key,
            model,
        }
    }

    /// Create configuration for the mock responder.
    pub fn mock() -> Self {
        Self {
            provider_type: ProviderType::Mock,
            api_key: None,
            model: None,
        }
    }

    /// Select a provider from settings: Groq first, then Hugging Face, then
    /// the mock responder.
    ///
    /// Groq requires its API key; Hugging Face activates on any of its
    /// configuration (a present model with a missing key is enough).
    pub fn from_settings(settings: &Settings) -> Self {
        if let Some(api_key) = &settings.groq_api_key {
            return Self::groq(api_key.clone(), settings.groq_model.clone());
        }

        if settings.huggingface_api_key.is_some() || settings.huggingface_model.is_some() {
            return Self::huggingface(
                settings.huggingface_api_key.clone(),
                settings.huggingface_model.clone(),
            );
        }

        Self::mock()
    }
}

/// The provider selected at startup.
///
/// Built exactly once in `main`, wrapped in an `Arc`, and read by every
/// request; never mutated afterwards.
pub struct ActiveProvider {
    provider_type: ProviderType,
    handle: Box<dyn TextProvider>,
}

impl ActiveProvider {
    /// Wrap an already-constructed provider.
    pub fn new(provider_type: ProviderType, handle: Box<dyn TextProvider>) -> Self {
        Self {
            provider_type,
            handle,
        }
    }

    pub fn provider_type(&self) -> ProviderType {
        self.provider_type
    }

    /// Delegate to the selected provider.
    pub async fn generate(&self, params: &GenerationParams) -> String {
        self.handle.generate(params).await
    }
}

/// Factory for creating the active provider.
pub struct ProviderFactory;

impl ProviderFactory {
    /// Create a provider from configuration.
    pub fn create(config: &ProviderConfig) -> Result<ActiveProvider, Error> {
        match config.provider_type {
            ProviderType::Groq => {
                let api_key = config
                    .api_key
                    .as_ref()
                    .ok_or_else(|| Error::config("API key required for Groq provider"))?;
                let provider = GroqProvider::new(api_key.clone(), config.model.clone())?;
                info!("Using Groq API provider");
                Ok(ActiveProvider {
                    provider_type: ProviderType::Groq,
                    handle: Box::new(provider),
                })
            }
            ProviderType::HuggingFace => {
                let provider =
                    HuggingFaceProvider::new(config.api_key.clone(), config.model.clone())?;
                info!("Using Hugging Face API provider (fallback)");
                Ok(ActiveProvider {
                    provider_type: ProviderType::HuggingFace,
                    handle: Box::new(provider),
                })
            }
            ProviderType::Mock => {
                warn!("No AI provider configured, using mock responder");
                Ok(ActiveProvider {
                    provider_type: ProviderType::Mock,
                    handle: Box::new(MockProvider),
                })
            }
        }
    }

    /// Select and create a provider from settings.
    pub fn from_settings(settings: &Settings) -> Result<ActiveProvider, Error> {
        Self::create(&ProviderConfig::from_settings(settings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(groq_key: Option<&str>, hf_key: Option<&str>, hf_model: Option<&str>) -> Settings {
        Settings {
            groq_api_key: groq_key.map(String::from),
            huggingface_api_key: hf_key.map(String::from),
            huggingface_model: hf_model.map(String::from),
            app_env: "development".to_string(),
            port: 8000,
            ..Settings::default()
        }
    }

    #[test]
    fn test_groq_wins_when_configured() {
        let config =
            ProviderConfig::from_settings(&settings(Some("gsk_test"), Some("hf_test"), None));
        assert_eq!(config.provider_type, ProviderType::Groq);
        assert_eq!(config.api_key, Some("gsk_test".to_string()));
    }

    #[test]
    fn test_huggingface_fallback() {
        let config = ProviderConfig::from_settings(&settings(None, Some("hf_test"), None));
        assert_eq!(config.provider_type, ProviderType::HuggingFace);
    }

    #[test]
    fn test_huggingface_activates_partially_configured() {
        // A model without a key is enough for the degraded mode.
        let config = ProviderConfig::from_settings(&settings(None, None, Some("gpt2")));
        assert_eq!(config.provider_type, ProviderType::HuggingFace);
        assert_eq!(config.api_key, None);
        assert_eq!(config.model, Some("gpt2".to_string()));
    }

    #[test]
    fn test_mock_when_nothing_configured() {
        let config = ProviderConfig::from_settings(&settings(None, None, None));
        assert_eq!(config.provider_type, ProviderType::Mock);
    }

    #[test]
    fn test_groq_requires_api_key() {
        let config = ProviderConfig {
            provider_type: ProviderType::Groq,
            api_key: None,
            model: None,
        };
        assert!(ProviderFactory::create(&config).is_err());
    }

    #[tokio::test]
    async fn test_mock_provider_end_to_end() {
        let provider = ProviderFactory::from_settings(&settings(None, None, None)).unwrap();
        assert_eq!(provider.provider_type(), ProviderType::Mock);

        let text = provider.generate(&GenerationParams::new("hi")).await;
        assert!(text.starts_with("[Mock Response] I received your prompt: 'hi...'"));
    }
}
