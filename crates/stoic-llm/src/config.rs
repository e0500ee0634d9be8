// Configuration layer for provider-agnostic LLM client creation

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::gemini::{GeminiClient, GEMINI_API_BASE};

/// Type of LLM provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    #[default]
    Gemini,
}

/// Configuration for the Gemini provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    pub api_key: String,
    /// Base URL (defaults to https://generativelanguage.googleapis.com/v1beta)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Whole-request timeout in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: None,
            timeout_secs: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(GEMINI_API_BASE)
    }
}

/// Provider-specific configuration details
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProviderDetails {
    Gemini(GeminiConfig),
}

/// Complete provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(flatten)]
    pub details: ProviderDetails,
}

impl ProviderConfig {
    /// Create Gemini provider config
    pub fn gemini(config: GeminiConfig) -> Self {
        Self {
            details: ProviderDetails::Gemini(config),
        }
    }

    pub fn provider_type(&self) -> ProviderType {
        match self.details {
            ProviderDetails::Gemini(_) => ProviderType::Gemini,
        }
    }
}

/// Factory for creating chat clients from configuration
pub struct ClientFactory;

impl ClientFactory {
    pub fn create_client(config: ProviderConfig) -> Result<Arc<dyn crate::traits::ChatClient>> {
        match config.details {
            ProviderDetails::Gemini(gemini) => {
                let client = match gemini.timeout_secs {
                    Some(secs) => GeminiClient::with_timeout(
                        gemini.api_key.clone(),
                        Duration::from_secs(secs),
                    )?,
                    None => GeminiClient::new(gemini.api_key.clone())?,
                };
                Ok(Arc::new(client.with_base_url(gemini.base_url())))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gemini_config() {
        let config = ProviderConfig::gemini(GeminiConfig::new("test-key"));
        assert_eq!(config.provider_type(), ProviderType::Gemini);
    }

    #[test]
    fn test_default_base_url() {
        let config = GeminiConfig::new("test-key");
        assert_eq!(config.base_url(), GEMINI_API_BASE);

        let config = config.with_base_url("http://localhost:9000");
        assert_eq!(config.base_url(), "http://localhost:9000");
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = ProviderConfig::gemini(GeminiConfig::new("test-key").with_timeout_secs(30));

        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"type\":\"gemini\""));
        let deserialized: ProviderConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(config.provider_type(), deserialized.provider_type());
    }

    #[test]
    fn test_factory_accepts_missing_key() {
        assert!(ClientFactory::create_client(ProviderConfig::gemini(GeminiConfig::new(""))).is_ok());
    }
}
