//! Provider and generation configuration

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use super::error::RequestError;
use super::provider::ProviderKind;

/// Everything a provider needs to talk to its service
///
/// Built once by the factory and owned by the provider instance afterwards.
/// The API key is wrapped in `SecretString`, so `Debug` output redacts it.
#[derive(Debug)]
pub struct ProviderConfig {
    /// Which provider this configuration is for
    pub kind: ProviderKind,
    /// Credential sent with every request
    pub api_key: SecretString,
    /// Model identifier, without the `models/` resource prefix
    pub model: String,
    /// Scheme and host of the provider API, without a trailing slash
    pub base_url: String,
}

impl ProviderConfig {
    /// Create a configuration pointing at the provider's public endpoint
    ///
    /// Accepts both `gemini-pro` and the resource name `models/gemini-pro`.
    pub fn new(kind: ProviderKind, api_key: SecretString, model: impl Into<String>) -> Self {
        let model = model.into();
        let model = match model.strip_prefix("models/") {
            Some(id) => id.to_string(),
            None => model,
        };

        Self {
            kind,
            api_key,
            model,
            base_url: kind.default_base_url().to_string(),
        }
    }

    /// Point the provider at a different endpoint (proxies, test servers)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

/// Default sampling temperature
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Highest temperature accepted by `validate`
pub const MAX_TEMPERATURE: f32 = 2.0;

/// Parameters for controlling text generation, passed per call
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Randomness (0.0-2.0, higher = more random)
    pub temperature: f32,
    /// Maximum number of tokens to generate; the provider decides when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl GenerationConfig {
    /// Create a configuration with the given temperature and no token limit
    pub fn new(temperature: f32) -> Self {
        Self {
            temperature,
            max_tokens: None,
        }
    }

    /// Set the max tokens
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Check that the parameters are within the accepted ranges
    pub fn validate(&self) -> Result<(), RequestError> {
        if !(0.0..=MAX_TEMPERATURE).contains(&self.temperature) {
            return Err(RequestError::InvalidRequest(format!(
                "temperature must be between 0 and {}, got {}",
                MAX_TEMPERATURE, self.temperature
            )));
        }
        if self.max_tokens == Some(0) {
            return Err(RequestError::InvalidRequest(
                "max_tokens must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPERATURE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_config_new() {
        let config = ProviderConfig::new(
            ProviderKind::Google,
            SecretString::from("secret-key".to_string()),
            "gemini-pro",
        );
        assert_eq!(config.model, "gemini-pro");
        assert_eq!(config.base_url, "https://generativelanguage.googleapis.com");
    }

    #[test]
    fn test_provider_config_strips_resource_prefix() {
        let config = ProviderConfig::new(
            ProviderKind::Google,
            SecretString::from("secret-key".to_string()),
            "models/gemini-pro",
        );
        assert_eq!(config.model, "gemini-pro");
    }

    #[test]
    fn test_provider_config_base_url_trims_slash() {
        let config = ProviderConfig::new(
            ProviderKind::Google,
            SecretString::from("secret-key".to_string()),
            "gemini-pro",
        )
        .with_base_url("http://127.0.0.1:9000/");
        assert_eq!(config.base_url, "http://127.0.0.1:9000");
    }

    #[test]
    fn test_provider_config_debug_redacts_key() {
        let config = ProviderConfig::new(
            ProviderKind::Google,
            SecretString::from("super-secret-key".to_string()),
            "gemini-pro",
        );
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret-key"));
        assert!(debug.contains("gemini-pro"));
    }

    #[test]
    fn test_config_default() {
        let config = GenerationConfig::default();
        assert_eq!(config.temperature, 0.7);
        assert!(config.max_tokens.is_none());
    }

    #[test]
    fn test_config_builder() {
        let config = GenerationConfig::new(1.2).with_max_tokens(256);
        assert_eq!(config.temperature, 1.2);
        assert_eq!(config.max_tokens, Some(256));
    }

    #[test]
    fn test_validate_accepts_bounds() {
        assert!(GenerationConfig::new(0.0).validate().is_ok());
        assert!(GenerationConfig::new(2.0).validate().is_ok());
        assert!(GenerationConfig::default().with_max_tokens(1).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range_temperature() {
        assert!(GenerationConfig::new(-0.1).validate().is_err());
        assert!(GenerationConfig::new(2.5).validate().is_err());
        assert!(GenerationConfig::new(f32::NAN).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_max_tokens() {
        let err = GenerationConfig::default()
            .with_max_tokens(0)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("max_tokens"));
    }

    #[test]
    fn test_config_serialization() {
        let json = serde_json::to_string(&GenerationConfig::new(0.5)).unwrap();
        assert!(json.contains("\"temperature\":0.5"));
        assert!(!json.contains("\"max_tokens\""));
    }
}
