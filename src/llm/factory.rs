//! Provider construction from configuration
//!
//! `LlmFactory` is the only place credentials are read. Adding a provider
//! means a new `ProviderKind` variant, its `LlmInterface` implementation and
//! one arm in `LlmFactory::from_settings`.

use std::env;
use std::sync::Arc;

use secrecy::SecretString;
use tracing::info;

use crate::llm::core::{
    config::ProviderConfig,
    error::LlmError,
    provider::{LlmInterface, ProviderKind},
};

/// Environment variable naming the provider (`google`)
pub const ENV_PROVIDER: &str = "LLM_PROVIDER";
/// Environment variable holding the provider API key
pub const ENV_API_KEY: &str = "LLM_API_KEY";
/// Environment variable overriding the model identifier
pub const ENV_MODEL: &str = "LLM_MODEL";
/// Environment variable overriding the provider endpoint
pub const ENV_BASE_URL: &str = "LLM_BASE_URL";

/// Unresolved provider settings
///
/// Every field is optional; `LlmFactory` fills the gaps with defaults and
/// rejects settings that cannot produce a working provider.
#[derive(Debug, Default)]
pub struct LlmSettings {
    pub provider: Option<String>,
    pub api_key: Option<SecretString>,
    pub model: Option<String>,
    pub base_url: Option<String>,
}

impl LlmSettings {
    /// Read settings from the process environment
    ///
    /// Unset, empty and whitespace-only variables are treated alike.
    pub fn from_env() -> Self {
        Self {
            provider: non_empty_var(ENV_PROVIDER),
            api_key: non_empty_var(ENV_API_KEY).map(SecretString::from),
            model: non_empty_var(ENV_MODEL),
            base_url: non_empty_var(ENV_BASE_URL),
        }
    }

    /// Fill fields missing here from `fallback`
    pub fn or(self, fallback: LlmSettings) -> Self {
        Self {
            provider: self.provider.or(fallback.provider),
            api_key: self.api_key.or(fallback.api_key),
            model: self.model.or(fallback.model),
            base_url: self.base_url.or(fallback.base_url),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    non_empty(env::var(name).ok())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Builds `LlmInterface` instances
pub struct LlmFactory;

impl LlmFactory {
    /// Create a provider from explicit arguments, falling back to the
    /// environment for anything not given
    ///
    /// # Errors
    ///
    /// * `LlmError::Configuration` when no API key can be resolved or the
    ///   provider name is unknown
    /// * `LlmError::ProviderUnavailable` when the provider's client is not
    ///   part of this build
    pub fn create_llm(
        provider: Option<&str>,
        api_key: Option<&str>,
        model: Option<&str>,
    ) -> Result<Arc<dyn LlmInterface>, LlmError> {
        let explicit = LlmSettings {
            provider: non_empty(provider.map(str::to_string)),
            api_key: non_empty(api_key.map(str::to_string)).map(SecretString::from),
            model: non_empty(model.map(str::to_string)),
            base_url: None,
        };
        Self::from_settings(explicit.or(LlmSettings::from_env()))
    }

    /// Create a provider from already-collected settings
    ///
    /// Does not consult the environment.
    pub fn from_settings(settings: LlmSettings) -> Result<Arc<dyn LlmInterface>, LlmError> {
        let config = Self::resolve(settings)?;

        info!(
            provider = %config.kind,
            model = %config.model,
            "Creating LLM provider"
        );

        match config.kind {
            ProviderKind::Google => Self::google(config),
        }
    }

    /// Validate settings and apply defaults
    pub fn resolve(settings: LlmSettings) -> Result<ProviderConfig, LlmError> {
        let Some(api_key) = settings.api_key else {
            return Err(LlmError::Configuration(format!(
                "{} environment variable not set",
                ENV_API_KEY
            )));
        };

        let kind = match settings.provider.as_deref() {
            Some(name) => name.parse::<ProviderKind>()?,
            None => ProviderKind::Google,
        };

        let model = settings
            .model
            .unwrap_or_else(|| kind.default_model().to_string());

        let config = ProviderConfig::new(kind, api_key, model);
        Ok(match settings.base_url {
            Some(base_url) => config.with_base_url(base_url),
            None => config,
        })
    }

    #[cfg(feature = "google")]
    fn google(config: ProviderConfig) -> Result<Arc<dyn LlmInterface>, LlmError> {
        Ok(Arc::new(crate::llm::google::GoogleLlm::new(config)?))
    }

    #[cfg(not(feature = "google"))]
    fn google(_config: ProviderConfig) -> Result<Arc<dyn LlmInterface>, LlmError> {
        Err(LlmError::ProviderUnavailable(
            "Google provider support is not compiled in. Rebuild with `--features google`"
                .to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn settings_with_key() -> LlmSettings {
        LlmSettings {
            api_key: Some(SecretString::from("test-key".to_string())),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_api_key_is_configuration_error() {
        let err = LlmFactory::from_settings(LlmSettings::default())
            .err()
            .expect("expected an error");
        assert!(matches!(err, LlmError::Configuration(_)));
        assert!(err.to_string().contains("LLM_API_KEY environment variable not set"));
    }

    #[test]
    fn test_unknown_provider_is_configuration_error() {
        let settings = LlmSettings {
            provider: Some("anthropic".to_string()),
            ..settings_with_key()
        };
        let err = LlmFactory::from_settings(settings)
            .err()
            .expect("expected an error");
        assert!(matches!(err, LlmError::Configuration(_)));
        assert!(err.to_string().contains("Unsupported LLM provider: anthropic"));
    }

    #[test]
    fn test_key_checked_before_provider_name() {
        let settings = LlmSettings {
            provider: Some("anthropic".to_string()),
            ..Default::default()
        };
        let err = LlmFactory::resolve(settings).unwrap_err();
        assert!(err.to_string().contains("LLM_API_KEY"));
    }

    #[test]
    fn test_resolve_applies_defaults() {
        let config = LlmFactory::resolve(settings_with_key()).unwrap();
        assert_eq!(config.kind, ProviderKind::Google);
        assert_eq!(config.model, "gemini-pro");
        assert_eq!(config.base_url, "https://generativelanguage.googleapis.com");
        assert_eq!(config.api_key.expose_secret(), "test-key");
    }

    #[test]
    fn test_resolve_uses_explicit_values() {
        let settings = LlmSettings {
            provider: Some("Google".to_string()),
            model: Some("gemini-2.5-flash".to_string()),
            base_url: Some("http://127.0.0.1:9999".to_string()),
            ..settings_with_key()
        };
        let config = LlmFactory::resolve(settings).unwrap();
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.base_url, "http://127.0.0.1:9999");
    }

    #[test]
    fn test_settings_or_prefers_self() {
        let explicit = LlmSettings {
            model: Some("explicit-model".to_string()),
            ..Default::default()
        };
        let fallback = LlmSettings {
            provider: Some("google".to_string()),
            model: Some("env-model".to_string()),
            ..settings_with_key()
        };
        let merged = explicit.or(fallback);
        assert_eq!(merged.model.as_deref(), Some("explicit-model"));
        assert_eq!(merged.provider.as_deref(), Some("google"));
        assert!(merged.api_key.is_some());
    }

    #[test]
    fn test_non_empty_filters_blank_values() {
        assert_eq!(non_empty(Some("  ".to_string())), None);
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some(" key ".to_string())).as_deref(), Some("key"));
    }

    #[cfg(feature = "google")]
    #[test]
    fn test_from_settings_builds_google_provider() {
        let llm = LlmFactory::from_settings(settings_with_key()).unwrap();
        assert_eq!(llm.provider(), ProviderKind::Google);
        assert_eq!(llm.model(), "gemini-pro");
    }

    #[cfg(not(feature = "google"))]
    #[test]
    fn test_from_settings_without_google_feature() {
        let err = LlmFactory::from_settings(settings_with_key())
            .err()
            .expect("expected an error");
        assert!(matches!(err, LlmError::ProviderUnavailable(_)));
        assert!(err.to_string().contains("--features google"));
    }
}
