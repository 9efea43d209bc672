//! Provider trait for LLM implementations

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::Serialize;

use super::{config::GenerationConfig, error::LlmError, types::Message};

/// Main interface that all LLM provider implementations must satisfy
#[async_trait]
pub trait LlmInterface: Send + Sync {
    /// Generate a response for the given conversation
    ///
    /// # Arguments
    /// * `messages` - Conversation in order; must contain at least one message
    /// * `config` - Temperature and optional token limit for this call
    ///
    /// # Returns
    /// The generated text, or `LlmError::ProviderRequest` if the call fails
    async fn generate_response(
        &self,
        messages: &[Message],
        config: &GenerationConfig,
    ) -> Result<String, LlmError>;

    /// Which provider backs this instance
    fn provider(&self) -> ProviderKind;

    /// Model identifier requests are sent to
    fn model(&self) -> &str;
}

/// Known provider variants, selected by name in configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Google Gemini through the Generative Language API
    Google,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Google => "google",
        }
    }

    /// Model used when configuration does not name one
    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::Google => "gemini-pro",
        }
    }

    /// Public API endpoint of the provider
    pub fn default_base_url(&self) -> &'static str {
        match self {
            ProviderKind::Google => "https://generativelanguage.googleapis.com",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = LlmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "google" => Ok(ProviderKind::Google),
            _ => Err(LlmError::Configuration(format!(
                "Unsupported LLM provider: {}",
                s
            ))),
        }
    }
}
