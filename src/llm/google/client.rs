//! Google Gemini client implementation

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use tracing::debug;

use crate::llm::core::{
    config::{GenerationConfig, ProviderConfig},
    error::{LlmError, RequestError},
    provider::{LlmInterface, ProviderKind},
    types::Message,
};

use super::mapper::{from_error_body, from_google_response, to_google_request};
use super::types::GenerateContentResponse;

/// Header carrying the API key. Keeping the key out of the query string
/// keeps it out of URLs in error messages and proxy logs.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Client for Gemini models on the Generative Language API
pub struct GoogleLlm {
    /// HTTP client for making requests
    http_client: Client,
    /// Credentials, model and endpoint
    config: ProviderConfig,
}

impl GoogleLlm {
    /// Create a new Google client
    ///
    /// # Errors
    ///
    /// Returns `LlmError::ProviderUnavailable` if the HTTP client cannot be
    /// initialised (e.g. no TLS backend).
    pub fn new(config: ProviderConfig) -> Result<Self, LlmError> {
        let http_client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| {
                LlmError::ProviderUnavailable(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            http_client,
            config,
        })
    }

    /// Build the endpoint URL for a non-streaming generation
    fn build_endpoint_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, self.config.model
        )
    }

    async fn make_request(
        &self,
        messages: &[Message],
        config: &GenerationConfig,
    ) -> Result<String, RequestError> {
        if messages.is_empty() {
            return Err(RequestError::InvalidRequest(
                "at least one message is required".to_string(),
            ));
        }
        config.validate()?;

        let google_request = to_google_request(messages, config);

        debug!(
            model = %self.config.model,
            messages = messages.len(),
            temperature = config.temperature,
            max_tokens = ?config.max_tokens,
            "Sending generateContent request"
        );

        let response = self
            .http_client
            .post(self.build_endpoint_url())
            .header(API_KEY_HEADER, self.config.api_key.expose_secret())
            .json(&google_request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(from_error_body(status.as_u16(), &body));
        }

        let body = response.bytes().await?;
        let google_response: GenerateContentResponse = serde_json::from_slice(&body)?;
        from_google_response(google_response)
    }
}

#[async_trait]
impl LlmInterface for GoogleLlm {
    async fn generate_response(
        &self,
        messages: &[Message],
        config: &GenerationConfig,
    ) -> Result<String, LlmError> {
        Ok(self.make_request(messages, config).await?)
    }

    fn provider(&self) -> ProviderKind {
        ProviderKind::Google
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}
