#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use aibot_backend::llm::{AgentSettings, LlmSettings, RootAgent};
use secrecy::SecretString;

/// API key used against mock servers
pub const TEST_API_KEY: &str = "test-api-key";

/// Model requested from mock servers
pub const TEST_MODEL: &str = "gemini-test";

/// Path the Google client posts to for `TEST_MODEL`
pub const GENERATE_PATH: &str = "/v1beta/models/gemini-test:generateContent";

/// Agent with no provider and no simulated latency
pub fn degraded_agent() -> Arc<RootAgent> {
    Arc::new(
        RootAgent::degraded("LLM_API_KEY environment variable not set")
            .with_fallback_delay(Duration::ZERO),
    )
}

/// Settings pointing the Google provider at a mock server
pub fn mock_llm_settings(base_url: String) -> LlmSettings {
    LlmSettings {
        provider: Some("google".to_string()),
        api_key: Some(SecretString::from(TEST_API_KEY.to_string())),
        model: Some(TEST_MODEL.to_string()),
        base_url: Some(base_url),
    }
}

/// Ready agent built through the factory, talking to a mock server
pub fn mock_agent(base_url: String) -> Arc<RootAgent> {
    Arc::new(RootAgent::new(AgentSettings {
        llm: mock_llm_settings(base_url),
        request_timeout: Some(Duration::from_secs(5)),
        fallback_delay: Duration::ZERO,
    }))
}

/// A successful `generateContent` response body
pub fn gemini_reply(text: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [{"text": text}]
            },
            "finishReason": "STOP"
        }],
        "usageMetadata": {
            "promptTokenCount": 12,
            "candidatesTokenCount": 4,
            "totalTokenCount": 16
        }
    })
}
