//! Root agent: the request/response orchestrator
//!
//! The agent decides once, at construction, whether an LLM is available:
//! - `Ready`: every request goes to the provider, and failures become an
//!   apologetic text reply
//! - `Degraded`: no provider could be built, so requests get a deterministic
//!   echo after a short delay
//!
//! There is no transition between the two after construction; a restart is
//! required to retry provider initialisation. `process_request` never fails.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::time::{sleep, timeout};
use tracing::{error, info, warn};

use crate::llm::core::{
    config::GenerationConfig,
    error::{LlmError, RequestError},
    provider::{LlmInterface, ProviderKind},
    types::Message,
};
use crate::llm::factory::{LlmFactory, LlmSettings};

/// System prompt sent ahead of every user message
pub const SYSTEM_PROMPT: &str = "You are a helpful AI assistant.";

/// Upper bound on a single provider call
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Environment variable overriding the provider call timeout, in seconds
pub const ENV_REQUEST_TIMEOUT: &str = "LLM_REQUEST_TIMEOUT_SECS";

/// Simulated latency of the degraded-mode echo
pub const DEFAULT_FALLBACK_DELAY: Duration = Duration::from_secs(1);

/// Construction-time settings for `RootAgent`
#[derive(Debug)]
pub struct AgentSettings {
    /// Provider settings handed to `LlmFactory`
    pub llm: LlmSettings,
    /// Timeout around each provider call; `None` waits indefinitely
    pub request_timeout: Option<Duration>,
    /// Delay before the degraded-mode echo
    pub fallback_delay: Duration,
}

impl AgentSettings {
    /// Provider settings and request timeout from the environment
    ///
    /// An unset or unparseable `LLM_REQUEST_TIMEOUT_SECS` keeps the default
    /// timeout; `0` disables it.
    pub fn from_env() -> Self {
        let request_timeout = match env::var(ENV_REQUEST_TIMEOUT) {
            Ok(raw) if !raw.trim().is_empty() => match raw.trim().parse::<u64>() {
                Ok(secs) => request_timeout_from_secs(secs),
                Err(e) => {
                    warn!(value = %raw, error = %e, "Ignoring invalid {}", ENV_REQUEST_TIMEOUT);
                    Some(DEFAULT_REQUEST_TIMEOUT)
                }
            },
            _ => Some(DEFAULT_REQUEST_TIMEOUT),
        };

        Self {
            llm: LlmSettings::from_env(),
            request_timeout,
            ..Default::default()
        }
    }
}

/// Timeout for a number of seconds, where `0` means no limit
pub fn request_timeout_from_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            llm: LlmSettings::default(),
            request_timeout: Some(DEFAULT_REQUEST_TIMEOUT),
            fallback_delay: DEFAULT_FALLBACK_DELAY,
        }
    }
}

enum AgentState {
    Ready(Arc<dyn LlmInterface>),
    Degraded { reason: String },
}

/// Operating mode reported by `RootAgent::status`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentMode {
    Ready,
    Degraded,
}

/// Snapshot of the agent's state, safe to show to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentStatus {
    pub mode: AgentMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<ProviderKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Why no provider is available (degraded mode only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Orchestrates a single chat exchange with the configured provider
///
/// One instance per process, shared behind an `Arc`. Nothing is mutated after
/// construction, so concurrent calls need no locking.
pub struct RootAgent {
    state: AgentState,
    request_timeout: Option<Duration>,
    fallback_delay: Duration,
}

impl RootAgent {
    /// Build the agent, falling back to degraded mode if no provider can be
    /// created
    pub fn new(settings: AgentSettings) -> Self {
        let state = match LlmFactory::from_settings(settings.llm) {
            Ok(llm) => {
                info!(provider = %llm.provider(), model = %llm.model(), "Root agent ready");
                AgentState::Ready(llm)
            }
            Err(e) => {
                warn!(error = %e, "Could not initialize LLM, using dummy mode");
                AgentState::Degraded {
                    reason: e.to_string(),
                }
            }
        };

        Self {
            state,
            request_timeout: settings.request_timeout,
            fallback_delay: settings.fallback_delay,
        }
    }

    /// Build the agent from environment configuration
    pub fn from_env() -> Self {
        Self::new(AgentSettings::from_env())
    }

    /// Ready agent around an existing provider
    pub fn with_llm(llm: Arc<dyn LlmInterface>) -> Self {
        Self {
            state: AgentState::Ready(llm),
            request_timeout: Some(DEFAULT_REQUEST_TIMEOUT),
            fallback_delay: DEFAULT_FALLBACK_DELAY,
        }
    }

    /// Agent in degraded mode
    pub fn degraded(reason: impl Into<String>) -> Self {
        Self {
            state: AgentState::Degraded {
                reason: reason.into(),
            },
            request_timeout: Some(DEFAULT_REQUEST_TIMEOUT),
            fallback_delay: DEFAULT_FALLBACK_DELAY,
        }
    }

    pub fn with_request_timeout(mut self, request_timeout: Option<Duration>) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    pub fn with_fallback_delay(mut self, fallback_delay: Duration) -> Self {
        self.fallback_delay = fallback_delay;
        self
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, AgentState::Ready(_))
    }

    pub fn fallback_delay(&self) -> Duration {
        self.fallback_delay
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }

    pub fn status(&self) -> AgentStatus {
        match &self.state {
            AgentState::Ready(llm) => AgentStatus {
                mode: AgentMode::Ready,
                provider: Some(llm.provider()),
                model: Some(llm.model().to_string()),
                reason: None,
            },
            AgentState::Degraded { reason } => AgentStatus {
                mode: AgentMode::Degraded,
                provider: None,
                model: None,
                reason: Some(reason.clone()),
            },
        }
    }

    /// Answer one user message
    ///
    /// Always resolves to text: provider failures are logged and turned into
    /// an apology, and degraded mode echoes the input.
    pub async fn process_request(&self, user_input: &str) -> String {
        match &self.state {
            AgentState::Ready(llm) => {
                let messages = [Message::system(SYSTEM_PROMPT), Message::user(user_input)];

                match self.generate(llm.as_ref(), &messages).await {
                    Ok(response) => response,
                    Err(e) => {
                        error!(error = %e, "Error calling LLM");
                        format!("Sorry, I encountered an error: {}", e)
                    }
                }
            }
            AgentState::Degraded { .. } => {
                sleep(self.fallback_delay).await;
                echo_response(user_input)
            }
        }
    }

    async fn generate(
        &self,
        llm: &dyn LlmInterface,
        messages: &[Message],
    ) -> Result<String, LlmError> {
        let config = GenerationConfig::default();
        let call = llm.generate_response(messages, &config);

        match self.request_timeout {
            Some(limit) => match timeout(limit, call).await {
                Ok(result) => result,
                Err(_) => Err(RequestError::Timeout(limit).into()),
            },
            None => call.await,
        }
    }
}

/// Degraded-mode reply
pub fn echo_response(user_input: &str) -> String {
    format!(
        "Echo from Root Agent (Dummy Mode): You said '{}'",
        user_input
    )
}
