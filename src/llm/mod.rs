//! LLM Abstraction Layer
//!
//! A provider-agnostic interface for text generation, the factory that builds
//! providers from configuration, and the root agent that drives a chat
//! exchange. Google Gemini is the only provider wired today.

pub mod agent;
pub mod core;
pub mod factory;
#[cfg(feature = "google")]
pub mod google;

// Re-export commonly used types
pub use agent::{request_timeout_from_secs, AgentSettings, AgentStatus, RootAgent};
pub use self::core::{
    config::{GenerationConfig, ProviderConfig},
    error::{LlmError, RequestError},
    provider::{LlmInterface, ProviderKind},
    types::{Message, MessageRole},
};
pub use factory::{LlmFactory, LlmSettings};
