//! Provider-agnostic building blocks: messages, parameters, errors and the provider trait

pub mod config;
pub mod error;
pub mod provider;
pub mod types;
