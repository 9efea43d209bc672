//! Google provider implementation
//!
//! Talks to Gemini models through the Generative Language API
//! (`generateContent`), authenticating with an API key.

pub mod client;
pub mod mapper;
pub mod types;

pub use client::GoogleLlm;
pub use mapper::flatten_prompt;
