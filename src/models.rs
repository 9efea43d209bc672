// Request and response bodies of the HTTP API

use serde::{Deserialize, Serialize};

/// Body of POST /api/chat
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Reply of POST /api/chat
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Agent output, returned as produced
    pub response: String,
    /// The user's message after escaping
    pub sanitized_input: String,
}

/// Reply of GET /health
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

/// Body of every error reply
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}
