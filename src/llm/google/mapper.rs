//! Mapping between abstraction types and Google types

use crate::llm::core::{
    config::GenerationConfig,
    error::RequestError,
    types::{Message, MessageRole},
};

use super::types::{
    Content, ErrorEnvelope, GenerateContentRequest, GenerateContentResponse,
    GoogleGenerationConfig, Part,
};

/// Flatten a conversation into a single prompt string
///
/// Non-user turns are prefixed with `"{role}: "`, user turns are passed
/// through as-is, and the lines are joined with `\n` in conversation order.
pub fn flatten_prompt(messages: &[Message]) -> String {
    messages
        .iter()
        .map(|msg| match msg.role() {
            MessageRole::User => msg.content().to_string(),
            role => format!("{}: {}", role, msg.content()),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build the `generateContent` request body
pub fn to_google_request(messages: &[Message], config: &GenerationConfig) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            role: "user".to_string(),
            parts: vec![Part {
                text: flatten_prompt(messages),
            }],
        }],
        generation_config: Some(GoogleGenerationConfig {
            temperature: config.temperature,
            max_output_tokens: config.max_tokens,
        }),
    }
}

/// Pull the generated text out of the first candidate
pub fn from_google_response(response: GenerateContentResponse) -> Result<String, RequestError> {
    let Some(candidate) = response.candidates.into_iter().next() else {
        let reason = response
            .prompt_feedback
            .and_then(|feedback| feedback.block_reason)
            .map(|reason| format!("prompt blocked ({})", reason))
            .unwrap_or_else(|| "response contained no candidates".to_string());
        return Err(RequestError::EmptyResponse(reason));
    };

    let text: String = candidate
        .content
        .map(|content| content.parts.into_iter().map(|part| part.text).collect())
        .unwrap_or_default();

    if text.is_empty() {
        let reason = candidate
            .finish_reason
            .unwrap_or_else(|| "UNKNOWN".to_string());
        return Err(RequestError::EmptyResponse(format!(
            "candidate has no text (finish reason {})",
            reason
        )));
    }

    Ok(text)
}

/// Turn a non-success response into a `RequestError`
///
/// Uses the message from Google's error envelope when the body has one.
pub fn from_error_body(status: u16, body: &str) -> RequestError {
    let message = match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) if !envelope.error.message.is_empty() => envelope.error.message,
        _ if body.trim().is_empty() => "no response body".to_string(),
        _ => body.trim().to_string(),
    };
    RequestError::Http { status, message }
}
