// POST /api/chat handler

use std::sync::Arc;

use tracing::{debug, error, info_span, Instrument};
use uuid::Uuid;

use crate::handlers::rejection::InternalError;
use crate::llm::agent::RootAgent;
use crate::models::{ChatRequest, ChatResponse};
use crate::security::sanitize_input;

pub async fn chat_handler(
    agent: Arc<RootAgent>,
    request: ChatRequest,
) -> Result<impl warp::Reply, warp::Rejection> {
    let span = info_span!("chat", request_id = %Uuid::new_v4());
    let response = handle_chat(agent, request).instrument(span).await?;

    Ok(warp::reply::json(&response))
}

async fn handle_chat(
    agent: Arc<RootAgent>,
    request: ChatRequest,
) -> Result<ChatResponse, warp::Rejection> {
    let sanitized_input = sanitize_input(&request.message);
    debug!(chars = sanitized_input.chars().count(), "Received chat message");

    // The agent runs on its own task so a panic inside it surfaces here as a
    // JoinError instead of tearing down the connection.
    let input = sanitized_input.clone();
    let response = tokio::spawn(
        async move { agent.process_request(&input).await }.in_current_span(),
    )
    .await
    .map_err(|e| {
        error!(error = %e, "Error processing request");
        warp::reject::custom(InternalError)
    })?;

    Ok(ChatResponse {
        response,
        sanitized_input,
    })
}
