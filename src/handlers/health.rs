// GET /health and GET /ready handlers

use std::convert::Infallible;
use std::sync::Arc;

use warp::http::StatusCode;

use crate::llm::agent::{AgentMode, RootAgent};
use crate::models::HealthResponse;

/// Liveness: the process is up and serving
pub async fn health_handler() -> Result<impl warp::Reply, Infallible> {
    Ok(warp::reply::json(&HealthResponse::ok()))
}

/// Readiness: whether requests are answered by an LLM or by the echo fallback
pub async fn ready_handler(agent: Arc<RootAgent>) -> Result<impl warp::Reply, Infallible> {
    let status = agent.status();
    let code = match status.mode {
        AgentMode::Ready => StatusCode::OK,
        AgentMode::Degraded => StatusCode::SERVICE_UNAVAILABLE,
    };

    Ok(warp::reply::with_status(warp::reply::json(&status), code))
}
