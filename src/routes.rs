// Route definitions and handlers

use std::convert::Infallible;
use std::sync::Arc;

use tracing::info;
use warp::Filter;

use crate::handlers;
use crate::llm::agent::RootAgent;

/// Largest accepted `POST /api/chat` body, in bytes
pub const MAX_CHAT_BODY_BYTES: u64 = 64 * 1024;

pub fn configure_routes(
    agent: Arc<RootAgent>,
) -> impl Filter<Extract = impl warp::Reply, Error = Infallible> + Clone {
    // GET /health
    let health = warp::path("health")
        .and(warp::path::end())
        .and(warp::get())
        .and_then(handlers::health_handler);

    // GET /ready
    let ready = warp::path("ready")
        .and(warp::path::end())
        .and(warp::get())
        .and(with_agent(agent.clone()))
        .and_then(handlers::ready_handler);

    // POST /api/chat
    let chat = warp::path("api")
        .and(warp::path("chat"))
        .and(warp::path::end())
        .and(warp::post())
        .and(with_agent(agent))
        .and(warp::body::content_length_limit(MAX_CHAT_BODY_BYTES))
        .and(warp::body::json())
        .and_then(handlers::chat_handler);

    health
        .or(ready)
        .or(chat)
        .recover(handlers::handle_rejection)
        .with(warp::reply::with::header("X-Content-Type-Options", "nosniff"))
        .with(warp::reply::with::header("X-Frame-Options", "DENY"))
        .with(warp::reply::with::header(
            "Strict-Transport-Security",
            "max-age=31536000; includeSubDomains",
        ))
        .with(warp::log::custom(log_request))
}

fn with_agent(
    agent: Arc<RootAgent>,
) -> impl Filter<Extract = (Arc<RootAgent>,), Error = Infallible> + Clone {
    warp::any().map(move || agent.clone())
}

fn log_request(request: warp::log::Info<'_>) {
    info!(
        path = request.path(),
        method = %request.method(),
        status = request.status().as_u16(),
        elapsed_ms = request.elapsed().as_secs_f64() * 1000.0,
        "Handled request"
    );
}
