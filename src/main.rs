use std::net::SocketAddr;
use std::sync::Arc;

use aibot_backend::llm::{request_timeout_from_secs, AgentSettings, RootAgent};
use aibot_backend::routes::configure_routes;
use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "aibot-server")]
#[command(about = "Chat backend forwarding sanitized messages to an LLM provider")]
struct Args {
    /// Address or host name to listen on
    #[arg(long, default_value = "0.0.0.0", env = "HOST")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "8000", env = "PORT")]
    port: u16,

    /// Seconds to wait for the provider before giving up (0 disables the limit,
    /// default 60)
    #[arg(long, env = "LLM_REQUEST_TIMEOUT_SECS")]
    request_timeout_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("aibot_backend=debug,info")),
        )
        .init();

    let args = Args::parse();

    let addr = resolve_listen_addr(&args.host, args.port).await?;

    let mut settings = AgentSettings::from_env();
    if let Some(secs) = args.request_timeout_secs {
        settings.request_timeout = request_timeout_from_secs(secs);
    }
    let agent = Arc::new(RootAgent::new(settings));

    info!(%addr, mode = ?agent.status().mode, "Starting server");
    warp::serve(configure_routes(agent)).run(addr).await;

    Ok(())
}

/// Resolve an IP literal or host name (e.g. `localhost`) to a bind address
async fn resolve_listen_addr(host: &str, port: u16) -> Result<SocketAddr> {
    tokio::net::lookup_host((host, port))
        .await
        .with_context(|| format!("Failed to resolve host: {}", host))?
        .next()
        .with_context(|| format!("No address found for host: {}", host))
}
