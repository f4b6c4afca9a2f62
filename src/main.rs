use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use vibe_check::AppContext;
use vibe_check::config::Config;
use vibe_check::handlers;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load();
    // Missing credentials stop the process before it serves traffic
    config.validate()?;
    let config = Arc::new(config);

    let bind: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("Invalid VIBE_HTTP_BIND '{}' (expected host:port)", config.server.bind))?;

    let ctx = Arc::new(AppContext::new(Arc::clone(&config))?);
    tracing::info!(model = %config.groq.model, "LLM client initialized with Groq");

    let router = handlers::router(ctx);
    let listener = tokio::net::TcpListener::bind(bind).await?;
    tracing::info!(%bind, "Starting lesson API");

    axum::serve(listener, router).await?;
    Ok(())
}
