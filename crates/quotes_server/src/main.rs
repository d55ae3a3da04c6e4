//! Quotes service entry point.
//!
//! # Responsibility
//! - Load configuration, start logging, connect the store, serve HTTP.
//! - Fail start-up, not requests, when the store cannot be reached.

use anyhow::Context;
use clap::Parser;
use log::{info, warn};
use quotes_core::{default_log_level, init_logging, QuoteHandler};
use quotes_server::{router, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is the normal case outside local development.
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let level = cli.log_level.as_deref().unwrap_or(default_log_level());
    init_logging(level, cli.log_dir.as_deref()).map_err(anyhow::Error::msg)?;

    let repo = cli
        .build_repository()
        .context("couldn't initialise quote store")?;
    let app = router(QuoteHandler::new(repo));

    let listener = tokio::net::TcpListener::bind(cli.addr.as_str())
        .await
        .with_context(|| format!("couldn't listen on {}", cli.addr))?;

    info!(
        "event=server_start module=server status=ok addr={} store={:?} version={}",
        cli.addr,
        cli.store,
        quotes_core::core_version()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("http server failed")?;

    info!("event=server_stop module=server status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("event=server_stop module=server status=error error={err}");
    }
}
