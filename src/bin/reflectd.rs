//! `reflectd` - reflective e-reader display API server.
//!
//! Run with: cargo run --bin reflectd --features server -- --bind 127.0.0.1:5000
//!
//! Then test with:
//!   curl http://localhost:5000/api/reflective-config/50

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use reflective_display::axum_ext::{router, AppState};
use reflective_display::{ReflectiveDisplayEngine, ServerConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "HTTP API for reflective e-reader displays")]
struct Args {
    /// YAML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address, overrides `bind_address` from the config file
    #[arg(short, long)]
    bind: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config = config.with_bind_address(bind);
    }

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .with_context(|| format!("invalid log_level '{}'", config.log_level))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let state = Arc::new(AppState::new(
        ReflectiveDisplayEngine::new(),
        config.title.clone(),
    ));
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_address)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_address))?;

    info!("Serving reflective display API on http://{}", config.bind_address);
    info!("  GET  /api/display-specs");
    info!("  GET  /api/disable-light");
    info!("  GET  /api/reflective-config/{{ambientLux}}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl-C: {}", e);
        // Without a signal handler, serve until the process is killed
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
