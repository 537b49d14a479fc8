//! beephook - push-to-chat webhook gateway
//!
//! Logs into the beep chat API, announces itself, then serves the
//! webhook routes until interrupted. Logout is best-effort on the way
//! out.

use anyhow::Result;
use beephook::{
    beep::{BeepClient, ChatApi},
    config::Config,
    repo::GitWorkingCopy,
    server::{build_app, AppState},
};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "beephook")]
#[command(version)]
#[command(about = "Push-to-chat webhook gateway with signed self-update")]
struct Cli {
    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1", env = "BEEPHOOK_HOST")]
    host: String,

    /// Port to listen on
    #[arg(long, default_value = "5000", env = "BEEPHOOK_PORT")]
    port: u16,

    /// Path to the git working copy the gateway serves from
    #[arg(long, default_value = ".", env = "BEEPHOOK_REPO")]
    repo: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let start = Instant::now();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("beephook={},tower_http=debug", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration; missing secrets must stop the process before
    // it ever serves.
    dotenvy::dotenv().ok();
    let config = Arc::new(Config::from_env()?);

    let repo = Arc::new(GitWorkingCopy::new(&cli.repo));
    let chat = Arc::new(BeepClient::new(&config.beep_url)?);

    tracing::info!("logging in...");
    if let Err(e) = chat.login(&config.bot_username, &config.bot_password).await {
        tracing::warn!("login failed, relaying disabled until restart: {}", e);
    }
    let identity = match chat.whoami().await {
        Ok(identity) => {
            tracing::info!("logged in as: {}", identity);
            identity
        }
        Err(e) => {
            tracing::warn!("whoami failed: {}", e);
            String::new()
        }
    };

    // Announce startup; best-effort like every other outbound post.
    let body = format!("took {}s to start.", start.elapsed().as_secs());
    if let Err(e) = chat.new_post("bot online", &body).await {
        tracing::warn!("failed to post startup notice: {}", e);
    }

    let state = AppState {
        config,
        chat: chat.clone(),
        repo,
        identity,
    };
    let app = build_app(state);

    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("logging out...");
    if let Err(e) = chat.full_logout().await {
        tracing::warn!("logout failed: {}", e);
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
    }
}
