//! Roomgate CLI entry point

mod cli;

use crate::cli::{Cli, Commands};
use anyhow::{Context, Result};
use clap::Parser;
use roomgate::auth::{grants, verify_token};
use roomgate::config::{IssuanceOptions, LiveKitConfig, API_KEY_VAR, API_SECRET_VAR};
use roomgate::issuance::build_connection_details;
use roomgate::server::{run_http_server, AppState};
use std::time::Duration;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let options = IssuanceOptions::new().ttl(Duration::from_secs(cli.ttl));
    let config = LiveKitConfig::from_env();

    match cli.command {
        Commands::Serve { bind } => serve(config, options, bind).await,
        Commands::Token { room, identity } => token(&config, &options, room, identity),
        Commands::Inspect { token } => inspect(&config, &token),
    }
}

async fn serve(config: LiveKitConfig, options: IssuanceOptions, bind: String) -> Result<()> {
    let bind_addr = bind.parse().context("Invalid bind address")?;

    if config.server_url().is_none() {
        warn!("No server URL configured, issuance requests will fail");
    }

    let state = AppState::new(config, options);

    info!(addr = %bind, ttl_secs = options.ttl.as_secs(), "Roomgate starting");
    run_http_server(bind_addr, state, shutdown_signal()).await?;
    info!("Roomgate stopped");

    Ok(())
}

fn token(
    config: &LiveKitConfig,
    options: &IssuanceOptions,
    room: String,
    identity: Option<String>,
) -> Result<()> {
    let identity = identity.unwrap_or_else(|| format!("user-{}", uuid::Uuid::new_v4()));

    let details = build_connection_details(config, &room, &identity, options)?;

    println!("{}", serde_json::to_string_pretty(&details)?);
    Ok(())
}

fn inspect(config: &LiveKitConfig, token: &str) -> Result<()> {
    let api_key = config
        .api_key
        .as_deref()
        .with_context(|| format!("{} is required to verify tokens", API_KEY_VAR))?;
    let secret = config
        .api_secret
        .as_ref()
        .with_context(|| format!("{} is required to verify tokens", API_SECRET_VAR))?;

    let claims = verify_token(api_key, secret, token.trim()).context("Invalid token")?;

    println!("{}", serde_json::to_string_pretty(&claims)?);
    println!();
    println!("Grant: {}", grants::describe(&claims.video));
    if !grants::is_full_access(&claims.video) {
        println!("Warning: grant is missing participant capabilities");
    }
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
