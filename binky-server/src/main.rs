//! binky-server - NFC squeezebox radio
//!
//! Without a subcommand, serves the WebSocket endpoint NFC readers connect
//! to. `binky-server db ...` manages NFC tag / playlist associations.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use binky_common::config::{load_config, BinkyConfig};
use binky_common::db::init_database;
use binky_server::cli::{run_db_command, DbCommand};
use binky_server::lms::LmsClient;
use binky_server::{build_router, AppState, EventRouter};
use clap::{Parser, Subcommand};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for binky-server
#[derive(Parser, Debug)]
#[command(name = "binky-server")]
#[command(about = "Binky, NFC squeezebox radio")]
#[command(version)]
struct Args {
    /// Config file (defaults to $BINKY_CONFIG, then ./binky.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Database functions
    #[command(subcommand)]
    Db(DbCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let (config, source) =
        load_config(args.config.as_deref()).context("Failed to load configuration")?;

    init_tracing(&config);
    info!("Configuration: {}", source);

    let player = LmsClient::new(&config.lms).context("Failed to create LMS client")?;

    match args.command {
        Some(Command::Db(command)) => {
            let operation = command.describe();
            let output = run_db_command(command, &config.db.sqlite, &player)
                .await
                .with_context(|| format!("Failed to {}", operation))?;
            println!("{}", output);
            Ok(())
        }
        None => serve(config, player).await,
    }
}

/// RUST_LOG wins over the configured level
fn init_tracing(config: &BinkyConfig) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn serve(config: BinkyConfig, player: LmsClient) -> Result<()> {
    info!(
        "Starting binky-server v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    info!("Using database: {}", config.db.sqlite.display());
    let pool = init_database(&config.db.sqlite)
        .await
        .context("Failed to initialize database")?;

    info!("LMS endpoint: {}", player.url());
    let router = EventRouter::new(pool, Arc::new(player));
    let app = build_router(AppState::new(router));

    let addr = config.general.http.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("⇒ Main HTTP Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
