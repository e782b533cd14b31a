// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Passlog demo server
//
//  App:     axum with the request logger installed as middleware
//  Config:  YAML file + PASSLOG_* env overrides
//  Log:     one summary record per request (console, optional file)
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

mod app;

use clap::Parser;
use passlog_core::ServerConfig;
use passlog_sink::LogSink;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "passlog-server",
    version,
    about = "Demo API server with structured request logging"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "passlog.yaml")]
    config: PathBuf,

    /// Log level for the server's own diagnostics
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // ── Tracing ──
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level)),
        )
        .with_target(false)
        .init();

    // ── Config ──
    let config = if cli.config.exists() {
        info!(path = %cli.config.display(), "Loading config file");
        ServerConfig::load(&cli.config)?
    } else {
        info!("No config file found, using defaults");
        ServerConfig::default()
    };

    // ── Request log sink ──
    let sink = Arc::new(LogSink::new(&config.log)?);
    if let Some(path) = &config.log.file {
        info!(path = %path.display(), "Request log file attached");
    }

    // ── App ──
    let app = app::build_app(Arc::clone(&sink));

    let listener = tokio::net::TcpListener::bind(&config.listen).await?;
    info!(addr = %config.listen, "Passlog demo server ready");

    // ConnectInfo exposes the peer address to the request logger.
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    sink.flush();
    info!("Passlog demo server stopped");
    Ok(())
}

/// Resolves on Ctrl+C (SIGINT) and triggers axum's graceful shutdown.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
