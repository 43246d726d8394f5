//! konvo API server.
//!
//! This is the application entry point. It parses the command line, loads
//! configuration from TOML, initializes tracing, sets up the Axum router and
//! runs the HTTP server until a shutdown signal arrives.

use clap::Parser;

use konvo::config::AppConfig;
use konvo::{create_router, http, logging, AppState};

/// konvo API: health and connectivity endpoints
#[derive(Parser, Debug)]
#[command(name = "konvo", version, about)]
struct Args {
    /// Path to configuration file (defaults to config/default.toml when present)
    #[arg(short, long)]
    config: Option<String>,

    /// Log level filter (e.g., "konvo=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,

    /// Override http.host from the configuration
    #[arg(long)]
    host: Option<String>,

    /// Override http.port from the configuration
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = AppConfig::load_or_default(args.config.as_deref())?;
    if let Some(host) = args.host {
        config.http.host = host;
    }
    if let Some(port) = args.port {
        config.http.port = port;
    }
    config.validate()?;

    let log_filter = logging::resolve_filter(args.log_level, std::env::var("RUST_LOG").ok());
    logging::init(&log_filter, &config.logging);

    tracing::info!(
        title = %config.service.title,
        version = %config.service.version,
        "Loaded configuration"
    );
    if let Some(dir) = &config.frontend.dir {
        tracing::info!(dir = %dir.display(), mount = %config.frontend.mount, "Serving frontend");
    }

    let state = AppState::new(config.clone());
    let app = create_router(state);

    http::start_server(app, &config).await?;

    Ok(())
}
