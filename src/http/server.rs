//! HTTP server startup logic.

use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use axum_server::Handle;

use crate::config::{AppConfig, ConfigError};

use super::shutdown;

/// Server startup error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid listen address: {0}")]
    Address(#[from] ConfigError),

    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),
}

/// Start the HTTP server based on configuration.
///
/// Installs the signal handlers and blocks until the server has shut down.
pub async fn start_server(app: Router, config: &AppConfig) -> Result<(), ServerError> {
    let addr = config.http.socket_addr()?;
    let timeout = Duration::from_secs(config.http.shutdown_timeout_seconds);

    let handle = Handle::new();
    shutdown::setup_shutdown_handler(handle.clone(), timeout);

    serve(app, addr, handle).await
}

/// Serve `app` on `addr` until `handle` is shut down.
pub async fn serve(app: Router, addr: SocketAddr, handle: Handle) -> Result<(), ServerError> {
    tracing::info!(%addr, "Starting HTTP server");

    axum_server::bind(addr)
        .handle(handle)
        .serve(app.into_make_service())
        .await?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::create_router;
    use crate::state::AppState;

    #[tokio::test]
    async fn test_serve_stops_on_graceful_shutdown() {
        let app = create_router(AppState::new(AppConfig::default()));
        let handle = Handle::new();
        let addr: SocketAddr = "127.0.0.1:0".parse().unwrap();

        let server = tokio::spawn(serve(app, addr, handle.clone()));

        let bound = handle.listening().await.expect("server failed to bind");
        assert_ne!(bound.port(), 0);

        shutdown::trigger_shutdown(&handle, Duration::from_secs(1));
        let result = tokio::time::timeout(Duration::from_secs(5), server)
            .await
            .expect("server did not stop")
            .expect("server task panicked");
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_invalid_address_rejected() {
        let app = create_router(AppState::new(AppConfig::default()));
        let mut config = AppConfig::default();
        config.http.host = "not a host".to_string();

        let err = start_server(app, &config).await.unwrap_err();
        assert!(matches!(err, ServerError::Address(_)));
    }
}
