//! Configuration loading and constants.
//!
//! Loads application configuration from TOML files and defines constants for
//! HTTP cache TTLs, logging and default paths. `AppConfig` is the root
//! configuration struct; every section is optional and falls back to defaults,
//! so the service starts with no configuration file at all.

use const_format::formatcp;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

// =============================================================================
// HTTP Response Cache Control
// =============================================================================
// Probe endpoints (/health, /api/ping) carry no Cache-Control header so that
// every liveness check reaches the process.

/// OpenAPI document - changes only on redeploy
pub const HTTP_CACHE_OPENAPI_MAX_AGE: u32 = 300;

/// Static frontend assets - long cache with immutable hint
pub const HTTP_CACHE_STATIC_MAX_AGE: u32 = 86400;

pub const CACHE_CONTROL_OPENAPI: &str =
    formatcp!("public, max-age={}", HTTP_CACHE_OPENAPI_MAX_AGE);

pub const CACHE_CONTROL_STATIC: &str =
    formatcp!("public, max-age={}, immutable", HTTP_CACHE_STATIC_MAX_AGE);

// =============================================================================
// Default Paths and Strings
// =============================================================================

/// Configuration file used when `--config` is not given (only if it exists)
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Default service title published in the OpenAPI document
pub const DEFAULT_SERVICE_TITLE: &str = "konvo API";

/// Default listen host
pub const DEFAULT_HTTP_HOST: &str = "127.0.0.1";

/// Default listen port
pub const DEFAULT_HTTP_PORT: u16 = 8000;

/// Seconds to wait for open connections after a shutdown signal
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 30;

/// Default mount point for the static frontend
pub const DEFAULT_FRONTEND_MOUNT: &str = "/app";

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "konvo=debug,tower_http=debug";

/// Default log format (text or json)
pub const DEFAULT_LOG_FORMAT: &str = "text";

/// Accepted values for `logging.format`
pub const LOG_FORMATS: [&str; 2] = ["text", "json"];

/// First path segments owned by the API routes; the frontend cannot mount under them
pub const RESERVED_MOUNT_SEGMENTS: [&str; 3] = ["health", "api", "openapi.json"];

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Service metadata
    #[serde(default)]
    pub service: ServiceConfig,
    /// HTTP server configuration
    #[serde(default)]
    pub http: HttpServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Optional static frontend
    #[serde(default)]
    pub frontend: FrontendConfig,
}

/// Declared service metadata. Not observable through the probe endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "ServiceConfig::default_title")]
    pub title: String,
    pub description: Option<String>,
    /// Version string, populated at runtime
    #[serde(skip_deserializing, default = "ServiceConfig::default_version")]
    pub version: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            title: Self::default_title(),
            description: None,
            version: Self::default_version(),
        }
    }
}

impl ServiceConfig {
    fn default_title() -> String {
        DEFAULT_SERVICE_TITLE.to_string()
    }

    fn default_version() -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    #[serde(default = "HttpServerConfig::default_host")]
    pub host: String,
    #[serde(default = "HttpServerConfig::default_port")]
    pub port: u16,
    #[serde(default = "HttpServerConfig::default_shutdown_timeout")]
    pub shutdown_timeout_seconds: u64,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            shutdown_timeout_seconds: Self::default_shutdown_timeout(),
        }
    }
}

impl HttpServerConfig {
    fn default_host() -> String {
        DEFAULT_HTTP_HOST.to_string()
    }

    fn default_port() -> u16 {
        DEFAULT_HTTP_PORT
    }

    fn default_shutdown_timeout() -> u64 {
        DEFAULT_SHUTDOWN_TIMEOUT_SECS
    }

    /// Parse host and port into a socket address.
    ///
    /// IPv6 hosts may be given with or without brackets.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let host = self.host.trim_start_matches('[').trim_end_matches(']');
        let candidate = if host.contains(':') {
            format!("[{}]:{}", host, self.port)
        } else {
            format!("{}:{}", host, self.port)
        };
        candidate.parse().map_err(|e| {
            ConfigError::Validation(format!(
                "Invalid http.host or http.port '{}': {}",
                candidate, e
            ))
        })
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log format: "text" (human-readable, default) or "json" (structured)
    #[serde(default = "LoggingConfig::default_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: DEFAULT_LOG_FORMAT.to_string(),
        }
    }
}

impl LoggingConfig {
    fn default_format() -> String {
        DEFAULT_LOG_FORMAT.to_string()
    }

    /// Whether structured JSON output was requested
    pub fn is_json(&self) -> bool {
        self.format == "json"
    }
}

/// Static frontend served next to the API
#[derive(Debug, Clone, Deserialize)]
pub struct FrontendConfig {
    /// Directory holding index.html and its assets. Nothing is served when unset.
    pub dir: Option<PathBuf>,
    /// URL prefix the directory is mounted under
    #[serde(default = "FrontendConfig::default_mount")]
    pub mount: String,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            dir: None,
            mount: Self::default_mount(),
        }
    }
}

impl FrontendConfig {
    fn default_mount() -> String {
        DEFAULT_FRONTEND_MOUNT.to_string()
    }
}

impl AppConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Load `path` if given; otherwise the default config file if present,
    /// otherwise built-in defaults.
    pub fn load_or_default(path: Option<&str>) -> Result<Self, ConfigError> {
        Self::load_or_fallback(path, Path::new(DEFAULT_CONFIG_PATH))
    }

    fn load_or_fallback(path: Option<&str>, fallback: &Path) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None if fallback.is_file() => Self::load(fallback),
            None => Ok(Self::default()),
        }
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(ConfigError::Validation(format!(
                "logging.format must be one of {:?}, got '{}'",
                LOG_FORMATS, self.logging.format
            )));
        }

        validate_mount(&self.frontend.mount)?;
        self.http.socket_addr()?;
        Ok(())
    }
}

/// A mount must be a literal path the router can nest under without
/// overlapping the API routes.
fn validate_mount(mount: &str) -> Result<(), ConfigError> {
    let invalid = |reason: &str| -> Result<(), ConfigError> {
        Err(ConfigError::Validation(format!(
            "frontend.mount {}, got '{}'",
            reason, mount
        )))
    };

    let Some(rest) = mount.strip_prefix('/') else {
        return invalid("must start with '/'");
    };
    if rest.is_empty() {
        return invalid("must not be '/'");
    }

    let segments: Vec<&str> = rest.split('/').collect();
    for segment in &segments {
        if segment.is_empty() {
            return invalid("must not contain empty segments or a trailing '/'");
        }
        if segment.starts_with(':') || segment.starts_with('*') || segment.contains(['{', '}']) {
            return invalid("must not contain route parameters or wildcards");
        }
    }

    if RESERVED_MOUNT_SEGMENTS.contains(&segments[0]) {
        return invalid("conflicts with an API route");
    }

    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
}
