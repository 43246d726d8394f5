//! Tracing subscriber setup.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LoggingConfig, DEFAULT_LOG_FILTER};

/// Pick the log filter with priority: CLI > `RUST_LOG` > default.
pub fn resolve_filter(cli: Option<String>, env: Option<String>) -> String {
    cli.or(env)
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}

/// Install the global subscriber in the configured output format.
pub fn init(filter: &str, config: &LoggingConfig) {
    let registry = tracing_subscriber::registry().with(EnvFilter::new(filter));

    if config.is_json() {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_current_span(true))
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_filter_wins() {
        let filter = resolve_filter(Some("konvo=trace".into()), Some("konvo=warn".into()));
        assert_eq!(filter, "konvo=trace");
    }

    #[test]
    fn test_env_filter_used_without_cli() {
        assert_eq!(resolve_filter(None, Some("konvo=warn".into())), "konvo=warn");
    }

    #[test]
    fn test_default_filter() {
        assert_eq!(resolve_filter(None, None), DEFAULT_LOG_FILTER);
    }
}
