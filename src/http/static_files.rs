//! Static frontend serving.
//!
//! Serves the optional browser frontend from a configured directory. Directory
//! requests resolve to `index.html`. Missing files and non-GET methods hand off
//! to a fallback that renders the same JSON error bodies as the API routes.

use std::path::Path;

use axum::routing::{get, MethodRouter};
use tower_http::services::ServeDir;

use crate::routes::{method_not_allowed, not_found};

/// Create a static file service rooted at `dir`.
///
/// A missing directory is logged rather than rejected so the API still comes up
/// while the frontend is being deployed separately.
pub fn create_static_service(dir: &Path) -> ServeDir<MethodRouter> {
    if !dir.is_dir() {
        tracing::warn!(dir = %dir.display(), "Frontend directory does not exist, assets will 404");
    }

    ServeDir::new(dir)
        .append_index_html_on_directories(true)
        .call_fallback_on_method_not_allowed(true)
        .fallback(static_fallback())
}

/// GET/HEAD of a missing file is 404, any other method is 405.
fn static_fallback() -> MethodRouter {
    get(not_found).fallback(method_not_allowed)
}
