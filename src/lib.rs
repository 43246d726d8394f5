//! konvo API service.
//!
//! A small HTTP service exposing a liveness probe (`/health`), a connectivity
//! check (`/api/ping`) and the OpenAPI document describing them. The binary in
//! `main.rs` wires configuration, logging and the server together; this library
//! exposes the pieces so they can be driven in-process by tests.

pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::AppConfig;
pub use error::AppError;
pub use routes::create_router;
pub use state::AppState;
