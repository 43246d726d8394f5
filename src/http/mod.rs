//! HTTP server module.
//!
//! Binds the configured listener, serves the router, and drains open
//! connections on SIGTERM/SIGINT before exiting.

mod server;
mod shutdown;
pub mod static_files;

pub use server::{serve, start_server, ServerError};
pub use shutdown::trigger_shutdown;
