pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod readiness;
pub mod server;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize tracing/logging
///
/// `RUST_LOG` takes precedence over the configured level. The `json` format
/// produces structured events suitable for log collection; anything else gets
/// the human-readable fmt layer.
pub fn init_tracing(level: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);

    if format == "json" {
        registry.with(fmt::layer().json().with_target(true)).init();
    } else {
        registry.with(fmt::layer().with_target(true)).init();
    }
}
