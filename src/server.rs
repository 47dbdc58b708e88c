use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::{
    config::Config,
    db,
    handlers::{self, AppState},
    readiness::{GateError, ReadinessGate, RetryPolicy},
};

/// Start the item API server
///
/// This function:
/// 1. Creates the database pool (lazily connected)
/// 2. Runs the readiness gate once, retrying connectivity failures
/// 3. Builds the Axum application
/// 4. Binds to the configured address and serves with graceful shutdown
pub async fn start_server(config: Config) -> Result<()> {
    info!(
        service = %config.telemetry.service_name,
        collector_host = %config.telemetry.collector_host,
        collector_port = config.telemetry.collector_port,
        "Starting API..."
    );

    let pool = db::connect_pool(&config.database)?;

    // Readiness gate: connect and materialize the schema while the database
    // is still coming up. A failed gate is logged but not fatal; the server
    // keeps serving and requests fail against the unready backend.
    let mut gate = ReadinessGate::new(RetryPolicy::default());
    let gate_pool = pool.clone();
    let report = gate
        .run(move |_| {
            let pool = gate_pool.clone();
            async move {
                db::ensure_schema(&pool).await.map_err(|e| {
                    if db::is_unreachable(&e) {
                        GateError::Unreachable(e.to_string())
                    } else {
                        GateError::Fatal(e.into())
                    }
                })
            }
        })
        .await?;

    if !report.is_ready() {
        tracing::error!(
            attempts = report.attempts,
            "Continuing without a ready database; item creation will fail"
        );
    }

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    let app = create_router(state);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped gracefully");
    Ok(())
}

/// Create the Axum router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root::root))
        .route("/items/", post(handlers::items::create_item))
        .with_state(state)
        // Item payloads are small; 1 MB leaves plenty of headroom
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .layer(TraceLayer::new_for_http())
}

/// Resolve on SIGINT or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to setup SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to setup SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("SIGINT received, initiating graceful shutdown"),
        _ = terminate => info!("SIGTERM received, initiating graceful shutdown"),
    }
}
