//! Invoice Registry API - HTTP service over the fiscal records database.
//!
//! This binary serves the JSON query/mutation API on port 3000 by default.
//!
//! # Architecture
//!
//! - Axum web framework, JSON in/out
//! - `PostgreSQL` via a bounded sqlx connection pool created at startup and
//!   injected through `AppState`
//! - Per-request audit log (request id, method, path, status, duration)
//! - Per-statement audit log (SQL text, bound parameters, duration) routed
//!   to a daily-rolling `sql.log`
//!
//! The schema is fixed and pre-existing; nothing here creates or migrates
//! tables.

#![cfg_attr(not(test), forbid(unsafe_code))]

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use invoice_registry_api::config::RegistryConfig;
use invoice_registry_api::middleware::request_audit_middleware;
use invoice_registry_api::state::AppState;
use invoice_registry_api::{db, logging, routes};

#[tokio::main]
async fn main() {
    // Load configuration from environment
    let config = RegistryConfig::from_env().expect("Failed to load configuration");

    // Initialize tracing; the guard must stay alive so buffered SQL audit
    // records are flushed on shutdown.
    let _sql_log_guard = logging::init(&config);

    // Initialize database connection pool
    let pool = db::create_pool(&config)
        .await
        .expect("Failed to create database pool");

    // Startup banner; the database URL never appears here.
    tracing::info!(
        host = %config.host,
        port = config.port,
        db_min_connections = config.db_min_connections,
        db_max_connections = config.db_max_connections,
        log_dir = %config.log_dir.display(),
        "invoice registry starting"
    );

    // Build application state
    let state = AppState::new(config.clone(), pool);

    // Build router
    let app = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes::routes())
        .layer(axum::middleware::from_fn(request_audit_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = config.socket_addr();
    tracing::info!("invoice registry listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Service banner.
async fn root() -> &'static str {
    "Invoice Registry API - fiscal records with SQL audit and request timing"
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies database connectivity before returning OK.
/// Returns 503 Service Unavailable if the database is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").fetch_one(state.pool()).await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
