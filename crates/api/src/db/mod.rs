//! Database access for the fiscal records schema.
//!
//! # Schema
//!
//! Three pre-existing tables, assumed fixed; this layer neither creates nor
//! migrates schema:
//!
//! - `taxpayer`  - keyed by `taxpayer_code` (natural key)
//! - `address`   - keyed by generated `address_id`, owned via `taxpayer_code`
//! - `invoice`   - keyed by generated `invoice_id`, owned via `taxpayer_code`
//!
//! Relationships are foreign-key joins resolved per query; nothing cascades.
//!
//! # Resource discipline
//!
//! Connections come from a bounded pool passed down explicitly from the
//! process entry point. Each operation acquires a connection for exactly one
//! statement and releases it on every exit path, including errors; no
//! connection is held across logical operations and no transaction spans
//! client round-trips. No per-query deadline is enforced here - a hung
//! database call blocks its request task.
//!
//! # Audit log
//!
//! Every executed statement emits its text, bound parameters, and duration
//! in milliseconds under the `sql` tracing target, which the logging setup
//! routes to a daily-rolling file.

pub mod addresses;
pub mod invoices;
pub mod sql;
pub mod taxpayers;

use std::fmt;
use std::time::{Duration, Instant};

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use addresses::AddressRepository;
pub use invoices::InvoiceRepository;
pub use taxpayers::TaxpayerRepository;

use crate::config::RegistryConfig;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Constraint violation (e.g., duplicate taxpayer code).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool bounded by the configured sizes.
///
/// The pool is the only shared mutable resource in the service; it is built
/// once at startup and injected everywhere through `AppState`.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(config: &RegistryConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .min_connections(config.db_min_connections)
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(10))
        .connect(config.database_url.expose_secret())
        .await
}

/// Emit one SQL audit record for an executed statement.
///
/// Called after every execution, successful or not, so the audit trail
/// matches what actually hit the database.
pub(crate) fn log_statement(sql: &str, params: &dyn fmt::Debug, started: Instant) {
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
    tracing::info!(
        target: "sql",
        sql,
        params = ?params,
        elapsed_ms,
        "statement executed"
    );
}

/// Map a sqlx error to `Conflict` when it is a unique violation.
pub(crate) fn map_insert_error(e: sqlx::Error, what: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(format!("{what} already exists"));
    }
    RepositoryError::Database(e)
}
