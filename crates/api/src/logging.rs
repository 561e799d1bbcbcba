//! Tracing setup: stdout application log plus the rolling SQL audit file.
//!
//! The application log goes to stdout through an `EnvFilter`-controlled fmt
//! layer. Statement audit records (target `sql`, emitted by the `db` layer
//! with statement text, bound parameters, and duration) additionally go to a
//! daily-rolling `sql.log` file under the configured log directory, so the
//! audit trail survives restarts independent of stdout capture.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    Layer,
    filter::filter_fn,
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::config::RegistryConfig;

/// Tracing target used for SQL audit records.
pub const SQL_TARGET: &str = "sql";

/// Initialize the global tracing subscriber.
///
/// Returns the worker guard for the non-blocking file writer; the caller
/// must keep it alive for the lifetime of the process or buffered audit
/// records are lost on exit.
///
/// Defaults to info level for this crate and the `sql` target if `RUST_LOG`
/// is not set.
pub fn init(config: &RegistryConfig) -> WorkerGuard {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "invoice_registry_api=info,sql=info,tower_http=info".into());

    let file_appender = tracing_appender::rolling::daily(&config.log_dir, "sql.log");
    let (sql_writer, guard) = tracing_appender::non_blocking(file_appender);

    let sql_file_layer = tracing_subscriber::fmt::layer()
        .with_writer(sql_writer)
        .with_ansi(false)
        .with_filter(filter_fn(|metadata| metadata.target() == SQL_TARGET));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .with(sql_file_layer)
        .init();

    guard
}
