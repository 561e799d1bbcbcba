//! Integration test harness for Invoice Registry.
//!
//! # Running Tests
//!
//! The tests in this crate exercise a live `PostgreSQL` database and are
//! `#[ignore]`d by default. To run them:
//!
//! ```bash
//! export REGISTRY_TEST_DATABASE_URL=postgres://localhost/invoice_registry_test
//! cargo test -p invoice-registry-integration-tests -- --ignored
//! ```
//!
//! The harness provisions the reference schema (see `schema.sql`) on first
//! connect. Tests isolate themselves by taxpayer code rather than truncating
//! shared tables, so they can run concurrently.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::expect_used)]

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Environment variable naming the test database.
pub const TEST_DATABASE_URL_VAR: &str = "REGISTRY_TEST_DATABASE_URL";

/// Shared context for database-backed tests.
pub struct TestContext {
    pub pool: PgPool,
}

impl TestContext {
    /// Connect to the test database and ensure the reference schema exists.
    ///
    /// # Panics
    ///
    /// Panics with guidance if `REGISTRY_TEST_DATABASE_URL` is unset or the
    /// database is unreachable - these tests only run when opted in.
    pub async fn connect() -> Self {
        let url = std::env::var(TEST_DATABASE_URL_VAR).unwrap_or_else(|_| {
            panic!("set {TEST_DATABASE_URL_VAR} to run database-backed tests")
        });
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(&url)
            .await
            .expect("connect to test database");

        sqlx::raw_sql(include_str!("../schema.sql"))
            .execute(&pool)
            .await
            .expect("provision reference schema");

        Self { pool }
    }

    /// Remove every row owned by (or keyed as) the given taxpayer code.
    ///
    /// Called at the start of each test so reruns start clean without
    /// touching other tests' data.
    pub async fn purge_taxpayer(&self, taxpayer_code: &str) {
        for sql in [
            "DELETE FROM invoice WHERE taxpayer_code = $1",
            "DELETE FROM address WHERE taxpayer_code = $1",
            "DELETE FROM taxpayer WHERE taxpayer_code = $1",
        ] {
            sqlx::query(sql)
                .bind(taxpayer_code)
                .execute(&self.pool)
                .await
                .expect("purge test data");
        }
    }

    /// Count rows in a table by taxpayer code.
    pub async fn count_rows_for(&self, table: &str, taxpayer_code: &str) -> i64 {
        // `table` is always a fixed identifier from the test itself.
        let sql = format!("SELECT COUNT(*) FROM {table} WHERE taxpayer_code = $1");
        sqlx::query_scalar::<_, i64>(&sql)
            .bind(taxpayer_code)
            .fetch_one(&self.pool)
            .await
            .expect("count rows")
    }
}
