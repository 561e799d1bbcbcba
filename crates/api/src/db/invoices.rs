//! Invoice repository: CRUD, bounded listing, and the filtered search.

use std::time::Instant;

use rust_decimal::Decimal;
use sqlx::PgPool;

use invoice_registry_core::{InvoiceId, TaxpayerCode};

use super::sql::{self, BindValue};
use super::{RepositoryError, log_statement, map_insert_error};
use crate::models::{Invoice, InvoiceFilter, InvoicePage};

const LIST_SQL: &str =
    "SELECT invoice_id, taxpayer_code, number, total_value, issue_date FROM invoice \
     ORDER BY issue_date DESC LIMIT $1";

const LIST_FOR_TAXPAYER_SQL: &str =
    "SELECT invoice_id, taxpayer_code, number, total_value, issue_date FROM invoice \
     WHERE taxpayer_code = $1 ORDER BY invoice_id ASC";

const INSERT_SQL: &str = "INSERT INTO invoice (taxpayer_code, number, total_value, issue_date) \
                          VALUES ($1, $2, $3, NOW()) \
                          RETURNING invoice_id, taxpayer_code, number, total_value, issue_date";

const UPDATE_SQL: &str = "UPDATE invoice SET number = $1, total_value = $2 \
                          WHERE invoice_id = $3";

const DELETE_SQL: &str = "DELETE FROM invoice WHERE invoice_id = $1";

// The count deliberately ignores the active filter: `total_records` is the
// whole-table count, which is the established client contract.
const COUNT_SQL: &str = "SELECT COUNT(*) FROM invoice";

/// Repository for invoice database operations.
pub struct InvoiceRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> InvoiceRepository<'a> {
    /// Create a new invoice repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List up to `limit` invoices, newest first by issue date.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, limit: i64) -> Result<Vec<Invoice>, RepositoryError> {
        let started = Instant::now();
        let result = sqlx::query_as::<_, Invoice>(LIST_SQL)
            .bind(limit)
            .fetch_all(self.pool)
            .await;
        log_statement(LIST_SQL, &limit, started);
        Ok(result?)
    }

    /// List all invoices owned by a taxpayer, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_taxpayer(
        &self,
        taxpayer_code: &TaxpayerCode,
    ) -> Result<Vec<Invoice>, RepositoryError> {
        let started = Instant::now();
        let result = sqlx::query_as::<_, Invoice>(LIST_FOR_TAXPAYER_SQL)
            .bind(taxpayer_code.as_str())
            .fetch_all(self.pool)
            .await;
        log_statement(LIST_FOR_TAXPAYER_SQL, &taxpayer_code.as_str(), started);
        Ok(result?)
    }

    /// Create a new invoice.
    ///
    /// The database assigns both `invoice_id` and `issue_date` (server
    /// time); both come back through `RETURNING` so the caller sees the true
    /// generated values.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(
        &self,
        taxpayer_code: &TaxpayerCode,
        number: &str,
        total_value: Decimal,
    ) -> Result<Invoice, RepositoryError> {
        let started = Instant::now();
        let result = sqlx::query_as::<_, Invoice>(INSERT_SQL)
            .bind(taxpayer_code.as_str())
            .bind(number)
            .bind(total_value)
            .fetch_one(self.pool)
            .await;
        log_statement(
            INSERT_SQL,
            &(taxpayer_code.as_str(), number, total_value),
            started,
        );
        result.map_err(|e| map_insert_error(e, "invoice"))
    }

    /// Replace all mutable fields of an invoice.
    ///
    /// Returns `true` if a row was updated, `false` if no invoice matched.
    /// `issue_date` is immutable once assigned.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn update(
        &self,
        invoice_id: InvoiceId,
        number: &str,
        total_value: Decimal,
    ) -> Result<bool, RepositoryError> {
        let started = Instant::now();
        let result = sqlx::query(UPDATE_SQL)
            .bind(number)
            .bind(total_value)
            .bind(invoice_id.as_i32())
            .execute(self.pool)
            .await;
        log_statement(
            UPDATE_SQL,
            &(number, total_value, invoice_id.as_i32()),
            started,
        );
        Ok(result?.rows_affected() > 0)
    }

    /// Delete an invoice by id.
    ///
    /// Returns `true` if a row was deleted, `false` if no invoice matched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, invoice_id: InvoiceId) -> Result<bool, RepositoryError> {
        let started = Instant::now();
        let result = sqlx::query(DELETE_SQL)
            .bind(invoice_id.as_i32())
            .execute(self.pool)
            .await;
        log_statement(DELETE_SQL, &invoice_id.as_i32(), started);
        Ok(result?.rows_affected() > 0)
    }

    /// Count all invoices in the table, unfiltered.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_all(&self) -> Result<i64, RepositoryError> {
        let started = Instant::now();
        let result = sqlx::query_scalar::<_, i64>(COUNT_SQL)
            .fetch_one(self.pool)
            .await;
        log_statement(COUNT_SQL, &(), started);
        Ok(result?)
    }

    /// Run the filtered, cursor-paginated invoice search.
    ///
    /// Returns one page of rows (strictly ascending `invoice_id`, capped at
    /// `page_size`), the whole-table row count, and the next-page cursor
    /// (the last row's id, or `None` when the page is empty).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if either statement fails.
    pub async fn search(
        &self,
        filter: &InvoiceFilter,
        cursor: Option<InvoiceId>,
        page_size: i64,
    ) -> Result<InvoicePage, RepositoryError> {
        let stmt = sql::invoice_search(filter, cursor, page_size);

        let started = Instant::now();
        let mut query = sqlx::query_as::<_, Invoice>(stmt.sql());
        for value in stmt.binds() {
            query = match value {
                BindValue::Text(v) => query.bind(v.clone()),
                BindValue::Decimal(v) => query.bind(*v),
                BindValue::Timestamp(v) => query.bind(*v),
                BindValue::Int(v) => query.bind(*v),
                BindValue::BigInt(v) => query.bind(*v),
            };
        }
        let result = query.fetch_all(self.pool).await;
        log_statement(stmt.sql(), &stmt.binds(), started);
        let invoices = result?;

        let total_records = self.count_all().await?;
        let next_cursor = invoices.last().map(|invoice| invoice.invoice_id);

        Ok(InvoicePage {
            total_records,
            next_cursor,
            invoices,
        })
    }
}
