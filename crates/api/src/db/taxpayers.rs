//! Taxpayer repository and aggregate composition.

use std::time::Instant;

use sqlx::PgPool;

use invoice_registry_core::TaxpayerCode;

use super::{AddressRepository, InvoiceRepository, RepositoryError, log_statement, map_insert_error};
use crate::models::{Taxpayer, TaxpayerProfile};

const LIST_SQL: &str = "SELECT taxpayer_code, trade_name, tax_id FROM taxpayer \
                        ORDER BY taxpayer_code ASC LIMIT $1";

const GET_BY_TAX_ID_SQL: &str =
    "SELECT taxpayer_code, trade_name, tax_id FROM taxpayer WHERE tax_id = $1";

const INSERT_SQL: &str = "INSERT INTO taxpayer (taxpayer_code, trade_name, tax_id) \
                          VALUES ($1, $2, $3) \
                          RETURNING taxpayer_code, trade_name, tax_id";

const UPDATE_SQL: &str = "UPDATE taxpayer SET trade_name = $1 WHERE taxpayer_code = $2";

const DELETE_SQL: &str = "DELETE FROM taxpayer WHERE taxpayer_code = $1";

/// Repository for taxpayer database operations.
pub struct TaxpayerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> TaxpayerRepository<'a> {
    /// Create a new taxpayer repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List up to `limit` taxpayers, ordered by code.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, limit: i64) -> Result<Vec<Taxpayer>, RepositoryError> {
        let started = Instant::now();
        let result = sqlx::query_as::<_, Taxpayer>(LIST_SQL)
            .bind(limit)
            .fetch_all(self.pool)
            .await;
        log_statement(LIST_SQL, &limit, started);
        Ok(result?)
    }

    /// Get a taxpayer by its national tax id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_tax_id(&self, tax_id: &str) -> Result<Option<Taxpayer>, RepositoryError> {
        let started = Instant::now();
        let result = sqlx::query_as::<_, Taxpayer>(GET_BY_TAX_ID_SQL)
            .bind(tax_id)
            .fetch_optional(self.pool)
            .await;
        log_statement(GET_BY_TAX_ID_SQL, &tax_id, started);
        Ok(result?)
    }

    /// Create a new taxpayer.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the code already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        taxpayer_code: &TaxpayerCode,
        trade_name: Option<&str>,
        tax_id: &str,
    ) -> Result<Taxpayer, RepositoryError> {
        let started = Instant::now();
        let result = sqlx::query_as::<_, Taxpayer>(INSERT_SQL)
            .bind(taxpayer_code.as_str())
            .bind(trade_name)
            .bind(tax_id)
            .fetch_one(self.pool)
            .await;
        log_statement(
            INSERT_SQL,
            &(taxpayer_code.as_str(), trade_name, tax_id),
            started,
        );
        result.map_err(|e| map_insert_error(e, "taxpayer"))
    }

    /// Replace a taxpayer's trade name.
    ///
    /// Returns `true` if a row was updated, `false` if no taxpayer matched.
    /// A missing taxpayer is an informational outcome, not an error.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn update_trade_name(
        &self,
        taxpayer_code: &TaxpayerCode,
        trade_name: Option<&str>,
    ) -> Result<bool, RepositoryError> {
        let started = Instant::now();
        let result = sqlx::query(UPDATE_SQL)
            .bind(trade_name)
            .bind(taxpayer_code.as_str())
            .execute(self.pool)
            .await;
        log_statement(UPDATE_SQL, &(trade_name, taxpayer_code.as_str()), started);
        Ok(result?.rows_affected() > 0)
    }

    /// Delete a taxpayer by code.
    ///
    /// Returns `true` if a row was deleted, `false` if no taxpayer matched.
    /// Dependent addresses and invoices are NOT deleted - ownership is a
    /// foreign-key convention only, and nothing cascades.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, taxpayer_code: &TaxpayerCode) -> Result<bool, RepositoryError> {
        let started = Instant::now();
        let result = sqlx::query(DELETE_SQL)
            .bind(taxpayer_code.as_str())
            .execute(self.pool)
            .await;
        log_statement(DELETE_SQL, &taxpayer_code.as_str(), started);
        Ok(result?.rows_affected() > 0)
    }

    /// List up to `limit` taxpayers with their addresses and invoices.
    ///
    /// Issues two child queries per taxpayer (2K extra queries for K rows).
    /// The N+1 shape is an accepted cost of the per-entity contract, not an
    /// oversight.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any query fails; a failed
    /// child fetch fails the whole listing rather than returning a partial
    /// aggregate.
    pub async fn list_profiles(&self, limit: i64) -> Result<Vec<TaxpayerProfile>, RepositoryError> {
        let taxpayers = self.list(limit).await?;
        let mut profiles = Vec::with_capacity(taxpayers.len());
        for taxpayer in taxpayers {
            profiles.push(self.attach_children(taxpayer).await?);
        }
        Ok(profiles)
    }

    /// Get a taxpayer by tax id together with its addresses and invoices.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any query fails.
    pub async fn get_profile_by_tax_id(
        &self,
        tax_id: &str,
    ) -> Result<Option<TaxpayerProfile>, RepositoryError> {
        match self.get_by_tax_id(tax_id).await? {
            Some(taxpayer) => Ok(Some(self.attach_children(taxpayer).await?)),
            None => Ok(None),
        }
    }

    /// Fetch and attach a taxpayer's addresses and invoices.
    async fn attach_children(
        &self,
        taxpayer: Taxpayer,
    ) -> Result<TaxpayerProfile, RepositoryError> {
        let addresses = AddressRepository::new(self.pool)
            .list_for_taxpayer(&taxpayer.taxpayer_code)
            .await?;
        let invoices = InvoiceRepository::new(self.pool)
            .list_for_taxpayer(&taxpayer.taxpayer_code)
            .await?;
        Ok(TaxpayerProfile {
            taxpayer,
            addresses,
            invoices,
        })
    }
}
