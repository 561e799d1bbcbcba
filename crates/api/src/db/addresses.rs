//! Address repository.

use std::time::Instant;

use sqlx::PgPool;

use invoice_registry_core::{AddressId, TaxpayerCode};

use super::{RepositoryError, log_statement, map_insert_error};
use crate::models::Address;

const LIST_FOR_TAXPAYER_SQL: &str =
    "SELECT address_id, taxpayer_code, street, municipality, state FROM address \
     WHERE taxpayer_code = $1 ORDER BY address_id ASC";

const INSERT_SQL: &str = "INSERT INTO address (taxpayer_code, street, municipality, state) \
                          VALUES ($1, $2, $3, $4) \
                          RETURNING address_id, taxpayer_code, street, municipality, state";

const UPDATE_SQL: &str = "UPDATE address SET street = $1, municipality = $2, state = $3 \
                          WHERE address_id = $4";

const DELETE_SQL: &str = "DELETE FROM address WHERE address_id = $1";

/// Repository for address database operations.
pub struct AddressRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AddressRepository<'a> {
    /// Create a new address repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all addresses owned by a taxpayer, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_taxpayer(
        &self,
        taxpayer_code: &TaxpayerCode,
    ) -> Result<Vec<Address>, RepositoryError> {
        let started = Instant::now();
        let result = sqlx::query_as::<_, Address>(LIST_FOR_TAXPAYER_SQL)
            .bind(taxpayer_code.as_str())
            .fetch_all(self.pool)
            .await;
        log_statement(LIST_FOR_TAXPAYER_SQL, &taxpayer_code.as_str(), started);
        Ok(result?)
    }

    /// Create a new address for a taxpayer.
    ///
    /// The generated `address_id` comes back through `RETURNING`, so the
    /// caller sees the true database-assigned identity.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(
        &self,
        taxpayer_code: &TaxpayerCode,
        street: Option<&str>,
        municipality: Option<&str>,
        state: Option<&str>,
    ) -> Result<Address, RepositoryError> {
        let started = Instant::now();
        let result = sqlx::query_as::<_, Address>(INSERT_SQL)
            .bind(taxpayer_code.as_str())
            .bind(street)
            .bind(municipality)
            .bind(state)
            .fetch_one(self.pool)
            .await;
        log_statement(
            INSERT_SQL,
            &(taxpayer_code.as_str(), street, municipality, state),
            started,
        );
        result.map_err(|e| map_insert_error(e, "address"))
    }

    /// Replace all mutable fields of an address.
    ///
    /// Returns `true` if a row was updated, `false` if no address matched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn update(
        &self,
        address_id: AddressId,
        street: Option<&str>,
        municipality: Option<&str>,
        state: Option<&str>,
    ) -> Result<bool, RepositoryError> {
        let started = Instant::now();
        let result = sqlx::query(UPDATE_SQL)
            .bind(street)
            .bind(municipality)
            .bind(state)
            .bind(address_id.as_i32())
            .execute(self.pool)
            .await;
        log_statement(
            UPDATE_SQL,
            &(street, municipality, state, address_id.as_i32()),
            started,
        );
        Ok(result?.rows_affected() > 0)
    }

    /// Delete an address by id.
    ///
    /// Returns `true` if a row was deleted, `false` if no address matched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, address_id: AddressId) -> Result<bool, RepositoryError> {
        let started = Instant::now();
        let result = sqlx::query(DELETE_SQL)
            .bind(address_id.as_i32())
            .execute(self.pool)
            .await;
        log_statement(DELETE_SQL, &address_id.as_i32(), started);
        Ok(result?.rows_affected() > 0)
    }
}
