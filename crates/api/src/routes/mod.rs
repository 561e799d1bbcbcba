//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                                - Service banner
//! GET  /health                          - Liveness check
//! GET  /health/ready                    - Readiness check (pings the database)
//!
//! # Taxpayers
//! GET    /api/taxpayers                 - List taxpayers with nested children
//! GET    /api/taxpayers/by-tax-id/{tax_id} - Lookup by national tax id
//! POST   /api/taxpayers                 - Create taxpayer
//! PUT    /api/taxpayers/{code}          - Replace trade name
//! DELETE /api/taxpayers/{code}          - Delete taxpayer (children untouched)
//!
//! # Addresses
//! POST   /api/addresses                 - Create address
//! PUT    /api/addresses/{id}            - Replace address fields
//! DELETE /api/addresses/{id}            - Delete address
//!
//! # Invoices
//! GET    /api/invoices                  - List invoices, newest first
//! GET    /api/invoices/search           - Filtered + cursor-paginated search
//! POST   /api/invoices                  - Create invoice
//! PUT    /api/invoices/{id}             - Replace invoice fields
//! DELETE /api/invoices/{id}            - Delete invoice
//! ```
//!
//! Mutations return either the created entity or a human-readable status
//! string; "not found" on update/delete is an informational outcome carried
//! in a 200 response, never an error.

pub mod addresses;
pub mod invoices;
pub mod taxpayers;

use core::fmt;

use axum::Router;
use serde::Serialize;

use invoice_registry_core::{TaxpayerCode, TaxpayerCodeError};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Build the combined API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(taxpayers::router())
        .merge(addresses::router())
        .merge(invoices::router())
}

/// Human-readable mutation outcome.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    /// Outcome for a successful update.
    #[must_use]
    pub fn updated(entity: &str, key: impl fmt::Display) -> Self {
        Self {
            status: format!("{entity} {key} updated"),
        }
    }

    /// Outcome for a successful delete.
    #[must_use]
    pub fn deleted(entity: &str, key: impl fmt::Display) -> Self {
        Self {
            status: format!("{entity} {key} deleted"),
        }
    }

    /// Outcome when no row matched the given key.
    #[must_use]
    pub fn not_found(entity: &str, key: impl fmt::Display) -> Self {
        Self {
            status: format!("{entity} {key} not found"),
        }
    }
}

/// Parse a caller-supplied taxpayer code, rejecting malformed input before
/// any statement is built.
pub(crate) fn parse_taxpayer_code(raw: &str) -> Result<TaxpayerCode> {
    TaxpayerCode::parse(raw).map_err(|e: TaxpayerCodeError| AppError::BadRequest(e.to_string()))
}

/// Validate an optional row-count bound, falling back to the default.
pub(crate) fn validate_limit(limit: Option<i64>, default: i64) -> Result<i64> {
    let limit = limit.unwrap_or(default);
    if limit < 0 {
        return Err(AppError::BadRequest(
            "limit must not be negative".to_string(),
        ));
    }
    Ok(limit)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_status_messages() {
        assert_eq!(
            StatusResponse::updated("taxpayer", "270000011").status,
            "taxpayer 270000011 updated"
        );
        assert_eq!(
            StatusResponse::deleted("invoice", 7).status,
            "invoice 7 deleted"
        );
        assert_eq!(
            StatusResponse::not_found("address", 999_999).status,
            "address 999999 not found"
        );
    }

    #[test]
    fn test_validate_limit_default() {
        assert_eq!(validate_limit(None, 10).unwrap(), 10);
        assert_eq!(validate_limit(Some(3), 10).unwrap(), 3);
        assert_eq!(validate_limit(Some(0), 10).unwrap(), 0);
    }

    #[test]
    fn test_validate_limit_rejects_negative() {
        assert!(validate_limit(Some(-1), 10).is_err());
    }

    #[test]
    fn test_parse_taxpayer_code_rejects_empty() {
        assert!(parse_taxpayer_code("").is_err());
        assert!(parse_taxpayer_code("270000011").is_ok());
    }
}
