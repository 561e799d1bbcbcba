//! Invoice routes: listing, filtered search, and mutations.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

use invoice_registry_core::InvoiceId;

use crate::db::InvoiceRepository;
use crate::error::{AppError, Result};
use crate::models::{Invoice, InvoiceFilter, InvoicePage};
use crate::state::AppState;

use super::{StatusResponse, parse_taxpayer_code, validate_limit};

/// Default row bound for the invoice listing.
const DEFAULT_LIST_LIMIT: i64 = 50;

/// Default page size for the filtered search.
const DEFAULT_PAGE_SIZE: i64 = 50;

/// Build the invoice router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/invoices", get(list_invoices).post(create_invoice))
        .route("/api/invoices/search", get(search_invoices))
        .route(
            "/api/invoices/{id}",
            put(update_invoice).delete(delete_invoice),
        )
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub limit: Option<i64>,
}

/// Query parameters for the filtered search.
///
/// Filter fields are tri-state: an absent parameter means "no constraint".
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub number: Option<String>,
    pub min_total: Option<Decimal>,
    pub max_total: Option<Decimal>,
    pub issued_from: Option<DateTime<Utc>>,
    pub issued_to: Option<DateTime<Utc>>,
    pub taxpayer_code: Option<String>,
    pub cursor: Option<i32>,
    pub page_size: Option<i64>,
}

/// Request to create an invoice.
///
/// `invoice_id` and `issue_date` are database-assigned; the response carries
/// the generated values.
#[derive(Debug, Deserialize)]
pub struct CreateInvoiceRequest {
    pub taxpayer_code: String,
    pub number: String,
    pub total_value: Decimal,
}

/// Request to replace an invoice's mutable fields.
#[derive(Debug, Deserialize)]
pub struct UpdateInvoiceRequest {
    pub number: String,
    pub total_value: Decimal,
}

/// Convert validated search parameters into the repository arguments.
fn build_search(params: SearchParams) -> Result<(InvoiceFilter, Option<InvoiceId>, i64)> {
    let page_size = validate_limit(params.page_size, DEFAULT_PAGE_SIZE)?;
    let taxpayer_code = params
        .taxpayer_code
        .as_deref()
        .map(parse_taxpayer_code)
        .transpose()?;
    let filter = InvoiceFilter {
        number: params.number,
        min_total: params.min_total,
        max_total: params.max_total,
        issued_from: params.issued_from,
        issued_to: params.issued_to,
        taxpayer_code,
    };
    Ok((filter, params.cursor.map(InvoiceId::new), page_size))
}

/// List invoices, newest first by issue date.
async fn list_invoices(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Invoice>>> {
    let limit = validate_limit(params.limit, DEFAULT_LIST_LIMIT)?;
    let invoices = InvoiceRepository::new(state.pool()).list(limit).await?;
    Ok(Json(invoices))
}

/// Filtered, cursor-paginated invoice search.
async fn search_invoices(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<InvoicePage>> {
    let (filter, cursor, page_size) = build_search(params)?;
    let page = InvoiceRepository::new(state.pool())
        .search(&filter, cursor, page_size)
        .await?;
    Ok(Json(page))
}

/// Create an invoice.
async fn create_invoice(
    State(state): State<AppState>,
    Json(body): Json<CreateInvoiceRequest>,
) -> Result<(StatusCode, Json<Invoice>)> {
    let code = parse_taxpayer_code(&body.taxpayer_code)?;
    if body.number.trim().is_empty() {
        return Err(AppError::BadRequest("number must not be empty".to_string()));
    }
    let invoice = InvoiceRepository::new(state.pool())
        .create(&code, &body.number, body.total_value)
        .await?;
    Ok((StatusCode::CREATED, Json(invoice)))
}

/// Replace an invoice's number and total value.
async fn update_invoice(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateInvoiceRequest>,
) -> Result<Json<StatusResponse>> {
    if body.number.trim().is_empty() {
        return Err(AppError::BadRequest("number must not be empty".to_string()));
    }
    let invoice_id = InvoiceId::new(id);
    let updated = InvoiceRepository::new(state.pool())
        .update(invoice_id, &body.number, body.total_value)
        .await?;
    Ok(Json(if updated {
        StatusResponse::updated("invoice", invoice_id)
    } else {
        StatusResponse::not_found("invoice", invoice_id)
    }))
}

/// Delete an invoice.
async fn delete_invoice(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<StatusResponse>> {
    let invoice_id = InvoiceId::new(id);
    let deleted = InvoiceRepository::new(state.pool())
        .delete(invoice_id)
        .await?;
    Ok(Json(if deleted {
        StatusResponse::deleted("invoice", invoice_id)
    } else {
        StatusResponse::not_found("invoice", invoice_id)
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_build_search_defaults() {
        let (filter, cursor, page_size) = build_search(SearchParams::default()).unwrap();
        assert!(filter.is_empty());
        assert!(cursor.is_none());
        assert_eq!(page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_build_search_carries_cursor_and_filter() {
        let params = SearchParams {
            min_total: Some(Decimal::new(200, 0)),
            taxpayer_code: Some("270000011".to_string()),
            cursor: Some(7),
            page_size: Some(25),
            ..SearchParams::default()
        };
        let (filter, cursor, page_size) = build_search(params).unwrap();
        assert_eq!(filter.min_total, Some(Decimal::new(200, 0)));
        assert_eq!(
            filter.taxpayer_code.as_ref().map(|c| c.as_str().to_owned()),
            Some("270000011".to_string())
        );
        assert_eq!(cursor, Some(InvoiceId::new(7)));
        assert_eq!(page_size, 25);
    }

    #[test]
    fn test_build_search_rejects_negative_page_size() {
        let params = SearchParams {
            page_size: Some(-1),
            ..SearchParams::default()
        };
        assert!(build_search(params).is_err());
    }

    #[test]
    fn test_build_search_rejects_malformed_taxpayer_code() {
        let params = SearchParams {
            taxpayer_code: Some("27 000".to_string()),
            ..SearchParams::default()
        };
        assert!(build_search(params).is_err());
    }
}
