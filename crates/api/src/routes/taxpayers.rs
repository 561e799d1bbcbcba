//! Taxpayer routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
};
use serde::Deserialize;

use crate::db::TaxpayerRepository;
use crate::error::{AppError, Result};
use crate::models::{Taxpayer, TaxpayerProfile};
use crate::state::AppState;

use super::{StatusResponse, parse_taxpayer_code, validate_limit};

/// Default row bound for the taxpayer listing.
const DEFAULT_LIST_LIMIT: i64 = 10;

/// Build the taxpayer router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/taxpayers", get(list_taxpayers).post(create_taxpayer))
        .route(
            "/api/taxpayers/by-tax-id/{tax_id}",
            get(get_taxpayer_by_tax_id),
        )
        .route(
            "/api/taxpayers/{code}",
            put(update_taxpayer).delete(delete_taxpayer),
        )
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub limit: Option<i64>,
}

/// Request to create a taxpayer.
#[derive(Debug, Deserialize)]
pub struct CreateTaxpayerRequest {
    pub taxpayer_code: String,
    pub trade_name: Option<String>,
    pub tax_id: String,
}

/// Request to replace a taxpayer's trade name.
///
/// Full-field update: the trade name is the only mutable field, and it must
/// be supplied (possibly as null, since the field is optional in storage).
#[derive(Debug, Deserialize)]
pub struct UpdateTaxpayerRequest {
    pub trade_name: Option<String>,
}

/// List taxpayers with their addresses and invoices attached.
async fn list_taxpayers(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<TaxpayerProfile>>> {
    let limit = validate_limit(params.limit, DEFAULT_LIST_LIMIT)?;
    let profiles = TaxpayerRepository::new(state.pool())
        .list_profiles(limit)
        .await?;
    Ok(Json(profiles))
}

/// Look up one taxpayer by national tax id, children attached.
async fn get_taxpayer_by_tax_id(
    State(state): State<AppState>,
    Path(tax_id): Path<String>,
) -> Result<Json<TaxpayerProfile>> {
    let profile = TaxpayerRepository::new(state.pool())
        .get_profile_by_tax_id(&tax_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("taxpayer with tax id {tax_id}")))?;
    Ok(Json(profile))
}

/// Create a taxpayer.
async fn create_taxpayer(
    State(state): State<AppState>,
    Json(body): Json<CreateTaxpayerRequest>,
) -> Result<(StatusCode, Json<Taxpayer>)> {
    let code = parse_taxpayer_code(&body.taxpayer_code)?;
    if body.tax_id.trim().is_empty() {
        return Err(AppError::BadRequest("tax_id must not be empty".to_string()));
    }
    let taxpayer = TaxpayerRepository::new(state.pool())
        .create(&code, body.trade_name.as_deref(), &body.tax_id)
        .await?;
    Ok((StatusCode::CREATED, Json(taxpayer)))
}

/// Replace a taxpayer's trade name.
async fn update_taxpayer(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Json(body): Json<UpdateTaxpayerRequest>,
) -> Result<Json<StatusResponse>> {
    let code = parse_taxpayer_code(&code)?;
    let updated = TaxpayerRepository::new(state.pool())
        .update_trade_name(&code, body.trade_name.as_deref())
        .await?;
    Ok(Json(if updated {
        StatusResponse::updated("taxpayer", &code)
    } else {
        StatusResponse::not_found("taxpayer", &code)
    }))
}

/// Delete a taxpayer. Dependent addresses and invoices are left in place.
async fn delete_taxpayer(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<StatusResponse>> {
    let code = parse_taxpayer_code(&code)?;
    let deleted = TaxpayerRepository::new(state.pool()).delete(&code).await?;
    Ok(Json(if deleted {
        StatusResponse::deleted("taxpayer", &code)
    } else {
        StatusResponse::not_found("taxpayer", &code)
    }))
}
