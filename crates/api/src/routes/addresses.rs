//! Address routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{post, put},
};
use serde::Deserialize;

use invoice_registry_core::AddressId;

use crate::db::AddressRepository;
use crate::error::Result;
use crate::models::Address;
use crate::state::AppState;

use super::{StatusResponse, parse_taxpayer_code};

/// Build the address router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/addresses", post(create_address))
        .route(
            "/api/addresses/{id}",
            put(update_address).delete(delete_address),
        )
}

/// Request to create an address.
#[derive(Debug, Deserialize)]
pub struct CreateAddressRequest {
    pub taxpayer_code: String,
    pub street: Option<String>,
    pub municipality: Option<String>,
    pub state: Option<String>,
}

/// Request to replace an address's fields.
///
/// Full-field update: every mutable field must be supplied; there are no
/// partial/patch semantics.
#[derive(Debug, Deserialize)]
pub struct UpdateAddressRequest {
    pub street: Option<String>,
    pub municipality: Option<String>,
    pub state: Option<String>,
}

/// Create an address for a taxpayer.
///
/// The response carries the database-assigned `address_id`.
async fn create_address(
    State(state): State<AppState>,
    Json(body): Json<CreateAddressRequest>,
) -> Result<(StatusCode, Json<Address>)> {
    let code = parse_taxpayer_code(&body.taxpayer_code)?;
    let address = AddressRepository::new(state.pool())
        .create(
            &code,
            body.street.as_deref(),
            body.municipality.as_deref(),
            body.state.as_deref(),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(address)))
}

/// Replace all mutable fields of an address.
async fn update_address(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateAddressRequest>,
) -> Result<Json<StatusResponse>> {
    let address_id = AddressId::new(id);
    let updated = AddressRepository::new(state.pool())
        .update(
            address_id,
            body.street.as_deref(),
            body.municipality.as_deref(),
            body.state.as_deref(),
        )
        .await?;
    Ok(Json(if updated {
        StatusResponse::updated("address", address_id)
    } else {
        StatusResponse::not_found("address", address_id)
    }))
}

/// Delete an address.
async fn delete_address(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<StatusResponse>> {
    let address_id = AddressId::new(id);
    let deleted = AddressRepository::new(state.pool())
        .delete(address_id)
        .await?;
    Ok(Json(if deleted {
        StatusResponse::deleted("address", address_id)
    } else {
        StatusResponse::not_found("address", address_id)
    }))
}
