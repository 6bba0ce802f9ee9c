use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::db::{Database, StorageError};
use crate::models::*;

/// How many entries `GET /calculations/recent` returns when the caller
/// does not say.
const DEFAULT_RECENT_LIMIT: u32 = 10;

// ============================================================
// Error Handling
// ============================================================

type ApiError = (StatusCode, Json<serde_json::Value>);

/// A malformed request is the caller's to fix; the response names the field.
fn validation_error(e: ValidationError) -> ApiError {
    tracing::warn!("Validation error: {}", e);
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({
            "error": [{ "field": e.field, "message": e.to_string() }]
        })),
    )
}

/// Log a storage failure and return a sanitized response. The full error is
/// logged server-side for debugging; clients only see a generic message.
fn storage_error(e: StorageError) -> ApiError {
    tracing::error!("Storage error: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "error": "Internal server error" })),
    )
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Calculations
// ============================================================

pub async fn save_calculation(
    State(db): State<Database>,
    Json(input): Json<CreateCalculationInput>,
) -> Result<(StatusCode, Json<Calculation>), ApiError> {
    input.validate().map_err(validation_error)?;

    db.save_calculation(input)
        .map(|c| (StatusCode::CREATED, Json(c)))
        .map_err(storage_error)
}

pub async fn list_calculations(
    State(db): State<Database>,
) -> Result<Json<Vec<Calculation>>, ApiError> {
    db.get_calculations().map(Json).map_err(storage_error)
}

/// Query parameters for listing recent calculations.
#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    /// Maximum number of entries to return. Defaults to 10.
    pub limit: Option<u32>,
}

pub async fn list_recent_calculations(
    State(db): State<Database>,
    Query(query): Query<RecentQuery>,
) -> Result<Json<Vec<Calculation>>, ApiError> {
    db.get_recent_calculations(query.limit.unwrap_or(DEFAULT_RECENT_LIMIT))
        .map(Json)
        .map_err(storage_error)
}
