//! Scan history endpoints.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use super::{parse_id, UserQuery};
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db;
use crate::models::StoredScan;

#[derive(Serialize)]
pub struct ScanHistoryResponse {
    pub user_id: String,
    pub scans: Vec<StoredScan>,
}

/// `GET /api/scans?user_id=`: newest first.
pub async fn list(
    State(ctx): State<ApiContext>,
    Query(query): Query<UserQuery>,
) -> Result<Json<ScanHistoryResponse>, ApiError> {
    let user_id = query.require()?;
    let conn = ctx.open_db()?;
    let scans = db::list_scans_for_user(&conn, &user_id)?;
    Ok(Json(ScanHistoryResponse { user_id, scans }))
}

/// `GET /api/scans/:id`
pub async fn detail(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<StoredScan>, ApiError> {
    let id = parse_id(&id)?;
    let conn = ctx.open_db()?;
    db::get_scan(&conn, &id)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Scan not found".into()))
}

/// `DELETE /api/scans/:id`
pub async fn remove(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    let conn = ctx.open_db()?;
    db::delete_scan(&conn, &id)?;
    tracing::info!(scan_id = %id, "Scan deleted");
    Ok(StatusCode::NO_CONTENT)
}
