//! Symptom photo scan endpoints.
//!
//! - `POST /api/scan/analyze` (multipart: `file`, optional `user_id`, `image_url`)
//! - `POST /api/scan/analyze/base64` (JSON with a data URL)
//! - `GET /api/scan/labels`

use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::{ScanResult, CONDITION_LABELS};
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::scans::{self, Upload};

#[derive(Serialize)]
pub struct ScanResponse {
    /// Set when the result was saved to a user's history.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scan_id: Option<Uuid>,
    #[serde(flatten)]
    pub result: ScanResult,
}

#[derive(Deserialize)]
pub struct Base64ScanRequest {
    pub file_name: String,
    pub data: String,
    pub user_id: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Serialize)]
pub struct LabelsResponse {
    pub labels: &'static [&'static str],
}

/// `POST /api/scan/analyze`: analyze an uploaded photo.
pub async fn analyze(
    State(ctx): State<ApiContext>,
    mut multipart: Multipart,
) -> Result<Json<ScanResponse>, ApiError> {
    let mut upload: Option<Upload> = None;
    let mut user_id: Option<String> = None;
    let mut image_url: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed upload: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read file data: {e}")))?;
                upload = Some(Upload {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            "user_id" => user_id = Some(read_text(field).await?),
            "image_url" => image_url = Some(read_text(field).await?),
            _ => {}
        }
    }

    let upload = upload.ok_or_else(|| ApiError::BadRequest("No file provided".into()))?;
    run_scan(&ctx, &upload, user_id, image_url).map(Json)
}

/// `POST /api/scan/analyze/base64`: analyze a photo sent as a data URL.
pub async fn analyze_base64(
    State(ctx): State<ApiContext>,
    payload: Result<Json<Base64ScanRequest>, JsonRejection>,
) -> Result<Json<ScanResponse>, ApiError> {
    let Json(req) = payload?;
    let upload = Upload::from_data_url(&req.file_name, &req.data)?;
    run_scan(&ctx, &upload, req.user_id, req.image_url).map(Json)
}

/// `GET /api/scan/labels`: the fixed condition list.
pub async fn labels() -> Json<LabelsResponse> {
    Json(LabelsResponse {
        labels: CONDITION_LABELS,
    })
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map(|t| t.trim().to_string())
        .map_err(|e| ApiError::BadRequest(format!("Malformed upload field: {e}")))
}

fn run_scan(
    ctx: &ApiContext,
    upload: &Upload,
    user_id: Option<String>,
    image_url: Option<String>,
) -> Result<ScanResponse, ApiError> {
    let result = scans::analyze_upload(upload, &ctx.reference_image_base_url)?;

    match user_id.filter(|u| !u.trim().is_empty()) {
        Some(user_id) => {
            let conn = ctx.open_db()?;
            let image_url = image_url.filter(|u| !u.is_empty());
            let stored = scans::record_scan(&conn, user_id.trim(), image_url, result)?;
            Ok(ScanResponse {
                scan_id: Some(stored.id),
                result: stored.result,
            })
        }
        None => Ok(ScanResponse {
            scan_id: None,
            result,
        }),
    }
}
