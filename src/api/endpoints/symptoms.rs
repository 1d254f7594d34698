use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use super::assistant::ProxyResponse;
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::symptom_checker::normalize_symptoms;

#[derive(Debug, Deserialize)]
pub struct SymptomCheckRequest {
    #[serde(default)]
    pub symptoms: Vec<String>,
}

/// `POST /api/symptom-checker`: relay the lookup payload as `{result}`.
pub async fn check(
    State(ctx): State<ApiContext>,
    payload: Result<Json<SymptomCheckRequest>, JsonRejection>,
) -> Result<Json<ProxyResponse>, ApiError> {
    let Json(req) = payload?;
    let symptoms = normalize_symptoms(&req.symptoms)?;
    let result = ctx.symptom_lookup.lookup(&symptoms).await?;
    Ok(Json(ProxyResponse { result }))
}
