//! `POST /api/assistant`: single-shot proxy to the chat provider, or to
//! the symptom checker when only symptoms are given.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::assistant::{self, AssistantQuery};
use crate::symptom_checker::normalize_symptoms;

#[derive(Debug, Default, Deserialize)]
pub struct ProxyRequest {
    pub image_url: Option<String>,
    pub user_text: Option<String>,
    #[serde(default)]
    pub symptoms: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ProxyResponse {
    pub result: Value,
}

pub async fn ask(
    State(ctx): State<ApiContext>,
    payload: Result<Json<ProxyRequest>, JsonRejection>,
) -> Result<Json<ProxyResponse>, ApiError> {
    let Json(req) = payload?;

    if let Some(query) =
        AssistantQuery::from_parts(req.image_url.as_deref(), req.user_text.as_deref())
    {
        tracing::info!(image = query.message().is_image(), "Assistant request");
        let answer = assistant::ask(ctx.llm.as_ref(), &query).await?;
        return Ok(Json(ProxyResponse {
            result: Value::String(answer),
        }));
    }

    if req.symptoms.iter().any(|s| !s.trim().is_empty()) {
        let symptoms = normalize_symptoms(&req.symptoms)?;
        let data = ctx.symptom_lookup.lookup(&symptoms).await?;
        return Ok(Json(ProxyResponse { result: data }));
    }

    Err(ApiError::BadRequest(
        "Missing image_url, user_text or symptoms".into(),
    ))
}
