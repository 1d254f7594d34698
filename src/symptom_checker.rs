//! Symptom lookup proxy (API Ninjas symptom checker).

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SymptomCheckError {
    #[error("No symptoms provided.")]
    NoSymptoms,

    #[error("Missing {0}.")]
    NotConfigured(&'static str),

    #[error("Symptom service unreachable at {0}")]
    Connection(String),

    #[error("Symptom service timed out after {0}s")]
    Timeout(u64),

    #[error("Invalid JSON from API Ninjas.")]
    InvalidJson,

    #[error("API Ninjas error: {message}")]
    Upstream { status: u16, message: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),
}

#[async_trait]
pub trait SymptomLookup: Send + Sync {
    /// Look up conditions for already-normalized symptom names.
    async fn lookup(&self, symptoms: &[String]) -> Result<Value, SymptomCheckError>;
}

/// Trim names and drop blanks; empty result is an input error.
pub fn normalize_symptoms(symptoms: &[String]) -> Result<Vec<String>, SymptomCheckError> {
    let cleaned: Vec<String> = symptoms
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    if cleaned.is_empty() {
        return Err(SymptomCheckError::NoSymptoms);
    }
    Ok(cleaned)
}

pub struct ApiNinjasClient {
    base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
    timeout_secs: u64,
}

impl ApiNinjasClient {
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        timeout_secs: u64,
    ) -> Result<Self, SymptomCheckError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| SymptomCheckError::HttpClient(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            client,
            timeout_secs,
        })
    }
}

/// Interpret an upstream reply. The body must be JSON even on error
/// statuses; a string `error` field is preferred as the message.
fn interpret_response(status: u16, body: &str) -> Result<Value, SymptomCheckError> {
    let data: Value = serde_json::from_str(body).map_err(|e| {
        tracing::warn!(status, error = %e, "Symptom service returned non-JSON body");
        SymptomCheckError::InvalidJson
    })?;

    if !(200..300).contains(&status) {
        let message = data
            .get("error")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| status.to_string());
        return Err(SymptomCheckError::Upstream { status, message });
    }
    Ok(data)
}

#[async_trait]
impl SymptomLookup for ApiNinjasClient {
    async fn lookup(&self, symptoms: &[String]) -> Result<Value, SymptomCheckError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(SymptomCheckError::NotConfigured("API_NINJAS_KEY"))?;

        let joined = symptoms.join(",");
        tracing::info!(count = symptoms.len(), "Querying symptom checker");

        let response = self
            .client
            .get(format!("{}/symptomchecker", self.base_url))
            .query(&[("symptoms", joined.as_str())])
            .header("X-Api-Key", api_key)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SymptomCheckError::Timeout(self.timeout_secs)
                } else if e.is_connect() {
                    SymptomCheckError::Connection(self.base_url.clone())
                } else {
                    SymptomCheckError::HttpClient(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| SymptomCheckError::HttpClient(e.to_string()))?;
        tracing::debug!(status, "Symptom checker responded");

        interpret_response(status, &body)
    }
}

/// Test double returning a fixed payload or an upstream failure.
#[cfg(test)]
pub struct MockSymptomLookup {
    pub payload: Result<Value, u16>,
}

#[cfg(test)]
#[async_trait]
impl SymptomLookup for MockSymptomLookup {
    async fn lookup(&self, symptoms: &[String]) -> Result<Value, SymptomCheckError> {
        match &self.payload {
            Ok(value) => Ok(serde_json::json!({ "symptoms": symptoms, "conditions": value })),
            Err(status) => Err(SymptomCheckError::Upstream {
                status: *status,
                message: status.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Query;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;
    use std::collections::HashMap;

    #[test]
    fn normalize_trims_and_drops_blanks() {
        let input = vec![" fever ".to_string(), "".into(), "cough".into()];
        assert_eq!(normalize_symptoms(&input).unwrap(), vec!["fever", "cough"]);
    }

    #[test]
    fn normalize_rejects_empty_list() {
        let err = normalize_symptoms(&["  ".to_string()]).unwrap_err();
        assert_eq!(err.to_string(), "No symptoms provided.");
    }

    #[test]
    fn invalid_json_wins_over_status() {
        let err = interpret_response(500, "Internal Server Error").unwrap_err();
        assert!(matches!(err, SymptomCheckError::InvalidJson));
    }

    #[test]
    fn upstream_error_prefers_error_field() {
        let err = interpret_response(400, r#"{"error":"Invalid symptoms"}"#).unwrap_err();
        assert_eq!(err.to_string(), "API Ninjas error: Invalid symptoms");

        let err = interpret_response(403, r#"{"message":"nope"}"#).unwrap_err();
        assert_eq!(err.to_string(), "API Ninjas error: 403");
    }

    #[test]
    fn success_returns_payload() {
        let data = interpret_response(200, r#"[{"name":"Common cold"}]"#).unwrap();
        assert_eq!(data[0]["name"], "Common cold");
    }

    #[tokio::test]
    async fn missing_key_is_not_configured() {
        let client = ApiNinjasClient::new("http://127.0.0.1:9", None, 1).unwrap();
        let err = client.lookup(&["fever".to_string()]).await.unwrap_err();
        assert_eq!(err.to_string(), "Missing API_NINJAS_KEY.");
    }

    #[tokio::test]
    async fn lookup_sends_joined_symptoms_and_key() {
        let app = Router::new().route(
            "/v1/symptomchecker",
            get(
                |headers: HeaderMap, Query(params): Query<HashMap<String, String>>| async move {
                    if headers.get("x-api-key").and_then(|v| v.to_str().ok()) != Some("ninja") {
                        return (StatusCode::UNAUTHORIZED, Json(json!({"error": "bad key"})));
                    }
                    (StatusCode::OK, Json(json!({ "echo": params.get("symptoms") })))
                },
            ),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let client =
            ApiNinjasClient::new(&format!("http://{addr}/v1"), Some("ninja".into()), 5).unwrap();
        let data = client
            .lookup(&["fever".to_string(), "sore throat".to_string()])
            .await
            .unwrap();
        assert_eq!(data["echo"], "fever,sore throat");

        let wrong =
            ApiNinjasClient::new(&format!("http://{addr}/v1"), Some("other".into()), 5).unwrap();
        let err = wrong.lookup(&["fever".to_string()]).await.unwrap_err();
        assert!(matches!(err, SymptomCheckError::Upstream { status: 401, .. }));
    }
}
