//! API endpoint handlers, one module per feature.

pub mod assistant;
pub mod chat;
pub mod export;
pub mod health;
pub mod journal;
pub mod scan;
pub mod scans;
pub mod symptoms;
pub mod wellness;

use serde::Deserialize;
use uuid::Uuid;

use crate::api::error::ApiError;

/// `?user_id=` query shared by the history endpoints.
#[derive(Debug, Deserialize)]
pub struct UserQuery {
    pub user_id: Option<String>,
}

impl UserQuery {
    pub fn require(self) -> Result<String, ApiError> {
        self.user_id
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .ok_or_else(|| ApiError::BadRequest("user_id is required".into()))
    }
}

pub(crate) fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::BadRequest("Invalid ID format".into()))
}
