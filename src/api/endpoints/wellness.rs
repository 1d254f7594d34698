use std::str::FromStr;

use axum::extract::Query;
use axum::Json;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::models::enums::WellnessCategory;
use crate::wellness::{self, Reminder};

#[derive(Debug, Deserialize)]
pub struct ReminderQuery {
    pub category: Option<String>,
}

/// `GET /api/wellness/reminder?category=`: random reminder.
pub async fn reminder(Query(query): Query<ReminderQuery>) -> Result<Json<Reminder>, ApiError> {
    let category = match query.category.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(WellnessCategory::from_str(raw).map_err(|_| {
            ApiError::BadRequest(format!("Unknown wellness category: {raw}"))
        })?),
    };
    let reminder = wellness::random_reminder(&mut rand::thread_rng(), category);
    Ok(Json(reminder))
}
