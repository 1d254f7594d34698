//! Journal endpoints.
//!
//! - `POST /api/journal`: record an entry
//! - `GET /api/journal?user_id=`: entries, newest first
//! - `DELETE /api/journal/:id`

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use super::{parse_id, UserQuery};
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db;
use crate::journal::{self, JournalEntryView, NewJournalEntry};

#[derive(Serialize)]
pub struct JournalHistoryResponse {
    pub user_id: String,
    pub entries: Vec<JournalEntryView>,
}

/// `POST /api/journal`: record a new entry.
pub async fn record(
    State(ctx): State<ApiContext>,
    payload: Result<Json<NewJournalEntry>, JsonRejection>,
) -> Result<(StatusCode, Json<JournalEntryView>), ApiError> {
    let Json(entry) = payload?;
    journal::validate(&entry)?;
    let conn = ctx.open_db()?;
    let stored = journal::record_entry(&conn, entry)?;
    Ok((StatusCode::CREATED, Json(stored.into())))
}

/// `GET /api/journal?user_id=`
pub async fn history(
    State(ctx): State<ApiContext>,
    Query(query): Query<UserQuery>,
) -> Result<Json<JournalHistoryResponse>, ApiError> {
    let user_id = query.require()?;
    let conn = ctx.open_db()?;
    let entries = journal::list_entries(&conn, &user_id)?;
    Ok(Json(JournalHistoryResponse { user_id, entries }))
}

/// `DELETE /api/journal/:id`
pub async fn remove(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    let conn = ctx.open_db()?;
    db::delete_journal_entry(&conn, &id)?;
    Ok(StatusCode::NO_CONTENT)
}
