use axum::extract::{Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;

use super::UserQuery;
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::export::{self, HealthDataExport};

/// `GET /api/export?user_id=`: JSON bundle.
pub async fn json(
    State(ctx): State<ApiContext>,
    Query(query): Query<UserQuery>,
) -> Result<Json<HealthDataExport>, ApiError> {
    let user_id = query.require()?;
    let conn = ctx.open_db()?;
    Ok(Json(export::collect(&conn, &user_id)?))
}

/// `GET /api/export/report?user_id=`: Markdown report as a download.
pub async fn report(
    State(ctx): State<ApiContext>,
    Query(query): Query<UserQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let user_id = query.require()?;
    let conn = ctx.open_db()?;
    let data = export::collect(&conn, &user_id)?;
    let body = export::generate_health_report(&data);
    let disposition = format!(
        "attachment; filename=\"health-report-{}.md\"",
        data.exported_at.format("%Y-%m-%d")
    );

    Ok((
        [
            (header::CONTENT_TYPE, "text/markdown; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}
