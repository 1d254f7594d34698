//! HTTP API router.
//!
//! All routes are nested under `/api/`. The upstream proxy routes
//! (`/assistant`, `/symptom-checker`, `/chat/send`) sit behind the
//! per-client rate limiter; CORS wraps everything so preflights are
//! answered before any limit applies.

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderName, Method};
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;
use crate::scans::MAX_UPLOAD_BYTES;

/// Request body ceiling: a maximal image as base64 plus form overhead.
const MAX_BODY_BYTES: usize = MAX_UPLOAD_BYTES / 3 * 4 + 1024 * 1024;

/// Build the API router.
///
/// Middleware uses `Extension<ApiContext>`; handlers use `State<ApiContext>`.
pub fn api_router(ctx: ApiContext) -> Router {
    let proxied = Router::new()
        .route("/assistant", post(endpoints::assistant::ask))
        .route("/symptom-checker", post(endpoints::symptoms::check))
        .route("/chat/send", post(endpoints::chat::send))
        .with_state(ctx.clone())
        .layer(axum::middleware::from_fn(middleware::rate::limit))
        // Extension must be outermost so middleware can extract ApiContext
        .layer(axum::Extension(ctx.clone()));

    // NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
    let open = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/scan/analyze", post(endpoints::scan::analyze))
        .route("/scan/analyze/base64", post(endpoints::scan::analyze_base64))
        .route("/scan/labels", get(endpoints::scan::labels))
        .route("/scans", get(endpoints::scans::list))
        .route(
            "/scans/:id",
            get(endpoints::scans::detail).delete(endpoints::scans::remove),
        )
        .route("/chat/greeting", get(endpoints::chat::greeting))
        .route(
            "/journal",
            post(endpoints::journal::record).get(endpoints::journal::history),
        )
        .route("/journal/:id", delete(endpoints::journal::remove))
        .route("/export", get(endpoints::export::json))
        .route("/export/report", get(endpoints::export::report))
        .route("/wellness/reminder", get(endpoints::wellness::reminder))
        .with_state(ctx);

    Router::new()
        .nest("/api", proxied.merge(open))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors_layer())
}

/// Any origin; the header set browser clients send with API calls.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            header::CONTENT_TYPE,
        ])
}
