//! Per-client rate limiting for the upstream proxy routes.

use std::net::SocketAddr;

use axum::extract::ConnectInfo;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;

/// Rate-limit key: the peer IP. Request headers are caller-controlled and
/// never part of the key.
fn rate_key(req: &Request<axum::body::Body>) -> String {
    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| format!("ip:{}", addr.ip()))
        .unwrap_or_else(|| "unknown".to_string())
}

/// Returns 429 once a client exceeds its window.
/// Accesses `ApiContext` from request extensions.
pub async fn limit(req: Request<axum::body::Body>, next: Next) -> Response {
    match limit_inner(req, next).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

async fn limit_inner(req: Request<axum::body::Body>, next: Next) -> Result<Response, ApiError> {
    let ctx: ApiContext = req
        .extensions()
        .get::<ApiContext>()
        .cloned()
        .ok_or(ApiError::Internal("missing API context".into()))?;

    let key = rate_key(&req);

    // MutexGuard is !Send; drop before .await
    {
        let mut limiter = ctx
            .rate_limiter
            .lock()
            .map_err(|_| ApiError::Internal("rate limiter lock".into()))?;

        limiter.check(&key).map_err(|retry_after| {
            tracing::warn!(
                client = %key,
                retry_after,
                tracked = limiter.tracked_clients(),
                "Rate limit exceeded"
            );
            ApiError::RateLimited { retry_after }
        })?;
    }

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request(peer: Option<&str>, user: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri("/api/assistant");
        if let Some(u) = user {
            builder = builder.header("X-User-Id", u);
        }
        let mut req = builder.body(Body::empty()).unwrap();
        if let Some(p) = peer {
            let addr: SocketAddr = p.parse().unwrap();
            req.extensions_mut().insert(ConnectInfo(addr));
        }
        req
    }

    #[test]
    fn key_uses_peer_ip() {
        assert_eq!(rate_key(&request(Some("10.0.0.7:5123"), None)), "ip:10.0.0.7");
    }

    #[test]
    fn key_ignores_port_and_headers() {
        let a = rate_key(&request(Some("10.0.0.7:5123"), Some("alice")));
        let b = rate_key(&request(Some("10.0.0.7:6001"), Some("mallory")));
        assert_eq!(a, b);
    }

    #[test]
    fn key_without_peer_info() {
        assert_eq!(rate_key(&request(None, Some("alice"))), "unknown");
    }
}
