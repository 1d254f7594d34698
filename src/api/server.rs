//! API server lifecycle: bind, spawn the axum server in a background
//! task, return a handle with a shutdown channel.

use std::net::SocketAddr;

use tokio::sync::oneshot;

use crate::api::router::api_router;
use crate::api::types::ApiContext;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Failed to bind API server on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },
    #[error("Failed to get server address: {0}")]
    LocalAddr(std::io::Error),
}

/// Session metadata for a running API server.
#[derive(Debug, Clone)]
pub struct ServerSession {
    pub server_addr: String,
    pub port: u16,
    pub started_at: String,
}

/// Handle to a running API server.
pub struct ApiServer {
    pub session: ServerSession,
    local_addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: Option<tokio::task::JoinHandle<()>>,
}

impl ApiServer {
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Send the shutdown signal. Safe to call more than once.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            tracing::info!("API server shutdown signal sent");
        }
    }

    /// Wait for the server task to finish draining.
    pub async fn wait(&mut self) {
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::error!(error = %e, "API server task failed");
            }
        }
    }
}

/// Start the API server on `addr` (port 0 picks an ephemeral port).
pub async fn start_server(ctx: ApiContext, addr: SocketAddr) -> Result<ApiServer, ServerError> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    let local_addr = listener.local_addr().map_err(ServerError::LocalAddr)?;

    tracing::info!(%local_addr, "API server binding");

    let app = api_router(ctx);

    let session = ServerSession {
        server_addr: local_addr.to_string(),
        port: local_addr.port(),
        started_at: chrono::Utc::now().to_rfc3339(),
    };

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
            tracing::info!("API server received shutdown signal");
        };

        if let Err(e) = axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal)
        .await
        {
            tracing::error!(error = %e, "API server error");
        }

        tracing::info!("API server stopped");
    });

    tracing::info!(
        addr = %session.server_addr,
        started_at = %session.started_at,
        "API server started"
    );

    Ok(ApiServer {
        session,
        local_addr,
        shutdown_tx: Some(shutdown_tx),
        task: Some(task),
    })
}

impl Drop for ApiServer {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};
    use std::sync::Arc;

    use crate::assistant::MockChatCompletion;
    use crate::symptom_checker::MockSymptomLookup;

    fn test_ctx() -> (ApiContext, tempfile::TempDir) {
        let tmp = tempfile::tempdir().unwrap();
        let ctx = ApiContext::new(
            tmp.path().join("echoremedy.db"),
            Arc::new(MockChatCompletion::answering("ok")),
            Arc::new(MockChatCompletion::answering("ok")),
            Arc::new(MockSymptomLookup {
                payload: Ok(serde_json::json!([])),
            }),
        );
        (ctx, tmp)
    }

    fn loopback() -> SocketAddr {
        SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 0)
    }

    #[tokio::test]
    async fn server_starts_on_ephemeral_port() {
        let (ctx, _tmp) = test_ctx();
        let mut server = start_server(ctx, loopback()).await.expect("server should start");

        assert!(server.session.port > 0);
        assert_eq!(server.local_addr().port(), server.session.port);
        assert!(!server.session.started_at.is_empty());

        server.shutdown();
        server.wait().await;
    }

    #[tokio::test]
    async fn server_serves_api_routes() {
        let (ctx, _tmp) = test_ctx();
        let mut server = start_server(ctx, loopback()).await.expect("server should start");
        let port = server.session.port;

        let resp = reqwest::get(format!("http://127.0.0.1:{port}/api/health"))
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK);
        let body: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(body["status"], "ok");

        let resp = reqwest::get(format!("http://127.0.0.1:{port}/nonexistent"))
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);

        server.shutdown();
        server.wait().await;
    }

    #[tokio::test]
    async fn bind_conflict_is_reported() {
        let (ctx, _tmp) = test_ctx();
        let mut first = start_server(ctx.clone(), loopback()).await.unwrap();

        let err = start_server(ctx, first.local_addr()).await.err().unwrap();
        assert!(matches!(err, ServerError::Bind { .. }));

        first.shutdown();
    }

    #[tokio::test]
    async fn rate_limit_follows_peer_not_header() {
        let (ctx, _tmp) = test_ctx();
        let mut server = start_server(ctx.with_rate_limit(1), loopback()).await.unwrap();
        let url = format!("http://127.0.0.1:{}/api/chat/send", server.session.port);
        let client = reqwest::Client::new();

        let mut statuses = Vec::new();
        for user in ["alice", "bob", "carol"] {
            let resp = client
                .post(&url)
                .header("X-User-Id", user)
                .json(&serde_json::json!({ "message": "hi" }))
                .send()
                .await
                .unwrap();
            statuses.push(resp.status());
        }
        assert_eq!(
            statuses,
            vec![
                reqwest::StatusCode::OK,
                reqwest::StatusCode::TOO_MANY_REQUESTS,
                reqwest::StatusCode::TOO_MANY_REQUESTS,
            ]
        );

        server.shutdown();
        server.wait().await;
    }

    #[tokio::test]
    async fn shutdown_is_idempotent() {
        let (ctx, _tmp) = test_ctx();
        let mut server = start_server(ctx, loopback()).await.unwrap();

        server.shutdown();
        server.shutdown();
        server.wait().await;
    }
}
