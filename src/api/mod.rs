//! HTTP API for the EchoRemedy service.
//!
//! Routes are nested under `/api/`. The upstream proxy routes are rate
//! limited per client; everything is wrapped in a permissive CORS layer.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;

pub use router::api_router;
pub use server::{start_server, ApiServer, ServerError, ServerSession};
pub use types::ApiContext;
