//! Chat endpoints.
//!
//! - `POST /api/chat/send`: one assistant reply per message
//! - `GET /api/chat/greeting`: the opening message

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::assistant::scripted::{APOLOGY, GREETING};
use crate::assistant::{self, AssistantQuery};

const MAX_MESSAGE_CHARS: usize = 2000;

#[derive(Deserialize)]
pub struct ChatSendRequest {
    pub message: String,
}

#[derive(Serialize)]
pub struct ChatReply {
    pub reply: String,
    /// True when the assistant failed and the reply is the apology.
    pub degraded: bool,
}

/// `POST /api/chat/send`: provider failures never surface as errors here.
pub async fn send(
    State(ctx): State<ApiContext>,
    payload: Result<Json<ChatSendRequest>, JsonRejection>,
) -> Result<Json<ChatReply>, ApiError> {
    let Json(req) = payload?;
    if req.message.chars().count() > MAX_MESSAGE_CHARS {
        return Err(ApiError::BadRequest(format!(
            "Message too long (max {MAX_MESSAGE_CHARS} chars)"
        )));
    }
    let query = AssistantQuery::from_parts(None, Some(req.message.as_str()))
        .ok_or_else(|| ApiError::BadRequest("Message cannot be empty".into()))?;

    let reply = match assistant::ask(ctx.chat.as_ref(), &query).await {
        Ok(reply) => ChatReply {
            reply,
            degraded: false,
        },
        Err(e) => {
            tracing::warn!(provider = ctx.chat.name(), error = %e, "Chat reply failed");
            ChatReply {
                reply: APOLOGY.to_string(),
                degraded: true,
            }
        }
    };
    Ok(Json(reply))
}

/// `GET /api/chat/greeting`
pub async fn greeting() -> Json<ChatReply> {
    Json(ChatReply {
        reply: GREETING.to_string(),
        degraded: false,
    })
}
