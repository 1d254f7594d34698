//! Medical assistant: chat-completion collaborators and the proxy that
//! turns an image URL or free text into a single assistant answer.
//!
//! The HTTP provider and the offline keyword assistant both implement
//! [`ChatCompletion`], so callers never depend on network access.

pub mod openrouter;
pub mod prompts;
pub mod proxy;
pub mod scripted;

pub use openrouter::OpenRouterClient;
pub use proxy::{ask, AssistantQuery, FALLBACK_ANSWER};
pub use scripted::ScriptedAssistant;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssistantError {
    #[error("Missing {0}")]
    NotConfigured(&'static str),

    #[error("Chat provider unreachable at {0}")]
    Connection(String),

    #[error("Chat provider timed out after {0}s")]
    Timeout(u64),

    #[error("Chat provider returned {status}")]
    Upstream { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),
}

/// The user turn sent alongside a system prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserMessage {
    Text(String),
    Image {
        instruction: String,
        image_url: String,
    },
}

impl UserMessage {
    pub fn is_image(&self) -> bool {
        matches!(self, UserMessage::Image { .. })
    }
}

/// A chat-completion provider.
///
/// `Ok(None)` means the provider answered without usable content.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    fn name(&self) -> &str;

    async fn complete(
        &self,
        system: &str,
        message: &UserMessage,
    ) -> Result<Option<String>, AssistantError>;
}

/// Test double returning a fixed outcome and recording nothing.
#[cfg(test)]
pub struct MockChatCompletion {
    reply: Result<Option<String>, u16>,
}

#[cfg(test)]
impl MockChatCompletion {
    pub fn answering(text: &str) -> Self {
        Self {
            reply: Ok(Some(text.to_string())),
        }
    }

    pub fn empty() -> Self {
        Self { reply: Ok(None) }
    }

    pub fn failing(status: u16) -> Self {
        Self { reply: Err(status) }
    }
}

#[cfg(test)]
#[async_trait]
impl ChatCompletion for MockChatCompletion {
    fn name(&self) -> &str {
        "mock"
    }

    async fn complete(
        &self,
        _system: &str,
        _message: &UserMessage,
    ) -> Result<Option<String>, AssistantError> {
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(status) => Err(AssistantError::Upstream {
                status: *status,
                body: "mock failure".into(),
            }),
        }
    }
}
