use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{AssistantError, ChatCompletion, UserMessage};
use crate::config::APP_NAME;

pub const VISION_MODEL: &str = "google/gemini-pro-vision";
pub const TEXT_MODEL: &str = "google/gemini-pro";

const MAX_TOKENS: u32 = 1024;
const TEMPERATURE: f32 = 0.7;
const REFERER: &str = "https://echoremedy.app";

/// OpenRouter chat-completions client. One attempt per call.
pub struct OpenRouterClient {
    base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
    timeout_secs: u64,
}

impl OpenRouterClient {
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        timeout_secs: u64,
    ) -> Result<Self, AssistantError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| AssistantError::HttpClient(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            client,
            timeout_secs,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Model used for a given user turn.
pub fn model_for(message: &UserMessage) -> &'static str {
    if message.is_image() {
        VISION_MODEL
    } else {
        TEXT_MODEL
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: MessageContent<'a>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum MessageContent<'a> {
    Text(&'a str),
    Parts(Vec<ContentPart<'a>>),
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart<'a> {
    Text { text: &'a str },
    ImageUrl { image_url: ImageRef<'a> },
}

#[derive(Serialize)]
struct ImageRef<'a> {
    url: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<ResponseMessage>,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

fn build_request<'a>(system: &'a str, message: &'a UserMessage) -> ChatRequest<'a> {
    let user_content = match message {
        UserMessage::Text(text) => MessageContent::Text(text),
        UserMessage::Image {
            instruction,
            image_url,
        } => MessageContent::Parts(vec![
            ContentPart::Text { text: instruction },
            ContentPart::ImageUrl {
                image_url: ImageRef { url: image_url },
            },
        ]),
    };

    ChatRequest {
        model: model_for(message),
        messages: vec![
            ChatMessage {
                role: "system",
                content: MessageContent::Text(system),
            },
            ChatMessage {
                role: "user",
                content: user_content,
            },
        ],
        max_tokens: MAX_TOKENS,
        temperature: TEMPERATURE,
    }
}

/// First choice's content, if present and non-empty.
fn extract_content(body: &str) -> Option<String> {
    let parsed: ChatResponse = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!(error = %e, "Unparseable chat completion body");
            return None;
        }
    };
    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .filter(|content| !content.is_empty())
}

#[async_trait]
impl ChatCompletion for OpenRouterClient {
    fn name(&self) -> &str {
        "openrouter"
    }

    async fn complete(
        &self,
        system: &str,
        message: &UserMessage,
    ) -> Result<Option<String>, AssistantError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(AssistantError::NotConfigured("OPENROUTER_API_KEY"))?;

        let url = format!("{}/chat/completions", self.base_url);
        let body = build_request(system, message);
        tracing::debug!(model = body.model, "Sending chat completion");

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .header("HTTP-Referer", REFERER)
            .header("X-Title", format!("{APP_NAME} Assistant"))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AssistantError::Timeout(self.timeout_secs)
                } else if e.is_connect() {
                    AssistantError::Connection(self.base_url.clone())
                } else {
                    AssistantError::HttpClient(e.to_string())
                }
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AssistantError::HttpClient(e.to_string()))?;

        if !status.is_success() {
            tracing::error!(status = status.as_u16(), body = %text, "Chat provider error");
            return Err(AssistantError::Upstream {
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(extract_content(&text))
    }
}
