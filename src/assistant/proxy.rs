use super::prompts::{IMAGE_INSTRUCTION, IMAGE_SYSTEM_PROMPT, TEXT_SYSTEM_PROMPT};
use super::{AssistantError, ChatCompletion, UserMessage};

/// Returned when the provider answers without content.
pub const FALLBACK_ANSWER: &str = "Unable to retrieve analysis from AI model.";

/// A validated assistant question: an image takes precedence over text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantQuery {
    system: &'static str,
    message: UserMessage,
}

impl AssistantQuery {
    /// `None` when neither a non-blank image URL nor text is given.
    pub fn from_parts(image_url: Option<&str>, user_text: Option<&str>) -> Option<Self> {
        let non_blank = |s: &&str| !s.trim().is_empty();

        if let Some(url) = image_url.filter(non_blank) {
            return Some(Self {
                system: IMAGE_SYSTEM_PROMPT,
                message: UserMessage::Image {
                    instruction: IMAGE_INSTRUCTION.to_string(),
                    image_url: url.trim().to_string(),
                },
            });
        }

        user_text.filter(non_blank).map(|text| Self {
            system: TEXT_SYSTEM_PROMPT,
            message: UserMessage::Text(text.to_string()),
        })
    }

    pub fn message(&self) -> &UserMessage {
        &self.message
    }
}

/// Single-shot question to the provider, falling back to
/// [`FALLBACK_ANSWER`] on an empty answer.
pub async fn ask(
    provider: &dyn ChatCompletion,
    query: &AssistantQuery,
) -> Result<String, AssistantError> {
    let answer = provider.complete(query.system, &query.message).await?;
    if answer.is_none() {
        tracing::warn!(provider = provider.name(), "Provider returned no content");
    }
    Ok(answer.unwrap_or_else(|| FALLBACK_ANSWER.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::MockChatCompletion;

    #[test]
    fn nothing_given_is_rejected() {
        assert!(AssistantQuery::from_parts(None, None).is_none());
        assert!(AssistantQuery::from_parts(Some(""), Some("   ")).is_none());
    }

    #[test]
    fn image_wins_over_text() {
        let query = AssistantQuery::from_parts(Some("https://x/y.png"), Some("and a rash")).unwrap();
        assert_eq!(query.system, IMAGE_SYSTEM_PROMPT);
        assert!(query.message().is_image());
    }

    #[test]
    fn blank_image_falls_through_to_text() {
        let query = AssistantQuery::from_parts(Some(" "), Some("sore throat")).unwrap();
        assert_eq!(query.system, TEXT_SYSTEM_PROMPT);
        assert_eq!(query.message(), &UserMessage::Text("sore throat".into()));
    }

    #[tokio::test]
    async fn ask_returns_answer_verbatim() {
        let query = AssistantQuery::from_parts(None, Some("fever")).unwrap();
        let mock = MockChatCompletion::answering("  Rest and fluids.\n");
        assert_eq!(ask(&mock, &query).await.unwrap(), "  Rest and fluids.\n");
    }

    #[tokio::test]
    async fn ask_substitutes_fallback_for_empty_answer() {
        let query = AssistantQuery::from_parts(None, Some("fever")).unwrap();
        let answer = ask(&MockChatCompletion::empty(), &query).await.unwrap();
        assert_eq!(answer, FALLBACK_ANSWER);
    }

    #[tokio::test]
    async fn ask_propagates_upstream_errors() {
        let query = AssistantQuery::from_parts(None, Some("fever")).unwrap();
        let err = ask(&MockChatCompletion::failing(503), &query).await.unwrap_err();
        assert!(matches!(err, AssistantError::Upstream { status: 503, .. }));
    }
}
