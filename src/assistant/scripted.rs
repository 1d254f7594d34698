//! Offline keyword assistant, used for chat when no provider key is set.

use async_trait::async_trait;

use super::{AssistantError, ChatCompletion, UserMessage};

pub const GREETING: &str =
    "Hello! I'm EchoRemedy, your medical assistant. How can I help you today?";

/// Shown in place of a reply when the assistant could not answer.
pub const APOLOGY: &str = "I'm sorry, I'm having trouble answering right now. Please try again \
in a moment, or consult a healthcare provider if your symptoms are concerning.";

const DEFAULT_REPLY: &str = "I understand you're looking for health guidance. For the most \
accurate assessment, I recommend uploading a photo of your symptoms using our scan feature, or \
consulting with a healthcare provider for persistent or concerning symptoms.";

const IMAGE_REPLY: &str = "Thanks for sharing a photo. For an instant assessment, please run it \
through our scan feature. If the area is painful, spreading, or shows signs of infection, \
consult a healthcare provider.";

/// Keyword groups checked in order; first match wins.
const KEYWORD_REPLIES: &[(&[&str], &str)] = &[
    (
        &["headache", "head"],
        "For mild headaches, try staying hydrated, resting in a quiet room, and applying a cold \
         compress. If headaches persist or are severe, please consult a healthcare provider.",
    ),
    (
        &["fever", "temperature"],
        "For fever, rest and stay hydrated. Adults can take acetaminophen or ibuprofen as \
         directed. Seek medical attention if fever exceeds 103°F (39.4°C) or persists for more \
         than 3 days.",
    ),
    (
        &["rash", "skin"],
        "For skin rashes, avoid scratching and keep the area clean and dry. Apply a gentle \
         moisturizer or aloe vera. If the rash spreads, becomes painful, or shows signs of \
         infection, consult a healthcare provider.",
    ),
    (
        &["cut", "wound"],
        "For minor cuts, clean with water, apply pressure to stop bleeding, and cover with a \
         clean bandage. Seek medical attention for deep cuts, persistent bleeding, or signs of \
         infection.",
    ),
];

/// Canned reply for a free-text message. Substring match, case-insensitive.
pub fn reply_for(text: &str) -> &'static str {
    let input = text.to_lowercase();
    KEYWORD_REPLIES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| input.contains(k)))
        .map(|(_, reply)| *reply)
        .unwrap_or(DEFAULT_REPLY)
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ScriptedAssistant;

#[async_trait]
impl ChatCompletion for ScriptedAssistant {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(
        &self,
        _system: &str,
        message: &UserMessage,
    ) -> Result<Option<String>, AssistantError> {
        let reply = match message {
            UserMessage::Text(text) => reply_for(text),
            UserMessage::Image { .. } => IMAGE_REPLY,
        };
        Ok(Some(reply.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_are_case_insensitive() {
        assert!(reply_for("My HEADACHE is back").starts_with("For mild headaches"));
        assert!(reply_for("high Temperature since noon").starts_with("For fever"));
    }

    #[test]
    fn earlier_group_wins() {
        // "head" matches before "cut"
        assert!(reply_for("cut on my forehead").starts_with("For mild headaches"));
    }

    #[test]
    fn skin_and_wound_groups() {
        assert!(reply_for("itchy skin").starts_with("For skin rashes"));
        assert!(reply_for("deep wound").starts_with("For minor cuts"));
    }

    #[test]
    fn unknown_text_gets_default() {
        assert_eq!(reply_for("I feel tired"), DEFAULT_REPLY);
        assert_eq!(reply_for(""), DEFAULT_REPLY);
    }

    #[tokio::test]
    async fn image_turn_points_to_scanner() {
        let out = ScriptedAssistant
            .complete(
                "sys",
                &UserMessage::Image {
                    instruction: String::new(),
                    image_url: "https://x/a.png".into(),
                },
            )
            .await
            .unwrap();
        assert_eq!(out.as_deref(), Some(IMAGE_REPLY));
    }
}
