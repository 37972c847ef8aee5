//! Scripted safety assistant.
//!
//! Replies come from an ordered keyword table: the first keyword contained in
//! the lower-cased message selects the answer.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

pub const GREETING: &str =
    "Hello! I'm your AI safety assistant. How can I help you stay safe during your trip?";

pub const DEFAULT_REPLY: &str = "I understand your concern. For immediate assistance, please use the panic button or contact local emergency services at 112. Is there anything specific about safety that you'd like to know?";

/// Suggested prompts shown under the chat window
pub const QUICK_QUESTIONS: [&str; 5] = [
    "What should I do in an emergency?",
    "Give me safety tips",
    "Local emergency numbers",
    "I'm lost, help me",
    "Health emergency help",
];

const RESPONSES: [(&str, &str); 9] = [
    (
        "emergency",
        "In case of emergency:\n1. Use the panic button for immediate help\n2. Call local emergency number: 112\n3. Contact your embassy if you're a foreign tourist\n4. Share your location with trusted contacts",
    ),
    (
        "safety tips",
        "Safety tips for tourists:\n1. Keep copies of important documents\n2. Stay in well-lit, populated areas\n3. Don't display expensive items openly\n4. Inform someone about your whereabouts\n5. Trust your instincts",
    ),
    (
        "local emergency",
        "Local emergency contacts:\n• Police: 100\n• Fire: 101\n• Ambulance: 108\n• Tourist Helpline: 1363\n• Women Helpline: 181",
    ),
    (
        "lost",
        "If you're lost:\n1. Stay calm and stay where you are\n2. Use the panic button if you feel unsafe\n3. Contact local authorities or tourist police\n4. Use GPS to share your location\n5. Ask for help from official tourist centers",
    ),
    (
        "health",
        "For health emergencies:\n1. Call 108 for ambulance\n2. Visit nearest hospital or clinic\n3. Contact your travel insurance provider\n4. Keep your medical documents handy\n5. Inform your emergency contacts",
    ),
    (
        "safety",
        "Safety tips:\n1. Stay in well-lit areas\n2. Keep documents secure\n3. Inform someone about your whereabouts\n4. Trust your instincts\n5. Use official transportation",
    ),
    (
        "help",
        "I can help you with:\n- Emergency procedures\n- Safety tips\n- Local information\n- Navigation assistance\n- Contact emergency services",
    ),
    (
        "location",
        "Your current location is being tracked for safety. If you feel unsafe, use the panic button or contact local authorities at 112.",
    ),
    (
        "police",
        "To contact police:\n- Emergency: 112\n- Tourist Police: 1363\n- Use the panic button for immediate assistance",
    ),
];

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ChatbotRequest {
    #[validate(length(min = 1, max = 2000))]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChatbotReply {
    pub response: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Clone)]
pub struct Chatbot {
    responses: IndexMap<String, String>,
    fallback: String,
}

impl Default for Chatbot {
    fn default() -> Self {
        Self::new()
    }
}

impl Chatbot {
    /// Assistant with the built-in safety table
    pub fn new() -> Self {
        Self::with_table(RESPONSES, DEFAULT_REPLY)
    }

    /// Assistant with a custom ordered table
    pub fn with_table<I, K, V>(table: I, fallback: &str) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            responses: table
                .into_iter()
                .map(|(k, v)| (k.into().to_lowercase(), v.into()))
                .collect(),
            fallback: fallback.to_string(),
        }
    }

    pub fn respond(&self, message: &str) -> &str {
        let lower = message.to_lowercase();
        self.responses
            .iter()
            .find(|(keyword, _)| lower.contains(keyword.as_str()))
            .map(|(_, reply)| reply.as_str())
            .unwrap_or(&self.fallback)
    }

    pub fn reply(&self, message: &str) -> ChatbotReply {
        ChatbotReply {
            response: self.respond(message).to_string(),
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_match_wins() {
        let bot = Chatbot::new();
        // "local emergency" also contains "emergency", which comes first
        assert!(bot.respond("Local EMERGENCY numbers").starts_with("In case of emergency"));
        assert!(bot.respond("Give me safety tips").starts_with("Safety tips for tourists"));
        assert!(bot.respond("I'm lost, help me").starts_with("If you're lost"));
        assert!(bot.respond("where are the police?").starts_with("To contact police"));
    }

    #[test]
    fn test_default_reply() {
        let bot = Chatbot::new();
        assert_eq!(bot.respond("what's the weather like"), DEFAULT_REPLY);
        assert_eq!(bot.respond(""), DEFAULT_REPLY);
    }

    #[test]
    fn test_custom_table() {
        let bot = Chatbot::with_table([("Hello", "hi there")], "?");
        assert_eq!(bot.respond("hello bot"), "hi there");
        assert_eq!(bot.respond("bye"), "?");
    }
}
