//! Shared constants used across the application

use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";
pub const DEFAULT_ASSISTANT_NAME: &str = "Lucent";
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a friendly and helpful AI assistant. Keep your answers simple, positive, and very short. Greet the user warmly and be ready to help.";

/// Environment variable consulted for the API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Canned reply to the onboarding answer; never comes from the gateway.
pub const WELCOME_REPLY: &str = "Nice to meet you, How can I help you today?";

/// Substitute reply when the response carried no generated text.
pub const FALLBACK_UNSURE: &str = "I'm not sure how to respond to that.";
/// Substitute reply when the request failed.
pub const FALLBACK_CONNECTION: &str = "Sorry, I'm having trouble connecting right now.";

pub const STARTER_PROMPTS: [&str; 4] = [
    "Tell me a fun fact",
    "Give me a creative idea",
    "Explain a complex topic simply",
    "Tell me a joke",
];

/// Delay before the mood is re-evaluated after a reply lands.
pub const MOOD_SETTLE_DELAY: Duration = Duration::from_millis(1500);

/// How long the "copied" marker stays on a reply.
pub const COPY_FEEDBACK_DURATION: Duration = Duration::from_millis(2000);

pub fn onboarding_greeting(assistant_name: &str) -> String {
    format!("Hello! I'm {assistant_name}. What's your name?")
}

pub fn returning_greeting(user_name: &str) -> String {
    format!("Welcome back, {user_name}! Ask me anything, or load your previous session.")
}
