//! Keyword based mood detection for conversation text.

use std::fmt;

/// Emotional state shown by the avatar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MoodTag {
    #[default]
    Idle,
    Happy,
    Excited,
    Sad,
    Thinking,
    Confused,
    Talking,
}

impl MoodTag {
    pub const ALL: [MoodTag; 7] = [
        MoodTag::Idle,
        MoodTag::Happy,
        MoodTag::Excited,
        MoodTag::Sad,
        MoodTag::Thinking,
        MoodTag::Confused,
        MoodTag::Talking,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MoodTag::Idle => "idle",
            MoodTag::Happy => "happy",
            MoodTag::Excited => "excited",
            MoodTag::Sad => "sad",
            MoodTag::Thinking => "thinking",
            MoodTag::Confused => "confused",
            MoodTag::Talking => "talking",
        }
    }

    /// The avatar never looks idle while a reply is pending.
    pub fn or_thinking(self) -> MoodTag {
        match self {
            MoodTag::Idle => MoodTag::Thinking,
            other => other,
        }
    }
}

impl fmt::Display for MoodTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const EXCITED_WORDS: &[&str] = &["wow", "amazing", "fantastic", "awesome!"];
const HAPPY_WORDS: &[&str] = &[
    "love", "like", "awesome", "great", "happy", "thanks", "cool", "amazing",
];
const SAD_WORDS: &[&str] = &["sad", "no", "bad", "hate", "problem", "angry"];

/// Classify free-form text into a mood.
///
/// Categories are checked in priority order (excited, happy, sad) using
/// substring containment on the lower-cased text, so `"know"` counts as a
/// sad keyword. Text without any keyword is `Thinking` when it asks a
/// question and `Idle` otherwise.
pub fn classify(text: &str) -> MoodTag {
    let lower = text.to_lowercase();
    let contains_any = |words: &[&str]| words.iter().any(|word| lower.contains(word));

    if contains_any(EXCITED_WORDS) {
        MoodTag::Excited
    } else if contains_any(HAPPY_WORDS) {
        MoodTag::Happy
    } else if contains_any(SAD_WORDS) {
        MoodTag::Sad
    } else if text.contains('?') {
        MoodTag::Thinking
    } else {
        MoodTag::Idle
    }
}
