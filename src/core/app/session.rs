use crate::core::avatar::Avatar;
use crate::core::conversation::Conversation;
use crate::core::emotion::MoodTag;
use crate::core::message::Turn;

/// Per-run conversation state owned by the controller.
///
/// Created at startup, replaced wholesale when a stored session is restored,
/// dropped on exit.
#[derive(Debug, Clone, Default)]
pub struct ChatSession {
    user_name: Option<String>,
    conversation: Conversation,
    avatar: Avatar,
}

impl ChatSession {
    pub fn new(user_name: Option<String>) -> Self {
        Self {
            user_name,
            ..Self::default()
        }
    }

    pub fn user_name(&self) -> Option<&str> {
        self.user_name.as_deref()
    }

    /// Onboarding lasts until the first non-empty answer is captured.
    pub fn is_onboarding(&self) -> bool {
        self.user_name.is_none()
    }

    pub fn set_user_name(&mut self, name: impl Into<String>) {
        self.user_name = Some(name.into());
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn append(&mut self, turn: Turn) {
        self.conversation.append(turn);
    }

    pub fn restore(&mut self, turns: Vec<Turn>) {
        self.conversation.replace_all(turns);
    }

    pub fn avatar(&self) -> &Avatar {
        &self.avatar
    }

    pub fn avatar_mut(&mut self) -> &mut Avatar {
        &mut self.avatar
    }

    pub fn mood(&self) -> MoodTag {
        self.avatar.mood()
    }

    pub fn set_mood(&mut self, mood: MoodTag) -> bool {
        self.avatar.set_state(mood)
    }
}
