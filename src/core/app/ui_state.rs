use std::time::Instant;

use tui_textarea::TextArea;

use crate::core::constants::COPY_FEEDBACK_DURATION;
use crate::core::message::{TranscriptRole, Turn};

/// One rendered bubble in the transcript pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub role: TranscriptRole,
    pub text: String,
}

impl From<&Turn> for TranscriptEntry {
    fn from(turn: &Turn) -> Self {
        Self {
            role: turn.role,
            text: turn.text.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct UiState {
    textarea: TextArea<'static>,
    pub input_enabled: bool,
    pub loading: bool,
    pub loading_since: Option<Instant>,
    pub starters_visible: bool,
    pub load_history_visible: bool,
    pub transcript: Vec<TranscriptEntry>,
    /// Transcript index of the reply targeted by copy.
    pub selected_reply: Option<usize>,
    pub copied: Option<(usize, Instant)>,
    pub status: Option<String>,
    pub scroll_offset: u16,
    pub auto_scroll: bool,
    pub exit_requested: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

impl UiState {
    pub fn new() -> Self {
        Self {
            textarea: TextArea::default(),
            input_enabled: true,
            loading: false,
            loading_since: None,
            starters_visible: false,
            load_history_visible: false,
            transcript: Vec::new(),
            selected_reply: None,
            copied: None,
            status: None,
            scroll_offset: 0,
            auto_scroll: true,
            exit_requested: false,
        }
    }

    pub fn textarea(&self) -> &TextArea<'static> {
        &self.textarea
    }

    pub fn apply_textarea_edit<F>(&mut self, f: F)
    where
        F: FnOnce(&mut TextArea<'static>),
    {
        f(&mut self.textarea);
    }

    pub fn input_text(&self) -> String {
        self.textarea.lines().join("\n")
    }

    pub fn clear_input(&mut self) {
        self.textarea = TextArea::default();
    }

    /// Starters and the restore affordance go away once the user acts.
    pub fn hide_affordances(&mut self) {
        self.starters_visible = false;
        self.load_history_visible = false;
    }

    pub fn set_busy(&mut self, busy: bool) {
        self.input_enabled = !busy;
        self.loading = busy;
        self.loading_since = busy.then(Instant::now);
    }

    pub fn push_entry(&mut self, turn: &Turn) {
        self.transcript.push(TranscriptEntry::from(turn));
        self.auto_scroll = true;
    }

    /// Drop every bubble and render `turns` from scratch.
    pub fn render_all(&mut self, turns: &[Turn]) {
        self.transcript = turns.iter().map(TranscriptEntry::from).collect();
        self.selected_reply = None;
        self.copied = None;
        self.auto_scroll = true;
    }

    fn reply_indices(&self) -> Vec<usize> {
        self.transcript
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.role.is_model())
            .map(|(index, _)| index)
            .collect()
    }

    /// Explicit selection, or the latest reply.
    pub fn copy_target(&self) -> Option<usize> {
        self.selected_reply
            .or_else(|| self.reply_indices().last().copied())
    }

    pub fn select_previous_reply(&mut self) {
        let replies = self.reply_indices();
        let next = match self.copy_target() {
            Some(current) => replies.iter().rev().find(|&&i| i < current).copied(),
            None => None,
        };
        if let Some(index) = next.or_else(|| replies.first().copied()) {
            self.selected_reply = Some(index);
        }
    }

    pub fn select_next_reply(&mut self) {
        let replies = self.reply_indices();
        if let Some(current) = self.selected_reply {
            self.selected_reply = replies.iter().find(|&&i| i > current).copied();
        }
    }

    pub fn is_copied(&self, index: usize, now: Instant) -> bool {
        self.copied.is_some_and(|(copied_index, at)| {
            copied_index == index && now.duration_since(at) < COPY_FEEDBACK_DURATION
        })
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.auto_scroll = false;
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll_offset = self.scroll_offset.saturating_add(lines);
    }
}
