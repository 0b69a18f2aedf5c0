mod exchange;
mod input;
mod transcript;

use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::App;
use crate::core::emotion::MoodTag;
use crate::core::gateway::Reply;
use crate::core::message::Turn;

#[derive(Debug)]
pub enum AppAction {
    SubmitMessage {
        message: String,
    },
    SelectStarter {
        index: usize,
    },
    LoadHistory,
    ReplyReceived {
        exchange_id: u64,
        reply: Reply,
    },
    SettleMood {
        exchange_id: u64,
        mood: MoodTag,
    },
    ClickAvatar,
    SelectPreviousReply,
    SelectNextReply,
    CopySelectedReply,
    CopyFinished {
        index: usize,
        result: Result<(), String>,
    },
    ScrollUp {
        lines: u16,
    },
    ScrollDown {
        lines: u16,
    },
    Quit,
}

#[derive(Clone)]
pub struct AppActionDispatcher {
    tx: mpsc::UnboundedSender<AppAction>,
}

impl AppActionDispatcher {
    pub fn new(tx: mpsc::UnboundedSender<AppAction>) -> Self {
        Self { tx }
    }

    pub fn dispatch(&self, action: AppAction) {
        let _ = self.tx.send(action);
    }
}

#[derive(Debug)]
pub enum AppCommand {
    RequestReply {
        exchange_id: u64,
        history: Vec<Turn>,
    },
    ScheduleMood {
        exchange_id: u64,
        mood: MoodTag,
        delay: Duration,
        cancel: CancellationToken,
    },
    CopyToClipboard {
        index: usize,
        text: String,
    },
}

pub fn apply_actions(
    app: &mut App,
    actions: impl IntoIterator<Item = AppAction>,
) -> Vec<AppCommand> {
    let mut commands = Vec::new();
    for action in actions {
        if let Some(cmd) = apply_action(app, action) {
            commands.push(cmd);
        }
    }
    commands
}

pub fn apply_action(app: &mut App, action: AppAction) -> Option<AppCommand> {
    match action {
        AppAction::SubmitMessage { .. }
        | AppAction::SelectStarter { .. }
        | AppAction::LoadHistory => input::handle_input_action(app, action),

        AppAction::ReplyReceived { .. }
        | AppAction::SettleMood { .. }
        | AppAction::ClickAvatar => exchange::handle_exchange_action(app, action),

        AppAction::SelectPreviousReply
        | AppAction::SelectNextReply
        | AppAction::CopySelectedReply
        | AppAction::CopyFinished { .. }
        | AppAction::ScrollUp { .. }
        | AppAction::ScrollDown { .. } => transcript::handle_transcript_action(app, action),

        AppAction::Quit => {
            app.cancel_pending_mood();
            app.ui.exit_requested = true;
            None
        }
    }
}
