//! Headless controller for the chat screen.
//!
//! [`App`] owns the [`ChatSession`], the [`UiState`] that the renderer reads,
//! and the persistence adapter. Input arrives as [`AppAction`]s; anything that
//! has to leave the UI thread (the generation request, the deferred mood
//! update, clipboard access) comes back out as an [`AppCommand`] for the chat
//! loop to execute.

use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::core::constants::{onboarding_greeting, returning_greeting};
use crate::core::message::Turn;
use crate::core::persistence::PersistenceAdapter;

pub mod actions;
pub mod session;
pub mod ui_state;

pub use actions::{apply_action, apply_actions, AppAction, AppActionDispatcher, AppCommand};
pub use session::ChatSession;
pub use ui_state::{TranscriptEntry, UiState};

/// Request currently awaiting a reply.
#[derive(Debug, Clone)]
pub struct InFlightExchange {
    pub id: u64,
    pub user_input: String,
}

/// Deferred mood update that has not fired yet.
#[derive(Debug, Clone)]
pub struct PendingMood {
    pub exchange_id: u64,
    pub cancel: CancellationToken,
}

pub struct App {
    pub session: ChatSession,
    pub ui: UiState,
    pub assistant_name: String,
    persistence: PersistenceAdapter,
    in_flight: Option<InFlightExchange>,
    pending_mood: Option<PendingMood>,
    next_exchange_id: u64,
}

impl App {
    /// Build the startup screen from whatever is persisted.
    ///
    /// The in-memory conversation always starts with a single greeting turn;
    /// stored history is only offered, never loaded implicitly.
    pub fn new(persistence: PersistenceAdapter, assistant_name: impl Into<String>) -> Self {
        let assistant_name = assistant_name.into();
        let user_name = persistence.load_user_name();
        let mut ui = UiState::new();
        ui.load_history_visible = persistence.has_history();

        let greeting = match &user_name {
            None => onboarding_greeting(&assistant_name),
            Some(name) => {
                ui.starters_visible = true;
                returning_greeting(name)
            }
        };
        info!(
            returning = user_name.is_some(),
            history_offered = ui.load_history_visible,
            "starting chat session"
        );

        let mut app = Self {
            session: ChatSession::new(user_name),
            ui,
            assistant_name,
            persistence,
            in_flight: None,
            pending_mood: None,
            next_exchange_id: 0,
        };
        app.push_turn(Turn::model(greeting));
        app
    }

    pub fn persistence(&self) -> &PersistenceAdapter {
        &self.persistence
    }

    pub fn in_flight(&self) -> Option<&InFlightExchange> {
        self.in_flight.as_ref()
    }

    pub fn pending_mood(&self) -> Option<&PendingMood> {
        self.pending_mood.as_ref()
    }

    /// Append to the conversation and render the bubble.
    pub(crate) fn push_turn(&mut self, turn: Turn) {
        self.ui.push_entry(&turn);
        self.session.append(turn);
    }

    /// Overwrite the stored snapshot with the current session.
    pub(crate) fn persist(&mut self) {
        self.persistence.save(
            self.session.user_name(),
            self.session.conversation().turns(),
        );
    }

    pub(crate) fn begin_exchange(&mut self, user_input: String) -> u64 {
        self.next_exchange_id += 1;
        let id = self.next_exchange_id;
        self.in_flight = Some(InFlightExchange { id, user_input });
        id
    }

    pub(crate) fn finish_exchange(&mut self, id: u64) -> Option<InFlightExchange> {
        match &self.in_flight {
            Some(exchange) if exchange.id == id => self.in_flight.take(),
            _ => None,
        }
    }

    /// Replace any scheduled mood update with a fresh one for `exchange_id`.
    pub(crate) fn schedule_mood(&mut self, exchange_id: u64) -> CancellationToken {
        self.cancel_pending_mood();
        let cancel = CancellationToken::new();
        self.pending_mood = Some(PendingMood {
            exchange_id,
            cancel: cancel.clone(),
        });
        cancel
    }

    pub(crate) fn cancel_pending_mood(&mut self) {
        if let Some(pending) = self.pending_mood.take() {
            pending.cancel.cancel();
        }
    }

    /// Claim the pending mood update if it still belongs to `exchange_id`.
    pub(crate) fn take_pending_mood(&mut self, exchange_id: u64) -> bool {
        match &self.pending_mood {
            Some(pending) if pending.exchange_id == exchange_id => {
                self.pending_mood = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests;
