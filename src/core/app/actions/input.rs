use tracing::{debug, info};

use super::{App, AppAction, AppCommand};
use crate::core::constants::{STARTER_PROMPTS, WELCOME_REPLY};
use crate::core::emotion::classify;
use crate::core::message::Turn;

pub(super) fn handle_input_action(app: &mut App, action: AppAction) -> Option<AppCommand> {
    match action {
        AppAction::SubmitMessage { message } => submit_message(app, &message),
        AppAction::SelectStarter { index } => select_starter(app, index),
        AppAction::LoadHistory => {
            load_history(app);
            None
        }
        _ => unreachable!("non-input action routed to input handler"),
    }
}

/// Entry point for text typed into the input box.
///
/// Blank text and anything sent while a reply is pending are dropped without
/// touching state.
pub(super) fn submit_message(app: &mut App, raw: &str) -> Option<AppCommand> {
    let message = raw.trim();
    if message.is_empty() || !app.ui.input_enabled {
        return None;
    }
    app.ui.clear_input();
    app.ui.hide_affordances();

    if app.session.is_onboarding() {
        complete_onboarding(app, message.to_string());
        None
    } else {
        Some(start_exchange(app, message.to_string()))
    }
}

fn select_starter(app: &mut App, index: usize) -> Option<AppCommand> {
    if !app.ui.starters_visible || !app.ui.input_enabled {
        return None;
    }
    let prompt = STARTER_PROMPTS.get(index)?;
    Some(start_exchange(app, (*prompt).to_string()))
}

/// The first answer becomes the user's name verbatim; no request is made.
fn complete_onboarding(app: &mut App, name: String) {
    info!("captured user name");
    app.session.set_user_name(name.clone());
    app.persist();

    app.push_turn(Turn::user(name));
    app.push_turn(Turn::model(WELCOME_REPLY));
    app.persist();
}

pub(super) fn start_exchange(app: &mut App, message: String) -> AppCommand {
    app.cancel_pending_mood();
    app.ui.hide_affordances();
    app.push_turn(Turn::user(message.clone()));
    app.ui.set_busy(true);
    app.session.set_mood(classify(&message).or_thinking());

    let exchange_id = app.begin_exchange(message);
    debug!(exchange_id, turns = app.session.conversation().len(), "requesting reply");
    AppCommand::RequestReply {
        exchange_id,
        history: app.session.conversation().to_persistable(),
    }
}

fn load_history(app: &mut App) {
    if !app.ui.load_history_visible {
        return;
    }
    let restored = app.persistence().load_history();
    if let Some(turns) = restored {
        info!(turns = turns.len(), "restored previous session");
        app.session.restore(turns);
        app.ui.render_all(app.session.conversation().turns());
    }
    app.ui.hide_affordances();
}
