use std::time::Instant;

use tracing::debug;

use super::{App, AppAction, AppCommand};
use crate::core::constants::MOOD_SETTLE_DELAY;
use crate::core::emotion::{classify, MoodTag};
use crate::core::gateway::Reply;
use crate::core::message::Turn;

pub(super) fn handle_exchange_action(app: &mut App, action: AppAction) -> Option<AppCommand> {
    match action {
        AppAction::ReplyReceived { exchange_id, reply } => {
            finish_exchange(app, exchange_id, reply)
        }
        AppAction::SettleMood { exchange_id, mood } => {
            if app.take_pending_mood(exchange_id) {
                app.session.set_mood(mood);
            } else {
                debug!(exchange_id, "dropping superseded mood update");
            }
            None
        }
        AppAction::ClickAvatar => {
            app.session.avatar_mut().pulse(Instant::now());
            None
        }
        _ => unreachable!("non-exchange action routed to exchange handler"),
    }
}

fn finish_exchange(app: &mut App, exchange_id: u64, reply: Reply) -> Option<AppCommand> {
    let exchange = app.finish_exchange(exchange_id)?;

    app.ui.loading = false;
    app.ui.loading_since = None;
    app.push_turn(Turn::model(reply.text));
    app.persist();
    app.session.set_mood(reply.mood.unwrap_or(MoodTag::Talking));
    app.ui.input_enabled = true;

    // Settle on the user's sentiment, not the reply's.
    let mood = classify(&exchange.user_input).or_thinking();
    let cancel = app.schedule_mood(exchange_id);
    Some(AppCommand::ScheduleMood {
        exchange_id,
        mood,
        delay: MOOD_SETTLE_DELAY,
        cancel,
    })
}
