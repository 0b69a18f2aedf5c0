use std::time::Instant;

use tracing::warn;

use super::{App, AppAction, AppCommand};

pub(super) fn handle_transcript_action(app: &mut App, action: AppAction) -> Option<AppCommand> {
    match action {
        AppAction::SelectPreviousReply => {
            app.ui.select_previous_reply();
            None
        }
        AppAction::SelectNextReply => {
            app.ui.select_next_reply();
            None
        }
        AppAction::CopySelectedReply => {
            let index = app.ui.copy_target()?;
            let text = app.ui.transcript.get(index)?.text.clone();
            Some(AppCommand::CopyToClipboard { index, text })
        }
        AppAction::CopyFinished { index, result } => {
            match result {
                Ok(()) => {
                    app.ui.copied = Some((index, Instant::now()));
                    app.ui.status = None;
                }
                Err(err) => {
                    warn!(error = %err, "clipboard copy failed");
                    app.ui.status = Some(err);
                }
            }
            None
        }
        AppAction::ScrollUp { lines } => {
            app.ui.scroll_up(lines);
            None
        }
        AppAction::ScrollDown { lines } => {
            app.ui.scroll_down(lines);
            None
        }
        _ => unreachable!("non-transcript action routed to transcript handler"),
    }
}
