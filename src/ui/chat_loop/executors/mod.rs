//! Runs [`AppCommand`]s off the UI thread and reports back with an action.

use std::sync::Arc;

use tokio::time::sleep;
use tracing::debug;

use crate::core::app::{AppAction, AppActionDispatcher, AppCommand};
use crate::core::gateway::{request_reply, ResponseGateway};
use crate::utils::clipboard::copy_to_clipboard;

/// Execute `command` to completion.
///
/// Returns `None` when a scheduled mood update was cancelled before firing.
pub async fn execute_command(
    command: AppCommand,
    gateway: Arc<dyn ResponseGateway>,
) -> Option<AppAction> {
    match command {
        AppCommand::RequestReply {
            exchange_id,
            history,
        } => {
            let reply = request_reply(gateway.as_ref(), &history).await;
            Some(AppAction::ReplyReceived { exchange_id, reply })
        }
        AppCommand::ScheduleMood {
            exchange_id,
            mood,
            delay,
            cancel,
        } => {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    debug!(exchange_id, "mood update cancelled");
                    None
                }
                _ = sleep(delay) => Some(AppAction::SettleMood { exchange_id, mood }),
            }
        }
        AppCommand::CopyToClipboard { index, text } => {
            let result = tokio::task::spawn_blocking(move || copy_to_clipboard(&text))
                .await
                .unwrap_or_else(|err| Err(format!("Clipboard task failed: {err}")));
            Some(AppAction::CopyFinished { index, result })
        }
    }
}

/// Fire-and-forget wrapper used by the chat loop.
pub fn spawn_command(
    command: AppCommand,
    gateway: Arc<dyn ResponseGateway>,
    dispatcher: AppActionDispatcher,
) {
    tokio::spawn(async move {
        if let Some(action) = execute_command(command, gateway).await {
            dispatcher.dispatch(action);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::emotion::MoodTag;
    use crate::core::message::Turn;
    use crate::utils::test_utils::ScriptedGateway;
    use std::time::Duration;
    use tokio_util::sync::CancellationToken;

    #[tokio::test]
    async fn request_reply_reports_generated_text() {
        let gateway = Arc::new(ScriptedGateway::replying("Why did..."));
        let action = execute_command(
            AppCommand::RequestReply {
                exchange_id: 7,
                history: vec![Turn::user("Tell me a joke")],
            },
            gateway.clone(),
        )
        .await;

        match action {
            Some(AppAction::ReplyReceived { exchange_id, reply }) => {
                assert_eq!(exchange_id, 7);
                assert_eq!(reply.text, "Why did...");
                assert_eq!(reply.mood, None);
            }
            _ => panic!("expected a reply action"),
        }
        assert_eq!(gateway.calls(), 1);
    }

    #[tokio::test]
    async fn cancelled_mood_update_never_fires() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let action = execute_command(
            AppCommand::ScheduleMood {
                exchange_id: 1,
                mood: MoodTag::Happy,
                delay: Duration::from_secs(60),
                cancel,
            },
            Arc::new(ScriptedGateway::default()),
        )
        .await;
        assert!(action.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn mood_update_fires_after_delay() {
        let action = execute_command(
            AppCommand::ScheduleMood {
                exchange_id: 3,
                mood: MoodTag::Thinking,
                delay: Duration::from_millis(1500),
                cancel: CancellationToken::new(),
            },
            Arc::new(ScriptedGateway::default()),
        )
        .await;
        assert!(matches!(
            action,
            Some(AppAction::SettleMood {
                exchange_id: 3,
                mood: MoodTag::Thinking
            })
        ));
    }
}
