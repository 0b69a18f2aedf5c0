use std::sync::Arc;

use super::*;
use crate::core::constants::{
    onboarding_greeting, returning_greeting, FALLBACK_CONNECTION, FALLBACK_UNSURE,
    STARTER_PROMPTS, WELCOME_REPLY,
};
use crate::core::emotion::MoodTag;
use crate::core::gateway::GatewayError;
use crate::core::message::{TranscriptRole, Turn};
use crate::ui::chat_loop::executors::execute_command;
use crate::utils::test_utils::{
    create_app_with_history, create_returning_app, create_test_app, create_test_history,
    ScriptedGateway,
};

fn submit(app: &mut App, message: &str) -> Option<AppCommand> {
    apply_action(
        app,
        AppAction::SubmitMessage {
            message: message.to_string(),
        },
    )
}

/// Run a request command against `gateway` and apply the resulting reply.
async fn deliver_reply(
    app: &mut App,
    command: AppCommand,
    gateway: Arc<ScriptedGateway>,
) -> Option<AppCommand> {
    let action = execute_command(command, gateway)
        .await
        .expect("request commands always report back");
    apply_action(app, action)
}

fn schedule_parts(command: Option<AppCommand>) -> (u64, MoodTag) {
    match command {
        Some(AppCommand::ScheduleMood {
            exchange_id, mood, ..
        }) => (exchange_id, mood),
        other => panic!("expected a scheduled mood update, got {other:?}"),
    }
}

#[test]
fn first_run_greets_and_asks_for_a_name() {
    let app = create_test_app();
    assert!(app.session.is_onboarding());
    assert_eq!(
        app.session.conversation().turns(),
        &[Turn::model(onboarding_greeting("Lucent"))]
    );
    assert!(!app.ui.starters_visible);
    assert!(!app.ui.load_history_visible);
    assert_eq!(app.session.mood(), MoodTag::Idle);
}

#[test]
fn returning_user_gets_starters_without_history_button() {
    let app = create_returning_app("Sam");
    assert_eq!(app.session.user_name(), Some("Sam"));
    assert_eq!(
        app.session.conversation().last(),
        Some(&Turn::model(returning_greeting("Sam")))
    );
    assert!(app.ui.starters_visible);
    assert!(!app.ui.load_history_visible);
}

#[test]
fn stored_history_is_offered_but_not_loaded() {
    let app = create_app_with_history("Sam", &create_test_history());
    assert!(app.ui.load_history_visible);
    assert_eq!(app.session.conversation().len(), 1);
}

#[test]
fn blank_submissions_change_nothing() {
    let mut app = create_returning_app("Sam");
    let before = app.session.conversation().clone();

    for blank in ["", "   ", "\n\t"] {
        assert!(submit(&mut app, blank).is_none());
    }

    assert_eq!(app.session.conversation(), &before);
    assert!(app.ui.input_enabled);
    assert!(!app.ui.loading);
    assert!(app.ui.starters_visible);
    assert!(app.in_flight().is_none());
}

#[test]
fn onboarding_captures_name_without_network() {
    let mut app = create_test_app();

    let command = submit(&mut app, "Sam");

    assert!(command.is_none(), "onboarding never requests a reply");
    assert_eq!(app.session.user_name(), Some("Sam"));
    let turns = app.session.conversation().turns();
    assert_eq!(turns.len(), 3);
    assert_eq!(&turns[1..], &[Turn::user("Sam"), Turn::model(WELCOME_REPLY)]);
    assert_eq!(turns[2].text, "Nice to meet you, How can I help you today?");
    assert!(app.ui.input_enabled);

    assert_eq!(app.persistence().load_user_name().as_deref(), Some("Sam"));
    assert_eq!(app.persistence().load_history().as_deref(), Some(turns));
}

#[test]
fn onboarding_name_is_trimmed_but_otherwise_verbatim() {
    let mut app = create_test_app();
    submit(&mut app, "  ??? ");
    assert_eq!(app.session.user_name(), Some("???"));
    assert!(!app.session.is_onboarding());
}

#[tokio::test]
async fn steady_state_exchange_round_trip() {
    let mut app = create_returning_app("Sam");
    let gateway = Arc::new(ScriptedGateway::replying("Why did..."));
    let before = app.session.conversation().len();

    let command = submit(&mut app, "Tell me a joke").expect("request command");

    assert_eq!(app.session.conversation().last(), Some(&Turn::user("Tell me a joke")));
    assert!(!app.ui.input_enabled);
    assert!(app.ui.loading);
    assert!(!app.ui.starters_visible);
    assert_eq!(app.session.mood(), MoodTag::Thinking);

    let schedule = deliver_reply(&mut app, command, gateway.clone()).await;

    assert_eq!(gateway.calls(), 1);
    assert_eq!(
        gateway.last_history().map(|history| history.len()),
        Some(before + 1),
        "the whole conversation is sent"
    );
    let turns = app.session.conversation().turns();
    assert_eq!(turns.len(), before + 2);
    assert_eq!(turns.last(), Some(&Turn::model("Why did...")));
    assert!(app.ui.input_enabled);
    assert!(!app.ui.loading);
    assert_eq!(app.session.mood(), MoodTag::Talking);
    assert_eq!(
        app.persistence().load_history().map(|stored| stored.len()),
        Some(before + 2)
    );

    let (exchange_id, mood) = schedule_parts(schedule);
    assert_eq!(mood, MoodTag::Thinking);
    apply_action(&mut app, AppAction::SettleMood { exchange_id, mood });
    assert_eq!(app.session.mood(), MoodTag::Thinking);
    assert!(app.pending_mood().is_none());
}

#[tokio::test]
async fn settled_mood_comes_from_user_input_not_reply() {
    let mut app = create_returning_app("Sam");
    let gateway = Arc::new(ScriptedGateway::replying("That is sad, no problem"));

    let command = submit(&mut app, "I love this").expect("request command");
    assert_eq!(app.session.mood(), MoodTag::Happy);

    let (_, mood) = schedule_parts(deliver_reply(&mut app, command, gateway).await);
    assert_eq!(mood, MoodTag::Happy);
}

#[tokio::test]
async fn transport_failure_becomes_connection_fallback() {
    let mut app = create_returning_app("Sam");
    let gateway = Arc::new(ScriptedGateway::new([Err(GatewayError::Request(
        "connection refused".to_string(),
    ))]));

    let command = submit(&mut app, "Tell me a joke").expect("request command");
    deliver_reply(&mut app, command, gateway).await;

    assert_eq!(
        app.session.conversation().last(),
        Some(&Turn::model(FALLBACK_CONNECTION))
    );
    assert_eq!(app.session.mood(), MoodTag::Sad);
    assert!(app.ui.input_enabled, "failures hand control back");
}

#[tokio::test]
async fn missing_text_becomes_unsure_fallback() {
    let mut app = create_returning_app("Sam");
    let gateway = Arc::new(ScriptedGateway::new([Err(GatewayError::MissingText)]));

    let command = submit(&mut app, "Tell me a joke").expect("request command");
    deliver_reply(&mut app, command, gateway).await;

    assert_eq!(
        app.session.conversation().last(),
        Some(&Turn::model(FALLBACK_UNSURE))
    );
    assert_eq!(app.session.mood(), MoodTag::Confused);
}

#[test]
fn submissions_are_rejected_while_a_reply_is_pending() {
    let mut app = create_returning_app("Sam");
    submit(&mut app, "first").expect("request command");
    let len = app.session.conversation().len();

    assert!(submit(&mut app, "second").is_none());
    assert!(apply_action(&mut app, AppAction::SelectStarter { index: 0 }).is_none());
    assert_eq!(app.session.conversation().len(), len);
}

#[tokio::test]
async fn newer_submission_supersedes_pending_mood_update() {
    let mut app = create_returning_app("Sam");
    let gateway = Arc::new(ScriptedGateway::new([
        Ok("one".to_string()),
        Ok("two".to_string()),
    ]));

    let first = submit(&mut app, "I love it").expect("request command");
    let (first_id, first_mood) =
        schedule_parts(deliver_reply(&mut app, first, gateway.clone()).await);
    let first_token = app.pending_mood().expect("pending").cancel.clone();

    let second = submit(&mut app, "this is bad").expect("request command");
    assert!(first_token.is_cancelled());
    assert!(app.pending_mood().is_none());

    // A late firing from the first exchange is ignored.
    apply_action(
        &mut app,
        AppAction::SettleMood {
            exchange_id: first_id,
            mood: first_mood,
        },
    );
    assert_eq!(app.session.mood(), MoodTag::Sad);

    let (second_id, second_mood) =
        schedule_parts(deliver_reply(&mut app, second, gateway).await);
    assert_ne!(first_id, second_id);
    apply_action(
        &mut app,
        AppAction::SettleMood {
            exchange_id: second_id,
            mood: second_mood,
        },
    );
    assert_eq!(app.session.mood(), MoodTag::Sad);
}

#[tokio::test]
async fn starter_prompt_goes_straight_to_the_gateway() {
    let mut app = create_returning_app("Sam");
    let gateway = Arc::new(ScriptedGateway::replying("An octopus has three hearts."));

    let command = apply_action(&mut app, AppAction::SelectStarter { index: 0 })
        .expect("request command");
    assert!(!app.ui.starters_visible);
    assert_eq!(
        app.session.conversation().last(),
        Some(&Turn::user(STARTER_PROMPTS[0]))
    );

    deliver_reply(&mut app, command, gateway.clone()).await;
    assert_eq!(gateway.calls(), 1);
}

#[test]
fn hidden_or_unknown_starters_are_ignored() {
    let mut app = create_test_app();
    assert!(apply_action(&mut app, AppAction::SelectStarter { index: 0 }).is_none());

    let mut app = create_returning_app("Sam");
    assert!(apply_action(&mut app, AppAction::SelectStarter { index: 99 }).is_none());
    assert!(app.ui.starters_visible);
}

#[test]
fn restoring_history_renders_every_turn_in_order() {
    let history = create_test_history();
    let mut app = create_app_with_history("Sam", &history);

    let command = apply_action(&mut app, AppAction::LoadHistory);

    assert!(command.is_none(), "restoring never contacts the gateway");
    assert!(app.in_flight().is_none());
    assert_eq!(app.session.conversation().turns(), history.as_slice());
    assert_eq!(app.ui.transcript.len(), history.len());
    for (entry, turn) in app.ui.transcript.iter().zip(&history) {
        assert_eq!(entry.role, turn.role);
        assert_eq!(entry.text, turn.text);
    }
    assert!(!app.ui.load_history_visible);
    assert!(!app.ui.starters_visible);
}

#[test]
fn malformed_history_degrades_to_empty_offer() {
    use crate::core::persistence::{MemoryStore, PersistenceAdapter, CHAT_HISTORY_KEY};

    let store = MemoryStore::with_entries([(CHAT_HISTORY_KEY, "not json")]);
    let app = App::new(PersistenceAdapter::new(store), "Lucent");
    assert!(!app.ui.load_history_visible);
    assert!(app.session.is_onboarding());
}

#[test]
fn copy_targets_latest_reply_and_marks_it() {
    let mut app = create_app_with_history("Sam", &create_test_history());
    apply_action(&mut app, AppAction::LoadHistory);

    match apply_action(&mut app, AppAction::CopySelectedReply) {
        Some(AppCommand::CopyToClipboard { index, text }) => {
            assert_eq!(index, 4);
            assert_eq!(text, "Pretty wild, right?");
        }
        other => panic!("expected copy command, got {other:?}"),
    }

    apply_action(&mut app, AppAction::SelectPreviousReply);
    match apply_action(&mut app, AppAction::CopySelectedReply) {
        Some(AppCommand::CopyToClipboard { index, .. }) => assert_eq!(index, 2),
        other => panic!("expected copy command, got {other:?}"),
    }

    apply_action(
        &mut app,
        AppAction::CopyFinished {
            index: 2,
            result: Ok(()),
        },
    );
    assert!(app.ui.is_copied(2, std::time::Instant::now()));

    apply_action(
        &mut app,
        AppAction::CopyFinished {
            index: 2,
            result: Err("no clipboard".to_string()),
        },
    );
    assert_eq!(app.ui.status.as_deref(), Some("no clipboard"));
}

#[test]
fn clicking_the_avatar_pulses_without_changing_mood() {
    let mut app = create_test_app();
    apply_action(&mut app, AppAction::ClickAvatar);
    assert!(app
        .session
        .avatar()
        .is_pulsing(std::time::Instant::now()));
    assert_eq!(app.session.mood(), MoodTag::Idle);
}

#[test]
fn transcript_mirrors_conversation_roles() {
    let mut app = create_test_app();
    submit(&mut app, "Sam");
    let roles: Vec<_> = app.ui.transcript.iter().map(|entry| entry.role).collect();
    assert_eq!(
        roles,
        [TranscriptRole::Model, TranscriptRole::User, TranscriptRole::Model]
    );
}

#[test]
fn quit_cancels_pending_mood() {
    let mut app = create_returning_app("Sam");
    let token = app.schedule_mood(1);
    apply_action(&mut app, AppAction::Quit);
    assert!(token.is_cancelled());
    assert!(app.ui.exit_requested);
}
