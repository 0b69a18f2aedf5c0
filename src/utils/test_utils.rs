use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::core::app::App;
use crate::core::gateway::{GatewayError, ResponseGateway};
use crate::core::message::Turn;
use crate::core::persistence::{
    MemoryStore, PersistenceAdapter, CHAT_HISTORY_KEY, USER_NAME_KEY,
};

/// Gateway that answers from a script and counts calls.
#[derive(Default)]
pub struct ScriptedGateway {
    replies: Mutex<VecDeque<Result<String, GatewayError>>>,
    calls: AtomicUsize,
    histories: Mutex<Vec<Vec<Turn>>>,
}

impl ScriptedGateway {
    pub fn new(replies: impl IntoIterator<Item = Result<String, GatewayError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            ..Self::default()
        }
    }

    pub fn replying(text: &str) -> Self {
        Self::new([Ok(text.to_string())])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_history(&self) -> Option<Vec<Turn>> {
        self.histories.lock().expect("lock").last().cloned()
    }
}

#[async_trait]
impl ResponseGateway for ScriptedGateway {
    async fn generate(&self, history: &[Turn]) -> Result<String, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.histories.lock().expect("lock").push(history.to_vec());
        self.replies
            .lock()
            .expect("lock")
            .pop_front()
            .unwrap_or(Err(GatewayError::MissingText))
    }
}

pub fn create_test_app() -> App {
    App::new(PersistenceAdapter::in_memory(), "Lucent")
}

pub fn create_returning_app(user_name: &str) -> App {
    let store = MemoryStore::with_entries([(USER_NAME_KEY, user_name)]);
    App::new(PersistenceAdapter::new(store), "Lucent")
}

pub fn create_app_with_history(user_name: &str, turns: &[Turn]) -> App {
    let history = serde_json::to_string(turns).expect("serialize history");
    let store =
        MemoryStore::with_entries([(USER_NAME_KEY, user_name), (CHAT_HISTORY_KEY, history.as_str())]);
    App::new(PersistenceAdapter::new(store), "Lucent")
}

pub fn create_test_history() -> Vec<Turn> {
    vec![
        Turn::model("Welcome back, Sam! Ask me anything, or load your previous session."),
        Turn::user("Tell me a fun fact"),
        Turn::model("Octopuses have three hearts."),
        Turn::user("Wow"),
        Turn::model("Pretty wild, right?"),
    ]
}
