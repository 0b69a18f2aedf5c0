//! Main chat event loop.
//!
//! The loop owns the [`App`]. Terminal events are read on a background task
//! and funnelled through a channel; commands returned by the controller run
//! as spawned tasks that report back through the [`AppActionDispatcher`].

pub mod executors;
mod keybindings;
mod lifecycle;

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use ratatui::crossterm::event::{self, Event, KeyEventKind};
use ratatui::layout::Rect;
use tokio::sync::mpsc;
use tracing::{info, warn};

use self::executors::spawn_command;
use self::keybindings::{handle_key_event, handle_mouse_event, handle_paste, KeyResult};
use self::lifecycle::{restore_terminal, setup_terminal, ChatTerminal};
use crate::core::app::{apply_action, apply_actions, App, AppAction, AppActionDispatcher};
use crate::core::config::data::Config;
use crate::core::gateway::{GeminiGateway, ResponseGateway};
use crate::core::persistence::{FileStore, PersistenceAdapter};
use crate::ui::renderer::ui;

const MAX_FPS: u64 = 30;

#[derive(Debug)]
pub enum UiEvent {
    Crossterm(Event),
}

/// Everything `run_chat` needs from the command line and config.
pub struct ChatOptions {
    pub config: Config,
    pub model: String,
    pub api_key: Option<String>,
}

pub async fn run_chat(options: ChatOptions) -> Result<(), Box<dyn Error>> {
    let ChatOptions {
        config,
        model,
        api_key,
    } = options;

    let persistence = match FileStore::open_default() {
        Some(store) => PersistenceAdapter::new(store),
        None => {
            warn!("no data directory; this session will not be saved");
            PersistenceAdapter::in_memory()
        }
    };
    let gateway: Arc<dyn ResponseGateway> =
        Arc::new(GeminiGateway::from_config(&config, &model, api_key));
    info!(model = %model, "starting chat");

    let app = App::new(persistence, config.assistant_name());
    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, app, gateway).await;
    restore_terminal(&mut terminal)?;
    result
}

fn spawn_event_reader(event_tx: mpsc::UnboundedSender<UiEvent>) -> tokio::task::JoinHandle<()> {
    tokio::task::spawn_blocking(move || loop {
        match event::poll(Duration::from_millis(50)) {
            Ok(true) => match event::read() {
                Ok(ev) => {
                    if event_tx.send(UiEvent::Crossterm(ev)).is_err() {
                        break;
                    }
                }
                Err(_) => continue,
            },
            Ok(false) => {
                if event_tx.is_closed() {
                    break;
                }
            }
            Err(_) => break,
        }
    })
}

async fn event_loop(
    terminal: &mut ChatTerminal,
    mut app: App,
    gateway: Arc<dyn ResponseGateway>,
) -> Result<(), Box<dyn Error>> {
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<AppAction>();
    let dispatcher = AppActionDispatcher::new(action_tx);
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<UiEvent>();
    let reader = spawn_event_reader(event_tx);

    let mut ticker = tokio::time::interval(Duration::from_millis(1000 / MAX_FPS));
    let mut avatar_area = Rect::default();

    loop {
        terminal.draw(|f| avatar_area = ui(f, &mut app))?;
        if app.ui.exit_requested {
            break;
        }

        tokio::select! {
            Some(UiEvent::Crossterm(ev)) = event_rx.recv() => {
                if let Some(action) = translate_event(&mut app, ev, avatar_area) {
                    dispatch_local(&mut app, action, &gateway, &dispatcher);
                }
            }
            Some(action) = action_rx.recv() => {
                let mut pending = vec![action];
                while let Ok(next) = action_rx.try_recv() {
                    pending.push(next);
                }
                for command in apply_actions(&mut app, pending) {
                    spawn_command(command, gateway.clone(), dispatcher.clone());
                }
            }
            // Keeps the spinner, pulse and "Copied!" marker animating.
            _ = ticker.tick() => {}
        }
    }

    drop(event_rx);
    let _ = reader.await;
    Ok(())
}

fn translate_event(app: &mut App, ev: Event, avatar_area: Rect) -> Option<AppAction> {
    match ev {
        Event::Key(key) if key.kind == KeyEventKind::Press => match handle_key_event(app, key) {
            KeyResult::Dispatch(action) => Some(action),
            KeyResult::Edited | KeyResult::Ignored => None,
        },
        Event::Paste(text) => {
            handle_paste(app, &text);
            None
        }
        Event::Mouse(mouse) => handle_mouse_event(mouse, avatar_area),
        _ => None,
    }
}

fn dispatch_local(
    app: &mut App,
    action: AppAction,
    gateway: &Arc<dyn ResponseGateway>,
    dispatcher: &AppActionDispatcher,
) {
    if let Some(command) = apply_action(app, action) {
        spawn_command(command, gateway.clone(), dispatcher.clone());
    }
}
