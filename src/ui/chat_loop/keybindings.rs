//! Maps terminal input onto controller actions.
//!
//! Global chords (quit, copy, starters, history) always resolve to an
//! [`AppAction`]. Everything else edits the input box, and only while the
//! box is enabled.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use tui_textarea::Input as TAInput;

use crate::core::app::{App, AppAction};

/// Lines moved by PageUp/PageDown.
const PAGE_LINES: u16 = 10;
/// Lines moved per mouse wheel notch.
const WHEEL_LINES: u16 = 3;

#[derive(Debug)]
pub enum KeyResult {
    /// Hand this action to the controller.
    Dispatch(AppAction),
    /// The input box changed; redraw.
    Edited,
    Ignored,
}

pub fn handle_key_event(app: &mut App, key: KeyEvent) -> KeyResult {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    match key.code {
        KeyCode::Char('c') if ctrl => KeyResult::Dispatch(AppAction::Quit),
        KeyCode::Esc => KeyResult::Dispatch(AppAction::Quit),
        KeyCode::Char('l') if ctrl => KeyResult::Dispatch(AppAction::LoadHistory),
        KeyCode::Char('p') if ctrl => KeyResult::Dispatch(AppAction::ClickAvatar),
        KeyCode::Char('y') if ctrl => KeyResult::Dispatch(AppAction::CopySelectedReply),
        KeyCode::Char(digit @ '1'..='4') if alt => KeyResult::Dispatch(AppAction::SelectStarter {
            index: digit as usize - '1' as usize,
        }),
        KeyCode::Up if alt => KeyResult::Dispatch(AppAction::SelectPreviousReply),
        KeyCode::Down if alt => KeyResult::Dispatch(AppAction::SelectNextReply),
        KeyCode::PageUp => KeyResult::Dispatch(AppAction::ScrollUp { lines: PAGE_LINES }),
        KeyCode::PageDown => KeyResult::Dispatch(AppAction::ScrollDown { lines: PAGE_LINES }),
        KeyCode::Enter if alt => edit_input(app, |app| {
            app.ui.apply_textarea_edit(|ta| ta.insert_newline());
        }),
        KeyCode::Enter => KeyResult::Dispatch(AppAction::SubmitMessage {
            message: app.ui.input_text(),
        }),
        _ => edit_input(app, |app| {
            app.ui.apply_textarea_edit(|ta| {
                ta.input(TAInput::from(key));
            });
        }),
    }
}

pub fn handle_paste(app: &mut App, text: &str) -> KeyResult {
    edit_input(app, |app| {
        app.ui.apply_textarea_edit(|ta| {
            ta.insert_str(text);
        });
    })
}

/// Wheel scrolls the transcript; a left click on the avatar pets it.
pub fn handle_mouse_event(mouse: MouseEvent, avatar_area: Rect) -> Option<AppAction> {
    match mouse.kind {
        MouseEventKind::ScrollUp => Some(AppAction::ScrollUp { lines: WHEEL_LINES }),
        MouseEventKind::ScrollDown => Some(AppAction::ScrollDown { lines: WHEEL_LINES }),
        MouseEventKind::Down(_)
            if avatar_area.contains(Position::new(mouse.column, mouse.row)) =>
        {
            Some(AppAction::ClickAvatar)
        }
        _ => None,
    }
}

fn edit_input(app: &mut App, edit: impl FnOnce(&mut App)) -> KeyResult {
    if !app.ui.input_enabled {
        return KeyResult::Ignored;
    }
    edit(app);
    KeyResult::Edited
}
