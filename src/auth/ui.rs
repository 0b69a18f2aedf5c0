use std::fmt;
use std::io::{self, Write};

use ratatui::crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::crossterm::terminal::{disable_raw_mode, enable_raw_mode};

const MASKED_INPUT_PROMPT: &str = "API key: ";
/// Characters of the key left readable at the end of the masked echo.
const REVEAL_TAIL: usize = 4;

#[derive(Debug)]
pub struct UiError {
    message: String,
}

impl UiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for UiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for UiError {}

impl From<io::Error> for UiError {
    fn from(err: io::Error) -> Self {
        UiError::new(err.to_string())
    }
}

pub fn prompt_api_key() -> Result<String, UiError> {
    let token = prompt_masked_input()?;
    if token.is_empty() {
        return Err(UiError::new("API key cannot be empty"));
    }
    Ok(token)
}

pub fn prompt_confirmation(question: &str) -> Result<bool, UiError> {
    print!("{question} [y/N]: ");
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(parse_confirmation(&input))
}

fn parse_confirmation(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Read a secret in raw mode, echoing only the last few characters.
fn prompt_masked_input() -> Result<String, UiError> {
    enable_raw_mode()?;
    let result = read_masked();
    let restored = disable_raw_mode();
    println!();
    restored?;
    result
}

fn read_masked() -> Result<String, UiError> {
    let mut value = String::new();
    redraw_masked(&value)?;
    loop {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        match key.code {
            KeyCode::Enter => return Ok(value.trim().to_string()),
            KeyCode::Esc => return Err(UiError::new("Cancelled")),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Err(UiError::new("Cancelled"));
            }
            KeyCode::Backspace => {
                value.pop();
            }
            KeyCode::Char(ch) => value.push(ch),
            _ => continue,
        }
        redraw_masked(&value)?;
    }
}

fn redraw_masked(value: &str) -> io::Result<()> {
    let mut stdout = io::stdout();
    write!(stdout, "\r\x1b[2K{MASKED_INPUT_PROMPT}{}", mask(value))?;
    stdout.flush()
}

fn mask(value: &str) -> String {
    let len = value.chars().count();
    let hidden = len.saturating_sub(REVEAL_TAIL);
    value
        .chars()
        .enumerate()
        .map(|(i, ch)| if i < hidden { '•' } else { ch })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_reveals_only_the_tail() {
        assert_eq!(mask("abcdefgh"), "••••efgh");
        assert_eq!(mask("abc"), "abc");
    }

    #[test]
    fn only_explicit_yes_confirms() {
        assert!(parse_confirmation("y\n"));
        assert!(parse_confirmation(" YES "));
        assert!(!parse_confirmation(""));
        assert!(!parse_confirmation("nope"));
    }
}
