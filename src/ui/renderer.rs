use std::time::Instant;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::core::app::App;
use crate::core::constants::STARTER_PROMPTS;
use crate::ui::avatar::{avatar_widget, mood_color, AVATAR_HEIGHT, AVATAR_WIDTH};
use crate::ui::layout::layout_transcript;

const SPINNER: [&str; 4] = ["○", "◔", "◑", "◕"];

/// Draw one frame. Returns the avatar's area so mouse clicks can be hit-tested.
pub fn ui(f: &mut Frame, app: &mut App) -> Rect {
    let now = Instant::now();
    let affordance_height = u16::from(app.ui.starters_visible || app.ui.load_history_visible);
    let input_height = (app.ui.textarea().lines().len() as u16).clamp(1, 5) + 2;

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(AVATAR_HEIGHT),
            Constraint::Min(3),
            Constraint::Length(affordance_height),
            Constraint::Length(input_height),
        ])
        .split(f.area());

    let header = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(AVATAR_WIDTH), Constraint::Min(0)])
        .split(rows[0]);

    let avatar = app.session.avatar();
    f.render_widget(
        avatar_widget(avatar.descriptor(), avatar.is_pulsing(now)),
        header[0],
    );
    f.render_widget(header_panel(app), header[1]);

    render_transcript(f, app, rows[1], now);

    if affordance_height > 0 {
        f.render_widget(Paragraph::new(affordance_line(app)), rows[2]);
    }

    render_input(f, app, rows[3], now);
    header[0]
}

fn header_panel(app: &App) -> Paragraph<'static> {
    let mood = app.session.mood();
    let mut lines = vec![
        Line::from(Span::styled(
            format!("{} v{}", app.assistant_name, env!("CARGO_PKG_VERSION")),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::raw("Feeling "),
            Span::styled(mood.as_str().to_string(), Style::default().fg(mood_color(mood))),
        ]),
    ];
    if let Some(name) = app.session.user_name() {
        lines.push(Line::from(format!("Chatting with {name}")));
    }
    lines.push(Line::from(Span::styled(
        "Ctrl+P pet · Alt+↑/↓ select reply · Ctrl+Y copy · Ctrl+C quit",
        Style::default().fg(Color::DarkGray),
    )));
    if let Some(status) = &app.ui.status {
        lines.push(Line::from(Span::styled(
            status.clone(),
            Style::default().fg(Color::Red),
        )));
    }
    Paragraph::new(lines).block(Block::default().borders(Borders::NONE))
}

fn render_transcript(f: &mut Frame, app: &mut App, area: Rect, now: Instant) {
    let layout = layout_transcript(
        &app.ui,
        &app.assistant_name,
        app.session.user_name(),
        area.width as usize,
        now,
    );

    let visible = area.height;
    let total = layout.line_count().min(u16::MAX as usize) as u16;
    let max_offset = total.saturating_sub(visible);
    if app.ui.auto_scroll || app.ui.scroll_offset >= max_offset {
        app.ui.scroll_offset = max_offset;
        app.ui.auto_scroll = true;
    }

    let paragraph = Paragraph::new(layout.lines).scroll((app.ui.scroll_offset, 0));
    f.render_widget(paragraph, area);
}

fn affordance_line(app: &App) -> Line<'static> {
    let key = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let mut spans = Vec::new();
    if app.ui.starters_visible {
        for (index, prompt) in STARTER_PROMPTS.iter().enumerate() {
            spans.push(Span::styled(format!("Alt+{} ", index + 1), key));
            spans.push(Span::raw(format!("{prompt}   ")));
        }
    }
    if app.ui.load_history_visible {
        spans.push(Span::styled("Ctrl+L ", key));
        spans.push(Span::raw("Load previous session"));
    }
    Line::from(spans)
}

fn render_input(f: &mut Frame, app: &mut App, area: Rect, now: Instant) {
    let title = match app.ui.loading_since {
        Some(since) if app.ui.loading => {
            let frame = (now.duration_since(since).as_millis() / 150) as usize % SPINNER.len();
            format!("{} {} is thinking…", SPINNER[frame], app.assistant_name)
        }
        _ if app.session.is_onboarding() => "Tell me your name (Enter to send)".to_string(),
        _ => "Type your message (Enter to send, Alt+Enter for new line)".to_string(),
    };
    let border = if app.ui.input_enabled {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(title);

    app.ui.apply_textarea_edit(|textarea| textarea.set_block(block));
    f.render_widget(app.ui.textarea(), area);
}
