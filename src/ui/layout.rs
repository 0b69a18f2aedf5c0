//! Flattens the transcript into wrapped lines for the chat pane.

use std::time::Instant;

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthChar;

use crate::core::app::{TranscriptEntry, UiState};
use crate::core::message::TranscriptRole;

/// Lines contributed by one transcript entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EntryLineSpan {
    pub start: usize,
    pub len: usize,
}

#[derive(Clone, Debug, Default)]
pub struct Layout {
    pub lines: Vec<Line<'static>>,
    pub entry_spans: Vec<EntryLineSpan>,
}

impl Layout {
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

/// Lay out every bubble at `width` columns, marking the selected and copied replies.
pub fn layout_transcript(
    ui: &UiState,
    assistant_name: &str,
    user_name: Option<&str>,
    width: usize,
    now: Instant,
) -> Layout {
    let mut layout = Layout::default();
    let body_width = width.saturating_sub(2).max(1);

    for (index, entry) in ui.transcript.iter().enumerate() {
        let start = layout.lines.len();
        if index > 0 {
            layout.lines.push(Line::default());
        }

        let selected = ui.selected_reply == Some(index);
        let copied = ui.is_copied(index, now);
        layout
            .lines
            .push(header_line(entry, assistant_name, user_name, selected, copied));

        let style = body_style(entry.role);
        for row in wrap_text(&entry.text, body_width) {
            layout
                .lines
                .push(Line::from(vec![Span::raw("  "), Span::styled(row, style)]));
        }

        layout.entry_spans.push(EntryLineSpan {
            start,
            len: layout.lines.len() - start,
        });
    }

    layout
}

fn header_line(
    entry: &TranscriptEntry,
    assistant_name: &str,
    user_name: Option<&str>,
    selected: bool,
    copied: bool,
) -> Line<'static> {
    let (speaker, color) = match entry.role {
        TranscriptRole::User => (user_name.unwrap_or("You").to_string(), Color::Cyan),
        TranscriptRole::Model => (assistant_name.to_string(), Color::Green),
    };
    let marker = if selected { "▸ " } else { "" };
    let mut spans = vec![Span::styled(
        format!("{marker}{speaker}"),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )];
    if copied {
        spans.push(Span::styled(
            "  Copied!",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::ITALIC),
        ));
    }
    Line::from(spans)
}

fn body_style(role: TranscriptRole) -> Style {
    match role {
        TranscriptRole::User => Style::default().fg(Color::Cyan),
        TranscriptRole::Model => Style::default(),
    }
}

/// Word-wrap `text` to `width` display columns.
///
/// Embedded newlines are kept. Words wider than the line are split.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();

    for paragraph in text.split('\n') {
        let mut row = String::new();
        let mut row_width = 0;

        for word in paragraph.split_whitespace() {
            let word_width = str_width(word);
            let gap = usize::from(row_width > 0);

            if row_width + gap + word_width <= width {
                if gap == 1 {
                    row.push(' ');
                }
                row.push_str(word);
                row_width += gap + word_width;
                continue;
            }

            if row_width > 0 {
                rows.push(std::mem::take(&mut row));
                row_width = 0;
            }

            if word_width <= width {
                row.push_str(word);
                row_width = word_width;
                continue;
            }

            for ch in word.chars() {
                let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
                if row_width + ch_width > width && row_width > 0 {
                    rows.push(std::mem::take(&mut row));
                    row_width = 0;
                }
                row.push(ch);
                row_width += ch_width;
            }
        }

        rows.push(row);
    }

    rows
}

fn str_width(s: &str) -> usize {
    s.chars()
        .map(|ch| UnicodeWidthChar::width(ch).unwrap_or(0))
        .sum()
}
