//! Draws the avatar face from a [`RenderDescriptor`].

use ratatui::layout::Alignment;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::core::avatar::{EyeShape, RenderDescriptor};
use crate::core::emotion::MoodTag;

/// Rows the avatar panel needs, borders included.
pub const AVATAR_HEIGHT: u16 = 8;
pub const AVATAR_WIDTH: u16 = 17;

pub fn mood_color(mood: MoodTag) -> Color {
    match mood {
        MoodTag::Idle => Color::Cyan,
        MoodTag::Happy => Color::Yellow,
        MoodTag::Excited => Color::Magenta,
        MoodTag::Sad => Color::Blue,
        MoodTag::Thinking => Color::LightBlue,
        MoodTag::Confused => Color::LightRed,
        MoodTag::Talking => Color::Green,
    }
}

fn eye_glyphs(eyes: EyeShape) -> (&'static str, &'static str) {
    match eyes {
        EyeShape::Smiling => ("^", "^"),
        EyeShape::Drooping => ("╥", "╥"),
        EyeShape::Open => ("●", "●"),
    }
}

fn mouth_glyph(mood: MoodTag) -> &'static str {
    match mood {
        MoodTag::Happy | MoodTag::Excited => "◡",
        MoodTag::Sad => "︵",
        MoodTag::Talking => "o",
        MoodTag::Confused => "~",
        MoodTag::Thinking => ".",
        MoodTag::Idle => "‿",
    }
}

/// Face rows, without the surrounding block.
pub fn face_lines(descriptor: &RenderDescriptor) -> Vec<Line<'static>> {
    let color = mood_color(descriptor.mood);
    let face = Style::default().fg(color);
    let (left, right) = eye_glyphs(descriptor.eyes);

    let mut lines = vec![
        Line::from(Span::styled(".-------.", face)),
        Line::from(vec![
            Span::styled("|  ", face),
            Span::styled(left, face.add_modifier(Modifier::BOLD)),
            Span::styled("   ", face),
            Span::styled(right, face.add_modifier(Modifier::BOLD)),
            Span::styled("  |", face),
        ]),
        Line::from(vec![
            Span::styled("|   ", face),
            Span::styled(mouth_glyph(descriptor.mood), face),
            Span::styled("   |", face),
        ]),
        Line::from(Span::styled("'-------'", face)),
    ];
    if descriptor.mood == MoodTag::Thinking {
        lines[0] = Line::from(Span::styled(".-------. ?", face));
    }
    lines
}

pub fn avatar_widget(descriptor: &RenderDescriptor, pulsing: bool) -> Paragraph<'static> {
    let color = mood_color(descriptor.mood);
    let border = if pulsing {
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(if pulsing {
            BorderType::Thick
        } else {
            BorderType::Rounded
        })
        .border_style(border)
        .title_bottom(Line::from(descriptor.mood.as_str()).alignment(Alignment::Center));

    Paragraph::new(face_lines(descriptor))
        .alignment(Alignment::Center)
        .block(block)
}
