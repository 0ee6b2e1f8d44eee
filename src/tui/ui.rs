use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::core::input::PROMPT;
use crate::core::state::App;

pub const INITIALIZING_TEXT: &str = "initializing...";

/// How the line between transcript and input is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeparatorStyle {
    pub color: Color,
    pub border: BorderType,
}

impl SeparatorStyle {
    pub fn from_index(color: u8) -> Self {
        Self {
            color: Color::Indexed(color),
            border: BorderType::Plain,
        }
    }
}

/// Presentation settings that don't belong in core state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewConfig {
    pub separator: SeparatorStyle,
    pub placeholder: String,
}

/// A top-border-only block: the separator above the input line.
pub fn separator(style: &SeparatorStyle) -> Block<'static> {
    Block::default()
        .borders(Borders::TOP)
        .border_type(style.border)
        .border_style(Style::default().fg(style.color))
}

pub fn draw_ui(frame: &mut Frame, app: &App, view: &ViewConfig) {
    let area = frame.area();
    if !app.is_ready() {
        frame.render_widget(Paragraph::new(INITIALIZING_TEXT), area);
        return;
    }

    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(app.transcript.height), Length(2), Min(0)]);
    let [transcript_area, input_area, _rest] = layout.areas(area);

    draw_transcript(frame, transcript_area, app);
    draw_input(frame, input_area, app, view);
}

fn draw_transcript(frame: &mut Frame, area: Rect, app: &App) {
    let lines: Vec<Line> = app
        .transcript
        .visible_rows()
        .iter()
        .map(|row| Line::raw(row.as_str()))
        .collect();
    frame.render_widget(Paragraph::new(Text::from(lines)), area);
}

fn draw_input(frame: &mut Frame, area: Rect, app: &App, view: &ViewConfig) {
    let block = separator(&view.separator);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let line = if app.input.value().is_empty() {
        Line::from(vec![
            Span::raw(PROMPT),
            Span::styled(
                view.placeholder.as_str(),
                Style::default().add_modifier(Modifier::DIM),
            ),
        ])
    } else {
        let (visible, _) = app.input.visible();
        Line::from(vec![Span::raw(PROMPT), Span::raw(visible)])
    };
    frame.render_widget(Paragraph::new(line), inner);

    if app.input.focused && inner.height > 0 {
        let (_, cursor_col) = app.input.visible();
        let x = inner.x + PROMPT.len() as u16 + cursor_col;
        let x = x.min(inner.right().saturating_sub(1));
        frame.set_cursor_position(Position::new(x, inner.y));
    }
}
