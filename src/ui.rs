pub mod theme;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::metrics::Metrics;
use crate::session::{RenderProjection, Status};
pub use theme::Theme;

const HORIZONTAL_MARGIN: u16 = 5;

pub const MISTAKE_HINT: &str = "Incorrect key! Try again.";
pub const TITLE: &str = "🎉 Congrats! 🎉";
pub const SUBTITLE: &str = "You've completed the sentence.";

/// Renders one frame of a session
pub struct SessionView<'a> {
    projection: RenderProjection<'a>,
    theme: &'a Theme,
}

impl<'a> SessionView<'a> {
    pub fn new(projection: RenderProjection<'a>, theme: &'a Theme) -> Self {
        Self { projection, theme }
    }
}

impl Widget for SessionView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match (self.projection.status, self.projection.metrics) {
            (Status::Finished, Some(metrics)) => render_summary(metrics, self.theme, area, buf),
            _ => render_prompt(&self.projection, self.theme, area, buf),
        }
    }
}

fn render_prompt(p: &RenderProjection, theme: &Theme, area: Rect, buf: &mut Buffer) {
    let text: String = p.target.iter().collect();
    let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);

    let prompt_occupied_lines = if text.width() <= max_chars_per_line as usize {
        1
    } else {
        // one spare line for word wrapping slack
        ((text.width() as f64 / max_chars_per_line as f64).ceil() + 1.0) as u16
    };
    let hint_lines = if p.mistake_active { 2 } else { 0 };
    let padding = area
        .height
        .saturating_sub(prompt_occupied_lines + hint_lines)
        / 2;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Length(padding),
            Constraint::Length(prompt_occupied_lines),
            Constraint::Length(hint_lines),
            Constraint::Min(0),
        ])
        .split(area);

    let spans = p
        .target
        .iter()
        .enumerate()
        .map(|(idx, &c)| {
            if idx < p.cursor {
                Span::styled(c.to_string(), theme.correct)
            } else if idx == p.cursor && p.mistake_active {
                let shown = match c {
                    ' ' => "·".to_owned(),
                    c => c.to_string(),
                };
                Span::styled(shown, theme.error)
            } else {
                Span::styled(c.to_string(), theme.pending)
            }
        })
        .collect::<Vec<Span>>();

    Paragraph::new(Line::from(spans))
        .alignment(if prompt_occupied_lines == 1 {
            Alignment::Center
        } else {
            Alignment::Left
        })
        .wrap(Wrap { trim: true })
        .render(chunks[1], buf);

    if p.mistake_active {
        Paragraph::new(vec![Line::default(), Line::from(MISTAKE_HINT)])
            .style(theme.hint)
            .alignment(Alignment::Center)
            .render(chunks[2], buf);
    }
}

fn render_summary(metrics: Metrics, theme: &Theme, area: Rect, buf: &mut Buffer) {
    let wpm = format!("WPM: {:.0}", metrics.wpm);
    let acc = format!("Accuracy: {}%", metrics.accuracy);

    let rows = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(3),
    ])
    .flex(Flex::Center)
    .split(area);

    Paragraph::new(vec![Line::from(TITLE), Line::from(SUBTITLE)])
        .style(theme.title)
        .alignment(Alignment::Center)
        .render(rows[0], buf);

    render_boxed(&wpm, theme.wpm, theme, rows[2], buf);
    render_boxed(&acc, theme.accuracy, theme, rows[4], buf);
}

fn render_boxed(text: &str, style: Style, theme: &Theme, row: Rect, buf: &mut Buffer) {
    // borders plus one column of padding each side
    let box_width = text.width() as u16 + 4;
    let [cell] = Layout::horizontal([Constraint::Length(box_width)])
        .flex(Flex::Center)
        .areas(row);

    Paragraph::new(Span::styled(text.to_owned(), style))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(theme.border),
        )
        .render(cell, buf);
}
