use ratatui::{
    prelude::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use crate::model::Model;

pub fn view(model: &Model, frame: &mut Frame, rect: Rect) {
    let mode = Line::from(Span::styled(
        format!(" {} ", model.mode.to_string().to_uppercase()),
        Style::default().fg(Color::Black).bg(Color::Blue),
    ));

    let url = Line::from(Span::styled(
        format!(" {}", model.settings.api_url),
        Style::default().fg(Color::Gray),
    ));

    let sequence = Line::from(Span::styled(
        model.key_sequence.clone(),
        Style::default().fg(Color::Gray),
    ));

    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(mode.width() as u16),
            Constraint::Min(url.width() as u16),
            Constraint::Length(sequence.width() as u16 + 1),
        ])
        .split(rect);

    frame.render_widget(
        Block::default().style(Style::default().bg(Color::Black)),
        rect,
    );

    frame.render_widget(Paragraph::new(mode), layout[0]);
    frame.render_widget(Paragraph::new(url), layout[1]);
    frame.render_widget(Paragraph::new(sequence), layout[2]);
}
