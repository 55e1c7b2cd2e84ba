use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::model::{Level, Notifications};

const WIDTH: u16 = 48;
const HEIGHT: u16 = 3;

/// Stacks the newest notifications upwards from the bottom right corner.
pub fn view(notifications: &Notifications, frame: &mut Frame, rect: Rect) {
    let width = WIDTH.min(rect.width);
    let capacity = usize::from(rect.height / HEIGHT);

    for (offset, notification) in notifications
        .entries
        .iter()
        .rev()
        .take(capacity)
        .enumerate()
    {
        let y = rect.y + rect.height - HEIGHT * (offset as u16 + 1);
        let area = Rect::new(rect.x + rect.width - width, y, width, HEIGHT);

        let color = match notification.level {
            Level::Danger => Color::Red,
            Level::Info => Color::Blue,
            Level::Success => Color::Green,
        };

        let paragraph = Paragraph::new(notification.text.clone())
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color)),
            );

        frame.render_widget(Clear, area);
        frame.render_widget(paragraph, area);
    }
}
