use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::{
    error::AppError,
    model::{ConfirmDialog, Model, Page, Snapshot},
    terminal::TerminalWrapper,
};

mod dashboard;
mod dialog;
mod docker;
mod notification;
mod panel;
mod recommendation;
mod statusline;
mod storage;
mod tabs;

pub const BUSY_GLYPH: &str = "⟳";

pub fn render_model(terminal: &mut TerminalWrapper, model: &Model) -> Result<(), AppError> {
    terminal.draw(|frame| {
        let layout = model.layout.clone();

        tabs::view(model, frame, layout.tabs);

        match model.page {
            Page::Dashboard => dashboard::view(model, frame, layout.main),
            Page::Docker => docker::view(model, frame, layout.main),
            Page::Storage => storage::view(model, frame, layout.main),
            Page::Documents => panel::view(model, &model.documents, frame, layout.main),
            Page::Scripts => panel::view(model, &model.scripts, frame, layout.main),
            Page::MediaRequests => {
                panel::view(model, &model.media_requests, frame, layout.main)
            }
            Page::Recommendations => recommendation::view(model, frame, layout.main),
        }

        statusline::view(model, frame, layout.statusline);

        if let ConfirmDialog::Confirming(pending) = &model.dialog {
            dialog::view(pending, frame, layout.main);
        }

        notification::view(&model.notifications, frame, layout.main);
    })
}

pub fn block(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(title.to_owned())
}

/// Draws the loading or failure state of a snapshot. Returns `false` if the
/// snapshot is ready and the caller has to draw the payload.
pub fn snapshot_state<T>(snapshot: &Snapshot<T>, title: &str, frame: &mut Frame, rect: Rect) -> bool {
    if snapshot.payload().is_some() {
        return false;
    }

    let (text, style) = match snapshot.reason() {
        Some(reason) => (format!("Error: {}", reason), Style::default().fg(Color::Red)),
        None => ("Loading...".to_owned(), Style::default().fg(Color::Gray)),
    };

    empty_state(&text, style, title, frame, rect);
    true
}

pub fn empty_state(text: &str, style: Style, title: &str, frame: &mut Frame, rect: Rect) {
    let paragraph = Paragraph::new(text.to_owned())
        .style(style)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(block(title));

    frame.render_widget(paragraph, rect);
}

pub fn usage_color(percent: f64) -> Color {
    if percent > 85.0 {
        Color::Red
    } else if percent > 70.0 {
        Color::Yellow
    } else {
        Color::Green
    }
}
