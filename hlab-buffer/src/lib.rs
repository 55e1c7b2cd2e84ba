use message::BufferMessage;
use model::TextBuffer;
use ratatui::{prelude::Rect, Frame};

pub mod message;
pub mod model;
mod update;
mod view;

pub fn update(buffer: &mut TextBuffer, messages: Vec<&BufferMessage>) {
    for message in messages {
        update::update_buffer(buffer, message);
    }
}

pub fn view(buffer: &TextBuffer, title: &str, focused: bool, frame: &mut Frame, rect: Rect) {
    view::view(buffer, title, focused, frame, rect)
}
