use crate::{message::BufferMessage, model::TextBuffer};

mod cursor;
mod modification;

pub use cursor::get_horizontal_index;

pub fn update_buffer(buffer: &mut TextBuffer, message: &BufferMessage) {
    tracing::trace!("handling buffer message: {:?}", message);

    match message {
        BufferMessage::Modification(count, modification) => {
            for _ in 0..*count {
                modification::update(buffer, modification);
            }
        }
        BufferMessage::MoveCursor(count, direction) => {
            for _ in 0..*count {
                cursor::update_by_direction(buffer, direction);
            }
        }
    }
}
