use crate::{
    message::TextModification,
    model::{BufferLine, CursorPosition, TextBuffer},
};

use super::cursor::get_horizontal_index;

pub fn update(buffer: &mut TextBuffer, modification: &TextModification) {
    match modification {
        TextModification::DeleteCharBeforeCursor => {
            let (vertical, index) = match get_cursor_index(buffer) {
                Some(it) => it,
                None => return,
            };

            if index > 0 {
                let line = &mut buffer.lines[vertical];
                let byte_index = line.byte_index(index - 1);
                line.content.remove(byte_index);

                set_absolute(buffer, index - 1);
            } else if vertical > 0 {
                let removed = buffer.lines.remove(vertical);
                let previous = &mut buffer.lines[vertical - 1];
                let joined_at = previous.len();
                previous.content.push_str(&removed.content);

                buffer.cursor.vertical_index = vertical - 1;
                set_absolute(buffer, joined_at);
            }
        }
        TextModification::DeleteCharOnCursor => {
            let (vertical, index) = match get_cursor_index(buffer) {
                Some(it) => it,
                None => return,
            };

            let line_count = buffer.lines.len();
            let line = &mut buffer.lines[vertical];
            if index < line.len() {
                let byte_index = line.byte_index(index);
                line.content.remove(byte_index);
            } else if vertical + 1 < line_count {
                let next = buffer.lines.remove(vertical + 1);
                buffer.lines[vertical].content.push_str(&next.content);
            }
        }
        TextModification::DeleteLine => {
            if buffer.lines.is_empty() {
                return;
            }

            let vertical = buffer.cursor.vertical_index.min(buffer.lines.len() - 1);
            buffer.lines.remove(vertical);
            if buffer.lines.is_empty() || !buffer.multiline {
                buffer.lines.insert(0, BufferLine::default());
            }

            buffer.cursor.vertical_index = vertical.min(buffer.lines.len() - 1);
            set_absolute(buffer, 0);
        }
        TextModification::Insert(raw) => {
            let raw = if buffer.multiline {
                raw.to_owned()
            } else {
                raw.replace(['\n', '\r'], " ")
            };

            if buffer.multiline && raw.contains('\n') {
                for (index, part) in raw.split('\n').enumerate() {
                    if index > 0 {
                        update(buffer, &TextModification::InsertLineBreak);
                    }
                    update(buffer, &TextModification::Insert(part.to_owned()));
                }
                return;
            }

            let (vertical, index) = get_or_create_cursor_index(buffer);
            let line = &mut buffer.lines[vertical];
            let byte_index = line.byte_index(index);
            line.content.insert_str(byte_index, &raw);

            set_absolute(buffer, index + raw.chars().count());
        }
        TextModification::InsertLineBreak => {
            if !buffer.multiline {
                return;
            }

            let (vertical, index) = get_or_create_cursor_index(buffer);
            let line = &mut buffer.lines[vertical];
            let byte_index = line.byte_index(index);
            let rest = line.content.split_off(byte_index);

            buffer.lines.insert(vertical + 1, BufferLine { content: rest });
            buffer.cursor.vertical_index = vertical + 1;
            set_absolute(buffer, 0);
        }
    }
}

fn get_cursor_index(buffer: &TextBuffer) -> Option<(usize, usize)> {
    let vertical = buffer.cursor.vertical_index;
    let line = buffer.lines.get(vertical)?;

    Some((vertical, get_horizontal_index(&buffer.cursor.horizontal_index, line)))
}

fn get_or_create_cursor_index(buffer: &mut TextBuffer) -> (usize, usize) {
    if buffer.lines.is_empty() {
        buffer.lines.push(BufferLine::default());
        buffer.cursor.vertical_index = 0;
    }

    if buffer.cursor.vertical_index >= buffer.lines.len() {
        buffer.cursor.vertical_index = buffer.lines.len() - 1;
    }

    let vertical = buffer.cursor.vertical_index;
    let index = get_horizontal_index(&buffer.cursor.horizontal_index, &buffer.lines[vertical]);

    (vertical, index)
}

fn set_absolute(buffer: &mut TextBuffer, index: usize) {
    buffer.cursor.horizontal_index = CursorPosition::Absolute {
        current: index,
        expanded: index,
    };
}

#[cfg(test)]
mod test {
    use crate::{message::TextModification, model::TextBuffer};

    use super::update;

    #[test]
    fn insert_into_empty_buffer_creates_line() {
        let mut buffer = TextBuffer::new(true);
        update(&mut buffer, &TextModification::Insert("tank".to_owned()));

        assert_eq!(buffer.content(), "tank");
    }

    #[test]
    fn line_break_splits_at_cursor() {
        let mut buffer = TextBuffer::new(true);
        update(&mut buffer, &TextModification::Insert("echo hi".to_owned()));
        buffer.cursor.horizontal_index = crate::model::CursorPosition::Absolute {
            current: 4,
            expanded: 4,
        };
        update(&mut buffer, &TextModification::InsertLineBreak);

        assert_eq!(buffer.content(), "echo\n hi");
        assert_eq!(buffer.cursor.vertical_index, 1);
    }

    #[test]
    fn single_line_ignores_line_breaks() {
        let mut buffer = TextBuffer::new(false);
        update(&mut buffer, &TextModification::Insert("a\nb".to_owned()));
        update(&mut buffer, &TextModification::InsertLineBreak);

        assert_eq!(buffer.content(), "a b");
        assert_eq!(buffer.lines.len(), 1);
    }

    #[test]
    fn pasted_multiline_text_creates_lines() {
        let mut buffer = TextBuffer::new(true);
        update(&mut buffer, &TextModification::Insert("a\nb\nc".to_owned()));

        assert_eq!(buffer.lines.len(), 3);
        assert_eq!(buffer.content(), "a\nb\nc");
    }

    #[test]
    fn backspace_at_line_start_joins_lines() {
        let mut buffer = TextBuffer::with_content("ab\ncd", true);
        buffer.cursor.vertical_index = 1;
        update(&mut buffer, &TextModification::DeleteCharBeforeCursor);

        assert_eq!(buffer.content(), "abcd");
        assert_eq!(
            buffer.cursor.horizontal_index,
            crate::model::CursorPosition::Absolute {
                current: 2,
                expanded: 2
            }
        );
    }

    #[test]
    fn backspace_removes_multibyte_char() {
        let mut buffer = TextBuffer::new(false);
        update(&mut buffer, &TextModification::Insert("zfsä".to_owned()));
        update(&mut buffer, &TextModification::DeleteCharBeforeCursor);

        assert_eq!(buffer.content(), "zfs");
    }

    #[test]
    fn delete_line_keeps_one_empty_line() {
        let mut buffer = TextBuffer::with_content("only", true);
        update(&mut buffer, &TextModification::DeleteLine);

        assert_eq!(buffer.lines.len(), 1);
        assert!(buffer.is_blank());
    }
}
