use crate::{
    message::CursorDirection,
    model::{BufferLine, CursorPosition, TextBuffer},
};

pub fn update_by_direction(buffer: &mut TextBuffer, direction: &CursorDirection) {
    if buffer.lines.is_empty() {
        return;
    }

    let cursor = &mut buffer.cursor;
    match direction {
        CursorDirection::Bottom => {
            cursor.vertical_index = buffer.lines.len() - 1;
            cursor.horizontal_index =
                get_position(&buffer.lines[cursor.vertical_index], &cursor.horizontal_index);
        }
        CursorDirection::Down => {
            let max_index = buffer.lines.len() - 1;
            if cursor.vertical_index < max_index {
                cursor.vertical_index += 1;
            }

            cursor.horizontal_index =
                get_position(&buffer.lines[cursor.vertical_index], &cursor.horizontal_index);
        }
        CursorDirection::Left => {
            let line = match buffer.lines.get(cursor.vertical_index) {
                Some(line) => line,
                None => return,
            };

            let index = get_horizontal_index(&cursor.horizontal_index, line);
            if index > 0 {
                cursor.horizontal_index = CursorPosition::Absolute {
                    current: index - 1,
                    expanded: index - 1,
                };
            }
        }
        CursorDirection::LineEnd => cursor.horizontal_index = CursorPosition::End,
        CursorDirection::LineStart => cursor.horizontal_index = CursorPosition::default(),
        CursorDirection::Right => {
            let line = match buffer.lines.get(cursor.vertical_index) {
                Some(line) => line,
                None => return,
            };

            let index = get_horizontal_index(&cursor.horizontal_index, line);
            if index < line.len() {
                cursor.horizontal_index = CursorPosition::Absolute {
                    current: index + 1,
                    expanded: index + 1,
                };
            }
        }
        CursorDirection::Top => {
            cursor.vertical_index = 0;
            cursor.horizontal_index =
                get_position(&buffer.lines[0], &cursor.horizontal_index);
        }
        CursorDirection::Up => {
            if cursor.vertical_index > 0 {
                cursor.vertical_index -= 1;
                cursor.horizontal_index =
                    get_position(&buffer.lines[cursor.vertical_index], &cursor.horizontal_index);
            }
        }
    }
}

/// Keeps the column a vertical motion started from, clamped to the line.
fn get_position(line: &BufferLine, position: &CursorPosition) -> CursorPosition {
    match position {
        CursorPosition::Absolute { expanded, .. } => CursorPosition::Absolute {
            current: (*expanded).min(line.len()),
            expanded: *expanded,
        },
        CursorPosition::End => CursorPosition::End,
    }
}

/// Insert position of the cursor. The cursor may sit one past the last char.
pub fn get_horizontal_index(position: &CursorPosition, line: &BufferLine) -> usize {
    match position {
        CursorPosition::Absolute { current, .. } => (*current).min(line.len()),
        CursorPosition::End => line.len(),
    }
}

#[cfg(test)]
mod test {
    use crate::{
        message::CursorDirection,
        model::{CursorPosition, TextBuffer},
    };

    use super::update_by_direction;

    fn absolute(index: usize) -> CursorPosition {
        CursorPosition::Absolute {
            current: index,
            expanded: index,
        }
    }

    #[test]
    fn right_stops_after_last_char() {
        let mut buffer = TextBuffer::with_content("ab", false);
        for _ in 0..5 {
            update_by_direction(&mut buffer, &CursorDirection::Right);
        }

        assert_eq!(buffer.cursor.horizontal_index, absolute(2));
    }

    #[test]
    fn vertical_motion_keeps_expanded_column() {
        let mut buffer = TextBuffer::with_content("long line\nab\nlong line", true);
        for _ in 0..6 {
            update_by_direction(&mut buffer, &CursorDirection::Right);
        }

        update_by_direction(&mut buffer, &CursorDirection::Down);
        assert_eq!(
            buffer.cursor.horizontal_index,
            CursorPosition::Absolute {
                current: 2,
                expanded: 6
            }
        );

        update_by_direction(&mut buffer, &CursorDirection::Down);
        assert_eq!(buffer.cursor.vertical_index, 2);
        assert_eq!(buffer.cursor.horizontal_index, absolute(6));
    }

    #[test]
    fn up_on_first_line_is_noop() {
        let mut buffer = TextBuffer::with_content("a\nb", true);
        update_by_direction(&mut buffer, &CursorDirection::Up);

        assert_eq!(buffer.cursor.vertical_index, 0);
    }

    #[test]
    fn left_from_line_end_moves_before_last_char() {
        let mut buffer = TextBuffer::with_content("abc", false);
        update_by_direction(&mut buffer, &CursorDirection::LineEnd);
        update_by_direction(&mut buffer, &CursorDirection::Left);

        assert_eq!(buffer.cursor.horizontal_index, absolute(2));
    }
}
