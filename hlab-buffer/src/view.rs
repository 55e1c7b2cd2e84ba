use ratatui::{
    prelude::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::{
    model::{BufferLine, TextBuffer},
    update::get_horizontal_index,
};

pub fn view(buffer: &TextBuffer, title: &str, focused: bool, frame: &mut Frame, rect: Rect) {
    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title.to_owned());

    let inner = block.inner(rect);
    frame.render_widget(block, rect);

    let height = usize::from(inner.height.max(1));
    let offset = buffer.cursor.vertical_index.saturating_sub(height - 1);

    let lines: Vec<Line> = if buffer.lines.is_empty() {
        vec![get_styled_line(&BufferLine::default(), focused.then_some(0))]
    } else {
        buffer
            .lines
            .iter()
            .enumerate()
            .skip(offset)
            .take(height)
            .map(|(index, line)| {
                let cursor = if focused && index == buffer.cursor.vertical_index {
                    Some(get_horizontal_index(&buffer.cursor.horizontal_index, line))
                } else {
                    None
                };

                get_styled_line(line, cursor)
            })
            .collect()
    };

    frame.render_widget(Paragraph::new(lines), inner);
}

fn get_styled_line(line: &BufferLine, cursor: Option<usize>) -> Line<'static> {
    let index = match cursor {
        Some(index) => index,
        None => return Line::from(line.content.clone()),
    };

    let start = line.byte_index(index);
    let (before, rest) = line.content.split_at(start);
    let mut chars = rest.chars();
    let on_cursor = chars.next().map(String::from).unwrap_or_else(|| " ".to_owned());
    let after: String = chars.collect();

    Line::from(vec![
        Span::raw(before.to_owned()),
        Span::styled(on_cursor, Style::default().add_modifier(Modifier::REVERSED)),
        Span::raw(after),
    ])
}
