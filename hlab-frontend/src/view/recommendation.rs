use hlab_api::Recommendation;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::{
    layout::PanelLayout,
    model::{Model, TargetKind},
};

use super::{block, empty_state, snapshot_state, BUSY_GLYPH};

pub fn view(model: &Model, frame: &mut Frame, rect: Rect) {
    let layout = PanelLayout::new(rect);

    list(model, frame, layout.list);

    match &model.recommendations.detail {
        Some(recommendation) => detail(recommendation, frame, layout.detail),
        None => empty_state(
            "Select a recommendation with <cr>",
            Style::default().fg(Color::Gray),
            "Details",
            frame,
            layout.detail,
        ),
    }
}

fn list(model: &Model, frame: &mut Frame, rect: Rect) {
    let title = "Recommendations";
    let table = &model.recommendations.list;
    if snapshot_state(&table.rows, title, frame, rect) {
        return;
    }

    if table.is_empty() {
        empty_state(
            "No recommendations found",
            Style::default().fg(Color::Gray),
            title,
            frame,
            rect,
        );
        return;
    }

    // group headers are not selectable, so the cursor is mapped onto items
    let mut items = Vec::new();
    let mut selected = None;
    let mut category: Option<&str> = None;
    for (index, recommendation) in table
        .rows
        .payload()
        .map(Vec::as_slice)
        .unwrap_or_default()
        .iter()
        .enumerate()
    {
        if category != Some(recommendation.category.as_str()) {
            category = Some(recommendation.category.as_str());
            items.push(ListItem::new(Line::from(Span::styled(
                capitalize(&recommendation.category),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ))));
        }

        if index == table.cursor {
            selected = Some(items.len());
        }

        let busy = model.is_busy(TargetKind::Recommendation, &recommendation.id.to_string());
        items.push(ListItem::new(item_line(recommendation, busy)));
    }

    let list = List::new(items)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .block(block(title));

    let mut state = ListState::default().with_selected(selected);
    frame.render_stateful_widget(list, rect, &mut state);
}

fn item_line(recommendation: &Recommendation, busy: bool) -> Line<'static> {
    let mut spans = vec![Span::raw("  ")];
    if busy {
        spans.push(Span::raw(format!("{} ", BUSY_GLYPH)));
    }

    spans.push(Span::styled(
        format!("[{}] ", recommendation.priority_label()),
        Style::default().fg(priority_color(recommendation.priority)),
    ));

    let style = if recommendation.implemented {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default()
    };
    spans.push(Span::styled(recommendation.recommendation.clone(), style));

    if recommendation.implemented {
        spans.push(Span::styled(" ✓", Style::default().fg(Color::Green)));
    }

    Line::from(spans)
}

fn detail(recommendation: &Recommendation, frame: &mut Frame, rect: Rect) {
    let status = if recommendation.implemented {
        Span::styled("Implemented", Style::default().fg(Color::Green))
    } else {
        Span::styled("Open (press i to implement)", Style::default().fg(Color::Gray))
    };

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(vec![
            Span::styled("Category: ", bold),
            Span::raw(capitalize(&recommendation.category)),
        ]),
        Line::from(vec![
            Span::styled("Priority: ", bold),
            Span::styled(
                recommendation.priority_label(),
                Style::default().fg(priority_color(recommendation.priority)),
            ),
        ]),
        Line::from(vec![Span::styled("Status: ", bold), status]),
        Line::default(),
        Line::from(recommendation.recommendation.clone()),
    ];

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(block(&format!("Recommendation #{}", recommendation.id)));

    frame.render_widget(paragraph, rect);
}

fn priority_color(priority: u8) -> Color {
    match priority {
        1 => Color::Red,
        2 => Color::LightRed,
        3 => Color::Yellow,
        4 => Color::Blue,
        _ => Color::Gray,
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod test {
    #[test]
    fn capitalize_first_char() {
        assert_eq!(super::capitalize("storage"), "Storage");
        assert_eq!(super::capitalize(""), "");
    }
}
