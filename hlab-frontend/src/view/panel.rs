use ansi_to_tui::IntoText;
use hlab_api::{Document, MediaRequest, Script};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::{
    entity::PanelEntity,
    form::Form,
    layout::PanelLayout,
    model::{CrudPanel, Model, PanelMode, Selection},
};

use super::{block, empty_state, snapshot_state, BUSY_GLYPH};

/// Rendering of an entity inside its panel.
pub trait PanelView: PanelEntity {
    const LIST_TITLE: &'static str;

    fn detail(&self, model: &Model) -> Text<'static>;
}

pub fn view<E: PanelView>(model: &Model, panel: &CrudPanel<E>, frame: &mut Frame, rect: Rect) {
    let layout = PanelLayout::new(rect);

    list(model, panel, frame, layout.list);

    match &panel.mode {
        PanelMode::Placeholder => empty_state(
            "Select an entry with <cr> or press n to create one",
            Style::default().fg(Color::Gray),
            E::NAME,
            frame,
            layout.detail,
        ),
        PanelMode::Viewing(entity) => {
            let paragraph = Paragraph::new(entity.detail(model))
                .wrap(Wrap { trim: false })
                .block(block(entity.title()));

            frame.render_widget(paragraph, layout.detail);
        }
        PanelMode::Editing(form) => {
            let title = match form.bound_id {
                Some(_) => format!("Edit {}", E::NAME),
                None => format!("New {}", E::NAME),
            };

            form_view(form, &title, frame, layout.detail);
        }
    }
}

fn list<E: PanelView>(model: &Model, panel: &CrudPanel<E>, frame: &mut Frame, rect: Rect) {
    if snapshot_state(&panel.list.rows, E::LIST_TITLE, frame, rect) {
        return;
    }

    if panel.list.is_empty() {
        empty_state(
            &format!("No {} found", E::LIST_TITLE.to_lowercase()),
            Style::default().fg(Color::Gray),
            E::LIST_TITLE,
            frame,
            rect,
        );
        return;
    }

    let selected = panel.mode.selection();
    let items: Vec<ListItem> = panel
        .list
        .rows
        .payload()
        .map(Vec::as_slice)
        .unwrap_or_default()
        .iter()
        .map(|entity| {
            let mut spans = Vec::new();
            if model.is_busy(E::TARGET, &entity.id().to_string()) {
                spans.push(Span::raw(format!("{} ", BUSY_GLYPH)));
            }

            let style = if selected == Some(Selection::Entity(entity.id())) {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };

            spans.push(Span::styled(entity.title().to_owned(), style));
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .block(block(E::LIST_TITLE));

    let mut state = ListState::default().with_selected(Some(panel.list.cursor));
    frame.render_stateful_widget(list, rect, &mut state);
}

fn form_view(form: &Form, title: &str, frame: &mut Frame, rect: Rect) {
    let outer = block(title);
    let inner = outer.inner(rect);
    frame.render_widget(outer, rect);

    let mut constraints: Vec<Constraint> = form
        .fields
        .iter()
        .map(|field| {
            if field.buffer.multiline {
                Constraint::Min(5)
            } else {
                Constraint::Length(3)
            }
        })
        .collect();
    constraints.push(Constraint::Length(1));

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (index, field) in form.fields.iter().enumerate() {
        let label = if field.required {
            format!("{} *", field.label)
        } else {
            field.label.to_owned()
        };

        hlab_buffer::view(
            &field.buffer,
            &label,
            index == form.focused,
            frame,
            rows[index],
        );
    }

    let hint = Paragraph::new(Line::from(Span::styled(
        "<C-s> save  <tab> next field  <esc> cancel",
        Style::default().fg(Color::DarkGray),
    )));

    frame.render_widget(hint, rows[form.fields.len()]);
}

fn field(label: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{}: ", label),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(value.to_owned()),
    ])
}

impl PanelView for Document {
    const LIST_TITLE: &'static str = "Documents";

    fn detail(&self, _: &Model) -> Text<'static> {
        let mut lines = Vec::new();

        let tags = self.tag_list();
        if !tags.is_empty() {
            let mut badges = Vec::new();
            for tag in tags {
                badges.push(Span::styled(
                    format!(" {} ", tag),
                    Style::default().fg(Color::Black).bg(Color::Cyan),
                ));
                badges.push(Span::raw(" "));
            }
            lines.push(Line::from(badges));
            lines.push(Line::default());
        }

        lines.extend(self.content.lines().map(|line| Line::from(line.to_owned())));
        Text::from(lines)
    }
}

impl PanelView for Script {
    const LIST_TITLE: &'static str = "Scripts";

    fn detail(&self, model: &Model) -> Text<'static> {
        let mut text = Text::from(vec![
            field("Type", &self.script_type),
            field("Description", self.description.as_deref().unwrap_or_default()),
            Line::from(Span::styled(
                "y copies the script to the clipboard",
                Style::default().fg(Color::DarkGray),
            )),
            Line::default(),
        ]);

        let highlighted = model
            .highlight
            .as_ref()
            .filter(|highlight| highlight.script_id == self.id)
            .and_then(|highlight| match highlight.content.as_bytes().into_text() {
                Ok(text) => Some(text),
                Err(err) => {
                    tracing::debug!("highlighted script could not be converted: {:?}", err);
                    None
                }
            });

        match highlighted {
            Some(code) => text.lines.extend(code.lines),
            None => text.lines.extend(
                self.script_content
                    .lines()
                    .map(|line| Line::from(line.to_owned())),
            ),
        }

        text
    }
}

impl PanelView for MediaRequest {
    const LIST_TITLE: &'static str = "Media Requests";

    fn detail(&self, _: &Model) -> Text<'static> {
        let requester = self
            .requester_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or("Anonymous");

        let mut lines = vec![
            Line::from(vec![
                Span::styled("Status: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(
                    self.status.clone(),
                    Style::default().fg(status_color(&self.status)),
                ),
            ]),
            field("Type", &self.media_type),
            field("Requested by", requester),
        ];

        if let Some(created) = self.created_at {
            lines.push(field("Created", &created.format("%Y-%m-%d %H:%M").to_string()));
        }

        if let Some(description) = self.description.as_deref().filter(|d| !d.is_empty()) {
            lines.push(Line::default());
            lines.extend(description.lines().map(|line| Line::from(line.to_owned())));
        }

        if let Some(notes) = self.notes.as_deref().filter(|n| !n.is_empty()) {
            lines.push(Line::default());
            lines.push(field("Notes", notes));
        }

        Text::from(lines)
    }
}

fn status_color(status: &str) -> Color {
    match status.to_lowercase().as_str() {
        "pending" => Color::Yellow,
        "approved" => Color::Green,
        "downloading" => Color::Cyan,
        "completed" => Color::Blue,
        "rejected" => Color::Red,
        _ => Color::Gray,
    }
}

#[cfg(test)]
mod test {
    use hlab_api::{Document, MediaRequest, Script};
    use ratatui::style::Color;

    use crate::model::{Highlight, Model};

    use super::PanelView;

    fn text_of(text: &ratatui::text::Text) -> String {
        text.lines
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|span| span.content.as_ref())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn document_detail_shows_tags_and_content() {
        let document = Document {
            id: 1,
            title: "Backups".to_owned(),
            content: "line one\nline two".to_owned(),
            tags: Some("ops, nas".to_owned()),
            created_at: None,
        };

        let text = text_of(&document.detail(&Model::default()));
        assert!(text.contains(" ops "));
        assert!(text.contains(" nas "));
        assert!(text.ends_with("line one\nline two"));
    }

    #[test]
    fn media_request_without_requester_is_anonymous() {
        let request = MediaRequest {
            id: 3,
            title: "Dune".to_owned(),
            media_type: "movie".to_owned(),
            status: "Pending".to_owned(),
            requester_name: Some("  ".to_owned()),
            ..Default::default()
        };

        let text = text_of(&request.detail(&Model::default()));
        assert!(text.contains("Requested by: Anonymous"));
        assert_eq!(super::status_color("Downloading"), Color::Cyan);
    }

    #[test]
    fn script_detail_uses_matching_highlight_only() {
        let script = Script {
            id: 7,
            title: "cleanup".to_owned(),
            script_content: "echo plain".to_owned(),
            script_type: "bash".to_owned(),
            ..Default::default()
        };

        let mut model = Model {
            highlight: Some(Highlight {
                script_id: 8,
                content: "echo other".to_owned(),
            }),
            ..Default::default()
        };
        assert!(text_of(&script.detail(&model)).ends_with("echo plain"));

        model.highlight = Some(Highlight {
            script_id: 7,
            content: "\x1b[38;2;1;2;3mecho colored\x1b[0m".to_owned(),
        });
        assert!(text_of(&script.detail(&model)).contains("echo colored"));
    }
}
