use hlab_api::Container;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::model::{dashboard::ContainerStats, Model, TargetKind};

use super::{block, empty_state, snapshot_state, BUSY_GLYPH};

pub fn view(model: &Model, frame: &mut Frame, rect: Rect) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5), Constraint::Length(8)])
        .split(rect);

    let containers = model
        .containers
        .rows
        .payload()
        .map(Vec::as_slice)
        .unwrap_or_default();

    let stats = ContainerStats::from_containers(containers);

    summary(&stats, frame, layout[0]);
    table(model, frame, layout[1]);
    chart(&stats, frame, layout[2]);
}

pub fn status_color(container: &Container) -> Color {
    if container.is_paused() {
        Color::Yellow
    } else if container.is_running() {
        Color::Green
    } else {
        Color::Red
    }
}

fn summary(stats: &ContainerStats, frame: &mut Frame, rect: Rect) {
    let line = Line::from(vec![
        Span::styled(
            format!("Running: {}", stats.running),
            Style::default().fg(Color::Green),
        ),
        Span::raw("  "),
        Span::styled(
            format!("Paused: {}", stats.paused),
            Style::default().fg(Color::Yellow),
        ),
        Span::raw("  "),
        Span::styled(
            format!("Stopped: {}", stats.stopped),
            Style::default().fg(Color::Red),
        ),
    ]);

    frame.render_widget(Paragraph::new(line).block(block("Summary")), rect);
}

fn table(model: &Model, frame: &mut Frame, rect: Rect) {
    let title = "Containers";
    if snapshot_state(&model.containers.rows, title, frame, rect) {
        return;
    }

    if model.containers.is_empty() {
        empty_state(
            "No containers found",
            Style::default().fg(Color::Gray),
            title,
            frame,
            rect,
        );
        return;
    }

    let containers = model
        .containers
        .rows
        .payload()
        .map(Vec::as_slice)
        .unwrap_or_default();

    let rows: Vec<Row> = containers
        .iter()
        .map(|container| {
            let name = if model.is_busy(TargetKind::Container, &container.id) {
                format!("{} {}", BUSY_GLYPH, container.name)
            } else {
                container.name.clone()
            };

            Row::new(vec![
                Cell::from(name),
                Cell::from(container.image_name().to_owned()),
                Cell::from(Span::styled(
                    container.status.clone(),
                    Style::default().fg(status_color(container)),
                )),
                Cell::from(container.created_formatted.clone().unwrap_or_default()),
                Cell::from(container.ports_formatted.join(", ")),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(20),
            Constraint::Percentage(25),
            Constraint::Percentage(20),
            Constraint::Percentage(15),
            Constraint::Percentage(20),
        ],
    )
    .header(
        Row::new(vec!["Name", "Image", "Status", "Created", "Ports"])
            .style(Style::default().fg(Color::Yellow)),
    )
    .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
    .block(block(title));

    let mut state = TableState::default().with_selected(Some(model.containers.cursor));
    frame.render_stateful_widget(table, rect, &mut state);
}

fn chart(stats: &ContainerStats, frame: &mut Frame, rect: Rect) {
    let bars = [
        ("Running", stats.running, Color::Green),
        ("Paused", stats.paused, Color::Yellow),
        ("Stopped", stats.stopped, Color::Red),
    ]
    .map(|(label, value, color)| {
        Bar::default()
            .label(Line::from(label))
            .value(value as u64)
            .style(Style::default().fg(color))
    });

    let chart = BarChart::default()
        .block(block("Container States"))
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(1)
        .data(BarGroup::default().bars(&bars));

    frame.render_widget(chart, rect);
}

#[cfg(test)]
mod test {
    use hlab_api::Container;
    use ratatui::style::Color;

    #[test]
    fn status_color_follows_state() {
        let running = Container {
            status: "Up 2 hours".to_owned(),
            ..Default::default()
        };
        let paused = Container {
            status: "Up 2 hours (Paused)".to_owned(),
            ..Default::default()
        };
        let exited = Container {
            status: "Exited (0) 3 minutes ago".to_owned(),
            ..Default::default()
        };

        assert_eq!(super::status_color(&running), Color::Green);
        assert_eq!(super::status_color(&paused), Color::Yellow);
        assert_eq!(super::status_color(&exited), Color::Red);
    }
}
