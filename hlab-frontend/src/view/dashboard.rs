use hlab_api::{ClusterResource, Container, Node};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Cell, List, ListItem, Paragraph, Row, Table},
    Frame,
};

use crate::model::{
    dashboard::{self, format_bytes, ResourceUsage},
    Model, Snapshot,
};

use super::{block, empty_state, snapshot_state, usage_color};

const CONTAINER_SUMMARY_ROWS: usize = 5;

pub fn view(model: &Model, frame: &mut Frame, rect: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Percentage(50),
            Constraint::Percentage(50),
        ])
        .split(rect);

    badges(model, frame, rows[0]);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(Constraint::from_ratios([(1, 2), (1, 2)]))
        .split(rows[1]);

    resources(&model.resources, frame, top[0]);
    nodes(&model.nodes, frame, top[1]);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(Constraint::from_ratios([(1, 2), (1, 2)]))
        .split(rows[2]);

    containers(&model.containers.rows, frame, bottom[0]);
    storage(model, frame, bottom[1]);
}

fn badges(model: &Model, frame: &mut Frame, rect: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(Constraint::from_ratios([(1, 3), (1, 3), (1, 3)]))
        .split(rect);

    let badges = [
        (
            "Proxmox",
            dashboard::badge(&model.nodes, "nodes"),
            model.nodes.at(),
        ),
        (
            "Docker",
            dashboard::badge(&model.containers.rows, "containers"),
            model.containers.rows.at(),
        ),
        (
            "Storage",
            dashboard::badge(&model.storage, "mounts"),
            model.storage.at(),
        ),
    ];

    for ((title, text, at), column) in badges.into_iter().zip(columns.iter()) {
        let title = match at {
            Some(at) => format!("{} {}", title, at.format("%H:%M:%S")),
            None => title.to_owned(),
        };

        let (text, color) = match text {
            Some(text) if text.starts_with("Connected") => (text, Color::Green),
            Some(text) => (text, Color::Red),
            None => ("Checking...".to_owned(), Color::Gray),
        };

        let badge = Paragraph::new(Line::from(vec![
            Span::styled("● ", Style::default().fg(color)),
            Span::raw(text),
        ]))
        .block(block(&title));

        frame.render_widget(badge, *column);
    }
}

fn resources(
    snapshot: &Snapshot<Vec<ClusterResource>>,
    frame: &mut Frame,
    rect: Rect,
) {
    let title = "Resource Usage";
    if snapshot_state(snapshot, title, frame, rect) {
        return;
    }

    let usage = snapshot
        .payload()
        .map(|resources| ResourceUsage::from_resources(resources))
        .unwrap_or_default();

    let bars: Vec<Bar> = [("CPU", usage.cpu), ("Memory", usage.memory), ("Disk", usage.disk)]
        .into_iter()
        .map(|(label, value)| percent_bar(label.to_owned(), value))
        .collect();

    let chart = BarChart::default()
        .block(block(title))
        .bar_width(8)
        .bar_gap(2)
        .max(100)
        .data(BarGroup::default().bars(&bars));

    frame.render_widget(chart, rect);
}

fn nodes(snapshot: &Snapshot<Vec<Node>>, frame: &mut Frame, rect: Rect) {
    let title = "Proxmox Nodes";
    if snapshot_state(snapshot, title, frame, rect) {
        return;
    }

    let nodes = snapshot.payload().map(Vec::as_slice).unwrap_or_default();
    if nodes.is_empty() {
        empty_state(
            "No nodes found",
            Style::default().fg(Color::Gray),
            title,
            frame,
            rect,
        );
        return;
    }

    let items: Vec<ListItem> = nodes.iter().map(node_item).collect();
    frame.render_widget(List::new(items).block(block(title)), rect);
}

fn node_item(node: &Node) -> ListItem<'static> {
    let (status, color) = if node.is_online() {
        ("online", Color::Green)
    } else {
        ("offline", Color::Red)
    };

    let cpu = node
        .cpu
        .map(|cpu| format!("{:.1}%", cpu * 100.0))
        .unwrap_or_else(|| "N/A".to_owned());

    let memory = match (node.mem, node.maxmem) {
        (Some(mem), Some(maxmem)) => format!("{} / {}", format_bytes(mem), format_bytes(maxmem)),
        _ => "N/A".to_owned(),
    };

    ListItem::new(vec![
        Line::from(vec![
            Span::styled(
                node.node.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(status, Style::default().fg(color)),
        ]),
        Line::from(Span::styled(
            format!("  CPU: {} | Memory: {}", cpu, memory),
            Style::default().fg(Color::Gray),
        )),
    ])
}

fn containers(snapshot: &Snapshot<Vec<Container>>, frame: &mut Frame, rect: Rect) {
    let title = "Docker Containers";
    if snapshot_state(snapshot, title, frame, rect) {
        return;
    }

    let containers = snapshot.payload().map(Vec::as_slice).unwrap_or_default();
    if containers.is_empty() {
        empty_state(
            "No containers found",
            Style::default().fg(Color::Gray),
            title,
            frame,
            rect,
        );
        return;
    }

    let rows: Vec<Row> = containers
        .iter()
        .take(CONTAINER_SUMMARY_ROWS)
        .map(|container| {
            Row::new(vec![
                Cell::from(container.name.clone()),
                Cell::from(container.image_name().to_owned()),
                Cell::from(Span::styled(
                    container.status.clone(),
                    Style::default().fg(super::docker::status_color(container)),
                )),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(35),
            Constraint::Percentage(35),
            Constraint::Percentage(30),
        ],
    )
    .header(Row::new(vec!["Name", "Image", "Status"]).style(Style::default().fg(Color::Yellow)))
    .block(block(title));

    frame.render_widget(table, rect);
}

fn storage(model: &Model, frame: &mut Frame, rect: Rect) {
    let title = "Storage Usage";
    if snapshot_state(&model.storage, title, frame, rect) {
        return;
    }

    let mounts: Vec<_> = model
        .storage
        .payload()
        .map(Vec::as_slice)
        .unwrap_or_default()
        .iter()
        .filter(|mount| mount.is_accessible())
        .collect();

    if mounts.is_empty() {
        empty_state(
            "No storage paths configured",
            Style::default().fg(Color::Gray),
            title,
            frame,
            rect,
        );
        return;
    }

    let bars: Vec<Bar> = mounts
        .iter()
        .map(|mount| {
            let label = mount
                .path
                .rsplit('/')
                .find(|part| !part.is_empty())
                .unwrap_or(&mount.path)
                .to_owned();

            percent_bar(label, mount.percent_used.round().max(0.0) as u64)
        })
        .collect();

    let chart = BarChart::default()
        .block(block(title))
        .bar_width(8)
        .bar_gap(2)
        .max(100)
        .data(BarGroup::default().bars(&bars));

    frame.render_widget(chart, rect);
}

fn percent_bar(label: String, value: u64) -> Bar<'static> {
    Bar::default()
        .label(Line::from(label))
        .value(value)
        .text_value(format!("{}%", value))
        .style(Style::default().fg(usage_color(value as f64)))
}
