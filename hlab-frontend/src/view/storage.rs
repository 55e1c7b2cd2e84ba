use hlab_api::{StorageMount, Zpool};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Cell, Row, Table, TableState},
    Frame,
};

use crate::model::{Model, TargetKind};

use super::{block, empty_state, snapshot_state, usage_color, BUSY_GLYPH};

pub fn view(model: &Model, frame: &mut Frame, rect: Rect) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(Constraint::from_ratios([(1, 2), (1, 2)]))
        .split(rect);

    mounts(model, frame, layout[0]);
    pools(model, frame, layout[1]);
}

fn mounts(model: &Model, frame: &mut Frame, rect: Rect) {
    let title = "Storage Paths";
    if snapshot_state(&model.storage, title, frame, rect) {
        return;
    }

    let mounts = model.storage.payload().map(Vec::as_slice).unwrap_or_default();
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

    let rows: Vec<Row> = mounts.iter().map(mount_row).collect();
    let table = Table::new(
        rows,
        [
            Constraint::Percentage(30),
            Constraint::Percentage(20),
            Constraint::Percentage(12),
            Constraint::Percentage(12),
            Constraint::Percentage(12),
            Constraint::Percentage(14),
        ],
    )
    .header(
        Row::new(vec!["Path", "Mount", "Total", "Used", "Free", "Usage"])
            .style(Style::default().fg(Color::Yellow)),
    )
    .block(block(title));

    frame.render_widget(table, rect);
}

fn mount_row(mount: &StorageMount) -> Row<'static> {
    if !mount.is_accessible() {
        let reason = mount
            .error
            .clone()
            .unwrap_or_else(|| "Path does not exist".to_owned());

        return Row::new(vec![
            Cell::from(mount.path.clone()),
            Cell::from(Span::styled(reason, Style::default().fg(Color::Red))),
        ]);
    }

    Row::new(vec![
        Cell::from(mount.path.clone()),
        Cell::from(mount.mount_point.clone().unwrap_or_default()),
        Cell::from(format!("{:.1} GB", mount.total_gb)),
        Cell::from(format!("{:.1} GB", mount.used_gb)),
        Cell::from(format!("{:.1} GB", mount.free_gb)),
        Cell::from(Span::styled(
            format!("{:.1}%", mount.percent_used),
            Style::default().fg(usage_color(mount.percent_used)),
        )),
    ])
}

fn pools(model: &Model, frame: &mut Frame, rect: Rect) {
    let title = "ZFS Pools";
    if snapshot_state(&model.zpools.rows, title, frame, rect) {
        return;
    }

    if model.zpools.is_empty() {
        empty_state(
            "No ZFS pools found",
            Style::default().fg(Color::Gray),
            title,
            frame,
            rect,
        );
        return;
    }

    let pools = model.zpools.rows.payload().map(Vec::as_slice).unwrap_or_default();
    let rows: Vec<Row> = pools
        .iter()
        .map(|pool| {
            let name = if model.is_busy(TargetKind::Pool, &pool.name) {
                format!("{} {}", BUSY_GLYPH, pool.name)
            } else {
                pool.name.clone()
            };

            Row::new(vec![
                Cell::from(name),
                Cell::from(pool.size.clone()),
                Cell::from(pool.allocated.clone()),
                Cell::from(pool.free.clone()),
                Cell::from(Span::styled(
                    pool.health.clone(),
                    Style::default().fg(health_color(pool)),
                )),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(30),
            Constraint::Percentage(15),
            Constraint::Percentage(15),
            Constraint::Percentage(15),
            Constraint::Percentage(25),
        ],
    )
    .header(
        Row::new(vec!["Name", "Size", "Allocated", "Free", "Health"])
            .style(Style::default().fg(Color::Yellow)),
    )
    .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
    .block(block(title));

    let mut state = TableState::default().with_selected(Some(model.zpools.cursor));
    frame.render_stateful_widget(table, rect, &mut state);
}

fn health_color(pool: &Zpool) -> Color {
    match pool.health.as_str() {
        "ONLINE" => Color::Green,
        "DEGRADED" => Color::Yellow,
        _ => Color::Red,
    }
}
