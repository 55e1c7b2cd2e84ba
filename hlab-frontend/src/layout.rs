use ratatui::prelude::{Constraint, Direction, Layout, Rect};

#[derive(Clone, Debug, Default)]
pub struct AppLayout {
    pub tabs: Rect,
    pub main: Rect,
    pub statusline: Rect,
}

impl AppLayout {
    pub fn new(rect: Rect) -> Self {
        let main = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Percentage(100),
                Constraint::Length(1),
            ])
            .split(rect);

        Self {
            tabs: main[0],
            main: main[1],
            statusline: main[2],
        }
    }
}

/// Splits a page into a list on the left and a detail region on the right.
#[derive(Clone, Debug)]
pub struct PanelLayout {
    pub list: Rect,
    pub detail: Rect,
}

impl PanelLayout {
    pub fn new(rect: Rect) -> Self {
        let layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(Constraint::from_ratios([(1, 3), (2, 3)]))
            .split(rect);

        Self {
            list: layout[0],
            detail: layout[1],
        }
    }
}

pub fn centered(rect: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(rect.width);
    let height = height.min(rect.height);

    Rect::new(
        rect.x + (rect.width - width) / 2,
        rect.y + (rect.height - height) / 2,
        width,
        height,
    )
}
