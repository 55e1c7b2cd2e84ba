use crate::{
    action::Action,
    model::{Model, Page, Table},
    poll::Poller,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    First,
    Last,
    Next,
    Previous,
}

/// Switches the page and refreshes its checks.
pub fn show_page(model: &mut Model, page: Page) -> Vec<Action> {
    if model.page == page {
        return Vec::new();
    }

    model.page = page;
    Poller::refresh(page).into_iter().map(Action::Task).collect()
}

pub fn select(model: &mut Model, direction: Direction) -> Vec<Action> {
    match model.page {
        Page::Dashboard => {}
        Page::Docker => move_cursor(&mut model.containers, direction),
        Page::Storage => move_cursor(&mut model.zpools, direction),
        Page::Documents => move_cursor(&mut model.documents.list, direction),
        Page::Scripts => move_cursor(&mut model.scripts.list, direction),
        Page::MediaRequests => move_cursor(&mut model.media_requests.list, direction),
        Page::Recommendations => move_cursor(&mut model.recommendations.list, direction),
    }

    Vec::new()
}

fn move_cursor<T>(table: &mut Table<T>, direction: Direction) {
    match direction {
        Direction::First => table.select_first(),
        Direction::Last => table.select_last(),
        Direction::Next => table.select_next(),
        Direction::Previous => table.select_previous(),
    }
}

#[cfg(test)]
mod test {
    use crate::{
        action::Action,
        model::{Model, Page},
        poll::Check,
        task::Task,
    };

    use super::Direction;

    #[test]
    fn show_page_refreshes_only_that_page() {
        let mut model = Model::default();

        let actions = super::show_page(&mut model, Page::Docker);

        assert_eq!(model.page, Page::Docker);
        assert_eq!(
            actions,
            vec![Action::Task(Task::Poll(Check::DockerContainers))]
        );
        assert!(super::show_page(&mut model, Page::Docker).is_empty());
    }

    #[test]
    fn select_moves_cursor_of_active_page() {
        let mut model = Model::default();
        model.page = Page::Storage;
        model.zpools.replace(Ok(vec![Default::default(), Default::default()]));

        super::select(&mut model, Direction::Last);
        assert_eq!(model.zpools.cursor, 1);
        assert_eq!(model.containers.cursor, 0);
    }
}
