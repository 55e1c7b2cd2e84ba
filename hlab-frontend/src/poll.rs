use crate::{model::Page, task::Task};

/// Independent read-only status check. Each one owns a single model region.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Check {
    Documents,
    DockerContainers,
    MediaRequests,
    ProxmoxNodes,
    ProxmoxResources,
    Recommendations,
    Scripts,
    StorageInfo,
    ZfsPools,
}

impl Check {
    pub const ALL: [Check; 9] = [
        Check::ProxmoxNodes,
        Check::ProxmoxResources,
        Check::DockerContainers,
        Check::StorageInfo,
        Check::ZfsPools,
        Check::MediaRequests,
        Check::Documents,
        Check::Scripts,
        Check::Recommendations,
    ];

    pub fn for_page(page: Page) -> Vec<Check> {
        match page {
            Page::Dashboard => vec![
                Check::ProxmoxNodes,
                Check::ProxmoxResources,
                Check::DockerContainers,
                Check::StorageInfo,
            ],
            Page::Docker => vec![Check::DockerContainers],
            Page::Storage => vec![Check::StorageInfo, Check::ZfsPools],
            Page::Documents => vec![Check::Documents],
            Page::Scripts => vec![Check::Scripts],
            Page::MediaRequests => vec![Check::MediaRequests],
            Page::Recommendations => vec![Check::Recommendations],
        }
    }
}

pub struct Poller;

impl Poller {
    /// One task per check, without ordering or de-duplication.
    pub fn tick() -> Vec<Task> {
        Check::ALL.into_iter().map(Task::Poll).collect()
    }

    pub fn refresh(page: Page) -> Vec<Task> {
        Check::for_page(page).into_iter().map(Task::Poll).collect()
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashSet;

    use crate::{model::Page, task::Task};

    use super::{Check, Poller};

    #[test]
    fn tick_emits_one_task_per_check() {
        let tasks = Poller::tick();
        assert_eq!(tasks.len(), Check::ALL.len());

        let checks: HashSet<_> = tasks
            .iter()
            .filter_map(|task| match task {
                Task::Poll(check) => Some(*check),
                _ => None,
            })
            .collect();

        assert_eq!(checks.len(), Check::ALL.len());
    }

    #[test]
    fn refresh_only_covers_the_page() {
        assert_eq!(
            Poller::refresh(Page::Storage),
            vec![Task::Poll(Check::StorageInfo), Task::Poll(Check::ZfsPools)]
        );
    }
}
