use hlab_api::{
    ClusterResource, Container, Document, MediaRequest, Node, Recommendation, Script,
    StorageMount, Zpool,
};
use hlab_keymap::message::Mode;

use crate::{layout::AppLayout, settings::Settings};

pub mod dashboard;
pub mod dialog;
pub mod notification;
mod page;
pub mod panel;
pub mod snapshot;

pub use dialog::{BusyMarks, BusyTarget, ConfirmDialog, PendingAction, PendingKind, TargetKind};
pub use notification::{Level, Notifications};
pub use page::Page;
pub use panel::{CrudPanel, PanelMode, Selection};
pub use snapshot::{Snapshot, Table};

#[derive(Debug, Default)]
pub struct Model {
    pub busy: BusyMarks,
    pub containers: Table<Container>,
    pub dialog: ConfirmDialog,
    pub documents: CrudPanel<Document>,
    pub highlight: Option<Highlight>,
    pub key_sequence: String,
    pub layout: AppLayout,
    pub media_requests: CrudPanel<MediaRequest>,
    pub mode: Mode,
    pub nodes: Snapshot<Vec<Node>>,
    pub notifications: Notifications,
    pub page: Page,
    pub recommendations: RecommendationPanel,
    pub resources: Snapshot<Vec<ClusterResource>>,
    pub scripts: CrudPanel<Script>,
    pub settings: Settings,
    pub storage: Snapshot<Vec<StorageMount>>,
    pub zpools: Table<Zpool>,
}

impl Model {
    pub fn is_busy(&self, kind: TargetKind, id: &str) -> bool {
        self.busy.contains(&BusyTarget::new(kind, id))
    }
}

/// Highlighted script content as terminal escape sequences.
#[derive(Clone, Debug, PartialEq)]
pub struct Highlight {
    pub script_id: u64,
    pub content: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecommendationPanel {
    pub list: Table<Recommendation>,
    pub detail: Option<Recommendation>,
}

pub const RECOMMENDATION_CATEGORIES: [&str; 5] = [
    "infrastructure",
    "virtualization",
    "storage",
    "networking",
    "services",
];

/// Orders recommendations by category group, then by priority.
pub fn sort_recommendations(recommendations: &mut [Recommendation]) {
    recommendations.sort_by_key(|recommendation| {
        let group = RECOMMENDATION_CATEGORIES
            .iter()
            .position(|category| category.eq_ignore_ascii_case(&recommendation.category))
            .unwrap_or(RECOMMENDATION_CATEGORIES.len());

        (group, recommendation.priority, recommendation.id)
    });
}

#[cfg(test)]
mod test {
    use hlab_api::Recommendation;

    use super::sort_recommendations;

    fn recommendation(id: u64, category: &str, priority: u8) -> Recommendation {
        Recommendation {
            id,
            category: category.to_owned(),
            priority,
            ..Default::default()
        }
    }

    #[test]
    fn recommendations_are_grouped_then_prioritized() {
        let mut recommendations = vec![
            recommendation(1, "services", 1),
            recommendation(2, "storage", 4),
            recommendation(3, "misc", 1),
            recommendation(4, "storage", 2),
            recommendation(5, "Infrastructure", 5),
        ];

        sort_recommendations(&mut recommendations);

        let ids: Vec<_> = recommendations.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![5, 4, 2, 1, 3]);
    }
}
