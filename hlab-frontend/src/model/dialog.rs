use std::collections::HashSet;

use hlab_api::ContainerAction;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum PendingKind {
    Container(ContainerAction),
    DeleteDocument,
    DeleteMediaRequest,
    DeletePool,
    DeleteScript,
    ImplementRecommendation,
}

impl PendingKind {
    pub fn target_kind(&self) -> TargetKind {
        match self {
            PendingKind::Container(_) => TargetKind::Container,
            PendingKind::DeleteDocument => TargetKind::Document,
            PendingKind::DeleteMediaRequest => TargetKind::MediaRequest,
            PendingKind::DeletePool => TargetKind::Pool,
            PendingKind::DeleteScript => TargetKind::Script,
            PendingKind::ImplementRecommendation => TargetKind::Recommendation,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TargetKind {
    Container,
    Document,
    MediaRequest,
    Pool,
    Recommendation,
    Script,
}

/// Row that has an action in flight.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct BusyTarget {
    pub kind: TargetKind,
    pub id: String,
}

impl BusyTarget {
    pub fn new(kind: TargetKind, id: impl ToString) -> Self {
        Self {
            kind,
            id: id.to_string(),
        }
    }
}

/// Busy rows. A mark is in flight until its action finishes, then settled
/// until the next list reload of its kind.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BusyMarks {
    in_flight: HashSet<BusyTarget>,
    settled: HashSet<BusyTarget>,
}

impl BusyMarks {
    pub fn contains(&self, target: &BusyTarget) -> bool {
        self.in_flight.contains(target) || self.settled.contains(target)
    }

    pub fn is_empty(&self) -> bool {
        self.in_flight.is_empty() && self.settled.is_empty()
    }

    pub fn start(&mut self, target: BusyTarget) {
        self.settled.remove(&target);
        self.in_flight.insert(target);
    }

    /// The action succeeded. The mark stays until fresh rows arrive.
    pub fn settle(&mut self, target: &BusyTarget) {
        if let Some(target) = self.in_flight.take(target) {
            self.settled.insert(target);
        }
    }

    pub fn remove(&mut self, target: &BusyTarget) {
        self.in_flight.remove(target);
        self.settled.remove(target);
    }

    pub fn clear_settled(&mut self, kind: TargetKind) {
        self.settled.retain(|target| target.kind != kind);
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PendingAction {
    pub kind: PendingKind,
    pub target_id: String,
    pub target_name: String,
}

impl PendingAction {
    pub fn title(&self) -> String {
        match self.kind {
            PendingKind::Container(action) => {
                format!("Confirm {}", capitalize(action.as_str()))
            }
            PendingKind::DeleteDocument => "Delete Document".to_owned(),
            PendingKind::DeleteMediaRequest => "Delete Request".to_owned(),
            PendingKind::DeletePool => "Delete ZFS Pool".to_owned(),
            PendingKind::DeleteScript => "Delete Script".to_owned(),
            PendingKind::ImplementRecommendation => "Implement Recommendation".to_owned(),
        }
    }

    pub fn question(&self) -> String {
        match self.kind {
            PendingKind::Container(action) => format!(
                "Are you sure you want to {} container \"{}\"?",
                action.as_str(),
                self.target_name
            ),
            PendingKind::DeletePool => format!(
                "Are you sure you want to delete ZFS pool \"{}\"? All data on it will be lost.",
                self.target_name
            ),
            PendingKind::ImplementRecommendation => format!(
                "Create an implementation plan for \"{}\"?",
                self.target_name
            ),
            PendingKind::DeleteDocument
            | PendingKind::DeleteMediaRequest
            | PendingKind::DeleteScript => {
                format!("Are you sure you want to delete \"{}\"?", self.target_name)
            }
        }
    }

    pub fn busy_target(&self) -> BusyTarget {
        BusyTarget::new(self.kind.target_kind(), &self.target_id)
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum ConfirmDialog {
    #[default]
    Idle,
    Confirming(PendingAction),
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod test {
    use hlab_api::ContainerAction;

    use super::*;

    #[test]
    fn container_question_names_action_and_target() {
        let action = PendingAction {
            kind: PendingKind::Container(ContainerAction::Stop),
            target_id: "abc123".to_owned(),
            target_name: "plex".to_owned(),
        };

        assert_eq!(action.title(), "Confirm Stop");
        assert_eq!(
            action.question(),
            "Are you sure you want to stop container \"plex\"?"
        );
        assert_eq!(
            action.busy_target(),
            BusyTarget::new(TargetKind::Container, "abc123")
        );
    }

    #[test]
    fn list_reload_only_clears_settled_marks() {
        let stopping = BusyTarget::new(TargetKind::Container, "abc123");
        let restarted = BusyTarget::new(TargetKind::Container, "def456");
        let deleting = BusyTarget::new(TargetKind::Pool, "tank");

        let mut busy = BusyMarks::default();
        busy.start(stopping.clone());
        busy.start(restarted.clone());
        busy.start(deleting.clone());
        busy.settle(&restarted);
        busy.settle(&deleting);

        busy.clear_settled(TargetKind::Container);

        assert!(busy.contains(&stopping));
        assert!(!busy.contains(&restarted));
        assert!(busy.contains(&deleting));
    }

    #[test]
    fn settle_ignores_unknown_marks() {
        let mut busy = BusyMarks::default();
        busy.settle(&BusyTarget::new(TargetKind::Document, 4));

        assert!(busy.is_empty());
    }
}
