use hlab_api::Recommendation;

use crate::{
    action::Action,
    model::{BusyTarget, Model, PendingAction, PendingKind, TargetKind},
    poll::Check,
    task::Task,
};

use super::{dialog, notification};

pub fn open(model: &mut Model) -> Vec<Action> {
    match model.recommendations.list.selected() {
        Some(recommendation) => vec![Action::Task(Task::LoadRecommendation(recommendation.id))],
        None => Vec::new(),
    }
}

pub fn close(model: &mut Model) -> Vec<Action> {
    model.recommendations.detail = None;
    Vec::new()
}

pub fn loaded(model: &mut Model, id: u64, result: Result<Recommendation, String>) -> Vec<Action> {
    match result {
        Ok(recommendation) => {
            model.recommendations.detail = Some(recommendation);
            Vec::new()
        }
        Err(reason) => {
            tracing::error!("loading recommendation {} failed: {}", id, reason);
            notification::danger(model, format!("Error: {}", reason))
        }
    }
}

/// Implemented recommendations are skipped.
pub fn implement(model: &mut Model) -> Vec<Action> {
    let target = model
        .recommendations
        .detail
        .as_ref()
        .or_else(|| model.recommendations.list.selected());

    let pending = match target {
        Some(recommendation) if !recommendation.implemented => PendingAction {
            kind: PendingKind::ImplementRecommendation,
            target_id: recommendation.id.to_string(),
            target_name: recommendation.recommendation.clone(),
        },
        Some(_) | None => return Vec::new(),
    };

    dialog::open(model, pending)
}

pub fn implemented(model: &mut Model, id: u64, result: Result<(), String>) -> Vec<Action> {
    let target = BusyTarget::new(TargetKind::Recommendation, id);
    match result {
        Ok(()) => {
            model.busy.settle(&target);

            if let Some(detail) = model.recommendations.detail.as_mut() {
                if detail.id == id {
                    detail.implemented = true;
                }
            }

            let mut actions =
                notification::success(model, "Implementation plan created successfully!");
            actions.push(Action::Task(Task::Poll(Check::Recommendations)));
            actions
        }
        Err(reason) => {
            model.busy.remove(&target);
            notification::danger(model, format!("Error: {}", reason))
        }
    }
}

#[cfg(test)]
mod test {
    use hlab_api::Recommendation;

    use crate::{
        action::Action,
        model::{ConfirmDialog, Model},
        poll::Check,
        task::Task,
        update::dialog,
    };

    fn model_with(implemented: bool) -> Model {
        let mut model = Model::default();
        model.recommendations.list.replace(Ok(vec![Recommendation {
            id: 12,
            category: "storage".to_owned(),
            recommendation: "Enable scrubbing".to_owned(),
            priority: 2,
            implemented,
        }]));
        model
    }

    #[test]
    fn implement_confirms_then_reloads() {
        let mut model = model_with(false);

        super::implement(&mut model);
        assert!(matches!(model.dialog, ConfirmDialog::Confirming(_)));

        let actions = dialog::confirm(&mut model);
        assert!(actions.contains(&Action::Task(Task::ImplementRecommendation(12))));

        let actions = super::implemented(&mut model, 12, Ok(()));
        assert!(actions.contains(&Action::Task(Task::Poll(Check::Recommendations))));
    }

    #[test]
    fn implemented_recommendation_cannot_be_implemented_again() {
        let mut model = model_with(true);

        assert!(super::implement(&mut model).is_empty());
        assert_eq!(model.dialog, ConfirmDialog::Idle);
    }
}
