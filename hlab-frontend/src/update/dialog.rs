use std::time::Duration;

use hlab_api::{ContainerAction, Document, MediaRequest, Script};
use hlab_keymap::message::Mode;

use crate::{
    action::Action,
    entity::PanelEntity,
    model::{BusyTarget, ConfirmDialog, Model, PendingAction, PendingKind, TargetKind},
    poll::Check,
    task::{PanelTask, Task},
};

use super::{mode, notification};

const CONTAINER_RELOAD_DELAY: Duration = Duration::from_secs(1);

/// Opens the confirm dialog unless the target already has an action in flight.
pub fn open(model: &mut Model, action: PendingAction) -> Vec<Action> {
    if model.busy.contains(&action.busy_target()) {
        tracing::debug!("ignoring action on busy target: {:?}", action);
        return Vec::new();
    }

    model.dialog = ConfirmDialog::Confirming(action);
    mode::change(model, Mode::Dialog)
}

pub fn cancel(model: &mut Model) -> Vec<Action> {
    model.dialog = ConfirmDialog::Idle;
    mode::change(model, Mode::Navigation)
}

#[tracing::instrument(skip(model))]
pub fn confirm(model: &mut Model) -> Vec<Action> {
    let pending = match std::mem::take(&mut model.dialog) {
        ConfirmDialog::Confirming(pending) => pending,
        ConfirmDialog::Idle => return mode::change(model, Mode::Navigation),
    };

    let mut actions = mode::change(model, Mode::Navigation);

    let task = match to_task(&pending) {
        Some(task) => task,
        None => {
            tracing::error!("pending action has an invalid target: {:?}", pending);
            return actions;
        }
    };

    if pending.kind == PendingKind::DeletePool {
        actions.extend(notification::info(
            model,
            format!("Deleting ZFS pool \"{}\"...", pending.target_name),
        ));
    }

    model.busy.start(pending.busy_target());
    actions.push(Action::Task(task));
    actions
}

fn to_task(pending: &PendingAction) -> Option<Task> {
    let task = match pending.kind {
        PendingKind::Container(action) => {
            Task::ContainerAction(pending.target_id.clone(), action)
        }
        PendingKind::DeletePool => Task::DeletePool(pending.target_id.clone()),
        PendingKind::DeleteDocument => {
            Document::task(PanelTask::Delete(pending.target_id.parse().ok()?))
        }
        PendingKind::DeleteMediaRequest => {
            MediaRequest::task(PanelTask::Delete(pending.target_id.parse().ok()?))
        }
        PendingKind::DeleteScript => {
            Script::task(PanelTask::Delete(pending.target_id.parse().ok()?))
        }
        PendingKind::ImplementRecommendation => {
            Task::ImplementRecommendation(pending.target_id.parse().ok()?)
        }
    };

    Some(task)
}

/// Offers the action for the highlighted container if its state allows it.
pub fn container_action(model: &mut Model, action: ContainerAction) -> Vec<Action> {
    let container = match model.containers.selected() {
        Some(it) => it,
        None => return Vec::new(),
    };

    let allowed = match action {
        ContainerAction::Start => !container.is_running(),
        ContainerAction::Restart | ContainerAction::Stop => container.is_running(),
    };

    if !allowed {
        tracing::debug!("{} is not offered for {}", action.as_str(), container.name);
        return Vec::new();
    }

    let pending = PendingAction {
        kind: PendingKind::Container(action),
        target_id: container.id.clone(),
        target_name: container.name.clone(),
    };

    open(model, pending)
}

pub fn container_finished(
    model: &mut Model,
    id: String,
    action: ContainerAction,
    result: Result<(), String>,
) -> Vec<Action> {
    let target = BusyTarget::new(TargetKind::Container, id);
    match result {
        Ok(()) => {
            model.busy.settle(&target);

            let mut actions = notification::success(
                model,
                format!("Container {} successfully", action.past_tense()),
            );
            actions.push(Action::Task(Task::PollDelayed(
                CONTAINER_RELOAD_DELAY,
                Check::DockerContainers,
            )));
            actions
        }
        Err(reason) => {
            model.busy.remove(&target);
            notification::danger(model, format!("Error: {}", reason))
        }
    }
}

pub fn delete_pool(model: &mut Model) -> Vec<Action> {
    let pending = match model.zpools.selected() {
        Some(pool) => PendingAction {
            kind: PendingKind::DeletePool,
            target_id: pool.name.clone(),
            target_name: pool.name.clone(),
        },
        None => return Vec::new(),
    };

    open(model, pending)
}

pub fn pool_deleted(model: &mut Model, name: String, result: Result<String, String>) -> Vec<Action> {
    let target = BusyTarget::new(TargetKind::Pool, &name);
    match result {
        Ok(message) => {
            model.busy.settle(&target);

            let text = if message.is_empty() {
                format!("ZFS pool \"{}\" deleted", name)
            } else {
                message
            };

            let mut actions = notification::success(model, text);
            actions.push(Action::Task(Task::Poll(Check::ZfsPools)));
            actions.push(Action::Task(Task::Poll(Check::StorageInfo)));
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
    use hlab_api::{Container, ContainerAction, Zpool};
    use hlab_keymap::message::Mode;

    use crate::{
        action::Action,
        event::PollResult,
        model::{BusyTarget, ConfirmDialog, Level, Model, TargetKind},
        poll::Check,
        task::Task,
        update::poll,
    };

    fn tasks(actions: &[Action]) -> Vec<&Task> {
        actions
            .iter()
            .filter_map(|action| match action {
                Action::Task(Task::ExpireNotification(_)) => None,
                Action::Task(task) => Some(task),
                _ => None,
            })
            .collect()
    }

    fn model_with_container(status: &str) -> Model {
        let mut model = Model::default();
        model.containers.replace(Ok(vec![Container {
            id: "abc123".to_owned(),
            name: "plex".to_owned(),
            status: status.to_owned(),
            ..Default::default()
        }]));
        model
    }

    #[test]
    fn stop_opens_dialog_and_confirm_emits_exactly_one_task() {
        let mut model = model_with_container("Up 3 hours");

        let actions = super::container_action(&mut model, ContainerAction::Stop);
        assert!(tasks(&actions).is_empty());
        assert_eq!(model.mode, Mode::Dialog);

        let actions = super::confirm(&mut model);
        assert_eq!(
            tasks(&actions),
            vec![&Task::ContainerAction(
                "abc123".to_owned(),
                ContainerAction::Stop
            )]
        );
        assert!(model.is_busy(TargetKind::Container, "abc123"));
        assert_eq!(model.dialog, ConfirmDialog::Idle);
        assert_eq!(model.mode, Mode::Navigation);
    }

    #[test]
    fn cancel_emits_no_task() {
        let mut model = model_with_container("Up 3 hours");
        super::container_action(&mut model, ContainerAction::Restart);

        let actions = super::cancel(&mut model);

        assert!(tasks(&actions).is_empty());
        assert_eq!(model.dialog, ConfirmDialog::Idle);
        assert!(model.busy.is_empty());
    }

    #[test]
    fn start_is_only_offered_for_stopped_containers() {
        let mut model = model_with_container("Up 3 hours");
        assert!(super::container_action(&mut model, ContainerAction::Start).is_empty());
        assert_eq!(model.dialog, ConfirmDialog::Idle);

        let mut model = model_with_container("Exited (0) 2 days ago");
        assert!(super::container_action(&mut model, ContainerAction::Stop).is_empty());
        assert!(!super::container_action(&mut model, ContainerAction::Start).is_empty());
    }

    #[test]
    fn busy_target_ignores_further_actions() {
        let mut model = model_with_container("Up 3 hours");
        model
            .busy
            .start(BusyTarget::new(TargetKind::Container, "abc123"));

        assert!(super::container_action(&mut model, ContainerAction::Stop).is_empty());
        assert_eq!(model.dialog, ConfirmDialog::Idle);
    }

    #[test]
    fn successful_action_keeps_busy_and_reloads_after_delay() {
        let mut model = model_with_container("Up 3 hours");
        model
            .busy
            .start(BusyTarget::new(TargetKind::Container, "abc123"));

        let actions = super::container_finished(
            &mut model,
            "abc123".to_owned(),
            ContainerAction::Stop,
            Ok(()),
        );

        assert!(model.is_busy(TargetKind::Container, "abc123"));
        assert_eq!(
            tasks(&actions),
            vec![&Task::PollDelayed(
                super::CONTAINER_RELOAD_DELAY,
                Check::DockerContainers
            )]
        );
        assert_eq!(
            model.notifications.entries.last().map(|n| n.text.as_str()),
            Some("Container stopped successfully")
        );
    }

    #[test]
    fn failed_action_clears_busy_and_notifies() {
        let mut model = model_with_container("Up 3 hours");
        model
            .busy
            .start(BusyTarget::new(TargetKind::Container, "abc123"));

        super::container_finished(
            &mut model,
            "abc123".to_owned(),
            ContainerAction::Stop,
            Err("container not found".to_owned()),
        );

        assert!(model.busy.is_empty());
        assert_eq!(
            model.notifications.entries.last().map(|n| (n.level, n.text.as_str())),
            Some((Level::Danger, "Error: container not found"))
        );
    }

    #[test]
    fn pool_delete_uses_backend_message() {
        let mut model = Model::default();
        model.zpools.replace(Ok(vec![Zpool {
            name: "tank".to_owned(),
            ..Default::default()
        }]));

        super::delete_pool(&mut model);
        let actions = super::confirm(&mut model);
        assert_eq!(tasks(&actions), vec![&Task::DeletePool("tank".to_owned())]);

        let actions = super::pool_deleted(
            &mut model,
            "tank".to_owned(),
            Ok("Pool tank destroyed".to_owned()),
        );

        assert_eq!(
            tasks(&actions),
            vec![&Task::Poll(Check::ZfsPools), &Task::Poll(Check::StorageInfo)]
        );
        assert_eq!(
            model.notifications.entries.last().map(|n| n.text.as_str()),
            Some("Pool tank destroyed")
        );
    }

    #[test]
    fn container_reload_keeps_busy_until_action_finishes() {
        let mut model = model_with_container("Up 3 hours");
        let rows = vec![Container {
            id: "abc123".to_owned(),
            name: "plex".to_owned(),
            status: "Up 3 hours".to_owned(),
            ..Default::default()
        }];

        super::container_action(&mut model, ContainerAction::Stop);
        super::confirm(&mut model);

        poll::update(&mut model, PollResult::Containers(Ok(rows.clone())));
        assert!(model.is_busy(TargetKind::Container, "abc123"));
        assert!(super::container_action(&mut model, ContainerAction::Stop).is_empty());
        assert_eq!(model.dialog, ConfirmDialog::Idle);

        super::container_finished(
            &mut model,
            "abc123".to_owned(),
            ContainerAction::Stop,
            Ok(()),
        );
        assert!(model.is_busy(TargetKind::Container, "abc123"));

        poll::update(&mut model, PollResult::Containers(Ok(rows)));
        assert!(!model.is_busy(TargetKind::Container, "abc123"));
    }

    #[test]
    fn pool_reload_keeps_busy_while_delete_is_running() {
        let mut model = Model::default();
        let pools = vec![Zpool {
            name: "tank".to_owned(),
            ..Default::default()
        }];
        model.zpools.replace(Ok(pools.clone()));

        super::delete_pool(&mut model);
        super::confirm(&mut model);
        poll::update(&mut model, PollResult::Zpools(Ok(pools)));

        assert!(model.is_busy(TargetKind::Pool, "tank"));
    }
}
