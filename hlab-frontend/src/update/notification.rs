use chrono::Local;

use crate::{
    action::Action,
    model::{Level, Model},
    task::Task,
};

pub fn danger(model: &mut Model, text: impl Into<String>) -> Vec<Action> {
    notify(model, Level::Danger, text.into())
}

pub fn info(model: &mut Model, text: impl Into<String>) -> Vec<Action> {
    notify(model, Level::Info, text.into())
}

pub fn success(model: &mut Model, text: impl Into<String>) -> Vec<Action> {
    notify(model, Level::Success, text.into())
}

pub fn expired(model: &mut Model, id: usize) -> Vec<Action> {
    model.notifications.remove(id);
    Vec::new()
}

/// Removes notifications whose expiry message got lost.
pub fn prune(model: &mut Model) {
    model.notifications.prune(Local::now());
}

fn notify(model: &mut Model, level: Level, text: String) -> Vec<Action> {
    match level {
        Level::Danger => tracing::error!("{}", text),
        Level::Info | Level::Success => tracing::info!("{}", text),
    }

    let id = model.notifications.push(level, text);
    vec![Action::Task(Task::ExpireNotification(id))]
}
