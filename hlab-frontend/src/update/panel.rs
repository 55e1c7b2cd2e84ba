use hlab_keymap::message::Mode;

use crate::{
    action::Action,
    entity::PanelEntity,
    event::{LoadIntent, PanelEvent},
    model::{BusyTarget, CrudPanel, Model, PanelMode, PendingAction, Selection},
    task::PanelTask,
};

use super::{dialog, mode, notification};

pub fn select<E: PanelEntity>(_model: &mut Model, id: u64) -> Vec<Action> {
    vec![load::<E>(id, LoadIntent::View)]
}

pub fn select_current<E: PanelEntity>(model: &mut Model) -> Vec<Action> {
    match E::panel(model).list.selected().map(E::id) {
        Some(id) => select::<E>(model, id),
        None => Vec::new(),
    }
}

pub fn start_create<E: PanelEntity>(model: &mut Model) -> Vec<Action> {
    E::panel(model).mode = PanelMode::Editing(E::blank_form());
    mode::change(model, Mode::Insert)
}

pub fn start_edit<E: PanelEntity>(_model: &mut Model, id: u64) -> Vec<Action> {
    vec![load::<E>(id, LoadIntent::Edit)]
}

/// Edits the shown entity, or the highlighted row if nothing is shown.
pub fn start_edit_current<E: PanelEntity>(model: &mut Model) -> Vec<Action> {
    let panel = E::panel(model);
    let id = match &panel.mode {
        PanelMode::Viewing(entity) => Some(entity.id()),
        PanelMode::Placeholder => panel.list.selected().map(E::id),
        PanelMode::Editing(_) => None,
    };

    match id {
        Some(id) => start_edit::<E>(model, id),
        None => Vec::new(),
    }
}

pub fn submit<E: PanelEntity>(model: &mut Model) -> Vec<Action> {
    let (bound_id, payload) = match &E::panel(model).mode {
        PanelMode::Editing(form) => (form.bound_id, E::payload(form)),
        PanelMode::Placeholder | PanelMode::Viewing(_) => return Vec::new(),
    };

    let payload = match payload {
        Ok(it) => it,
        Err(error) => return notification::danger(model, error.to_string()),
    };

    let task = match bound_id {
        Some(id) => PanelTask::Update(id, payload),
        None => PanelTask::Create(payload),
    };

    vec![Action::Task(E::task(task))]
}

pub fn cancel<E: PanelEntity>(model: &mut Model) -> Vec<Action> {
    let panel = E::panel(model);
    let selection = panel.mode.selection();

    let mut actions = match (panel.is_editing(), selection) {
        (true, Some(Selection::Entity(id))) => {
            panel.mode = PanelMode::Placeholder;
            vec![load::<E>(id, LoadIntent::View)]
        }
        (_, Some(_)) => {
            panel.mode = PanelMode::Placeholder;
            Vec::new()
        }
        (_, None) => Vec::new(),
    };

    actions.extend(mode::change(model, Mode::Navigation));
    actions
}

/// Asks for confirmation. The delete task is only emitted on confirm.
pub fn delete<E: PanelEntity>(model: &mut Model, id: u64) -> Vec<Action> {
    let title = title_of(E::panel(model), id).unwrap_or_else(|| format!("{} {}", E::NAME, id));

    dialog::open(
        model,
        PendingAction {
            kind: E::DELETE,
            target_id: id.to_string(),
            target_name: title,
        },
    )
}

pub fn delete_current<E: PanelEntity>(model: &mut Model) -> Vec<Action> {
    let panel = E::panel(model);
    let id = match &panel.mode {
        PanelMode::Viewing(entity) => Some(entity.id()),
        PanelMode::Placeholder => panel.list.selected().map(E::id),
        PanelMode::Editing(_) => None,
    };

    match id {
        Some(id) => delete::<E>(model, id),
        None => Vec::new(),
    }
}

#[tracing::instrument(skip(model))]
pub fn on_event<E: PanelEntity>(model: &mut Model, event: PanelEvent<E>) -> Vec<Action> {
    let name = E::NAME;
    match event {
        PanelEvent::Listed(result) => {
            if let Err(reason) = &result {
                tracing::error!("listing {} failed: {}", name, reason);
            }

            model.busy.clear_settled(E::TARGET);
            E::panel(model).list.replace(result);
            Vec::new()
        }
        PanelEvent::Loaded(id, intent, Ok(entity)) => {
            let panel = E::panel(model);
            let stale = match (&panel.mode, intent) {
                (PanelMode::Editing(_), LoadIntent::View) => true,
                (PanelMode::Editing(form), LoadIntent::Edit) => form.bound_id != Some(id),
                _ => false,
            };

            if stale {
                tracing::debug!("dropping {} {} load while a form is open", name, id);
                return Vec::new();
            }

            match intent {
                LoadIntent::View => {
                    let actions = entity.viewed().into_iter().map(Action::Task).collect();
                    panel.mode = PanelMode::Viewing(entity);
                    actions
                }
                LoadIntent::Edit => {
                    panel.mode = PanelMode::Editing(entity.edit_form());
                    mode::change(model, Mode::Insert)
                }
            }
        }
        PanelEvent::Loaded(id, _, Err(reason)) => {
            tracing::error!("loading {} {} failed: {}", name, id, reason);
            notification::danger(model, format!("Error: {}", reason))
        }
        PanelEvent::Created(Ok(id)) => {
            let mut actions = saved::<E>(model, id);
            actions.extend(notification::success(
                model,
                format!("{} created successfully", name),
            ));
            actions
        }
        PanelEvent::Updated(id, Ok(())) => {
            let mut actions = saved::<E>(model, id);
            actions.extend(notification::success(
                model,
                format!("{} updated successfully", name),
            ));
            actions
        }
        PanelEvent::Created(Err(reason)) | PanelEvent::Updated(_, Err(reason)) => {
            notification::danger(model, format!("Error: {}", reason))
        }
        PanelEvent::Deleted(id, result) => {
            let target = BusyTarget::new(E::TARGET, id);
            match result {
                Ok(()) => {
                    model.busy.settle(&target);

                    let panel = E::panel(model);
                    if !panel.is_editing() {
                        panel.mode = PanelMode::Placeholder;
                    }

                    let mut actions = vec![Action::Task(E::task(PanelTask::List))];
                    actions.extend(notification::success(
                        model,
                        format!("{} deleted successfully", name),
                    ));
                    actions
                }
                Err(reason) => {
                    model.busy.remove(&target);
                    notification::danger(model, format!("Error: {}", reason))
                }
            }
        }
    }
}

/// Shows the submitted values until the entity is fetched again.
fn saved<E: PanelEntity>(model: &mut Model, id: u64) -> Vec<Action> {
    let panel = E::panel(model);
    let submitted = match &panel.mode {
        PanelMode::Editing(form) => E::payload(form).ok().map(|it| E::from_payload(id, it)),
        PanelMode::Placeholder | PanelMode::Viewing(_) => None,
    };

    let mut actions = Vec::new();
    panel.mode = match submitted {
        Some(entity) => {
            actions.extend(entity.viewed().into_iter().map(Action::Task));
            PanelMode::Viewing(entity)
        }
        None => PanelMode::Placeholder,
    };

    actions.extend(mode::change(model, Mode::Navigation));
    actions.push(Action::Task(E::task(PanelTask::List)));
    actions.push(load::<E>(id, LoadIntent::View));
    actions
}

fn title_of<E: PanelEntity>(panel: &CrudPanel<E>, id: u64) -> Option<String> {
    if let PanelMode::Viewing(entity) = &panel.mode {
        if entity.id() == id {
            return Some(entity.title().to_owned());
        }
    }

    panel
        .list
        .rows
        .payload()
        .and_then(|rows| rows.iter().find(|entity| entity.id() == id))
        .map(|entity| entity.title().to_owned())
}

fn load<E: PanelEntity>(id: u64, intent: LoadIntent) -> Action {
    Action::Task(E::task(PanelTask::Load(id, intent)))
}
