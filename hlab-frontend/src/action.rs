use hlab_keymap::message::Mode;

use crate::{event::Emitter, task::Task};

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    ModeChanged(Mode),
    Quit,
    Task(Task),
}

#[derive(Debug, PartialEq)]
pub enum ActionResult {
    Normal,
    Quit,
}

pub async fn exec(emitter: &mut Emitter, actions: Vec<Action>) -> ActionResult {
    let mut result = ActionResult::Normal;
    for action in actions {
        match action {
            Action::ModeChanged(mode) => emitter.set_current_mode(mode).await,
            Action::Quit => result = ActionResult::Quit,
            Action::Task(task) => emitter.run(task),
        }
    }
    result
}
