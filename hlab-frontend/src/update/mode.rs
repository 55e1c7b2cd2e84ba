use hlab_keymap::message::Mode;

use crate::{action::Action, model::Model};

pub fn change(model: &mut Model, mode: Mode) -> Vec<Action> {
    if model.mode == mode {
        return Vec::new();
    }

    tracing::debug!("changing mode from {} to {}", model.mode, mode);

    model.mode = mode.clone();
    vec![Action::ModeChanged(mode)]
}
