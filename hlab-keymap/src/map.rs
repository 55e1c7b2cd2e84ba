use std::collections::HashMap;

use hlab_buffer::message::{CursorDirection, TextModification};

use crate::{
    conversion,
    key::Key,
    message::{Binding, KeymapMessage, Mode},
    tree::KeyTree,
};

#[derive(Debug)]
pub struct KeyMap {
    mappings: HashMap<Mode, Vec<(Vec<Key>, Binding)>>,
}

impl KeyMap {
    pub fn into_tree(self) -> KeyTree {
        let mut tree = KeyTree::default();
        for (mode, mappings) in self.mappings {
            for (keys, binding) in mappings {
                if let Err(error) = tree.add_mapping(&mode, keys, binding) {
                    tracing::error!("keymap mapping could not be added: {:?}", error);
                }
            }
        }
        tree
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        let mut mappings = HashMap::new();

        add_mapping(
            &mut mappings,
            Mode::Navigation,
            vec![
                ("q", Binding::from_message(KeymapMessage::Quit)),
                ("<tab>", Binding::from_message(KeymapMessage::NextPage)),
                ("<S-tab>", Binding::from_message(KeymapMessage::PreviousPage)),
                ("1", Binding::from_message(KeymapMessage::ShowPage(0))),
                ("2", Binding::from_message(KeymapMessage::ShowPage(1))),
                ("3", Binding::from_message(KeymapMessage::ShowPage(2))),
                ("4", Binding::from_message(KeymapMessage::ShowPage(3))),
                ("5", Binding::from_message(KeymapMessage::ShowPage(4))),
                ("6", Binding::from_message(KeymapMessage::ShowPage(5))),
                ("7", Binding::from_message(KeymapMessage::ShowPage(6))),
                ("j", Binding::from_message(KeymapMessage::SelectNext)),
                ("<down>", Binding::from_message(KeymapMessage::SelectNext)),
                ("k", Binding::from_message(KeymapMessage::SelectPrevious)),
                ("<up>", Binding::from_message(KeymapMessage::SelectPrevious)),
                ("gg", Binding::from_message(KeymapMessage::SelectFirst)),
                ("G", Binding::from_message(KeymapMessage::SelectLast)),
                ("<cr>", Binding::from_message(KeymapMessage::OpenSelected)),
                ("n", Binding::from_message(KeymapMessage::Create)),
                ("e", Binding::from_message(KeymapMessage::Edit)),
                ("dd", Binding::from_message(KeymapMessage::Delete)),
                ("s", Binding::from_message(KeymapMessage::Start)),
                ("S", Binding::from_message(KeymapMessage::Stop)),
                ("r", Binding::from_message(KeymapMessage::Restart)),
                ("R", Binding::from_message(KeymapMessage::Refresh)),
                ("y", Binding::from_message(KeymapMessage::Yank)),
                ("t", Binding::from_message(KeymapMessage::TestConnection)),
                ("i", Binding::from_message(KeymapMessage::Implement)),
                ("<esc>", Binding::from_message(KeymapMessage::Cancel)),
            ],
        );

        add_mapping(
            &mut mappings,
            Mode::Dialog,
            vec![
                ("y", Binding::from_message(KeymapMessage::Confirm)),
                ("<cr>", Binding::from_message(KeymapMessage::Confirm)),
                ("n", Binding::from_message(KeymapMessage::Cancel)),
                ("q", Binding::from_message(KeymapMessage::Cancel)),
                ("<esc>", Binding::from_message(KeymapMessage::Cancel)),
            ],
        );

        add_mapping(
            &mut mappings,
            Mode::Insert,
            vec![
                ("<esc>", Binding::from_message(KeymapMessage::Cancel)),
                ("<C-s>", Binding::from_message(KeymapMessage::Submit)),
                ("<tab>", Binding::from_message(KeymapMessage::NextField)),
                ("<S-tab>", Binding::from_message(KeymapMessage::PreviousField)),
                (
                    "<bs>",
                    Binding::from_modification(TextModification::DeleteCharBeforeCursor),
                ),
                (
                    "<del>",
                    Binding::from_modification(TextModification::DeleteCharOnCursor),
                ),
                ("<C-u>", Binding::from_modification(TextModification::DeleteLine)),
                (
                    "<cr>",
                    Binding::from_modification(TextModification::InsertLineBreak),
                ),
                ("<left>", Binding::from_motion(CursorDirection::Left)),
                ("<right>", Binding::from_motion(CursorDirection::Right)),
                ("<up>", Binding::from_motion(CursorDirection::Up)),
                ("<down>", Binding::from_motion(CursorDirection::Down)),
                ("<home>", Binding::from_motion(CursorDirection::LineStart)),
                ("<end>", Binding::from_motion(CursorDirection::LineEnd)),
                ("<pageup>", Binding::from_motion(CursorDirection::Top)),
                ("<pagedown>", Binding::from_motion(CursorDirection::Bottom)),
            ],
        );

        Self { mappings }
    }
}

fn add_mapping(
    mappings: &mut HashMap<Mode, Vec<(Vec<Key>, Binding)>>,
    mode: Mode,
    bindings: Vec<(&str, Binding)>,
) {
    let entry = mappings.entry(mode).or_default();
    for (keycodes, binding) in bindings {
        let keys: Vec<_> = conversion::from_keycode_string(keycodes).into();
        entry.push((keys, binding));
    }
}
