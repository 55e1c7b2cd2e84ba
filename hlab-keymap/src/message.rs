use std::fmt::Display;

use hlab_buffer::message::{BufferMessage, CursorDirection, TextModification};

#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub enum Mode {
    Dialog,
    Insert,
    #[default]
    Navigation,
}

impl Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mode = match self {
            Mode::Dialog => "dialog",
            Mode::Insert => "insert",
            Mode::Navigation => "navigation",
        };

        write!(f, "{}", mode)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Binding {
    pub kind: BindingKind,
}

impl Binding {
    pub fn from_message(message: KeymapMessage) -> Self {
        Self {
            kind: BindingKind::Message(message),
        }
    }

    pub fn from_motion(motion: CursorDirection) -> Self {
        Self {
            kind: BindingKind::Motion(motion),
        }
    }

    pub fn from_modification(modification: TextModification) -> Self {
        Self {
            kind: BindingKind::Modification(modification),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum BindingKind {
    Message(KeymapMessage),
    Modification(TextModification),
    Motion(CursorDirection),
    #[default]
    None,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum KeySequence {
    Completed(String),
    Changed(String),
    None,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum KeymapMessage {
    Buffer(BufferMessage),
    Cancel,
    Confirm,
    Create,
    Delete,
    Edit,
    Implement,
    NextField,
    NextPage,
    OpenSelected,
    PreviousField,
    PreviousPage,
    Quit,
    Refresh,
    Restart,
    SelectFirst,
    SelectLast,
    SelectNext,
    SelectPrevious,
    ShowPage(usize),
    Start,
    Stop,
    Submit,
    TestConnection,
    Yank,
}
