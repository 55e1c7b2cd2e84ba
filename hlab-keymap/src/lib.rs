use buffer::KeyBuffer;
use hlab_buffer::message::{BufferMessage, TextModification};
use key::{Key, KeyCode};
use map::KeyMap;
use message::{Binding, BindingKind, KeySequence, KeymapMessage, Mode};
use tree::KeyTree;

mod buffer;
pub mod conversion;
pub mod key;
mod map;
pub mod message;
mod tree;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum KeyMapError {
    #[error("Mapping for mode {0} has no keys.")]
    EmptyMapping(String),
    #[error("Key sequence is incomplete.")]
    KeySequenceIncomplete,
    #[error("Mapping for mode {0} conflicts with an existing one.")]
    MappingConflict(String),
    #[error("Failed to add mapping for mode {0}.")]
    ModeUnresolvable(String),
    #[error("Failed to resolve valid binding.")]
    NoValidBindingFound,
}

#[derive(Debug)]
pub struct MessageResolver {
    buffer: KeyBuffer,
    pub mode: Mode,
    tree: KeyTree,
}

impl Default for MessageResolver {
    fn default() -> Self {
        Self {
            buffer: KeyBuffer::default(),
            mode: Mode::default(),
            tree: KeyMap::default().into_tree(),
        }
    }
}

impl MessageResolver {
    pub fn add_key(&mut self, key: Key) -> (Vec<KeymapMessage>, KeySequence) {
        if key.code == KeyCode::Esc && !self.buffer.is_empty() {
            let sequence = format!(
                "{}{}",
                self.buffer.to_keycode_string(),
                key.to_keycode_string()
            );

            self.buffer.clear();
            return (Vec::new(), KeySequence::Completed(sequence));
        }

        self.buffer.push(key);

        let keys = self.buffer.keys().to_vec();
        let sequence = self.buffer.to_keycode_string();

        match self.tree.get_binding(&self.mode, &keys) {
            Ok(binding) => {
                self.buffer.clear();
                (
                    get_messages_from_binding(&binding),
                    KeySequence::Completed(sequence),
                )
            }
            Err(KeyMapError::KeySequenceIncomplete) => (Vec::new(), KeySequence::Changed(sequence)),
            Err(error) => {
                tracing::trace!("no binding for {} in {}: {:?}", sequence, self.mode, error);

                let messages = if self.mode == Mode::Insert {
                    get_passthrough_messages(&keys)
                } else {
                    Vec::new()
                };

                self.buffer.clear();
                (messages, KeySequence::Completed(sequence))
            }
        }
    }
}

fn get_messages_from_binding(binding: &Binding) -> Vec<KeymapMessage> {
    match &binding.kind {
        BindingKind::Message(message) => vec![message.clone()],
        BindingKind::Modification(modification) => vec![KeymapMessage::Buffer(
            BufferMessage::Modification(1, modification.clone()),
        )],
        BindingKind::Motion(motion) => vec![KeymapMessage::Buffer(BufferMessage::MoveCursor(
            1,
            motion.clone(),
        ))],
        BindingKind::None => Vec::new(),
    }
}

fn get_passthrough_messages(keys: &[Key]) -> Vec<KeymapMessage> {
    let text: String = keys.iter().filter_map(Key::to_insert_string).collect();
    if text.is_empty() {
        return Vec::new();
    }

    vec![KeymapMessage::Buffer(BufferMessage::Modification(
        1,
        TextModification::Insert(text),
    ))]
}
