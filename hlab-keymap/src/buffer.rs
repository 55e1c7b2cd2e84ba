use crate::key::Key;

/// Keys of a sequence that is not resolved yet, e.g. the first `d` of `dd`.
#[derive(Debug, Default)]
pub struct KeyBuffer {
    keys: Vec<Key>,
}

impl KeyBuffer {
    pub fn push(&mut self, key: Key) {
        self.keys.push(key);
    }

    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn to_keycode_string(&self) -> String {
        self.keys.iter().map(Key::to_keycode_string).collect()
    }
}
