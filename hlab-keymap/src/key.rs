use std::{fmt::Display, hash::Hash};

/// Named keys in keycode notation, e.g. `<cr>` or `<S-tab>`.
const NAMED_KEYS: [(&str, KeyCode); 15] = [
    ("bs", KeyCode::Backspace),
    ("cr", KeyCode::Enter),
    ("del", KeyCode::Delete),
    ("down", KeyCode::Down),
    ("end", KeyCode::End),
    ("esc", KeyCode::Esc),
    ("home", KeyCode::Home),
    ("left", KeyCode::Left),
    ("lt", KeyCode::LessThan),
    ("pagedown", KeyCode::PageDown),
    ("pageup", KeyCode::PageUp),
    ("right", KeyCode::Right),
    ("space", KeyCode::Space),
    ("tab", KeyCode::Tab),
    ("up", KeyCode::Up),
];

#[derive(Clone, Debug, Eq)]
pub struct Key {
    pub code: KeyCode,
    pub modifiers: Vec<KeyModifier>,
}

impl Key {
    pub fn new(code: KeyCode, modifiers: Vec<KeyModifier>) -> Self {
        Self { code, modifiers }
    }

    /// Uppercase chars are shifted lowercase keys.
    pub fn from_char(c: char) -> Self {
        let modifiers = if c.is_ascii_uppercase() {
            vec![KeyModifier::Shift]
        } else {
            Vec::new()
        };

        Self::new(KeyCode::from_char(c), modifiers)
    }

    pub fn to_keycode_string(&self) -> String {
        self.to_string()
    }

    /// Parses a single key like `q`, `G`, `<esc>` or `<C-s>`.
    pub fn from_keycode_string(keycode: &str) -> Option<Self> {
        let inner = match keycode.strip_prefix('<').and_then(|k| k.strip_suffix('>')) {
            Some(inner) => inner,
            None => {
                let mut chars = keycode.chars();
                return match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(Self::from_char(c)),
                    _ => None,
                };
            }
        };

        if inner.is_empty() {
            return None;
        }

        let mut parts: Vec<&str> = inner.split('-').collect();
        let code = match parts.pop()? {
            "" => {
                // `<C-->` splits into a trailing empty pair
                parts.pop();
                "-"
            }
            code => code,
        };

        let mut key = match KeyCode::from_name(code) {
            Some(code) => Self::new(code, Vec::new()),
            None if code.chars().count() == 1 => Self::from_char(code.chars().next()?),
            None => return None,
        };

        for modifier in parts {
            let modifier = match modifier.to_ascii_uppercase().as_str() {
                "A" => KeyModifier::Alt,
                "C" => KeyModifier::Ctrl,
                "S" => KeyModifier::Shift,
                _ => return None,
            };

            if !key.modifiers.contains(&modifier) {
                key.modifiers.push(modifier);
            }
        }

        Some(key)
    }

    /// Text a key inserts into a form field, if any.
    pub fn to_insert_string(&self) -> Option<String> {
        let shifted = self.modifiers.contains(&KeyModifier::Shift);
        if self.modifiers.iter().any(|m| m != &KeyModifier::Shift) {
            return None;
        }

        match self.code {
            KeyCode::Char(c) if shifted => Some(c.to_uppercase().to_string()),
            KeyCode::Char(c) => Some(c.to_string()),
            KeyCode::LessThan => Some("<".to_owned()),
            KeyCode::Space => Some(" ".to_owned()),
            _ => None,
        }
    }
}

impl Hash for Key {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
            && self.modifiers.len() == other.modifiers.len()
            && self.modifiers.iter().all(|m| other.modifiers.contains(m))
    }
}

impl Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut modifiers = self.modifiers.clone();
        modifiers.sort();

        let (code, bracketed) = match self.code {
            KeyCode::Char(c) if modifiers.contains(&KeyModifier::Shift) => {
                modifiers.retain(|m| m != &KeyModifier::Shift);
                (c.to_ascii_uppercase().to_string(), false)
            }
            KeyCode::Char(c) => (c.to_string(), false),
            code => (code.to_string(), true),
        };

        if modifiers.is_empty() && !bracketed {
            return write!(f, "{}", code);
        }

        let prefix: String = modifiers
            .iter()
            .map(|modifier| match modifier {
                KeyModifier::Alt => "A-",
                KeyModifier::Ctrl => "C-",
                KeyModifier::Shift => "S-",
            })
            .collect();

        write!(f, "<{}{}>", prefix, code)
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum KeyCode {
    Backspace,
    Char(char),
    Delete,
    Down,
    End,
    Enter,
    Esc,
    Home,
    Left,
    LessThan,
    PageDown,
    PageUp,
    Right,
    Space,
    Tab,
    Up,
}

impl KeyCode {
    fn from_name(name: &str) -> Option<Self> {
        NAMED_KEYS
            .iter()
            .find(|(named, _)| *named == name)
            .map(|(_, code)| *code)
    }

    pub fn from_char(c: char) -> KeyCode {
        match c {
            '<' => KeyCode::LessThan,
            ' ' => KeyCode::Space,
            c => KeyCode::Char(c.to_ascii_lowercase()),
        }
    }
}

impl Display for KeyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let KeyCode::Char(c) = self {
            return write!(f, "{}", c);
        }

        let name = NAMED_KEYS
            .iter()
            .find(|(_, code)| code == self)
            .map(|(name, _)| *name)
            .unwrap_or_default();

        write!(f, "{}", name)
    }
}

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum KeyModifier {
    Alt,
    Ctrl,
    Shift,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_shifted_chars() {
        assert_eq!(
            Key::from_keycode_string("q"),
            Some(Key::new(KeyCode::Char('q'), vec![]))
        );
        assert_eq!(
            Key::from_keycode_string("S"),
            Some(Key::new(KeyCode::Char('s'), vec![KeyModifier::Shift]))
        );
        assert_eq!(
            Key::from_keycode_string("-"),
            Some(Key::new(KeyCode::Char('-'), vec![]))
        );
    }

    #[test]
    fn parses_bracketed_keys() {
        assert_eq!(
            Key::from_keycode_string("<C-s>"),
            Some(Key::new(KeyCode::Char('s'), vec![KeyModifier::Ctrl]))
        );
        assert_eq!(
            Key::from_keycode_string("<S-tab>"),
            Some(Key::new(KeyCode::Tab, vec![KeyModifier::Shift]))
        );
        assert_eq!(
            Key::from_keycode_string("<C-->"),
            Some(Key::new(KeyCode::Char('-'), vec![KeyModifier::Ctrl]))
        );
    }

    #[test]
    fn rejects_unknown_keys() {
        assert_eq!(Key::from_keycode_string("<>"), None);
        assert_eq!(Key::from_keycode_string("<nope>"), None);
        assert_eq!(Key::from_keycode_string("<X-a>"), None);
        assert_eq!(Key::from_keycode_string("ab"), None);
    }

    #[test]
    fn renders_keycode_notation() {
        assert_eq!(Key::from_char('G').to_keycode_string(), "G");
        assert_eq!(
            Key::new(KeyCode::Tab, vec![KeyModifier::Shift]).to_keycode_string(),
            "<S-tab>"
        );
        assert_eq!(
            Key::new(KeyCode::Char('s'), vec![KeyModifier::Shift, KeyModifier::Ctrl])
                .to_keycode_string(),
            "<C-S>"
        );
        assert_eq!(Key::new(KeyCode::Esc, vec![]).to_keycode_string(), "<esc>");
    }

    #[test]
    fn insert_string_keeps_case_and_skips_ctrl() {
        assert_eq!(Key::from_char('R').to_insert_string(), Some("R".to_owned()));
        assert_eq!(
            Key::new(KeyCode::Space, vec![]).to_insert_string(),
            Some(" ".to_owned())
        );
        assert_eq!(
            Key::new(KeyCode::Char('s'), vec![KeyModifier::Ctrl]).to_insert_string(),
            None
        );
        assert_eq!(Key::new(KeyCode::Enter, vec![]).to_insert_string(), None);
    }
}
