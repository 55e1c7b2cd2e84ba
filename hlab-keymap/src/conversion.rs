use std::collections::VecDeque;

use crossterm::event::{self, KeyEvent, KeyEventKind};
use regex::Regex;

use crate::key::{Key, KeyCode, KeyModifier};

pub fn from_keycode_string(keycodes: &str) -> VecDeque<Key> {
    let mut keys = VecDeque::new();

    let regex = match Regex::new(r"<[^>]*>|.") {
        Ok(it) => it,
        Err(err) => {
            tracing::error!("keycode regex invalid: {:?}", err);
            return keys;
        }
    };

    for capture in regex.find_iter(keycodes).map(|m| m.as_str()) {
        if let Some(key) = Key::from_keycode_string(capture) {
            keys.push_back(key);
        }
    }

    keys
}

/// Converts a pressed crossterm key into a keymap key. Releases and repeats
/// are dropped.
pub fn to_key(event: &KeyEvent) -> Option<Key> {
    if event.kind != KeyEventKind::Press {
        return None;
    }

    let mut modifiers: Vec<_> = event
        .modifiers
        .iter_names()
        .filter_map(|(name, _)| to_modifier(name))
        .collect();

    let code = match event.code {
        event::KeyCode::BackTab => {
            add_shift(&mut modifiers);
            KeyCode::Tab
        }
        event::KeyCode::Char(c) => {
            if c.is_ascii_uppercase() {
                add_shift(&mut modifiers);
            } else if !c.is_ascii_alphabetic() {
                // symbols like `?` already carry their shift
                modifiers.retain(|m| m != &KeyModifier::Shift);
            }
            KeyCode::from_char(c)
        }
        event::KeyCode::Backspace => KeyCode::Backspace,
        event::KeyCode::Delete => KeyCode::Delete,
        event::KeyCode::Down => KeyCode::Down,
        event::KeyCode::End => KeyCode::End,
        event::KeyCode::Enter => KeyCode::Enter,
        event::KeyCode::Esc => KeyCode::Esc,
        event::KeyCode::Home => KeyCode::Home,
        event::KeyCode::Left => KeyCode::Left,
        event::KeyCode::PageDown => KeyCode::PageDown,
        event::KeyCode::PageUp => KeyCode::PageUp,
        event::KeyCode::Right => KeyCode::Right,
        event::KeyCode::Tab => KeyCode::Tab,
        event::KeyCode::Up => KeyCode::Up,
        _ => return None,
    };

    Some(Key::new(code, modifiers))
}

fn add_shift(modifiers: &mut Vec<KeyModifier>) {
    if !modifiers.contains(&KeyModifier::Shift) {
        modifiers.push(KeyModifier::Shift);
    }
}

fn to_modifier(modifier: &str) -> Option<KeyModifier> {
    match modifier {
        "ALT" | "META" => Some(KeyModifier::Alt),
        "CONTROL" => Some(KeyModifier::Ctrl),
        "SHIFT" => Some(KeyModifier::Shift),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

    use super::*;

    #[test]
    fn from_keycode_string_empty() {
        assert!(from_keycode_string("").is_empty());
    }

    #[test]
    fn from_keycode_string_multiple() {
        let keys = from_keycode_string("<esc>d<C-s>S");
        let expected: VecDeque<Key> = VecDeque::from(vec![
            Key::new(KeyCode::Esc, vec![]),
            Key::new(KeyCode::from_char('d'), vec![]),
            Key::new(KeyCode::from_char('s'), vec![KeyModifier::Ctrl]),
            Key::new(KeyCode::from_char('s'), vec![KeyModifier::Shift]),
        ]);

        assert_eq!(keys, expected);
    }

    #[test]
    fn from_keycode_string_invalid() {
        assert!(from_keycode_string("<Invalid>").is_empty());
    }

    #[test]
    fn release_events_are_ignored() {
        let event = KeyEvent {
            code: event::KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };

        assert_eq!(to_key(&event), None);
    }

    #[test]
    fn back_tab_is_shifted_tab() {
        let event = KeyEvent::new(event::KeyCode::BackTab, KeyModifiers::SHIFT);

        assert_eq!(
            to_key(&event),
            Some(Key::new(KeyCode::Tab, vec![KeyModifier::Shift]))
        );
    }
}
