use std::{collections::HashMap, slice::Iter};

use crate::{
    key::Key,
    message::{Binding, Mode},
    KeyMapError,
};

#[derive(Debug, Default)]
pub struct KeyTree {
    modes: HashMap<Mode, Node>,
}

#[derive(Clone, Debug)]
pub enum Node {
    Binding(Binding),
    Key(HashMap<Key, Node>),
}

impl KeyTree {
    pub fn add_mapping(
        &mut self,
        mode: &Mode,
        keys: Vec<Key>,
        binding: Binding,
    ) -> Result<(), KeyMapError> {
        if keys.is_empty() {
            return Err(KeyMapError::EmptyMapping(mode.to_string()));
        }

        let node = self
            .modes
            .entry(mode.clone())
            .or_insert_with(|| Node::Key(HashMap::new()));

        if add_mapping_node(node, &mut keys.iter(), binding) {
            Ok(())
        } else {
            Err(KeyMapError::MappingConflict(mode.to_string()))
        }
    }

    pub fn get_binding(&self, mode: &Mode, keys: &[Key]) -> Result<Binding, KeyMapError> {
        let node = match self.modes.get(mode) {
            Some(it) => it,
            None => return Err(KeyMapError::ModeUnresolvable(mode.to_string())),
        };

        match get_node(node, &mut keys.iter())? {
            Node::Binding(binding) => Ok(binding.clone()),
            Node::Key(_) => Err(KeyMapError::KeySequenceIncomplete),
        }
    }
}

/// Returns false if the keys collide with an existing binding or prefix.
fn add_mapping_node(node: &mut Node, iter: &mut Iter<'_, Key>, binding: Binding) -> bool {
    let map = match node {
        Node::Binding(_) => return false,
        Node::Key(map) => map,
    };

    let key = match iter.next() {
        Some(it) => it,
        None => return false,
    };

    if iter.len() == 0 {
        if map.contains_key(key) {
            return false;
        }

        map.insert(key.clone(), Node::Binding(binding));
        true
    } else {
        let next = map
            .entry(key.clone())
            .or_insert_with(|| Node::Key(HashMap::new()));

        add_mapping_node(next, iter, binding)
    }
}

fn get_node<'a>(node: &'a Node, iter: &mut Iter<'_, Key>) -> Result<&'a Node, KeyMapError> {
    match node {
        Node::Binding(_) => {
            if iter.len() == 0 {
                Ok(node)
            } else {
                Err(KeyMapError::NoValidBindingFound)
            }
        }
        Node::Key(map) => match iter.next() {
            Some(key) => match map.get(key) {
                Some(next) => get_node(next, iter),
                None => Err(KeyMapError::NoValidBindingFound),
            },
            None => Ok(node),
        },
    }
}
