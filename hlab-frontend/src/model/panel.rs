use hlab_api::Resource;

use crate::form::Form;

use super::snapshot::Table;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Selection {
    Entity(u64),
    New,
}

/// Exactly one region of a panel is drawn, matching the active mode.
#[derive(Clone, Debug, PartialEq)]
pub enum PanelMode<E> {
    Placeholder,
    Viewing(E),
    Editing(Form),
}

impl<E> Default for PanelMode<E> {
    fn default() -> Self {
        PanelMode::Placeholder
    }
}

impl<E: Resource> PanelMode<E> {
    pub fn selection(&self) -> Option<Selection> {
        match self {
            PanelMode::Placeholder => None,
            PanelMode::Viewing(entity) => Some(Selection::Entity(entity.id())),
            PanelMode::Editing(form) => Some(match form.bound_id {
                Some(id) => Selection::Entity(id),
                None => Selection::New,
            }),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CrudPanel<E> {
    pub list: Table<E>,
    pub mode: PanelMode<E>,
}

impl<E> Default for CrudPanel<E> {
    fn default() -> Self {
        Self {
            list: Table::default(),
            mode: PanelMode::default(),
        }
    }
}

impl<E: Resource> CrudPanel<E> {
    pub fn form_mut(&mut self) -> Option<&mut Form> {
        match &mut self.mode {
            PanelMode::Editing(form) => Some(form),
            PanelMode::Placeholder | PanelMode::Viewing(_) => None,
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, PanelMode::Editing(_))
    }
}

#[cfg(test)]
mod test {
    use hlab_api::Document;

    use super::*;

    #[test]
    fn selection_is_none_only_for_placeholder() {
        let placeholder: PanelMode<Document> = PanelMode::Placeholder;
        assert_eq!(placeholder.selection(), None);

        let viewing = PanelMode::Viewing(Document {
            id: 4,
            ..Default::default()
        });
        assert_eq!(viewing.selection(), Some(Selection::Entity(4)));

        let create: PanelMode<Document> = PanelMode::Editing(Form::new(None));
        assert_eq!(create.selection(), Some(Selection::New));

        let edit: PanelMode<Document> = PanelMode::Editing(Form::new(Some(9)));
        assert_eq!(edit.selection(), Some(Selection::Entity(9)));
    }
}
