use hlab_api::{
    Document, DocumentPayload, MediaRequest, MediaRequestPayload, Resource, Script,
    ScriptPayload,
};

use crate::{
    event::{Message, PanelEvent},
    form::{Form, ValidationError},
    model::{CrudPanel, Model, PendingKind, TargetKind},
    task::{PanelTask, Task},
};

/// Binds a backend resource to its panel, form and message routing.
pub trait PanelEntity: Resource {
    const DELETE: PendingKind;
    const TARGET: TargetKind;

    fn message(event: PanelEvent<Self>) -> Message;
    fn task(task: PanelTask<Self>) -> Task;
    fn panel(model: &mut Model) -> &mut CrudPanel<Self>;

    fn blank_form() -> Form;
    fn edit_form(&self) -> Form;
    fn payload(form: &Form) -> Result<Self::Payload, ValidationError>;

    /// Stand-in built from a saved payload before the backend copy arrives.
    fn from_payload(id: u64, payload: Self::Payload) -> Self;

    /// Follow up tasks once the entity is shown.
    fn viewed(&self) -> Vec<Task> {
        Vec::new()
    }
}

impl PanelEntity for Document {
    const DELETE: PendingKind = PendingKind::DeleteDocument;
    const TARGET: TargetKind = TargetKind::Document;

    fn message(event: PanelEvent<Self>) -> Message {
        Message::Documents(event)
    }

    fn task(task: PanelTask<Self>) -> Task {
        Task::Documents(task)
    }

    fn panel(model: &mut Model) -> &mut CrudPanel<Self> {
        &mut model.documents
    }

    fn blank_form() -> Form {
        document_form(None, "", "", "")
    }

    fn edit_form(&self) -> Form {
        document_form(
            Some(self.id),
            &self.title,
            self.tags.as_deref().unwrap_or_default(),
            &self.content,
        )
    }

    fn payload(form: &Form) -> Result<Self::Payload, ValidationError> {
        form.validate("Title and content are required")?;

        Ok(DocumentPayload {
            title: form.trimmed("title"),
            content: form.value("content"),
            tags: form.trimmed("tags"),
        })
    }

    fn from_payload(id: u64, payload: Self::Payload) -> Self {
        Document {
            id,
            title: payload.title,
            content: payload.content,
            tags: Some(payload.tags),
            created_at: None,
        }
    }
}

fn document_form(id: Option<u64>, title: &str, tags: &str, content: &str) -> Form {
    Form::new(id)
        .required_line("title", "Title", title)
        .line("tags", "Tags (comma separated)", tags)
        .required_text("content", "Content", content)
}

impl PanelEntity for Script {
    const DELETE: PendingKind = PendingKind::DeleteScript;
    const TARGET: TargetKind = TargetKind::Script;

    fn message(event: PanelEvent<Self>) -> Message {
        Message::Scripts(event)
    }

    fn task(task: PanelTask<Self>) -> Task {
        Task::Scripts(task)
    }

    fn panel(model: &mut Model) -> &mut CrudPanel<Self> {
        &mut model.scripts
    }

    fn blank_form() -> Form {
        script_form(None, "", "", &hlab_api::default_script_type(), "")
    }

    fn edit_form(&self) -> Form {
        script_form(
            Some(self.id),
            &self.title,
            self.description.as_deref().unwrap_or_default(),
            &self.script_type,
            &self.script_content,
        )
    }

    fn payload(form: &Form) -> Result<Self::Payload, ValidationError> {
        form.validate("Title and script content are required")?;

        let script_type = match form.trimmed("script_type") {
            it if it.is_empty() => hlab_api::default_script_type(),
            it => it,
        };

        Ok(ScriptPayload {
            title: form.trimmed("title"),
            description: form.trimmed("description"),
            script_type,
            script_content: form.value("script_content"),
        })
    }

    fn from_payload(id: u64, payload: Self::Payload) -> Self {
        Script {
            id,
            title: payload.title,
            description: Some(payload.description),
            script_type: payload.script_type,
            script_content: payload.script_content,
            created_at: None,
        }
    }

    fn viewed(&self) -> Vec<Task> {
        vec![Task::HighlightScript {
            id: self.id,
            script_type: self.script_type.clone(),
            content: self.script_content.clone(),
        }]
    }
}

fn script_form(
    id: Option<u64>,
    title: &str,
    description: &str,
    script_type: &str,
    content: &str,
) -> Form {
    Form::new(id)
        .required_line("title", "Title", title)
        .line("description", "Description", description)
        .line("script_type", "Type", script_type)
        .required_text("script_content", "Script", content)
}

impl PanelEntity for MediaRequest {
    const DELETE: PendingKind = PendingKind::DeleteMediaRequest;
    const TARGET: TargetKind = TargetKind::MediaRequest;

    fn message(event: PanelEvent<Self>) -> Message {
        Message::MediaRequests(event)
    }

    fn task(task: PanelTask<Self>) -> Task {
        Task::MediaRequests(task)
    }

    fn panel(model: &mut Model) -> &mut CrudPanel<Self> {
        &mut model.media_requests
    }

    fn blank_form() -> Form {
        Form::new(None)
            .required_line("title", "Title", "")
            .required_line("media_type", "Media type", "")
            .text("description", "Description", "")
            .line("requester_name", "Requested by", "")
    }

    /// Existing requests additionally expose the admin fields.
    fn edit_form(&self) -> Form {
        Form::new(Some(self.id))
            .required_line("title", "Title", &self.title)
            .required_line("media_type", "Media type", &self.media_type)
            .text(
                "description",
                "Description",
                self.description.as_deref().unwrap_or_default(),
            )
            .line(
                "requester_name",
                "Requested by",
                self.requester_name.as_deref().unwrap_or_default(),
            )
            .line("status", "Status", &self.status)
            .text("notes", "Notes", self.notes.as_deref().unwrap_or_default())
    }

    fn payload(form: &Form) -> Result<Self::Payload, ValidationError> {
        form.validate("Title and media type are required")?;

        let admin = form.bound_id.is_some();
        Ok(MediaRequestPayload {
            title: form.trimmed("title"),
            media_type: form.trimmed("media_type"),
            description: form.value("description"),
            requester_name: form.trimmed("requester_name"),
            status: admin.then(|| form.trimmed("status")),
            notes: admin.then(|| form.value("notes")),
        })
    }

    fn from_payload(id: u64, payload: Self::Payload) -> Self {
        MediaRequest {
            id,
            title: payload.title,
            media_type: payload.media_type,
            description: Some(payload.description),
            requester_name: Some(payload.requester_name),
            status: payload.status.unwrap_or_else(|| "pending".to_owned()),
            notes: payload.notes,
            created_at: None,
            updated_at: None,
        }
    }
}

#[cfg(test)]
mod test {
    use hlab_api::{Document, MediaRequest, Script};

    use super::PanelEntity;

    #[test]
    fn edit_form_binds_id_and_prefills() {
        let document = Document {
            id: 3,
            title: "Backups".to_owned(),
            content: "restic".to_owned(),
            tags: Some("zfs".to_owned()),
            ..Default::default()
        };

        let form = document.edit_form();
        assert_eq!(form.bound_id, Some(3));
        assert_eq!(form.value("title"), "Backups");
        assert_eq!(form.value("tags"), "zfs");
    }

    #[test]
    fn script_payload_defaults_type_to_bash() {
        let mut form = Script::blank_form();
        for field in form.fields.iter_mut() {
            match field.key {
                "title" => field.buffer.set_content("Update"),
                "script_type" => field.buffer.set_content(""),
                "script_content" => field.buffer.set_content("apt upgrade"),
                _ => {}
            }
        }

        let payload = Script::payload(&form);
        assert_eq!(payload.map(|p| p.script_type), Ok("bash".to_owned()));
    }

    #[test]
    fn media_request_create_omits_admin_fields() {
        let mut form = MediaRequest::blank_form();
        for field in form.fields.iter_mut() {
            match field.key {
                "title" => field.buffer.set_content("Dune"),
                "media_type" => field.buffer.set_content("movie"),
                _ => {}
            }
        }

        let payload = MediaRequest::payload(&form);
        assert_eq!(payload.as_ref().map(|p| p.status.clone()), Ok(None));
        assert_eq!(payload.map(|p| p.notes), Ok(None));
    }

    #[test]
    fn media_request_without_type_is_rejected() {
        let form = MediaRequest::blank_form();
        assert_eq!(
            MediaRequest::payload(&form).map_err(|err| err.to_string()),
            Err("Title and media type are required".to_owned())
        );
    }
}
