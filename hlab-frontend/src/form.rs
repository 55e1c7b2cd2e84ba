use hlab_buffer::model::TextBuffer;
use thiserror::Error;

/// Local validation failure raised before any request is sent.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error("{0}")]
pub struct ValidationError(pub &'static str);

#[derive(Clone, Debug, PartialEq)]
pub struct FormField {
    pub key: &'static str,
    pub label: &'static str,
    pub buffer: TextBuffer,
    pub required: bool,
}

/// Editable fields of a create or update. `bound_id` is set when editing an
/// existing entity.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Form {
    pub bound_id: Option<u64>,
    pub fields: Vec<FormField>,
    pub focused: usize,
}

impl Form {
    pub fn new(bound_id: Option<u64>) -> Self {
        Self {
            bound_id,
            ..Default::default()
        }
    }

    pub fn line(self, key: &'static str, label: &'static str, content: &str) -> Self {
        self.field(key, label, content, false, false)
    }

    pub fn required_line(self, key: &'static str, label: &'static str, content: &str) -> Self {
        self.field(key, label, content, false, true)
    }

    pub fn text(self, key: &'static str, label: &'static str, content: &str) -> Self {
        self.field(key, label, content, true, false)
    }

    pub fn required_text(self, key: &'static str, label: &'static str, content: &str) -> Self {
        self.field(key, label, content, true, true)
    }

    fn field(
        mut self,
        key: &'static str,
        label: &'static str,
        content: &str,
        multiline: bool,
        required: bool,
    ) -> Self {
        self.fields.push(FormField {
            key,
            label,
            buffer: TextBuffer::with_content(content, multiline),
            required,
        });
        self
    }

    pub fn value(&self, key: &str) -> String {
        self.fields
            .iter()
            .find(|field| field.key == key)
            .map(|field| field.buffer.content())
            .unwrap_or_default()
    }

    pub fn trimmed(&self, key: &str) -> String {
        self.value(key).trim().to_owned()
    }

    pub fn focused_buffer_mut(&mut self) -> Option<&mut TextBuffer> {
        self.fields
            .get_mut(self.focused)
            .map(|field| &mut field.buffer)
    }

    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focused = (self.focused + 1) % self.fields.len();
        }
    }

    pub fn focus_previous(&mut self) {
        if !self.fields.is_empty() {
            self.focused = (self.focused + self.fields.len() - 1) % self.fields.len();
        }
    }

    /// Fails with `message` if any required field is blank.
    pub fn validate(&self, message: &'static str) -> Result<(), ValidationError> {
        let missing = self
            .fields
            .iter()
            .any(|field| field.required && field.buffer.is_blank());

        if missing {
            Err(ValidationError(message))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn document_form(title: &str, content: &str) -> Form {
        Form::new(None)
            .required_line("title", "Title", title)
            .line("tags", "Tags", "")
            .required_text("content", "Content", content)
    }

    #[test]
    fn validate_fails_on_blank_required_field() {
        let form = document_form("T", "   ");

        assert_eq!(
            form.validate("Title and content are required"),
            Err(ValidationError("Title and content are required"))
        );
    }

    #[test]
    fn validate_ignores_optional_fields() {
        let form = document_form("T", "body");
        assert_eq!(form.validate("unused"), Ok(()));
    }

    #[test]
    fn multiline_value_keeps_line_breaks() {
        let form = document_form("T", "first\nsecond");
        assert_eq!(form.value("content"), "first\nsecond");
        assert_eq!(form.value("unknown"), "");
    }

    #[test]
    fn focus_wraps_around() {
        let mut form = document_form("", "");

        form.focus_previous();
        assert_eq!(form.focused, 2);

        form.focus_next();
        assert_eq!(form.focused, 0);
    }
}
