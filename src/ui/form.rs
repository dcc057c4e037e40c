use crate::api::{Contact, ContactDraft};

pub const FIELD_COUNT: usize = 4;
pub const FIELD_LABELS: [&str; FIELD_COUNT] = ["Name", "Email", "Phone", "Address"];

/// Editable state of the add/edit contact screen. Add mode starts blank;
/// edit mode is pre-populated from the held contact. Validation happens
/// client-side on submit, before any request is dispatched.
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    /// Server id when editing an existing contact.
    pub id: Option<i64>,
    /// Field values in `FIELD_LABELS` order.
    pub fields: [String; FIELD_COUNT],
    pub focus: usize,
    pub error: Option<String>,
}

impl ContactForm {
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn edit(contact: &Contact) -> Self {
        Self {
            id: Some(contact.id),
            fields: [
                contact.name.clone(),
                contact.email.clone().unwrap_or_default(),
                contact.phone.clone().unwrap_or_default(),
                contact.address.clone().unwrap_or_default(),
            ],
            focus: 0,
            error: None,
        }
    }

    /// Edit route for an id that is not in the held list.
    pub fn missing(id: i64) -> Self {
        Self {
            id: Some(id),
            error: Some("Contact not found".to_string()),
            ..Self::default()
        }
    }

    pub fn is_editing(&self) -> bool {
        self.id.is_some()
    }

    pub fn insert(&mut self, ch: char) {
        self.fields[self.focus].push(ch);
    }

    pub fn backspace(&mut self) {
        self.fields[self.focus].pop();
    }

    pub fn next_field(&mut self) {
        self.focus = (self.focus + 1) % FIELD_COUNT;
    }

    pub fn prev_field(&mut self) {
        self.focus = (self.focus + FIELD_COUNT - 1) % FIELD_COUNT;
    }

    /// Validate and build the request payload: the trimmed name must be
    /// non-empty, and blank optional fields are omitted entirely.
    pub fn validate(&self) -> Result<ContactDraft, String> {
        let name = self.fields[0].trim();
        if name.is_empty() {
            return Err("Name is required".to_string());
        }
        Ok(ContactDraft {
            name: name.to_string(),
            email: optional(&self.fields[1]),
            phone: optional(&self.fields[2]),
            address: optional(&self.fields[3]),
        })
    }
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
