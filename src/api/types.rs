use serde::{Deserialize, Serialize};

/// A named, server-persisted contact list. The slug is the unique
/// human-readable identifier used in API paths.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Agenda {
    pub id: i64,
    pub slug: String,
}

/// A contact record scoped to exactly one agenda. The id is server-assigned
/// and unique within the agenda.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Contact {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Request payload for creating or updating a contact. Optional fields are
/// omitted from the JSON when unset; the server leaves omitted fields empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactDraft {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Envelope for `GET /agendas`.
#[derive(Debug, Deserialize)]
pub struct AgendaList {
    pub agendas: Vec<Agenda>,
}

/// Envelope for `GET /agendas/{slug}/contacts`.
#[derive(Debug, Deserialize)]
pub struct ContactList {
    pub contacts: Vec<Contact>,
}
