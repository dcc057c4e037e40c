//! In-process mock of the agenda/contact backend used by the integration
//! tests. Serves the same surface and envelopes as the real API; agendas
//! and contacts are held in creation order.
//!
//! Test hooks: a global request counter (to assert an operation made no
//! network call), a `fail_creates` switch (agenda creation returns 500),
//! a delayed contact listing for slugs starting with "slow" (to exercise
//! stale-fetch discarding), and a canned undecodable body for the slug
//! "bad-json".

use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::RwLock;

#[derive(Clone, Debug, Serialize)]
pub struct Agenda {
    pub id: i64,
    pub slug: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct Contact {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ContactInput {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

struct AgendaEntry {
    agenda: Agenda,
    contacts: Vec<Contact>,
}

#[derive(Default)]
pub struct MockApi {
    entries: RwLock<Vec<AgendaEntry>>,
    next_id: AtomicI64,
    pub requests: AtomicUsize,
    pub fail_creates: AtomicBool,
}

impl MockApi {
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    fn fresh_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }
}

type Shared = Arc<MockApi>;

pub fn app() -> (Router, Shared) {
    let state: Shared = Arc::new(MockApi::default());
    let router = Router::new()
        .route("/agendas", get(list_agendas))
        .route(
            "/agendas/{slug}",
            axum::routing::post(create_agenda).delete(delete_agenda),
        )
        .route(
            "/agendas/{slug}/contacts",
            get(list_contacts).post(create_contact),
        )
        .route(
            "/agendas/{slug}/contacts/{id}",
            axum::routing::put(update_contact).delete(delete_contact),
        )
        .with_state(state.clone());
    (router, state)
}

/// Bind to a random port and serve the mock in the background. Returns the
/// base URL and the shared state for assertions.
pub async fn spawn() -> (String, Shared) {
    let (router, state) = app();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    (format!("http://{addr}"), state)
}

async fn list_agendas(State(api): State<Shared>) -> Json<serde_json::Value> {
    api.requests.fetch_add(1, Ordering::SeqCst);
    let entries = api.entries.read().await;
    let agendas: Vec<Agenda> = entries.iter().map(|e| e.agenda.clone()).collect();
    Json(json!({ "agendas": agendas }))
}

async fn create_agenda(
    State(api): State<Shared>,
    Path(slug): Path<String>,
) -> Result<(StatusCode, Json<Agenda>), StatusCode> {
    api.requests.fetch_add(1, Ordering::SeqCst);
    if api.fail_creates.load(Ordering::SeqCst) {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    let mut entries = api.entries.write().await;
    if entries.iter().any(|e| e.agenda.slug == slug) {
        return Err(StatusCode::BAD_REQUEST);
    }
    let agenda = Agenda {
        id: api.fresh_id(),
        slug,
    };
    entries.push(AgendaEntry {
        agenda: agenda.clone(),
        contacts: Vec::new(),
    });
    Ok((StatusCode::CREATED, Json(agenda)))
}

async fn delete_agenda(
    State(api): State<Shared>,
    Path(slug): Path<String>,
) -> Result<StatusCode, StatusCode> {
    api.requests.fetch_add(1, Ordering::SeqCst);
    let mut entries = api.entries.write().await;
    let before = entries.len();
    entries.retain(|e| e.agenda.slug != slug);
    if entries.len() == before {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn list_contacts(
    State(api): State<Shared>,
    Path(slug): Path<String>,
) -> Result<axum::response::Response, StatusCode> {
    use axum::response::IntoResponse;

    api.requests.fetch_add(1, Ordering::SeqCst);
    if slug == "bad-json" {
        return Ok(([("content-type", "application/json")], "not json").into_response());
    }
    if slug.starts_with("slow") {
        tokio::time::sleep(Duration::from_millis(300)).await;
    }
    let entries = api.entries.read().await;
    let entry = entries
        .iter()
        .find(|e| e.agenda.slug == slug)
        .ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(json!({ "contacts": entry.contacts })).into_response())
}

async fn create_contact(
    State(api): State<Shared>,
    Path(slug): Path<String>,
    Json(input): Json<ContactInput>,
) -> Result<(StatusCode, Json<Contact>), StatusCode> {
    api.requests.fetch_add(1, Ordering::SeqCst);
    let id = api.fresh_id();
    let mut entries = api.entries.write().await;
    let entry = entries
        .iter_mut()
        .find(|e| e.agenda.slug == slug)
        .ok_or(StatusCode::NOT_FOUND)?;
    let contact = Contact {
        id,
        name: input.name,
        email: input.email,
        phone: input.phone,
        address: input.address,
    };
    entry.contacts.push(contact.clone());
    Ok((StatusCode::CREATED, Json(contact)))
}

async fn update_contact(
    State(api): State<Shared>,
    Path((slug, id)): Path<(String, i64)>,
    Json(input): Json<ContactInput>,
) -> Result<Json<Contact>, StatusCode> {
    api.requests.fetch_add(1, Ordering::SeqCst);
    let mut entries = api.entries.write().await;
    let entry = entries
        .iter_mut()
        .find(|e| e.agenda.slug == slug)
        .ok_or(StatusCode::NOT_FOUND)?;
    let contact = entry
        .contacts
        .iter_mut()
        .find(|c| c.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    contact.name = input.name;
    contact.email = input.email;
    contact.phone = input.phone;
    contact.address = input.address;
    Ok(Json(contact.clone()))
}

async fn delete_contact(
    State(api): State<Shared>,
    Path((slug, id)): Path<(String, i64)>,
) -> Result<StatusCode, StatusCode> {
    api.requests.fetch_add(1, Ordering::SeqCst);
    let mut entries = api.entries.write().await;
    let entry = entries
        .iter_mut()
        .find(|e| e.agenda.slug == slug)
        .ok_or(StatusCode::NOT_FOUND)?;
    let before = entry.contacts.len();
    entry.contacts.retain(|c| c.id != id);
    if entry.contacts.len() == before {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(StatusCode::NO_CONTENT)
}
