use std::sync::{Arc, Mutex, MutexGuard};

use crate::api::{Agenda, Contact, ContactClient, ContactDraft};
use crate::utils::Result;

/// In-memory mirror of the backend data plus view flags. `contacts` always
/// reflects the last applied fetch for `selected`; ordering is whatever the
/// backend returned.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub agendas: Vec<Agenda>,
    pub selected: Option<String>,
    pub contacts: Vec<Contact>,
    pub loading: bool,
    pub error: Option<String>,
    agendas_gen: u64,
    contacts_gen: u64,
}

/// State container mirroring backend data and exposing the mutation
/// operations the views dispatch. Owned by the application root and handed
/// to the UI as an `Arc`; operations run on spawned tasks and mutate state
/// after the HTTP call settles.
///
/// Collection fetches carry a generation number taken at issue time. A
/// response that settles after a newer fetch was issued for the same
/// collection is discarded, so the held list and the loading flag always
/// belong to the most recently issued fetch.
pub struct Store {
    client: ContactClient,
    state: Mutex<SessionState>,
}

pub type SharedStore = Arc<Store>;

enum FollowUp {
    FetchContacts(String),
    CreateDefault,
    None,
}

impl Store {
    pub fn new(client: ContactClient) -> Self {
        Self {
            client,
            state: Mutex::new(SessionState::default()),
        }
    }

    pub fn snapshot(&self) -> SessionState {
        self.state().clone()
    }

    pub fn dismiss_error(&self) {
        self.state().error = None;
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        // Never held across an await point.
        self.state.lock().expect("session state mutex poisoned")
    }

    fn selected_slug(&self) -> Option<String> {
        self.state().selected.clone()
    }

    /// Fetch all agendas. If the result is non-empty and nothing is selected,
    /// select the first agenda and fetch its contacts. If no agendas exist,
    /// try to create one named "default"; a failure there is only logged,
    /// never surfaced (flagged for product review in DESIGN.md).
    pub async fn fetch_agendas(&self) {
        let gen = {
            let mut s = self.state();
            s.loading = true;
            s.error = None;
            s.agendas_gen += 1;
            s.agendas_gen
        };

        let result = self.client.list_agendas().await;

        let next = {
            let mut s = self.state();
            if s.agendas_gen != gen {
                log::debug!("discarding stale agenda fetch (gen {})", gen);
                return;
            }
            s.loading = false;
            match result {
                Ok(agendas) => {
                    let next = if agendas.is_empty() {
                        FollowUp::CreateDefault
                    } else if s.selected.is_none() {
                        let slug = agendas[0].slug.clone();
                        s.selected = Some(slug.clone());
                        FollowUp::FetchContacts(slug)
                    } else {
                        FollowUp::None
                    };
                    s.agendas = agendas;
                    next
                }
                Err(err) => {
                    log::error!("fetching agendas: {}", err);
                    s.error = Some("Failed to fetch agendas".to_string());
                    FollowUp::None
                }
            }
        };

        match next {
            FollowUp::FetchContacts(slug) => self.fetch_contacts(&slug).await,
            FollowUp::CreateDefault => {
                if let Err(err) = self.create_agenda_inner("default").await {
                    log::warn!("creating default agenda: {}", err);
                }
            }
            FollowUp::None => {}
        }
    }

    /// Set the selection and fetch its contacts. The slug is not validated
    /// against the known agendas.
    pub async fn select_agenda(&self, slug: &str) {
        {
            let mut s = self.state();
            s.selected = Some(slug.to_string());
        }
        self.fetch_contacts(slug).await;
    }

    /// Replace the held contact list with the backend's current list for
    /// `slug`. No-op if the slug is empty. Generation-guarded: a stale
    /// response is discarded without touching state.
    pub async fn fetch_contacts(&self, slug: &str) {
        if slug.is_empty() {
            return;
        }

        let gen = {
            let mut s = self.state();
            s.loading = true;
            s.error = None;
            s.contacts_gen += 1;
            s.contacts_gen
        };

        let result = self.client.list_contacts(slug).await;

        let mut s = self.state();
        if s.contacts_gen != gen {
            log::debug!("discarding stale contact fetch for '{}' (gen {})", slug, gen);
            return;
        }
        s.loading = false;
        match result {
            Ok(contacts) => s.contacts = contacts,
            Err(err) => {
                log::error!("fetching contacts for '{}': {}", slug, err);
                s.error = Some("Failed to fetch contacts".to_string());
            }
        }
    }

    /// Create an agenda, append it to the held list, select it, and fetch
    /// its (empty) contact list. Fails loudly: the error lands in store
    /// state and is returned to the caller.
    pub async fn create_agenda(&self, slug: &str) -> Result<Agenda> {
        {
            let mut s = self.state();
            s.loading = true;
            s.error = None;
        }

        let result = self.create_agenda_inner(slug).await;

        let mut s = self.state();
        s.loading = false;
        if let Err(err) = &result {
            log::error!("creating agenda '{}': {}", slug, err);
            s.error = Some("Failed to create agenda".to_string());
        }
        drop(s);
        result
    }

    async fn create_agenda_inner(&self, slug: &str) -> Result<Agenda> {
        let agenda = self.client.create_agenda(slug).await?;
        {
            let mut s = self.state();
            s.agendas.push(agenda.clone());
            s.selected = Some(agenda.slug.clone());
        }
        self.fetch_contacts(&agenda.slug).await;
        Ok(agenda)
    }

    /// Delete an agenda remotely and drop it from the held list. If it was
    /// selected, select the first remaining agenda (and fetch its contacts)
    /// or clear selection and contacts if none remain.
    pub async fn delete_agenda(&self, slug: &str) -> Result<()> {
        {
            let mut s = self.state();
            s.loading = true;
            s.error = None;
        }

        let result = self.client.delete_agenda(slug).await;

        let refetch = {
            let mut s = self.state();
            s.loading = false;
            match &result {
                Ok(()) => {
                    s.agendas.retain(|a| a.slug != slug);
                    if s.selected.as_deref() == Some(slug) {
                        if let Some(next) = s.agendas.first() {
                            let next_slug = next.slug.clone();
                            s.selected = Some(next_slug.clone());
                            Some(next_slug)
                        } else {
                            s.selected = None;
                            s.contacts.clear();
                            None
                        }
                    } else {
                        None
                    }
                }
                Err(err) => {
                    log::error!("deleting agenda '{}': {}", slug, err);
                    s.error = Some("Failed to delete agenda".to_string());
                    None
                }
            }
        };

        if let Some(next) = refetch {
            self.fetch_contacts(&next).await;
        }
        result
    }

    /// Create a contact under the selected agenda and append the server's
    /// response to the held list. Silent no-op when nothing is selected;
    /// no network call is made.
    pub async fn create_contact(&self, draft: &ContactDraft) -> Result<()> {
        let Some(slug) = self.selected_slug() else {
            return Ok(());
        };

        {
            let mut s = self.state();
            s.loading = true;
            s.error = None;
        }

        let result = self.client.create_contact(&slug, draft).await;

        let mut s = self.state();
        s.loading = false;
        match result {
            Ok(contact) => {
                s.contacts.push(contact);
                Ok(())
            }
            Err(err) => {
                log::error!("creating contact in '{}': {}", slug, err);
                s.error = Some("Failed to create contact".to_string());
                Err(err)
            }
        }
    }

    /// Update a contact under the selected agenda and replace the held entry
    /// with the same id. Silent no-op when nothing is selected.
    pub async fn update_contact(&self, id: i64, draft: &ContactDraft) -> Result<()> {
        let Some(slug) = self.selected_slug() else {
            return Ok(());
        };

        {
            let mut s = self.state();
            s.loading = true;
            s.error = None;
        }

        let result = self.client.update_contact(&slug, id, draft).await;

        let mut s = self.state();
        s.loading = false;
        match result {
            Ok(contact) => {
                if let Some(existing) = s.contacts.iter_mut().find(|c| c.id == id) {
                    *existing = contact;
                }
                Ok(())
            }
            Err(err) => {
                log::error!("updating contact {} in '{}': {}", id, slug, err);
                s.error = Some("Failed to update contact".to_string());
                Err(err)
            }
        }
    }

    /// Delete a contact under the selected agenda and drop it from the held
    /// list. Silent no-op when nothing is selected.
    pub async fn delete_contact(&self, id: i64) -> Result<()> {
        let Some(slug) = self.selected_slug() else {
            return Ok(());
        };

        {
            let mut s = self.state();
            s.loading = true;
            s.error = None;
        }

        let result = self.client.delete_contact(&slug, id).await;

        let mut s = self.state();
        s.loading = false;
        match &result {
            Ok(()) => s.contacts.retain(|c| c.id != id),
            Err(err) => {
                log::error!("deleting contact {} in '{}': {}", id, slug, err);
                s.error = Some("Failed to delete contact".to_string());
            }
        }
        drop(s);
        result
    }
}
