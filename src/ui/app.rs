use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::api::ContactDraft;
use crate::state::SessionState;
use crate::ui::form::ContactForm;

/// Screens of the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Contacts,
    ContactForm { id: Option<i64> },
}

/// Overlay shown on top of the current screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    ConfirmDeleteContact { id: i64, name: String, deleting: bool },
    ConfirmDeleteAgenda { slug: String, deleting: bool },
    NewAgenda { input: String },
    AgendaPicker { index: usize },
}

/// Store operation requested by a key event. The event loop executes these
/// against the shared store on spawned tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Refresh,
    SelectAgenda(String),
    CreateAgenda(String),
    DeleteAgenda(String),
    CreateContact(ContactDraft),
    UpdateContact { id: i64, draft: ContactDraft },
    DeleteContact(i64),
    DismissError,
    Quit,
}

/// Settled result of a write operation a view is waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Submit { ok: bool },
    ContactDeleted,
    AgendaCreated { ok: bool },
    AgendaDeleted,
}

/// Local view state: current route, form contents, modal, list cursor.
/// Key handling is pure: it mutates view state and returns the store
/// command to run, so the whole routing layer is testable without a
/// terminal or a network.
pub struct App {
    pub route: Route,
    pub form: ContactForm,
    pub modal: Option<Modal>,
    pub list_index: usize,
    pub submitting: bool,
    pub should_quit: bool,
}

impl Default for App {
    fn default() -> Self {
        Self {
            route: Route::Contacts,
            form: ContactForm::blank(),
            modal: None,
            list_index: 0,
            submitting: false,
            should_quit: false,
        }
    }
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_key(&mut self, key: KeyEvent, state: &SessionState) -> Option<Command> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return Some(Command::Quit);
        }

        if self.modal.is_some() {
            return self.on_modal_key(key, state);
        }

        match self.route {
            Route::Contacts => self.on_contacts_key(key, state),
            Route::ContactForm { .. } => self.on_form_key(key, state),
        }
    }

    /// Apply the settled result of a write operation the UI is waiting on.
    pub fn on_outcome(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Submit { ok } => {
                self.submitting = false;
                if ok {
                    self.form = ContactForm::blank();
                    self.route = Route::Contacts;
                } else {
                    self.form.error = Some("An error occurred. Please try again.".to_string());
                }
            }
            Outcome::ContactDeleted => {
                // Close the confirmation whether the delete landed or not;
                // a failure shows up in the store's error banner.
                self.modal = None;
            }
            Outcome::AgendaCreated { ok } => {
                if ok {
                    self.modal = None;
                }
            }
            Outcome::AgendaDeleted => {
                self.modal = None;
            }
        }
    }

    fn on_contacts_key(&mut self, key: KeyEvent, state: &SessionState) -> Option<Command> {
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                Some(Command::Quit)
            }
            KeyCode::Esc if state.error.is_some() => Some(Command::DismissError),
            KeyCode::Char('r') => Some(Command::Refresh),
            KeyCode::Down | KeyCode::Char('j') => {
                if !state.contacts.is_empty() {
                    self.list_index = (self.list_index + 1).min(state.contacts.len() - 1);
                }
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.list_index = self.list_index.saturating_sub(1);
                None
            }
            KeyCode::Char('a') => {
                self.form = ContactForm::blank();
                self.route = Route::ContactForm { id: None };
                None
            }
            KeyCode::Char('e') | KeyCode::Enter => {
                let id = state.contacts.get(self.list_index)?.id;
                self.open_editor(id, state);
                None
            }
            KeyCode::Char('d') => {
                let contact = state.contacts.get(self.list_index)?;
                self.modal = Some(Modal::ConfirmDeleteContact {
                    id: contact.id,
                    name: contact.name.clone(),
                    deleting: false,
                });
                None
            }
            KeyCode::Char('g') => {
                if state.agendas.is_empty() {
                    return None;
                }
                let index = state
                    .agendas
                    .iter()
                    .position(|a| Some(a.slug.as_str()) == state.selected.as_deref())
                    .unwrap_or(0);
                self.modal = Some(Modal::AgendaPicker { index });
                None
            }
            KeyCode::Char('n') => {
                self.modal = Some(Modal::NewAgenda {
                    input: String::new(),
                });
                None
            }
            KeyCode::Char('D') => {
                let slug = state.selected.clone()?;
                self.modal = Some(Modal::ConfirmDeleteAgenda {
                    slug,
                    deleting: false,
                });
                None
            }
            _ => None,
        }
    }

    /// Route to the edit form for `id`, pre-populated from the held list,
    /// or an inert "Contact not found" form when the id is not held.
    pub fn open_editor(&mut self, id: i64, state: &SessionState) {
        self.form = match state.contacts.iter().find(|c| c.id == id) {
            Some(contact) => ContactForm::edit(contact),
            None => ContactForm::missing(id),
        };
        self.route = Route::ContactForm { id: Some(id) };
    }

    fn on_form_key(&mut self, key: KeyEvent, state: &SessionState) -> Option<Command> {
        if self.submitting {
            return None;
        }
        match key.code {
            KeyCode::Esc => {
                self.form = ContactForm::blank();
                self.route = Route::Contacts;
                None
            }
            KeyCode::Tab | KeyCode::Down => {
                self.form.next_field();
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.form.prev_field();
                None
            }
            KeyCode::Backspace => {
                self.form.backspace();
                None
            }
            KeyCode::Enter => self.submit_form(state),
            KeyCode::Char(ch) => {
                self.form.insert(ch);
                None
            }
            _ => None,
        }
    }

    /// Client-side checks run before any request is dispatched: a non-empty
    /// name and a selected agenda.
    fn submit_form(&mut self, state: &SessionState) -> Option<Command> {
        self.form.error = None;

        let draft = match self.form.validate() {
            Ok(draft) => draft,
            Err(message) => {
                self.form.error = Some(message);
                return None;
            }
        };
        if state.selected.is_none() {
            self.form.error = Some("Please select an agenda first".to_string());
            return None;
        }

        self.submitting = true;
        match self.form.id {
            Some(id) => Some(Command::UpdateContact { id, draft }),
            None => Some(Command::CreateContact(draft)),
        }
    }

    fn on_modal_key(&mut self, key: KeyEvent, state: &SessionState) -> Option<Command> {
        let mut modal = self.modal.take()?;
        let mut keep = true;

        let command = match &mut modal {
            Modal::ConfirmDeleteContact { id, deleting, .. } => match key.code {
                _ if *deleting => None,
                KeyCode::Char('y') | KeyCode::Enter => {
                    *deleting = true;
                    Some(Command::DeleteContact(*id))
                }
                KeyCode::Char('n') | KeyCode::Esc => {
                    keep = false;
                    None
                }
                _ => None,
            },
            Modal::ConfirmDeleteAgenda { slug, deleting } => match key.code {
                _ if *deleting => None,
                KeyCode::Char('y') | KeyCode::Enter => {
                    *deleting = true;
                    Some(Command::DeleteAgenda(slug.clone()))
                }
                KeyCode::Char('n') | KeyCode::Esc => {
                    keep = false;
                    None
                }
                _ => None,
            },
            Modal::NewAgenda { input } => match key.code {
                KeyCode::Enter => {
                    let slug = input.trim().to_string();
                    if slug.is_empty() {
                        None
                    } else {
                        Some(Command::CreateAgenda(slug))
                    }
                }
                KeyCode::Backspace => {
                    input.pop();
                    None
                }
                KeyCode::Esc => {
                    keep = false;
                    None
                }
                KeyCode::Char(ch) => {
                    input.push(ch);
                    None
                }
                _ => None,
            },
            Modal::AgendaPicker { index } => match key.code {
                KeyCode::Down | KeyCode::Char('j') => {
                    if !state.agendas.is_empty() {
                        *index = (*index + 1).min(state.agendas.len() - 1);
                    }
                    None
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    *index = index.saturating_sub(1);
                    None
                }
                KeyCode::Enter => match state.agendas.get(*index) {
                    Some(agenda) => {
                        keep = false;
                        self.list_index = 0;
                        Some(Command::SelectAgenda(agenda.slug.clone()))
                    }
                    None => None,
                },
                KeyCode::Esc => {
                    keep = false;
                    None
                }
                _ => None,
            },
        };

        if keep {
            self.modal = Some(modal);
        }
        command
    }

    /// Keep the cursor inside the held list after it shrinks.
    pub fn clamp_selection(&mut self, state: &SessionState) {
        if state.contacts.is_empty() {
            self.list_index = 0;
        } else if self.list_index >= state.contacts.len() {
            self.list_index = state.contacts.len() - 1;
        }
    }
}
