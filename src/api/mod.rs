pub mod client;
pub mod types;

pub use client::ContactClient;
pub use types::{Agenda, Contact, ContactDraft};
