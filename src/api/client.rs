use crate::api::types::{Agenda, AgendaList, Contact, ContactDraft, ContactList};
use crate::utils::{AppError, Result};
use serde::de::DeserializeOwned;

/// Thin wrapper over the agenda/contact REST surface. One attempt per call:
/// no retries, no backoff, no configured timeout.
pub struct ContactClient {
    base_url: String,
    client: reqwest::Client,
}

impl ContactClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn list_agendas(&self) -> Result<Vec<Agenda>> {
        let response = self
            .client
            .get(self.endpoint("/agendas"))
            .send()
            .await
            .map_err(AppError::Network)?;

        let list: AgendaList = decode(response).await?;
        Ok(list.agendas)
    }

    pub async fn create_agenda(&self, slug: &str) -> Result<Agenda> {
        let response = self
            .client
            .post(self.endpoint(&format!("/agendas/{}", slug)))
            .send()
            .await
            .map_err(AppError::Network)?;

        decode(response).await
    }

    pub async fn delete_agenda(&self, slug: &str) -> Result<()> {
        let response = self
            .client
            .delete(self.endpoint(&format!("/agendas/{}", slug)))
            .send()
            .await
            .map_err(AppError::Network)?;

        check_status(&response)?;
        Ok(())
    }

    pub async fn list_contacts(&self, slug: &str) -> Result<Vec<Contact>> {
        let response = self
            .client
            .get(self.endpoint(&format!("/agendas/{}/contacts", slug)))
            .send()
            .await
            .map_err(AppError::Network)?;

        let list: ContactList = decode(response).await?;
        Ok(list.contacts)
    }

    pub async fn create_contact(&self, slug: &str, draft: &ContactDraft) -> Result<Contact> {
        let response = self
            .client
            .post(self.endpoint(&format!("/agendas/{}/contacts", slug)))
            .json(draft)
            .send()
            .await
            .map_err(AppError::Network)?;

        decode(response).await
    }

    pub async fn update_contact(
        &self,
        slug: &str,
        id: i64,
        draft: &ContactDraft,
    ) -> Result<Contact> {
        let response = self
            .client
            .put(self.endpoint(&format!("/agendas/{}/contacts/{}", slug, id)))
            .json(draft)
            .send()
            .await
            .map_err(AppError::Network)?;

        decode(response).await
    }

    pub async fn delete_contact(&self, slug: &str, id: i64) -> Result<()> {
        let response = self
            .client
            .delete(self.endpoint(&format!("/agendas/{}/contacts/{}", slug, id)))
            .send()
            .await
            .map_err(AppError::Network)?;

        check_status(&response)?;
        Ok(())
    }
}

fn check_status(response: &reqwest::Response) -> Result<()> {
    let status = response.status();
    if !status.is_success() {
        return Err(AppError::Http {
            status: status.as_u16(),
        });
    }
    Ok(())
}

/// Decode a JSON body through an intermediate string so a 2xx response with
/// an unreadable body surfaces as `Decode` rather than a transport error.
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    check_status(&response)?;
    let body = response.text().await.map_err(AppError::Network)?;
    serde_json::from_str(&body).map_err(AppError::Decode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_path() {
        let client = ContactClient::new("http://localhost:3000".to_string());
        assert_eq!(
            client.endpoint("/agendas/work/contacts"),
            "http://localhost:3000/agendas/work/contacts"
        );
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = ContactClient::new("http://localhost:3000/".to_string());
        assert_eq!(client.base_url(), "http://localhost:3000");
        assert_eq!(client.endpoint("/agendas"), "http://localhost:3000/agendas");
    }
}
