//! Round trips between the client state and the contacts API.

pub mod http;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::filter::{TagFilterEngine, WorkingContact};
use crate::types::Contact;

pub use http::HttpContactsApi;

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("{message}")]
    Validation { message: String, fields: Vec<String> },

    #[error("Contact not found: {0}")]
    NotFound(String),
}

impl SyncError {
    pub fn validation(message: impl Into<String>, fields: Vec<String>) -> Self {
        SyncError::Validation {
            message: message.into(),
            fields,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Bearer token returned by a successful login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub username: String,
    pub token: String,
}

/// Remote contact operations. Implementations hold the session once logged in.
#[async_trait]
pub trait ContactsApi: Send + Sync {
    async fn login(&mut self, credentials: &Credentials) -> Result<Session, SyncError>;

    fn is_logged_in(&self) -> bool;

    async fn fetch_contacts(&self) -> Result<Vec<Contact>, SyncError>;

    async fn fetch_contact(&self, id: &str) -> Result<Contact, SyncError>;

    /// POST when the working contact has no id, PUT otherwise
    async fn submit(&self, working: &WorkingContact) -> Result<Contact, SyncError>;

    /// `true` when the server removed the contact
    async fn remove(&self, id: &str) -> Result<bool, SyncError>;
}

/// Drives a [`TagFilterEngine`] from the results of [`ContactsApi`] calls.
pub struct SyncController<A> {
    api: A,
    engine: TagFilterEngine,
}

impl<A: ContactsApi> SyncController<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            engine: TagFilterEngine::new(),
        }
    }

    pub fn engine(&self) -> &TagFilterEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut TagFilterEngine {
        &mut self.engine
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub async fn login(&mut self, credentials: &Credentials) -> Result<Session, SyncError> {
        let session = self.api.login(credentials).await?;
        tracing::info!("Logged in as {}", session.username);
        self.refresh_after("login").await;
        Ok(session)
    }

    /// Fetch the list and make it the engine's cached list
    pub async fn refresh(&mut self) -> Result<(), SyncError> {
        let contacts = self.api.fetch_contacts().await.map_err(|e| {
            tracing::warn!("Failed to fetch contacts: {}", e);
            e
        })?;
        tracing::debug!("Fetched {} contacts", contacts.len());
        self.engine.set_contacts(contacts);
        Ok(())
    }

    // The write already happened; a failed refresh is logged and the next
    // completed fetch replaces the list
    async fn refresh_after(&mut self, action: &str) {
        if let Err(e) = self.refresh().await {
            tracing::warn!("Contact list not refreshed after {}: {}", action, e);
        }
    }

    pub fn begin_create(&mut self) -> Result<(), SyncError> {
        self.ensure_logged_in()?;
        self.engine.reset_working_contact();
        Ok(())
    }

    pub async fn begin_edit(&mut self, id: &str) -> Result<(), SyncError> {
        self.ensure_logged_in()?;
        let contact = self.api.fetch_contact(id).await?;
        self.engine.begin_edit(&contact);
        Ok(())
    }

    /// Send the working contact. Missing required fields fail without a round
    /// trip; a failed submission leaves the working contact as it was.
    pub async fn submit(&mut self) -> Result<Contact, SyncError> {
        self.ensure_logged_in()?;

        let working = match self.engine.working() {
            Some(working) => working,
            None => return Err(SyncError::validation("No contact is being edited", Vec::new())),
        };

        let missing = working.missing_fields();
        if !missing.is_empty() {
            return Err(SyncError::validation(
                format!("Missing required fields: {}", missing.join(", ")),
                missing.into_iter().map(String::from).collect(),
            ));
        }

        let saved = self.api.submit(working).await?;
        self.engine.reset_working_contact();
        self.refresh_after("submit").await;
        Ok(saved)
    }

    pub async fn cancel(&mut self) -> Result<(), SyncError> {
        self.ensure_logged_in()?;
        self.engine.reset_working_contact();
        self.refresh().await
    }

    /// Returns whether the contact was removed. The cached list is only
    /// refreshed after a removal.
    pub async fn delete(&mut self, id: &str) -> Result<bool, SyncError> {
        self.ensure_logged_in()?;
        let removed = self.api.remove(id).await?;
        if removed {
            self.refresh_after("delete").await;
        } else {
            tracing::warn!("Contact {} was not deleted", id);
        }
        Ok(removed)
    }

    fn ensure_logged_in(&self) -> Result<(), SyncError> {
        if self.api.is_logged_in() {
            Ok(())
        } else {
            Err(SyncError::Auth("Not logged in".to_string()))
        }
    }
}
