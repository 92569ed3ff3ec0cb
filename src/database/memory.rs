use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::database::manager::DatabaseError;
use crate::database::models::{ContactChanges, NewContact};
use crate::database::store::ContactStore;
use crate::types::Contact;

/// Document-style backend kept in process memory
#[derive(Debug, Default)]
pub struct MemoryContactStore {
    contacts: RwLock<Vec<Contact>>,
}

impl MemoryContactStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContactStore for MemoryContactStore {
    async fn list(&self) -> Result<Vec<Contact>, DatabaseError> {
        Ok(self.contacts.read().await.clone())
    }

    async fn get(&self, id: &str) -> Result<Option<Contact>, DatabaseError> {
        Ok(self.contacts.read().await.iter().find(|c| c.id == id).cloned())
    }

    async fn create(&self, contact: NewContact) -> Result<Contact, DatabaseError> {
        let contact = contact.into_contact();
        self.contacts.write().await.push(contact.clone());
        tracing::debug!("Stored contact {} in memory", contact.id);
        Ok(contact)
    }

    async fn update(&self, id: &str, changes: ContactChanges) -> Result<Option<Contact>, DatabaseError> {
        let mut contacts = self.contacts.write().await;
        let Some(contact) = contacts.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        changes.apply_to(contact);
        Ok(Some(contact.clone()))
    }

    async fn remove(&self, id: &str) -> Result<bool, DatabaseError> {
        let mut contacts = self.contacts.write().await;
        let before = contacts.len();
        contacts.retain(|c| c.id != id);
        Ok(contacts.len() < before)
    }
}
