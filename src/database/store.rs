use async_trait::async_trait;

use crate::database::manager::DatabaseError;
use crate::database::models::{ContactChanges, NewContact};
use crate::types::Contact;

/// Authoritative contact list. Ids are opaque strings; an id the backend
/// cannot parse behaves like an unknown id.
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Every contact, in insertion order
    async fn list(&self) -> Result<Vec<Contact>, DatabaseError>;

    async fn get(&self, id: &str) -> Result<Option<Contact>, DatabaseError>;

    async fn create(&self, contact: NewContact) -> Result<Contact, DatabaseError>;

    /// Returns the updated contact, or `None` when the id is unknown
    async fn update(&self, id: &str, changes: ContactChanges) -> Result<Option<Contact>, DatabaseError>;

    /// Returns whether a contact was removed
    async fn remove(&self, id: &str) -> Result<bool, DatabaseError>;

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}
