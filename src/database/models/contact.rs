use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::Contact;

/// Validated payload for creating a contact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewContact {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub tags: Vec<String>,
}

impl NewContact {
    /// Materialize with a freshly generated id
    pub fn into_contact(self) -> Contact {
        Contact {
            id: Uuid::new_v4().to_string(),
            full_name: self.full_name,
            email: self.email,
            phone_number: self.phone_number,
            tags: self.tags,
        }
    }
}

/// Validated payload for updating a contact. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactChanges {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl ContactChanges {
    pub fn apply_to(self, contact: &mut Contact) {
        if let Some(full_name) = self.full_name {
            contact.full_name = full_name;
        }
        if let Some(email) = self.email {
            contact.email = email;
        }
        if let Some(phone_number) = self.phone_number {
            contact.phone_number = phone_number;
        }
        if let Some(tags) = self.tags {
            contact.tags = tags;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn changes_only_touch_present_fields() {
        let mut contact = NewContact {
            full_name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            phone_number: "555-0100".to_string(),
            tags: vec!["work".to_string()],
        }
        .into_contact();
        let id = contact.id.clone();

        ContactChanges {
            email: Some("alice@home.example".to_string()),
            tags: Some(vec![]),
            ..Default::default()
        }
        .apply_to(&mut contact);

        assert_eq!(contact.id, id);
        assert_eq!(contact.full_name, "Alice");
        assert_eq!(contact.email, "alice@home.example");
        assert!(contact.tags.is_empty());
    }
}
