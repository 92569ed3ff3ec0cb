use serde::{Deserialize, Serialize};

use crate::api::tags::join_tags;
use crate::types::Contact;

/// The contact being created (`id` is `None`) or edited in the form.
///
/// Tags behave as a set: a name is never stored twice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingContact {
    pub id: Option<String>,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    tags: Vec<String>,
}

impl WorkingContact {
    /// Empty form for a new contact
    pub fn blank() -> Self {
        Self::default()
    }

    /// Copy of a stored contact for editing. Duplicate tags from the server
    /// collapse onto their first occurrence.
    pub fn from_contact(contact: &Contact) -> Self {
        let mut working = Self {
            id: Some(contact.id.clone()),
            full_name: contact.full_name.clone(),
            email: contact.email.clone(),
            phone_number: contact.phone_number.clone(),
            tags: Vec::with_capacity(contact.tags.len()),
        };
        for tag in &contact.tags {
            if !working.has_tag(tag) {
                working.tags.push(tag.clone());
            }
        }
        working
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// Remove `tag` if present (returns `false`), append it otherwise (returns `true`).
    /// An empty name is never added.
    pub(crate) fn toggle_tag(&mut self, tag: &str) -> bool {
        if tag.is_empty() {
            return false;
        }
        match self.tags.iter().position(|t| t == tag) {
            Some(index) => {
                self.tags.remove(index);
                false
            }
            None => {
                self.tags.push(tag.to_string());
                true
            }
        }
    }

    /// Append a typed-in tag. Empty and already-present names are refused.
    pub(crate) fn push_new_tag(&mut self, tag: &str) -> bool {
        if tag.is_empty() || self.has_tag(tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    /// Required fields that are still empty, in form order
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("full_name", &self.full_name),
            ("email", &self.email),
            ("phone_number", &self.phone_number),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    /// Form body for POST/PUT with tags comma-joined
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("full_name", self.full_name.clone()),
            ("email", self.email.clone()),
            ("phone_number", self.phone_number.clone()),
            ("tags", join_tags(&self.tags)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(tags: &[&str]) -> Contact {
        Contact {
            id: "c1".to_string(),
            full_name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            phone_number: "555-0100".to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn editing_copy_collapses_duplicate_tags() {
        let working = WorkingContact::from_contact(&contact(&["a", "b", "a"]));
        assert_eq!(working.tags(), &["a", "b"]);
        assert_eq!(working.id.as_deref(), Some("c1"));
        assert!(!working.is_new());
    }

    #[test]
    fn empty_tag_never_toggles_in() {
        let mut working = WorkingContact::from_contact(&contact(&["a"]));
        assert!(!working.toggle_tag(""));
        assert_eq!(working.tags(), &["a"]);
        assert_eq!(join_tags(working.tags()), "a");
    }

    #[test]
    fn missing_fields_lists_blank_required_inputs() {
        let mut working = WorkingContact::blank();
        assert_eq!(working.missing_fields(), vec!["full_name", "email", "phone_number"]);

        working.full_name = "Alice".to_string();
        working.phone_number = "  ".to_string();
        assert_eq!(working.missing_fields(), vec!["email", "phone_number"]);
    }

    #[test]
    fn form_fields_join_tags() {
        let working = WorkingContact::from_contact(&contact(&["work", "vip"]));
        let fields = working.form_fields();
        assert!(fields.contains(&("tags", "work,vip".to_string())));
        assert!(fields.contains(&("full_name", "Alice".to_string())));
    }
}
