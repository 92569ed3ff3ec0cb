use std::collections::HashSet;

use super::tag_set::TagFilterSet;
use super::visibility::{compute_visibility, is_visible};
use super::working::WorkingContact;
use crate::types::Contact;

/// Client-side contact state: the cached list, the active tag filters, the
/// search text and the contact being edited.
///
/// Every operation is an in-memory mutation that cannot fail. Rendering reads
/// [`TagFilterEngine::visible_contacts`] after each change.
#[derive(Debug, Clone, Default)]
pub struct TagFilterEngine {
    contacts: Vec<Contact>,
    filters: TagFilterSet,
    search: String,
    working: Option<WorkingContact>,
}

impl TagFilterEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the cached list with the result of the latest completed fetch
    pub fn set_contacts(&mut self, contacts: Vec<Contact>) {
        self.contacts = contacts;
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    /// Toggle `tag` in the filter set
    pub fn add_filter(&mut self, tag: &str) {
        let active = self.filters.toggle(tag);
        tracing::trace!(tag, active, "tag filter toggled");
    }

    pub fn filters(&self) -> &TagFilterSet {
        &self.filters
    }

    pub fn is_filter_active(&self, tag: &str) -> bool {
        self.filters.contains(tag)
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Ids of the contacts passing the current filters and search
    pub fn visible_ids(&self) -> HashSet<String> {
        compute_visibility(&self.contacts, &self.filters, &self.search)
    }

    /// Visible contacts in list order
    pub fn visible_contacts(&self) -> Vec<&Contact> {
        let search = self.search.to_lowercase();
        self.contacts
            .iter()
            .filter(|contact| is_visible(contact, &self.filters, &search))
            .collect()
    }

    /// Every tag used across the cached list, first occurrence order
    pub fn all_tags(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.contacts
            .iter()
            .flat_map(|contact| contact.tags.iter())
            .filter(|tag| seen.insert(tag.as_str()))
            .cloned()
            .collect()
    }

    pub fn working(&self) -> Option<&WorkingContact> {
        self.working.as_ref()
    }

    pub fn working_mut(&mut self) -> Option<&mut WorkingContact> {
        self.working.as_mut()
    }

    /// Tag chip click on the form. Returns `true` when the tag was added.
    /// An empty name, or no working contact, changes nothing and returns `false`.
    pub fn toggle_working_tag(&mut self, tag: &str) -> bool {
        match self.working.as_mut() {
            Some(working) => working.toggle_tag(tag),
            None => false,
        }
    }

    /// Free-text tag entry. Returns `false` without mutating when the name is
    /// empty, already present, or no contact is being edited.
    pub fn add_new_tag(&mut self, tag: &str) -> bool {
        match self.working.as_mut() {
            Some(working) => working.push_new_tag(tag),
            None => false,
        }
    }

    /// Start editing a copy of `contact`
    pub fn begin_edit(&mut self, contact: &Contact) {
        self.working = Some(WorkingContact::from_contact(contact));
    }

    /// Fresh blank working contact: after submit, after cancel, before a create form
    pub fn reset_working_contact(&mut self) {
        self.working = Some(WorkingContact::blank());
    }
}
