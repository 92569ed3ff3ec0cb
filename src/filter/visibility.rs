use std::collections::HashSet;

use super::tag_set::TagFilterSet;
use crate::types::Contact;

/// Ids of the contacts that carry every active filter tag and whose name
/// starts with `search_text`, ignoring case.
pub fn compute_visibility(
    contacts: &[Contact],
    active_filters: &TagFilterSet,
    search_text: &str,
) -> HashSet<String> {
    let search = search_text.to_lowercase();

    contacts
        .iter()
        .filter(|contact| is_visible(contact, active_filters, &search))
        .map(|contact| contact.id.clone())
        .collect()
}

/// `lowercase_search` must already be lowercased
pub(crate) fn is_visible(contact: &Contact, active_filters: &TagFilterSet, lowercase_search: &str) -> bool {
    has_all_tags(contact, active_filters) && matches_search(&contact.full_name, lowercase_search)
}

// AND over the filter set; vacuously true when it is empty
fn has_all_tags(contact: &Contact, active_filters: &TagFilterSet) -> bool {
    active_filters.iter().all(|tag| contact.has_tag(tag))
}

fn matches_search(full_name: &str, lowercase_search: &str) -> bool {
    lowercase_search.is_empty() || full_name.to_lowercase().starts_with(lowercase_search)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(id: &str, name: &str, tags: &[&str]) -> Contact {
        Contact {
            id: id.to_string(),
            full_name: name.to_string(),
            email: format!("{}@example.com", id),
            phone_number: "555-0100".to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn ids(visible: HashSet<String>) -> Vec<String> {
        let mut ids: Vec<_> = visible.into_iter().collect();
        ids.sort();
        ids
    }

    #[test]
    fn filters_combine_with_and() {
        let contacts = vec![
            contact("a", "Alice", &["x", "y"]),
            contact("b", "Bob", &["x"]),
        ];
        let filters: TagFilterSet = ["x", "y"].into_iter().collect();

        assert_eq!(ids(compute_visibility(&contacts, &filters, "")), vec!["a"]);
    }

    #[test]
    fn empty_filter_set_shows_everyone() {
        let contacts = vec![
            contact("a", "Alice", &["x"]),
            contact("b", "Bob", &[]),
        ];
        let filters = TagFilterSet::new();

        assert_eq!(ids(compute_visibility(&contacts, &filters, "")), vec!["a", "b"]);
    }

    #[test]
    fn search_is_case_insensitive_prefix() {
        let contacts = vec![contact("a", "Alice", &[])];
        let filters = TagFilterSet::new();

        assert_eq!(compute_visibility(&contacts, &filters, "al").len(), 1);
        assert_eq!(compute_visibility(&contacts, &filters, "AL").len(), 1);
        assert!(compute_visibility(&contacts, &filters, "lic").is_empty());
    }

    #[test]
    fn search_and_filters_both_apply() {
        let contacts = vec![
            contact("a", "Alice", &["x"]),
            contact("b", "Albert", &[]),
            contact("c", "Bob", &["x"]),
        ];
        let filters: TagFilterSet = ["x"].into_iter().collect();

        assert_eq!(ids(compute_visibility(&contacts, &filters, "al")), vec!["a"]);
    }

    #[test]
    fn vanished_tag_matches_nothing() {
        let contacts = vec![contact("a", "Alice", &["x"])];
        let filters: TagFilterSet = ["gone"].into_iter().collect();

        assert!(compute_visibility(&contacts, &filters, "").is_empty());
    }
}
