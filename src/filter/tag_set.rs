/// Active tag filters. Insertion-ordered so chips render in the order the
/// user picked them; membership is what matters for filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagFilterSet {
    tags: Vec<String>,
}

impl TagFilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `tag` if absent, remove it if present. Returns whether it is now active.
    pub fn toggle(&mut self, tag: &str) -> bool {
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

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for TagFilterSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = TagFilterSet::new();
        for tag in iter {
            let tag = tag.into();
            if !set.contains(&tag) {
                set.tags.push(tag);
            }
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_is_symmetric() {
        let mut set = TagFilterSet::new();
        assert!(set.toggle("work"));
        assert!(set.contains("work"));
        assert!(!set.toggle("work"));
        assert!(set.is_empty());
    }

    #[test]
    fn collecting_drops_duplicates() {
        let set: TagFilterSet = ["a", "b", "a"].into_iter().collect();
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["a", "b"]);
    }
}
