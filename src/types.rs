/// Shared types used by the server, the client and the filter engine

use serde::{Deserialize, Serialize};

/// A contact as exchanged over the REST surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    /// Accepts either a JSON array or the comma-joined string form
    #[serde(default, deserialize_with = "crate::api::tags::deserialize_tags")]
    pub tags: Vec<String>,
}

impl Contact {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}
