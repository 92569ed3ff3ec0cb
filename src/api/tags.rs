//! Wire codec for contact tags.
//!
//! Tags travel as a single comma-joined string in form bodies. There is no
//! escaping: a tag containing `,` splits into two tags on the way back.

use serde::{Deserialize, Deserializer};

pub const TAG_SEPARATOR: char = ',';

/// Join tags for a form body. The empty list encodes as the empty string.
pub fn join_tags<S: AsRef<str>>(tags: &[S]) -> String {
    tags.iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(",")
}

/// Inverse of [`join_tags`]. The empty string decodes as the empty list.
pub fn split_tags(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(TAG_SEPARATOR).map(str::to_string).collect()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TagsRepr {
    List(Vec<String>),
    Joined(String),
}

/// Serde helper accepting `["a","b"]`, `"a,b"` or `null`
pub fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<TagsRepr>::deserialize(deserializer)? {
        Some(TagsRepr::List(tags)) => tags,
        Some(TagsRepr::Joined(raw)) => split_tags(&raw),
        None => Vec::new(),
    })
}
