//! Form bodies accepted by the contact and login routes.

use serde::Deserialize;
use std::collections::BTreeMap;

use crate::api::tags::split_tags;
use crate::database::models::{ContactChanges, NewContact};
use crate::error::ApiError;

const REQUIRED_MESSAGE: &str = "This field is required";

/// `application/x-www-form-urlencoded` contact body. Keys outside the
/// contact attributes are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct ContactForm {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    /// Comma-joined tag list
    pub tags: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl ContactForm {
    /// Create semantics: every attribute except `tags` must be present and non-empty
    pub fn into_new_contact(self) -> Result<NewContact, ApiError> {
        let mut field_errors = BTreeMap::new();

        let full_name = required("full_name", self.full_name, &mut field_errors);
        let email = required("email", self.email, &mut field_errors);
        let phone_number = required("phone_number", self.phone_number, &mut field_errors);

        if !field_errors.is_empty() {
            return Err(ApiError::validation_error("Missing required fields", Some(field_errors)));
        }

        Ok(NewContact {
            full_name,
            email,
            phone_number,
            tags: self.tags.as_deref().map(split_tags).unwrap_or_default(),
        })
    }

    /// Update semantics: absent attributes are kept, present ones must be non-empty
    pub fn into_changes(self) -> Result<ContactChanges, ApiError> {
        let mut field_errors = BTreeMap::new();

        for (name, value) in [
            ("full_name", &self.full_name),
            ("email", &self.email),
            ("phone_number", &self.phone_number),
        ] {
            if matches!(value, Some(v) if v.trim().is_empty()) {
                field_errors.insert(name.to_string(), REQUIRED_MESSAGE.to_string());
            }
        }

        if !field_errors.is_empty() {
            return Err(ApiError::validation_error("Invalid contact attributes", Some(field_errors)));
        }

        Ok(ContactChanges {
            full_name: self.full_name,
            email: self.email,
            phone_number: self.phone_number,
            tags: self.tags.as_deref().map(split_tags),
        })
    }
}

fn required(
    name: &str,
    value: Option<String>,
    field_errors: &mut BTreeMap<String, String>,
) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => {
            field_errors.insert(name.to_string(), REQUIRED_MESSAGE.to_string());
            String::new()
        }
    }
}
