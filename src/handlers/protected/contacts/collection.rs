use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::Json,
    Form,
};

use crate::api::ContactForm;
use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::types::Contact;

/// GET /api/contacts - every contact, or only the caller's when ownership scoping is on
pub async fn get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Contact>>, ApiError> {
    let mut contacts = state.contacts.list().await?;

    if state.config.security.scope_contacts_to_user {
        contacts.retain(|c| c.has_tag(&user.username));
    }

    Ok(Json(contacts))
}

/// POST /api/contacts - create a contact from a form body
pub async fn post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Form(form): Form<ContactForm>,
) -> Result<(StatusCode, Json<Contact>), ApiError> {
    let new_contact = form.into_new_contact()?;
    let contact = state.contacts.create(new_contact).await?;

    tracing::info!("{} created contact {}", user.username, contact.id);
    Ok((StatusCode::CREATED, Json(contact)))
}
