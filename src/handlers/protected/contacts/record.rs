use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::Json,
    Form,
};

use crate::api::ContactForm;
use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::types::Contact;

/// GET /api/contacts/:id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Contact>, ApiError> {
    state
        .contacts
        .get(&id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("Contact {} not found", id)))
}

/// PUT /api/contacts/:id - update the fields present in the form body
pub async fn put(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Form(form): Form<ContactForm>,
) -> Result<(StatusCode, Json<Contact>), ApiError> {
    let changes = form.into_changes()?;

    // Unknown ids are a 400 here, not a 404
    let contact = state
        .contacts
        .update(&id, changes)
        .await?
        .ok_or_else(|| ApiError::bad_request(format!("Contact {} could not be updated", id)))?;

    tracing::info!("{} updated contact {}", user.username, contact.id);
    Ok((StatusCode::CREATED, Json(contact)))
}

/// DELETE /api/contacts/:id
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if !state.contacts.remove(&id).await? {
        return Err(ApiError::bad_request(format!("Contact {} could not be deleted", id)));
    }

    tracing::info!("{} deleted contact {}", user.username, id);
    Ok(StatusCode::NO_CONTENT)
}
