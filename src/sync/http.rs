use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use url::Url;

use super::{ContactsApi, Credentials, Session, SyncError};
use crate::filter::WorkingContact;
use crate::types::Contact;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
    #[serde(default)]
    field_errors: BTreeMap<String, String>,
}

/// [`ContactsApi`] over the REST surface using `reqwest`
#[derive(Debug, Clone)]
pub struct HttpContactsApi {
    client: reqwest::Client,
    base_url: Url,
    session: Option<Session>,
}

impl HttpContactsApi {
    pub fn new(base_url: &str) -> Result<Self, SyncError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| SyncError::Network(format!("Invalid server URL '{}': {}", base_url, e)))?;
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| SyncError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            session: None,
        })
    }

    /// Reuse a session saved by an earlier login
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Append `segments` to the base URL, percent-encoding each one so an id
    /// can never climb out of its route
    fn endpoint(&self, segments: &[&str]) -> Result<Url, SyncError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| SyncError::Network(format!("Server URL '{}' cannot take a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.session {
            Some(session) => request.bearer_auth(&session.token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, SyncError> {
        self.authorized(request).send().await.map_err(|e| {
            tracing::warn!("Request failed: {}", e);
            SyncError::Network(e.to_string())
        })
    }
}

/// Map a non-success response onto the client error taxonomy
async fn error_from_response(response: Response, subject: &str) -> SyncError {
    let status = response.status();
    let body = response.json::<ErrorBody>().await.ok();
    let message = body
        .as_ref()
        .map(|b| b.error.clone())
        .unwrap_or_else(|| status.to_string());

    match status {
        StatusCode::UNAUTHORIZED => SyncError::Auth(message),
        StatusCode::NOT_FOUND => SyncError::NotFound(subject.to_string()),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            let fields = body
                .map(|b| b.field_errors.into_keys().collect())
                .unwrap_or_default();
            SyncError::Validation { message, fields }
        }
        _ => SyncError::Network(message),
    }
}

#[async_trait]
impl ContactsApi for HttpContactsApi {
    async fn login(&mut self, credentials: &Credentials) -> Result<Session, SyncError> {
        let url = self.endpoint(&["api", "login"])?;
        let response = self
            .client
            .post(url)
            .form(&[
                ("username", credentials.username.as_str()),
                ("password", credentials.password.as_str()),
            ])
            .send()
            .await
            .map_err(|e| SyncError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(error_from_response(response, &credentials.username).await);
        }

        let session: Session = response
            .json()
            .await
            .map_err(|e| SyncError::Network(e.to_string()))?;
        self.session = Some(session.clone());
        Ok(session)
    }

    fn is_logged_in(&self) -> bool {
        self.session.is_some()
    }

    async fn fetch_contacts(&self) -> Result<Vec<Contact>, SyncError> {
        let url = self.endpoint(&["api", "contacts"])?;
        let response = self.send(self.client.get(url)).await?;
        if !response.status().is_success() {
            return Err(error_from_response(response, "contacts").await);
        }
        response.json().await.map_err(|e| SyncError::Network(e.to_string()))
    }

    async fn fetch_contact(&self, id: &str) -> Result<Contact, SyncError> {
        let url = self.endpoint(&["api", "contacts", id])?;
        let response = self.send(self.client.get(url)).await?;
        if !response.status().is_success() {
            return Err(error_from_response(response, id).await);
        }
        response.json().await.map_err(|e| SyncError::Network(e.to_string()))
    }

    async fn submit(&self, working: &WorkingContact) -> Result<Contact, SyncError> {
        let request = match &working.id {
            Some(id) => self.client.put(self.endpoint(&["api", "contacts", id.as_str()])?),
            None => self.client.post(self.endpoint(&["api", "contacts"])?),
        };
        let subject = working.id.as_deref().unwrap_or("new contact");

        let response = self.send(request.form(&working.form_fields())).await?;
        if !response.status().is_success() {
            return Err(error_from_response(response, subject).await);
        }
        response.json().await.map_err(|e| SyncError::Network(e.to_string()))
    }

    async fn remove(&self, id: &str) -> Result<bool, SyncError> {
        let url = self.endpoint(&["api", "contacts", id])?;
        let response = self.send(self.client.delete(url)).await?;

        match response.status() {
            status if status.is_success() => Ok(true),
            StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND => Ok(false),
            _ => Err(error_from_response(response, id).await),
        }
    }
}
