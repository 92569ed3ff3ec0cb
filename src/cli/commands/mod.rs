pub mod auth;
pub mod contact;

use crate::cli::config::{load_session, resolve_server};
use crate::sync::{HttpContactsApi, SyncController};

/// Controller for the saved session. Without one the controller is logged
/// out and protected actions fail with an auth error.
pub(crate) fn connect(server: Option<String>) -> anyhow::Result<SyncController<HttpContactsApi>> {
    let saved = load_session()?;
    let server = resolve_server(server, saved.as_ref());

    let mut api = HttpContactsApi::new(&server)?;
    if let Some(saved) = saved.filter(|s| s.server == server) {
        api = api.with_session(saved.session());
    }

    Ok(SyncController::new(api))
}
