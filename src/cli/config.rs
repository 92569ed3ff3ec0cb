use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::sync::Session;

pub const DEFAULT_SERVER: &str = "http://localhost:3000";

/// Login state persisted between CLI invocations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliSession {
    pub server: String,
    pub username: String,
    pub token: String,
    pub logged_in_at: DateTime<Utc>,
}

impl CliSession {
    pub fn new(server: String, session: Session) -> Self {
        Self {
            server,
            username: session.username,
            token: session.token,
            logged_in_at: Utc::now(),
        }
    }

    pub fn session(&self) -> Session {
        Session {
            username: self.username.clone(),
            token: self.token.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerStatus {
    Up,
    Down,
}

pub fn get_config_dir() -> anyhow::Result<PathBuf> {
    let config_dir = if let Ok(custom_dir) = std::env::var("CONTACTS_CLI_CONFIG_DIR") {
        PathBuf::from(custom_dir)
    } else {
        let home = std::env::var("HOME").map_err(|_| anyhow::anyhow!("HOME environment variable not set"))?;
        PathBuf::from(home).join(".config").join("contacts").join("cli")
    };

    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)?;
    }

    Ok(config_dir)
}

fn session_file() -> anyhow::Result<PathBuf> {
    Ok(get_config_dir()?.join("session.json"))
}

pub fn load_session() -> anyhow::Result<Option<CliSession>> {
    let path = session_file()?;
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)?;
    let session: CliSession = serde_json::from_str(&content)?;
    Ok(Some(session))
}

pub fn save_session(session: &CliSession) -> anyhow::Result<()> {
    let content = serde_json::to_string_pretty(session)?;
    fs::write(session_file()?, content)?;
    Ok(())
}

/// Returns whether a session file was removed
pub fn clear_session() -> anyhow::Result<bool> {
    let path = session_file()?;
    if !path.exists() {
        return Ok(false);
    }
    fs::remove_file(path)?;
    Ok(true)
}

/// Server to talk to: explicit flag, then the saved session, then the default
pub fn resolve_server(explicit: Option<String>, saved: Option<&CliSession>) -> String {
    explicit
        .or_else(|| saved.map(|s| s.server.clone()))
        .unwrap_or_else(|| DEFAULT_SERVER.to_string())
}

pub async fn ping_server(server: &str) -> ServerStatus {
    let client = reqwest::Client::new();
    let url = format!("{}/health", server.trim_end_matches('/'));

    match client.get(&url).timeout(Duration::from_secs(5)).send().await {
        Ok(response) if response.status().is_success() => ServerStatus::Up,
        _ => ServerStatus::Down,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn saved(server: &str) -> CliSession {
        CliSession::new(
            server.to_string(),
            Session {
                username: "alice".to_string(),
                token: "t".to_string(),
            },
        )
    }

    #[test]
    fn explicit_server_wins() {
        let session = saved("http://saved:3000");
        assert_eq!(
            resolve_server(Some("http://flag:3000".to_string()), Some(&session)),
            "http://flag:3000"
        );
        assert_eq!(resolve_server(None, Some(&session)), "http://saved:3000");
        assert_eq!(resolve_server(None, None), DEFAULT_SERVER);
    }

    #[test]
    fn session_round_trips_through_json() {
        let session = saved("http://saved:3000");
        let json = serde_json::to_string(&session).unwrap();
        let restored: CliSession = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.session(), session.session());
        assert_eq!(restored.server, "http://saved:3000");
    }
}
