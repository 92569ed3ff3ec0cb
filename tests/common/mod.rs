#![allow(dead_code)]

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::Value;

use contacts_api_rust::app::{app, AppState};
use contacts_api_rust::config::{AppConfig, SeedUser};

pub const USERNAME: &str = "alice";
pub const PASSWORD: &str = "secret";

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
}

impl TestServer {
    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Development config with the in-memory store and one known user
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::development();
    config.seed.users = vec![
        SeedUser {
            username: USERNAME.to_string(),
            password: PASSWORD.to_string(),
        },
        SeedUser {
            username: "bob".to_string(),
            password: "hunter2".to_string(),
        },
    ];
    config.server.static_dir = "tests/fixtures/public".to_string();
    config
}

/// Serve the router on a free port inside the calling test's runtime
pub async fn spawn_server_with(config: AppConfig) -> Result<TestServer> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let base_url = format!("http://127.0.0.1:{}", port);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .with_context(|| format!("failed to bind port {}", port))?;
    let router = app(AppState::in_memory(config));
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            tracing::error!("test server stopped: {}", e);
        }
    });

    let server = TestServer { port, base_url };
    server.wait_ready(Duration::from_secs(5)).await?;
    Ok(server)
}

pub async fn spawn_server() -> Result<TestServer> {
    spawn_server_with(test_config()).await
}

pub async fn login(server: &TestServer, username: &str, password: &str) -> Result<String> {
    let res = reqwest::Client::new()
        .post(server.url("/api/login"))
        .form(&[("username", username), ("password", password)])
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::OK, "login failed: {}", res.status());

    let body: Value = res.json().await?;
    body["token"]
        .as_str()
        .map(str::to_string)
        .context("login response has no token")
}

pub async fn create_contact(
    server: &TestServer,
    token: &str,
    full_name: &str,
    tags: &str,
) -> Result<Value> {
    let email = format!("{}@example.com", full_name.to_lowercase().replace(' ', "."));
    let res = reqwest::Client::new()
        .post(server.url("/api/contacts"))
        .bearer_auth(token)
        .form(&[
            ("full_name", full_name),
            ("email", email.as_str()),
            ("phone_number", "555-0100"),
            ("tags", tags),
        ])
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::CREATED, "create failed: {}", res.status());
    Ok(res.json().await?)
}
