mod common;

use anyhow::Result;
use reqwest::StatusCode;

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = reqwest::get(server.url("/health")).await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn unknown_paths_fall_back_to_static_files() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = reqwest::get(server.url("/")).await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.text().await?.contains("<title>Contacts</title>"));

    let res = reqwest::get(server.url("/no-such-asset.js")).await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}
