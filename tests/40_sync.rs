mod common;

use anyhow::Result;

use contacts_api_rust::sync::{ContactsApi, Credentials, HttpContactsApi, SyncController, SyncError};

async fn logged_in_controller(server: &common::TestServer) -> Result<SyncController<HttpContactsApi>> {
    let mut controller = SyncController::new(HttpContactsApi::new(&server.base_url)?);
    controller
        .login(&Credentials {
            username: common::USERNAME.to_string(),
            password: common::PASSWORD.to_string(),
        })
        .await?;
    Ok(controller)
}

fn fill_working(controller: &mut SyncController<HttpContactsApi>, name: &str) {
    if let Some(working) = controller.engine_mut().working_mut() {
        working.full_name = name.to_string();
        working.email = format!("{}@example.com", name.to_lowercase());
        working.phone_number = "555-0100".to_string();
    }
}

#[tokio::test]
async fn wrong_password_is_an_auth_error() -> Result<()> {
    let server = common::spawn_server().await?;
    let mut controller = SyncController::new(HttpContactsApi::new(&server.base_url)?);

    let result = controller
        .login(&Credentials {
            username: common::USERNAME.to_string(),
            password: "nope".to_string(),
        })
        .await;
    assert!(matches!(result, Err(SyncError::Auth(_))));
    assert!(!controller.api().is_logged_in());
    Ok(())
}

#[tokio::test]
async fn create_filter_and_search_round_trip() -> Result<()> {
    let server = common::spawn_server().await?;
    let mut controller = logged_in_controller(&server).await?;

    for (name, tags) in [("Alice", vec!["x", "y"]), ("Bob", vec!["x"]), ("Alfred", vec!["y"])] {
        controller.begin_create()?;
        fill_working(&mut controller, name);
        for tag in tags {
            controller.engine_mut().add_new_tag(tag);
        }
        controller.submit().await?;
    }

    let engine = controller.engine_mut();
    assert_eq!(engine.contacts().len(), 3);
    assert_eq!(engine.all_tags(), vec!["x", "y"]);

    engine.add_filter("x");
    engine.add_filter("y");
    let names: Vec<_> = engine.visible_contacts().iter().map(|c| c.full_name.clone()).collect();
    assert_eq!(names, vec!["Alice"]);

    engine.add_filter("x");
    engine.set_search("al");
    let mut names: Vec<_> = engine.visible_contacts().iter().map(|c| c.full_name.clone()).collect();
    names.sort();
    assert_eq!(names, vec!["Alfred", "Alice"]);
    Ok(())
}

#[tokio::test]
async fn rejected_edit_keeps_working_contact() -> Result<()> {
    let server = common::spawn_server().await?;
    let mut controller = logged_in_controller(&server).await?;

    controller.begin_create()?;
    fill_working(&mut controller, "Alice");
    let saved = controller.submit().await?;

    controller.begin_edit(&saved.id).await?;
    controller.engine_mut().toggle_working_tag("vip");
    if let Some(working) = controller.engine_mut().working_mut() {
        working.email = " ".to_string();
    }

    match controller.submit().await {
        Err(SyncError::Validation { fields, .. }) => assert_eq!(fields, vec!["email"]),
        other => panic!("expected validation error, got {:?}", other),
    }

    let working = controller.engine().working().cloned().unwrap_or_default();
    assert_eq!(working.id.as_deref(), Some(saved.id.as_str()));
    assert_eq!(working.tags(), &["vip"]);
    Ok(())
}

#[tokio::test]
async fn empty_name_fails_before_any_round_trip() -> Result<()> {
    let server = common::spawn_server().await?;
    let mut controller = logged_in_controller(&server).await?;

    controller.begin_create()?;
    fill_working(&mut controller, "Alice");
    if let Some(working) = controller.engine_mut().working_mut() {
        working.full_name.clear();
    }

    assert!(matches!(controller.submit().await, Err(SyncError::Validation { .. })));
    assert_eq!(
        controller.engine().working().map(|w| w.email.clone()),
        Some("alice@example.com".to_string())
    );
    assert!(controller.api().fetch_contacts().await?.is_empty());

    // Sent anyway, the server answers 400 with the same field
    let working = controller.engine().working().cloned().unwrap_or_default();
    match controller.api().submit(&working).await {
        Err(SyncError::Validation { fields, .. }) => assert_eq!(fields, vec!["full_name"]),
        other => panic!("expected validation error, got {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn deleting_unknown_id_leaves_list_unchanged() -> Result<()> {
    let server = common::spawn_server().await?;
    let mut controller = logged_in_controller(&server).await?;

    controller.begin_create()?;
    fill_working(&mut controller, "Alice");
    let saved = controller.submit().await?;

    assert!(!controller.delete("does-not-exist").await?);
    assert_eq!(controller.engine().contacts().len(), 1);

    assert!(controller.delete(&saved.id).await?);
    assert!(controller.engine().contacts().is_empty());
    Ok(())
}

#[tokio::test]
async fn begin_edit_of_unknown_id_is_not_found() -> Result<()> {
    let server = common::spawn_server().await?;
    let mut controller = logged_in_controller(&server).await?;

    assert!(matches!(
        controller.begin_edit("does-not-exist").await,
        Err(SyncError::NotFound(_))
    ));
    Ok(())
}
