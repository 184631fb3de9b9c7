//! Todo API integration tests

use rstest::rstest;
use serde_json::{json, Value};

use crate::common::{
    create_organization, create_project, create_todo, entity_path, seed_project, url_path,
    TestApp,
};

#[tokio::test]
async fn test_create_todo_defaults() {
    let app = TestApp::new().await;
    let (org, project) = seed_project(&app).await;

    let response = app
        .post_json(
            "/todos",
            json!({
                "title": "Write docs",
                "organization": org["id"],
                "project": project["id"],
            }),
        )
        .await;
    response.assert_created();

    let json: Value = response.json();
    assert_eq!(json["title"], "Write docs");
    assert_eq!(json["status"], "created");
    assert_eq!(json["code"], 1);
    assert_eq!(json["description"], Value::Null);
    assert_eq!(json["organization"], org["id"]);
    assert_eq!(json["project"], project["id"]);
}

#[tokio::test]
async fn test_todo_codes_increment() {
    let app = TestApp::new().await;
    let (_, project) = seed_project(&app).await;

    let first = create_todo(&app, "One", &project).await;
    let second = create_todo(&app, "Two", &project).await;

    assert_eq!(first["code"], 1);
    assert_eq!(second["code"], 2);
}

#[tokio::test]
async fn test_create_todo_with_explicit_fields() {
    let app = TestApp::new().await;
    let (org, project) = seed_project(&app).await;

    let json: Value = app
        .post_json(
            "/todos",
            json!({
                "title": "Ship",
                "description": "Cut the release",
                "code": 42,
                "status": "completed",
                "organization": org["id"],
                "project": project["id"],
            }),
        )
        .await
        .assert_created()
        .json();

    assert_eq!(json["code"], 42);
    assert_eq!(json["description"], "Cut the release");
    assert_eq!(json["status"], "completed");
}

#[rstest]
#[case::unknown_organization(true, false, "Organization not found")]
#[case::unknown_project(false, true, "Project not found")]
#[case::organization_checked_first(true, true, "Organization not found")]
#[tokio::test]
async fn test_create_todo_with_missing_parent(
    #[case] unknown_organization: bool,
    #[case] unknown_project: bool,
    #[case] expected: &str,
) {
    let app = TestApp::new().await;
    let (org, project) = seed_project(&app).await;

    let organization = if unknown_organization {
        json!(uuid::Uuid::new_v4())
    } else {
        org["id"].clone()
    };
    let project = if unknown_project {
        json!(uuid::Uuid::new_v4())
    } else {
        project["id"].clone()
    };

    app.post_json(
        "/todos",
        json!({ "title": "Lost", "organization": organization, "project": project }),
    )
    .await
    .assert_not_found_message(expected);

    app.get("/todos")
        .await
        .assert_not_found_message("Todos not found");
}

#[tokio::test]
async fn test_list_todos() {
    let app = TestApp::new().await;
    let (_, project) = seed_project(&app).await;
    create_todo(&app, "One", &project).await;
    create_todo(&app, "Two", &project).await;

    let json: Vec<Value> = app.get("/todos").await.assert_ok().json();
    let titles: Vec<&str> = json.iter().map(|t| t["title"].as_str().unwrap()).collect();
    assert_eq!(titles, vec!["One", "Two"]);
}

#[tokio::test]
async fn test_list_todos_by_project() {
    let app = TestApp::new().await;
    let (org, launch) = seed_project(&app).await;
    let other = create_project(&app, "Other", &org).await;

    let a = create_todo(&app, "A", &launch).await;
    create_todo(&app, "B", &other).await;
    let c = create_todo(&app, "C", &launch).await;
    create_todo(&app, "D", &other).await;

    let json: Vec<Value> = app
        .get(&format!("/todos/projects/{}", launch["id"].as_str().unwrap()))
        .await
        .assert_ok()
        .json();

    let ids: Vec<&Value> = json.iter().map(|t| &t["id"]).collect();
    assert_eq!(ids, vec![&a["id"], &c["id"]]);
    assert!(json.iter().all(|t| t["project"] == launch["id"]));
}

#[rstest]
#[case::unknown_project("7d3c8f0e-5b1a-4c2e-9f6d-2a8b4e1c0d93")]
#[case::malformed_id("not-a-uuid")]
#[tokio::test]
async fn test_list_todos_by_project_without_matches(#[case] project_id: &str) {
    let app = TestApp::new().await;

    let json: Vec<Value> = app
        .get(&format!("/todos/projects/{}", project_id))
        .await
        .assert_ok()
        .json();
    assert!(json.is_empty());
}

#[tokio::test]
async fn test_patch_todo_status() {
    let app = TestApp::new().await;
    let (org, project) = seed_project(&app).await;
    let todo = create_todo(&app, "Review", &project).await;
    let path = entity_path("todos", &todo);

    app.patch_json(&path, json!({ "status": "completed" }))
        .await
        .assert_ok();

    let fetched: Value = app.get(&path).await.assert_ok().json();
    assert_eq!(fetched["status"], "completed");
    assert_eq!(fetched["title"], "Review");
    assert_eq!(fetched["organization"], org["id"]);
    assert_eq!(fetched["code"], todo["code"]);
}

#[tokio::test]
async fn test_patch_todo_description() {
    let app = TestApp::new().await;
    let (_, project) = seed_project(&app).await;
    let todo = create_todo(&app, "Review", &project).await;

    let json: Value = app
        .patch_json(
            &entity_path("todos", &todo),
            json!({ "description": "Second pass" }),
        )
        .await
        .assert_ok()
        .json();

    assert_eq!(json["description"], "Second pass");
    assert_eq!(json["status"], "created");
}

#[tokio::test]
async fn test_patch_todo_clears_description() {
    let app = TestApp::new().await;
    let (org, project) = seed_project(&app).await;
    let todo: Value = app
        .post_json(
            "/todos",
            json!({
                "title": "Review",
                "description": "First pass",
                "organization": org["id"],
                "project": project["id"],
            }),
        )
        .await
        .assert_created()
        .json();
    let path = entity_path("todos", &todo);

    let json: Value = app
        .patch_json(&path, json!({ "description": null }))
        .await
        .assert_ok()
        .json();
    assert_eq!(json["description"], Value::Null);

    let fetched: Value = app.get(&path).await.assert_ok().json();
    assert_eq!(fetched["description"], Value::Null);
    assert_eq!(fetched["title"], "Review");
}

#[tokio::test]
async fn test_patch_todo_with_unknown_status() {
    let app = TestApp::new().await;
    let (_, project) = seed_project(&app).await;
    let todo = create_todo(&app, "Review", &project).await;

    let response = app
        .patch_json(&entity_path("todos", &todo), json!({ "status": "archived" }))
        .await;
    response.assert_internal_error();
    assert_eq!(response.text(), "Opps! Could not patch todo.");
}

#[tokio::test]
async fn test_patch_unknown_todo() {
    let app = TestApp::new().await;

    app.patch_json(
        &format!("/todos/{}", uuid::Uuid::new_v4()),
        json!({ "status": "completed" }),
    )
    .await
    .assert_not_found_message("Todo not found");
}

#[tokio::test]
async fn test_delete_todo_is_soft() {
    let app = TestApp::new().await;
    let (_, project) = seed_project(&app).await;
    let todo = create_todo(&app, "Obsolete", &project).await;
    let path = entity_path("todos", &todo);

    let json: Value = app.delete(&path).await.assert_ok().json();
    assert_eq!(json["status"], "deleted");

    let fetched: Value = app.get(&path).await.assert_ok().json();
    assert_eq!(fetched["status"], "deleted");
    assert_eq!(fetched["title"], "Obsolete");
}

#[tokio::test]
async fn test_delete_unknown_todo() {
    let app = TestApp::new().await;

    app.delete(&format!("/todos/{}", uuid::Uuid::new_v4()))
        .await
        .assert_not_found_message("Todo not found");
}

#[tokio::test]
async fn test_clear_todos_removes_rows() {
    let app = TestApp::new().await;
    let (_, project) = seed_project(&app).await;
    let todo = create_todo(&app, "One", &project).await;
    create_todo(&app, "Two", &project).await;

    let removed: Vec<Value> = app.delete("/todos").await.assert_ok().json();
    assert_eq!(removed.len(), 2);

    app.get("/todos")
        .await
        .assert_not_found_message("Todos not found");
    app.get(&entity_path("todos", &todo))
        .await
        .assert_not_found_message("Todo not found");

    // Parents are untouched
    app.get(&entity_path("projects", &project)).await.assert_ok();
}

#[tokio::test]
async fn test_todo_round_trip_via_url() {
    let app = TestApp::new().await;
    let org = create_organization(&app, "Acme").await;
    let project = create_project(&app, "Launch", &org).await;

    let created: Value = app
        .post_json(
            "/todos",
            json!({
                "title": "Plan",
                "description": "Kickoff agenda",
                "organization": org["id"],
                "project": project["id"],
            }),
        )
        .await
        .assert_created()
        .json();

    let fetched: Value = app
        .get(&url_path(created["url"].as_str().unwrap()))
        .await
        .assert_ok()
        .json();

    assert_eq!(fetched["title"], "Plan");
    assert_eq!(fetched["description"], "Kickoff agenda");
    assert_eq!(fetched["organization"], org["id"]);
    assert_eq!(fetched["project"], project["id"]);
    assert_eq!(fetched, created);
}
