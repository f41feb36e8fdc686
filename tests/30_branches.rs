mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::{json, Value};

use common::{affected, customer_token, employee_token, error, TestApp};

fn main_branch() -> Value {
    json!({
        "branch_id": "B1",
        "branch_name": " <b>Main</b> ",
        "address": "1 High St",
        "city": "Oslo",
        "manager_id": "5"
    })
}

#[tokio::test]
async fn create_uses_the_supplied_id() -> Result<()> {
    let app = TestApp::new();

    // any authenticated caller may manage branches
    let (status, body) = app.post("/api/secure/branches", &customer_token("3"), main_branch()).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "success": true, "branch_id": "B1" }));

    let (status, body) = app.get("/api/secure/branches?branch_id=B1", &employee_token()).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["branches"][0]["branch_name"], "Main");
    assert_eq!(body["branches"][0]["city"], "Oslo");
    Ok(())
}

#[tokio::test]
async fn duplicate_branch_is_a_storage_error() -> Result<()> {
    let app = TestApp::new();
    let token = employee_token();
    app.post("/api/secure/branches", &token, main_branch()).await?;

    let (status, body) = app.post("/api/secure/branches", &token, main_branch()).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, error("Database error."));
    Ok(())
}

#[tokio::test]
async fn create_requires_every_field() -> Result<()> {
    let app = TestApp::new();
    let mut body = main_branch();
    body["city"] = json!("   ");

    let (status, response) = app.post("/api/secure/branches", &employee_token(), body).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response, error("All fields are required."));
    Ok(())
}

#[tokio::test]
async fn unknown_branch_is_not_found() -> Result<()> {
    let app = TestApp::new();
    let token = employee_token();
    app.post("/api/secure/branches", &token, main_branch()).await?;

    let (status, body) = app.get("/api/secure/branches?branch_id=999", &token).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, error("No records found."));

    let (status, body) = app.get("/api/secure/branches", &token).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["branches"].as_array().map(Vec::len), Some(1));
    Ok(())
}

#[tokio::test]
async fn blank_city_and_manager_are_not_written() -> Result<()> {
    let app = TestApp::new();
    let token = employee_token();
    app.post("/api/secure/branches", &token, main_branch()).await?;

    let (status, body) = app
        .put("/api/secure/branches", &token, json!({ "branch_id": "B1", "city": "", "manager_id": " " }))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, error("No update fields provided."));

    // address is written even when empty
    let (status, body) = app
        .put("/api/secure/branches", &token, json!({ "branch_id": "B1", "address": "", "city": "" }))
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, affected(1));

    let (_, body) = app.get("/api/secure/branches?branch_id=B1", &token).await?;
    assert_eq!(body["branches"][0]["address"], "");
    assert_eq!(body["branches"][0]["city"], "Oslo");
    Ok(())
}

#[tokio::test]
async fn writes_require_branch_id() -> Result<()> {
    let app = TestApp::new();
    let token = employee_token();

    let (status, body) = app.put("/api/secure/branches", &token, json!({ "city": "Bergen" })).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, error("branch_id is required."));

    let (status, body) = app.delete("/api/secure/branches", &token, json!({})).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, error("Provide branch_id."));
    Ok(())
}

#[tokio::test]
async fn delete_removes_the_branch() -> Result<()> {
    let app = TestApp::new();
    let token = employee_token();
    app.post("/api/secure/branches", &token, main_branch()).await?;

    let (_, body) = app.delete("/api/secure/branches", &token, json!({ "branch_id": "B1" })).await?;
    assert_eq!(body, affected(1));

    let (status, _) = app.get("/api/secure/branches", &token).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}
