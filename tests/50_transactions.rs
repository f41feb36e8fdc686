mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::{json, Value};

use common::{affected, customer_token, employee_token, error, TestApp};

const EXACTLY_ONE: &str = "Provide exactly one of: transaction_id, account_id, or customer_id.";
const COMBINATION: &str =
    "Provide either transaction_id OR account_id OR customer_id, not combinations or none.";

fn deposit() -> Value {
    json!({
        "account_id": 2,
        "customer_id": 3,
        "transaction_type": "deposit",
        "amount": "0",
        "timestamp": "2024-05-01 10:00:00",
        "completed": "1"
    })
}

#[tokio::test]
async fn customers_are_denied() -> Result<()> {
    let app = TestApp::new();
    let (status, body) = app.post("/api/secure/transactions", &customer_token("3"), deposit()).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, error("Access denied."));
    Ok(())
}

#[tokio::test]
async fn delete_needs_exactly_one_selector() -> Result<()> {
    let app = TestApp::new();
    let token = employee_token();

    // transaction 1 matches every selector below
    let (status, _) = app.post("/api/secure/transactions", &token, deposit()).await?;
    assert_eq!(status, StatusCode::CREATED);
    let seeded = app.store.calls();

    for body in [
        json!({ "transaction_id": 1, "account_id": 2 }),
        json!({ "account_id": 2, "customer_id": 3 }),
        json!({ "transaction_id": 1, "account_id": 2, "customer_id": 3 }),
        json!({}),
    ] {
        let (status, response) = app.delete("/api/secure/transactions", &token, body).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response, error(EXACTLY_ONE));
    }
    assert_eq!(app.store.calls(), seeded);

    let (_, body) = app.get("/api/secure/transactions", &token).await?;
    assert_eq!(body["transactions"].as_array().map(Vec::len), Some(1));
    Ok(())
}

#[tokio::test]
async fn read_conflicts() -> Result<()> {
    let app = TestApp::new();
    let token = employee_token();

    let (status, body) = app
        .get("/api/secure/transactions?transaction_id=1&account_id=2", &token)
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        error("Provide only one of: transaction_id, account_id, or customer_id.")
    );

    let (status, body) = app
        .get("/api/secure/transactions?account_id=2&customer_id=3", &token)
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, error("Provide either account_id OR customer_id, not both."));
    Ok(())
}

#[tokio::test]
async fn update_conflicts() -> Result<()> {
    let app = TestApp::new();
    let token = employee_token();

    let (_, body) = app
        .put("/api/secure/transactions", &token, json!({ "transaction_id": 1, "customer_id": 3, "amount": 5 }))
        .await?;
    assert_eq!(
        body,
        error("Provide only transaction_id for updates, not account_id or customer_id.")
    );

    let (_, body) = app
        .put("/api/secure/transactions", &token, json!({ "account_id": 2, "customer_id": 3, "amount": 5 }))
        .await?;
    assert_eq!(body, error(COMBINATION));

    let (status, body) = app.put("/api/secure/transactions", &token, json!({ "amount": 5 })).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, error(COMBINATION));
    Ok(())
}

#[tokio::test]
async fn create_parses_amount_and_completion() -> Result<()> {
    let app = TestApp::new();
    let token = employee_token();

    let (status, body) = app.post("/api/secure/transactions", &token, deposit()).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "success": true, "transaction_id": 1 }));

    let mut pending = deposit();
    if let Some(fields) = pending.as_object_mut() {
        fields.remove("completed");
    }
    let (status, _) = app.post("/api/secure/transactions", &token, pending).await?;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app.get("/api/secure/transactions", &token).await?;
    assert_eq!(status, StatusCode::OK);
    let rows = body["transactions"].as_array().cloned().unwrap_or_default();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["completed"], 1);
    assert_eq!(rows[0]["amount"], json!(0.0));
    assert_eq!(rows[1]["completed"], Value::Null);
    Ok(())
}

#[tokio::test]
async fn create_requires_amount() -> Result<()> {
    let app = TestApp::new();
    let mut body = deposit();
    body["amount"] = json!("n/a");

    let (status, response) = app.post("/api/secure/transactions", &employee_token(), body).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response,
        error("Required fields: account_id, customer_id, transaction_type, amount, timestamp.")
    );
    Ok(())
}

#[tokio::test]
async fn update_and_delete_by_account_and_customer() -> Result<()> {
    let app = TestApp::new();
    let token = employee_token();
    app.post("/api/secure/transactions", &token, deposit()).await?;
    app.post("/api/secure/transactions", &token, deposit()).await?;

    let (status, body) = app
        .put("/api/secure/transactions", &token, json!({ "account_id": 2, "completed": 0 }))
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, affected(2));

    let (_, body) = app.get("/api/secure/transactions?transaction_id=2", &token).await?;
    assert_eq!(body["transactions"][0]["completed"], 0);

    let (_, body) = app.delete("/api/secure/transactions", &token, json!({ "customer_id": 3 })).await?;
    assert_eq!(body, affected(2));
    let (_, body) = app.delete("/api/secure/transactions", &token, json!({ "customer_id": 3 })).await?;
    assert_eq!(body, affected(0));
    Ok(())
}
