use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::Service;

use server::routes;
use server::state::ServerState;
use service::desk::{repository::memory::InMemoryDeskRepository, DeskConfig};

fn build_app() -> Router {
    let state = ServerState::new(Arc::new(InMemoryDeskRepository::default()), DeskConfig::default());
    routes::build_router(state, tower_http::cors::CorsLayer::very_permissive())
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> anyhow::Result<(StatusCode, Value)> {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(b) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&b)?))?,
        None => builder.body(Body::empty())?,
    };
    let resp = app.clone().call(req).await?;
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
    Ok((status, json))
}

async fn create_profile(app: &Router, name: &str) -> anyhow::Result<i64> {
    let (status, body) = send(app, "POST", "/api/service-profiles", Some(json!({"name": name}))).await?;
    assert_eq!(status, StatusCode::CREATED);
    Ok(body["id"].as_i64().unwrap_or_default())
}

async fn create_manager(app: &Router, name: &str, profile: i64) -> anyhow::Result<i64> {
    let (status, body) = send(app, "POST", "/api/managers", Some(json!({"fullName": name, "serviceProfileId": profile}))).await?;
    assert_eq!(status, StatusCode::CREATED);
    Ok(body["id"].as_i64().unwrap_or_default())
}

async fn create_client(app: &Router, name: &str, profile: i64, manager: Option<i64>) -> anyhow::Result<(StatusCode, Value)> {
    send(
        app,
        "POST",
        "/api/clients",
        Some(json!({"companyName": name, "legalForm": "LLC", "serviceProfileId": profile, "assignedManagerId": manager})),
    )
    .await
}

#[tokio::test]
async fn health_is_ok() -> anyhow::Result<()> {
    let app = build_app();
    let (status, body) = send(&app, "GET", "/health", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn manager_create_returns_profile_name() -> anyhow::Result<()> {
    let app = build_app();
    let p = create_profile(&app, "Premium").await?;
    let (status, body) = send(&app, "POST", "/api/managers", Some(json!({"fullName": "Anna", "serviceProfileId": p}))).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["full_name"], "Anna");
    assert_eq!(body["service_profile_id"], p);
    assert_eq!(body["profile_name"], "Premium");
    Ok(())
}

#[tokio::test]
async fn sixth_client_returns_400() -> anyhow::Result<()> {
    let app = build_app();
    let p = create_profile(&app, "Standard").await?;
    let m = create_manager(&app, "Anna", p).await?;
    for i in 0..5 {
        let (status, body) = create_client(&app, &format!("Client {i}"), p, Some(m)).await?;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["assigned_manager_id"], m);
    }
    let (status, body) = create_client(&app, "Sixth", p, Some(m)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap_or_default().contains("maximum"));

    let (_, list) = send(&app, "GET", &format!("/api/managers/{m}/clients"), None).await?;
    assert_eq!(list.as_array().map(Vec::len), Some(5));
    Ok(())
}

#[tokio::test]
async fn transfer_between_profiles_returns_400() -> anyhow::Result<()> {
    let app = build_app();
    let gold = create_profile(&app, "Gold").await?;
    let silver = create_profile(&app, "Silver").await?;
    let a = create_manager(&app, "Anna", gold).await?;
    let b = create_manager(&app, "Boris", silver).await?;
    let (_, c) = create_client(&app, "Acme", gold, Some(a)).await?;
    let id = c["id"].as_i64().unwrap_or_default();

    let (status, body) = send(&app, "PUT", &format!("/api/clients/{id}/transfer"), Some(json!({"newManagerId": b}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap_or_default().contains("does not match"));

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/clients/{id}/change-profile-and-transfer"),
        Some(json!({"newProfileId": silver, "newManagerId": b})),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["service_profile_id"], silver);
    assert_eq!(body["assigned_manager_id"], b);
    Ok(())
}

#[tokio::test]
async fn moves_into_full_manager_return_400() -> anyhow::Result<()> {
    let app = build_app();
    let gold = create_profile(&app, "Gold").await?;
    let silver = create_profile(&app, "Silver").await?;
    let a = create_manager(&app, "Anna", gold).await?;
    let full_gold = create_manager(&app, "Boris", gold).await?;
    let full_silver = create_manager(&app, "Vera", silver).await?;
    for i in 0..5 {
        create_client(&app, &format!("Gold {i}"), gold, Some(full_gold)).await?;
        create_client(&app, &format!("Silver {i}"), silver, Some(full_silver)).await?;
    }
    let (_, c) = create_client(&app, "Acme", gold, Some(a)).await?;
    let id = c["id"].as_i64().unwrap_or_default();

    let update = json!({"companyName": "Acme", "legalForm": "LLC", "serviceProfileId": gold, "assignedManagerId": full_gold});
    let (status, body) = send(&app, "PUT", &format!("/api/clients/{id}"), Some(update)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap_or_default().contains("maximum"));

    let change = json!({"newProfileId": silver, "newManagerId": full_silver});
    let (status, body) = send(&app, "PUT", &format!("/api/clients/{id}/change-profile-and-transfer"), Some(change)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap_or_default().contains("maximum"));

    let (_, client) = send(&app, "GET", &format!("/api/clients/{id}"), None).await?;
    assert_eq!(client["assigned_manager_id"], a);
    assert_eq!(client["service_profile_id"], gold);
    Ok(())
}

#[tokio::test]
async fn self_transfer_at_capacity_succeeds() -> anyhow::Result<()> {
    let app = build_app();
    let p = create_profile(&app, "Gold").await?;
    let m = create_manager(&app, "Anna", p).await?;
    let mut ids = Vec::new();
    for i in 0..5 {
        let (_, c) = create_client(&app, &format!("Client {i}"), p, Some(m)).await?;
        ids.push(c["id"].as_i64().unwrap_or_default());
    }
    let first = ids[0];
    let (status, body) = send(&app, "PUT", &format!("/api/clients/{first}/transfer"), Some(json!({"newManagerId": m}))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["assigned_manager_id"], m);
    Ok(())
}

#[tokio::test]
async fn manager_profile_change_with_clients_returns_400() -> anyhow::Result<()> {
    let app = build_app();
    let gold = create_profile(&app, "Gold").await?;
    let silver = create_profile(&app, "Silver").await?;
    let m = create_manager(&app, "Anna", gold).await?;
    create_client(&app, "Acme", gold, Some(m)).await?;

    let (status, _) = send(&app, "PUT", &format!("/api/managers/{m}"), Some(json!({"fullName": "Anna", "serviceProfileId": silver}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, "PUT", &format!("/api/managers/{m}"), Some(json!({"fullName": "Anna K.", "serviceProfileId": gold}))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["full_name"], "Anna K.");
    assert_eq!(body["profile_name"], "Gold");
    Ok(())
}

#[tokio::test]
async fn deleting_manager_unassigns_clients() -> anyhow::Result<()> {
    let app = build_app();
    let p = create_profile(&app, "Gold").await?;
    let m = create_manager(&app, "Anna", p).await?;
    let (_, c) = create_client(&app, "Acme", p, Some(m)).await?;
    let id = c["id"].as_i64().unwrap_or_default();

    let (status, body) = send(&app, "DELETE", &format!("/api/managers/{m}"), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].is_string());

    let (status, body) = send(&app, "GET", &format!("/api/clients/{id}"), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body["assigned_manager_id"].is_null());

    let (status, body) = send(&app, "GET", &format!("/api/managers/{m}"), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "manager not found");
    Ok(())
}

#[tokio::test]
async fn manager_overview_embeds_clients() -> anyhow::Result<()> {
    let app = build_app();
    let p = create_profile(&app, "Gold").await?;
    let m = create_manager(&app, "Anna", p).await?;
    create_client(&app, "Acme", p, Some(m)).await?;
    create_client(&app, "Loose", p, None).await?;

    let (status, body) = send(&app, "GET", "/api/managers", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["profile_name"], "Gold");
    assert_eq!(body[0]["clients"][0]["company_name"], "Acme");
    assert_eq!(body[0]["clients"].as_array().map(Vec::len), Some(1));

    let (_, all) = send(&app, "GET", "/api/clients", None).await?;
    assert_eq!(all.as_array().map(Vec::len), Some(2));
    Ok(())
}

#[tokio::test]
async fn missing_rows_return_404() -> anyhow::Result<()> {
    let app = build_app();
    let p = create_profile(&app, "Gold").await?;
    let (status, body) = create_client(&app, "Acme", p, Some(42)).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "manager not found");

    let (status, body) = send(&app, "POST", "/api/managers", Some(json!({"fullName": "Anna", "serviceProfileId": 99}))).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "service profile not found");

    let (status, _) = send(&app, "DELETE", "/api/clients/7", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, "GET", "/api/managers/7/clients", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn invalid_input_returns_field_errors() -> anyhow::Result<()> {
    let app = build_app();

    let (status, body) = send(&app, "GET", "/api/clients/abc", None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation Error");
    assert_eq!(body["errors"][0]["field"], "id");

    let (status, body) = send(&app, "POST", "/api/managers", Some(json!({"fullName": "  "}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .map(|a| a.iter().filter_map(|e| e["field"].as_str()).collect())
        .unwrap_or_default();
    assert_eq!(fields, vec!["fullName", "serviceProfileId"]);

    // non-integer ids inside the body are reported under their own field
    let (status, body) = send(
        &app,
        "POST",
        "/api/clients",
        Some(json!({"companyName": "Acme", "legalForm": "LLC", "serviceProfileId": "abc"})),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation Error");
    assert_eq!(body["errors"][0]["field"], "serviceProfileId");
    assert_eq!(body["errors"][0]["message"], "must be an integer");

    let (status, body) = send(&app, "PUT", "/api/clients/1/transfer", Some(json!({"newManagerId": 2.5}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "newManagerId");

    // every bad field is listed, not only the first
    let (status, body) = send(&app, "POST", "/api/managers", Some(json!({"fullName": "", "serviceProfileId": "x"}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .map(|a| a.iter().filter_map(|e| e["field"].as_str()).collect())
        .unwrap_or_default();
    assert_eq!(fields, vec!["fullName", "serviceProfileId"]);
    Ok(())
}

#[tokio::test]
async fn openapi_document_is_served() -> anyhow::Result<()> {
    let app = build_app();
    let (status, body) = send(&app, "GET", "/api-docs/openapi.json", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/clients/{id}/transfer"].is_object());
    Ok(())
}
