//! End-to-end HTTP tests for the weapon routes.
//!
//! The router is driven with `tower::ServiceExt::oneshot` against the
//! in-memory store, so no network or database is involved.

#![allow(clippy::unwrap_used, clippy::expect_used)] // Test code uses unwrap/expect for clarity

use armory_core::environment::SystemClock;
use armory_core::store::WeaponStore;
use armory_core::{WeaponRecord, WeaponService};
use armory_testing::{InMemoryWeaponStore, UnavailableWeaponStore};
use armory_web::{AppState, CORRELATION_ID_HEADER, build_router};
use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

fn app_with(store: Arc<dyn WeaponStore>) -> Router {
    build_router(AppState::new(WeaponService::new(store, Arc::new(SystemClock))))
}

fn app() -> (Router, InMemoryWeaponStore) {
    let store = InMemoryWeaponStore::new();
    (app_with(Arc::new(store.clone())), store)
}

fn json_request(method: Method, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(
            String::from_utf8_lossy(&bytes).into_owned(),
        ))
    };
    (status, body)
}

async fn create(app: &Router, name: &str, code: &str, description: &str) -> WeaponRecord {
    let (status, body) = send(
        app,
        json_request(
            Method::POST,
            "/weapons",
            &json!({ "name": name, "code": code, "description": description }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    serde_json::from_value(body).unwrap()
}

#[tokio::test]
async fn tank_lifecycle_over_http() {
    let (app, store) = app();

    let tank = create(&app, "Tank", "002", "It is very heavy").await;
    let id = tank.id.clone().expect("id assigned");
    assert!(tank.created_at.is_some());
    assert!(tank.modification_history.is_empty());

    let (status, body) = send(
        &app,
        json_request(
            Method::PUT,
            "/weapons",
            &json!({
                "id": id.as_str(),
                "name": "Heavy Tank",
                "code": "002",
                "description": "It is very, very heavy"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let updated: WeaponRecord = serde_json::from_value(body).unwrap();
    assert_eq!(updated.id, tank.id);
    assert_eq!(updated.created_at, tank.created_at);
    assert_eq!(updated.name, "Heavy Tank");
    assert_eq!(updated.description, "It is very, very heavy");
    assert_eq!(updated.modification_history.len(), 1);

    let (status, body) = send(&app, empty_request(Method::GET, &format!("/weapons/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Heavy Tank");
    assert_eq!(body["modificationHistory"].as_array().unwrap().len(), 1);

    let (status, _) = send(&app, empty_request(Method::DELETE, &format!("/weapons/{id}"))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(store.is_empty());

    let (status, body) = send(&app, empty_request(Method::GET, &format!("/weapons/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn duplicate_code_is_rejected_with_conflict() {
    let (app, store) = app();
    create(&app, "Tank", "002", "It is very heavy").await;

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/weapons",
            &json!({ "name": "Other Tank", "code": "002", "description": "" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");
    assert!(body["message"].as_str().unwrap().contains("002"));
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn update_of_unknown_id_is_not_found() {
    let (app, store) = app();

    let (status, body) = send(
        &app,
        json_request(
            Method::PUT,
            "/weapons/",
            &json!({ "id": "000000000000000000000000", "name": "Ghost", "code": "404" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
    assert_eq!(store.writes(), 0);
}

#[tokio::test]
async fn list_is_empty_array_on_fresh_store() {
    let (app, _) = app();

    let (status, body) = send(&app, empty_request(Method::GET, "/weapons")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn collection_routes_accept_trailing_slash() {
    let (app, _) = app();

    let (status, _) = send(
        &app,
        json_request(
            Method::POST,
            "/weapons/",
            &json!({ "name": "Assault Rifle", "code": "001", "description": "Infantry weapon" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    create(&app, "Tank", "002", "It is very heavy").await;

    let (status, with_slash) = send(&app, empty_request(Method::GET, "/weapons/")).await;
    assert_eq!(status, StatusCode::OK);
    let (_, without_slash) = send(&app, empty_request(Method::GET, "/weapons")).await;
    assert_eq!(with_slash, without_slash);

    let codes: Vec<_> = with_slash
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["code"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(codes, vec!["001", "002"]);
}

#[tokio::test]
async fn delete_of_unknown_id_is_no_content() {
    let (app, _) = app();

    let (status, body) = send(
        &app,
        empty_request(Method::DELETE, "/weapons/non-existent-id-verifiably-unique-98765"),
    )
    .await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn malformed_json_is_client_error() {
    let (app, store) = app();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/weapons")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert!(status.is_client_error());
    assert_eq!(body["code"], "INVALID_JSON");
    assert!(store.is_empty());
}

#[tokio::test]
async fn unavailable_store_maps_to_503() {
    let app = app_with(Arc::new(UnavailableWeaponStore));

    let (status, body) = send(&app, empty_request(Method::GET, "/weapons")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "SERVICE_UNAVAILABLE");

    let (status, _) = send(&app, empty_request(Method::GET, "/ready")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let (status, _) = send(&app, empty_request(Method::GET, "/health")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn readiness_reports_weapon_count() {
    let (app, _) = app();
    create(&app, "FPV drone", "003", "First-person-view strike drone").await;

    let (status, body) = send(&app, empty_request(Method::GET, "/ready")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
    assert_eq!(body["weapons"], 1);
}

#[tokio::test]
async fn every_response_carries_correlation_id() {
    let (app, _) = app();

    for request in [
        empty_request(Method::GET, "/health"),
        empty_request(Method::GET, "/weapons"),
        empty_request(Method::GET, "/weapons/missing"),
    ] {
        let response = app.clone().oneshot(request).await.unwrap();
        assert!(response.headers().contains_key(CORRELATION_ID_HEADER));
    }
}
