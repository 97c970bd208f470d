#![cfg(feature = "server")]

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use gc_database::Database;
use gc_domain::config::ApiConfig;
use gc_event_bus::EventBus;
use gc_kernel::server::state::ApiState;
use gc_registrations::MIGRATIONS;
use gc_registrations::store::SurrealRegistrationStore;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

async fn app(database: &str) -> Router {
    let db = Database::builder()
        .url("mem://")
        .session("gc_api", database)
        .migrations(MIGRATIONS)
        .init()
        .await
        .unwrap();
    let events = EventBus::new();
    let store = Arc::new(SurrealRegistrationStore::new(db.clone()));
    let state = ApiState::builder()
        .config(ApiConfig::default())
        .db(db)
        .events(events.clone())
        .register_slice(gc_registrations::init(store, events))
        .build()
        .unwrap();

    let (router, _) = gc_registrations::router().split_for_parts();
    router.with_state(state)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, json)
}

#[tokio::test]
async fn registration_lifecycle_over_http() {
    let app = app("lifecycle").await;

    let (status, created) = send(
        &app,
        "POST",
        "/registrations",
        Some(json!({
            "eventId": "evt-42",
            "fullName": "Ama Mensah",
            "email": "ama@example.com",
            "phone": "0241234567",
            "team": "red",
            "price": "50.00"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["paymentStatus"], "pending");
    let id = created["id"].as_str().unwrap().to_owned();

    let (status, fetched) = send(&app, "GET", &format!("/registrations/registration:{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["team"], "red");

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/registrations/{id}/payment-reference"),
        Some(json!({ "reference": "GC-1700000000000-ABC123" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["paymentReference"], "GC-1700000000000-ABC123");

    let (status, polled) =
        send(&app, "GET", &format!("/registrations/{id}/payment-status?waitSecs=0"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(polled["paymentStatus"], "pending");
}

#[tokio::test]
async fn free_events_skip_payment() {
    let app = app("free").await;
    let (status, created) = send(
        &app,
        "POST",
        "/registrations",
        Some(json!({
            "eventId": "evt-free",
            "fullName": "Kofi Boateng",
            "email": "kofi@example.com",
            "price": "20",
            "earlyBirdPrice": "0"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["paymentStatus"], "free");
}

#[tokio::test]
async fn errors_map_to_status_codes() {
    let app = app("errors").await;

    let (status, body) = send(
        &app,
        "POST",
        "/registrations",
        Some(json!({ "eventId": "evt", "fullName": "", "email": "x@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("fullName"));

    let (status, _) = send(&app, "GET", "/registrations/unknown", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "GET", "/registrations/event:abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
