use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use gc_server::{Server, router};
use serde_json::{Value, json};
use tower::ServiceExt;

async fn app() -> Router {
    let server = Server::builder().build().await.expect("server over mem://");
    router::init(server.state().clone())
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_and_docs_are_served() {
    let app = app().await;

    let health =
        app.clone().oneshot(Request::get("/health").body(Body::empty()).unwrap()).await.unwrap();
    assert_eq!(health.status(), StatusCode::OK);
    assert_eq!(json_body(health).await["status"], "up");

    let docs = app.oneshot(Request::get("/api-docs").body(Body::empty()).unwrap()).await.unwrap();
    assert_eq!(docs.status(), StatusCode::OK);
}

#[tokio::test]
async fn preflight_is_answered_for_any_origin() {
    let app = app().await;
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/payments/initiate")
        .header(header::ORIGIN, "https://tickets.example.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}

#[tokio::test]
async fn checkout_flow_end_to_end() {
    let app = app().await;

    let create = Request::post("/api/registrations")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({
                "eventId": "evt-1",
                "fullName": "Ama Mensah",
                "email": "ama@example.com",
                "phone": "0241234567"
            })
            .to_string(),
        ))
        .unwrap();
    let response = app.clone().oneshot(create).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = json_body(response).await["id"].as_str().unwrap().to_owned();

    let callback = Request::post("/api/payments/webhook")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"transaction_status":"approved","msisdn":"233241234567"}"#))
        .unwrap();
    let response = app.clone().oneshot(callback).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let ack = json_body(response).await;
    assert_eq!(ack["registrationId"], id.as_str());
    assert_eq!(ack["strategy"], "phone");

    let poll = Request::get(format!("/api/registrations/{id}/payment-status?waitSecs=5"))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(poll).await.unwrap();
    assert_eq!(json_body(response).await["paymentStatus"], "completed");
}
