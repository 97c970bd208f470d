#![allow(dead_code)]

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use gc_domain::config::PaymentsConfig;
use gc_domain::registration::{PaymentStatus, Registration};
use gc_event_bus::EventBus;
use gc_payments::Payments;
use gc_registrations::Registrations;
use gc_registrations::store::InMemoryRegistrationStore;
use serde_json::Value;
use std::sync::{Arc, Mutex};

pub struct Fixture {
    pub store: InMemoryRegistrationStore,
    pub registrations: Registrations,
    pub payments: Payments,
}

pub fn fixture(config: &PaymentsConfig) -> Fixture {
    let store = InMemoryRegistrationStore::new();
    let registrations = Registrations::with_store(Arc::new(store.clone()), EventBus::new());
    let payments = Payments::from_config(config, registrations.clone()).unwrap();
    Fixture { store, registrations, payments }
}

/// Seeds a row whose `created_at` is `minute` minutes past a fixed hour.
pub fn seed(
    store: &InMemoryRegistrationStore,
    id: &str,
    minute: u32,
    phone: Option<&str>,
    status: PaymentStatus,
    reference: Option<&str>,
) -> Registration {
    let registration = Registration {
        id: id.to_owned(),
        event_id: "evt-1".to_owned(),
        full_name: format!("Attendee {id}"),
        email: format!("{id}@example.com"),
        phone: phone.map(str::to_owned),
        team: None,
        payment_status: status,
        payment_reference: reference.map(str::to_owned),
        created_at: format!("2024-05-01T10:{minute:02}:00.000000Z"),
    };
    store.insert(registration.clone());
    registration
}

/// What the fake gateway saw.
#[derive(Debug, Clone)]
pub struct Captured {
    pub partner_code: Option<String>,
    pub body: Value,
}

/// A gateway answering every `POST /pay` with a fixed status and body.
pub struct FakeGateway {
    pub url: String,
    pub requests: Arc<Mutex<Vec<Captured>>>,
}

impl FakeGateway {
    pub async fn start(status: StatusCode, body: &'static str) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let app = Router::new()
            .route("/pay", post(pay))
            .with_state((requests.clone(), status, body));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { url: format!("http://{addr}/pay"), requests }
    }

    pub fn captured(&self) -> Vec<Captured> {
        self.requests.lock().unwrap().clone()
    }
}

type GatewayState = (Arc<Mutex<Vec<Captured>>>, StatusCode, &'static str);

async fn pay(
    State((requests, status, body)): State<GatewayState>,
    headers: HeaderMap,
    Json(payload): Json<Value>,
) -> (StatusCode, [(&'static str, &'static str); 1], &'static str) {
    requests.lock().unwrap().push(Captured {
        partner_code: headers
            .get("x-partner-code")
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned),
        body: payload,
    });
    (status, [("content-type", "application/json")], body)
}

pub fn gateway_config(url: &str) -> PaymentsConfig {
    let mut config = PaymentsConfig::default();
    config.gateway.url = url.to_owned();
    config.gateway.partner_code = "TEST".to_owned();
    config.gateway.timeout_secs = 5;
    config
}
