use axum::http::{HeaderName, Method};
use tower_http::cors::{Any, CorsLayer};

/// Request headers browsers may send to the checkout endpoints.
pub const ALLOWED_HEADERS: [&str; 5] =
    ["authorization", "x-client-info", "apikey", "content-type", "x-webhook-secret"];

/// Permissive CORS for the checkout page and gateway callbacks: any origin, no credentials.
#[must_use]
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::GET, Method::PUT, Method::OPTIONS])
        .allow_headers(ALLOWED_HEADERS.map(HeaderName::from_static))
}
