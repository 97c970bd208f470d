use crate::Payments;
use crate::error::PaymentError;
use crate::models::{InitiatePaymentRequest, InitiatePaymentResponse, NetworkResponse, WebhookAck};
use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use gc_derive::api_handler;
use gc_domain::constants::PAYMENTS_TAG;
use gc_domain::network::MobileNetwork;
use gc_kernel::server::state::ApiState;
use serde_json::Value;
use tracing::{error, info, warn};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Shared secret header checked on gateway callbacks when a secret is configured.
pub const WEBHOOK_SECRET_HEADER: &str = "x-webhook-secret";

/// Payment routes, relative to the API root.
pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(initiate_payment))
        .routes(routes!(payment_webhook))
        .routes(routes!(list_networks))
}

fn slice(state: &ApiState) -> Result<&Payments, PaymentError> {
    state.try_get_slice::<Payments>().map_err(|e| PaymentError::Internal {
        message: e.to_string().into(),
        context: None,
    })
}

#[api_handler(
    post,
    path = "/payments/initiate",
    request_body = InitiatePaymentRequest,
    responses(
        (status = OK, description = "Gateway accepted the prompt", body = InitiatePaymentResponse),
        (status = BAD_REQUEST, description = "Missing or invalid fields", body = InitiatePaymentResponse),
        (status = NOT_FOUND, description = "Unknown registration", body = InitiatePaymentResponse),
        (status = CONFLICT, description = "Registration is not pending", body = InitiatePaymentResponse),
        (status = BAD_GATEWAY, description = "Gateway rejected the prompt", body = InitiatePaymentResponse),
    ),
    tag = PAYMENTS_TAG,
)]
pub(crate) async fn initiate_payment(
    State(state): State<ApiState>,
    body: Bytes,
) -> Result<(StatusCode, Json<InitiatePaymentResponse>), PaymentError> {
    let req = serde_json::from_slice::<InitiatePaymentRequest>(&body).map_err(|e| {
        PaymentError::Validation {
            message: format!("Invalid request body: {e}").into(),
            context: None,
        }
    })?;

    let response = slice(&state)?.initiate(req).await?;
    let status = if response.success { StatusCode::OK } else { StatusCode::BAD_GATEWAY };
    Ok((status, Json(response)))
}

#[api_handler(
    post,
    path = "/payments/webhook",
    request_body(content = Object, description = "Gateway-defined callback payload"),
    responses(
        (status = OK, description = "Callback acknowledged", body = WebhookAck),
        (status = UNAUTHORIZED, description = "Shared secret mismatch"),
    ),
    tag = PAYMENTS_TAG,
)]
pub(crate) async fn payment_webhook(
    State(state): State<ApiState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let payments = match slice(&state) {
        Ok(payments) => payments,
        Err(err) => {
            error!(error = %err, "Payments slice unavailable");
            return Json(WebhookAck::processing_error()).into_response();
        },
    };

    if let Some(secret) = payments.webhook().secret.as_deref() {
        let provided = headers.get(WEBHOOK_SECRET_HEADER).and_then(|v| v.to_str().ok());
        if provided != Some(secret) {
            warn!("Rejected callback with missing or wrong webhook secret");
            return StatusCode::UNAUTHORIZED.into_response();
        }
    }

    info!(payload = %String::from_utf8_lossy(&body), "Payment callback received");
    let payload = match serde_json::from_slice::<Value>(&body) {
        Ok(payload) => payload,
        Err(err) => {
            warn!(error = %err, "Malformed callback payload");
            return Json(WebhookAck::processing_error()).into_response();
        },
    };

    let ack = match payments.reconcile(&payload).await {
        Ok(reconciliation) => WebhookAck::from(reconciliation),
        Err(err) => {
            error!(error = %err, "Callback processing failed");
            WebhookAck::processing_error()
        },
    };
    Json(ack).into_response()
}

#[api_handler(
    get,
    path = "/payments/networks",
    responses((status = OK, description = "Supported mobile-money networks", body = [NetworkResponse])),
    tag = PAYMENTS_TAG,
)]
pub(crate) async fn list_networks() -> Json<Vec<NetworkResponse>> {
    Json(MobileNetwork::ALL.into_iter().map(NetworkResponse::from).collect())
}
