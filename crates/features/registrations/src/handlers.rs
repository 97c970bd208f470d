use crate::Registrations;
use crate::error::{ErrorResponse, RegistrationError};
use crate::models::{
    CreateRegistrationRequest, PaymentStatusResponse, RecordReferenceRequest,
    RegistrationResponse, StatusQuery,
};
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use gc_derive::api_handler;
use gc_domain::constants::{REGISTRATION_TABLE, REGISTRATIONS_TAG};
use gc_kernel::security::resource::ResourceGuard;
use gc_kernel::server::state::ApiState;
use std::time::Duration;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Registration routes, relative to the API root.
pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(create_registration))
        .routes(routes!(get_registration))
        .routes(routes!(record_payment_reference))
        .routes(routes!(payment_status))
}

fn slice(state: &ApiState) -> Result<&Registrations, RegistrationError> {
    state.try_get_slice::<Registrations>().map_err(|e| RegistrationError::Internal {
        message: e.to_string().into(),
        context: None,
    })
}

#[api_handler(
    post,
    path = "/registrations",
    request_body = CreateRegistrationRequest,
    responses(
        (status = CREATED, description = "Registration created", body = RegistrationResponse),
        (status = BAD_REQUEST, description = "Missing or invalid fields", body = ErrorResponse),
    ),
    tag = REGISTRATIONS_TAG,
)]
pub(crate) async fn create_registration(
    State(state): State<ApiState>,
    Json(req): Json<CreateRegistrationRequest>,
) -> Result<(StatusCode, Json<RegistrationResponse>), RegistrationError> {
    let registration = slice(&state)?.create(req.into()).await?;
    Ok((StatusCode::CREATED, Json(registration.into())))
}

#[api_handler(
    get,
    path = "/registrations/{id}",
    params(("id" = String, Path, description = "Registration key or `registration:<key>`")),
    responses(
        (status = OK, description = "Registration", body = RegistrationResponse),
        (status = NOT_FOUND, description = "Unknown registration", body = ErrorResponse),
    ),
    tag = REGISTRATIONS_TAG,
)]
pub(crate) async fn get_registration(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<RegistrationResponse>, RegistrationError> {
    let key = ResourceGuard::key(&id, REGISTRATION_TABLE)?;
    let registration = slice(&state)?.get(&key).await?;
    Ok(Json(registration.into()))
}

#[api_handler(
    put,
    path = "/registrations/{id}/payment-reference",
    params(("id" = String, Path, description = "Registration key or `registration:<key>`")),
    request_body = RecordReferenceRequest,
    responses(
        (status = OK, description = "Reference recorded", body = RegistrationResponse),
        (status = NOT_FOUND, description = "Unknown registration", body = ErrorResponse),
        (status = CONFLICT, description = "Registration is not pending", body = ErrorResponse),
    ),
    tag = REGISTRATIONS_TAG,
)]
pub(crate) async fn record_payment_reference(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Json(req): Json<RecordReferenceRequest>,
) -> Result<Json<RegistrationResponse>, RegistrationError> {
    let key = ResourceGuard::key(&id, REGISTRATION_TABLE)?;
    let reference = req.reference.trim();
    if reference.is_empty() {
        return Err(RegistrationError::Validation {
            message: "reference is required".into(),
            context: None,
        });
    }

    let registration = slice(&state)?.record_reference(&key, reference).await?;
    Ok(Json(registration.into()))
}

#[api_handler(
    get,
    path = "/registrations/{id}/payment-status",
    params(
        ("id" = String, Path, description = "Registration key or `registration:<key>`"),
        StatusQuery,
    ),
    responses(
        (status = OK, description = "Current or settled payment status", body = PaymentStatusResponse),
        (status = NOT_FOUND, description = "Unknown registration", body = ErrorResponse),
    ),
    tag = REGISTRATIONS_TAG,
)]
pub(crate) async fn payment_status(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Query(query): Query<StatusQuery>,
) -> Result<Json<PaymentStatusResponse>, RegistrationError> {
    let key = ResourceGuard::key(&id, REGISTRATION_TABLE)?;
    let registration =
        slice(&state)?.wait_for_settlement(&key, Duration::from_secs(query.wait_secs)).await?;
    Ok(Json(registration.into()))
}
