use gc_derive::api_model;
use gc_domain::pricing::EventPricing;
use gc_domain::registration::{NewRegistration, PaymentStatus, Registration, Team};
use rust_decimal::Decimal;
use serde::Deserialize;

#[api_model]
/// Registration submitted by the checkout page.
pub struct CreateRegistrationRequest {
    pub event_id: String,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    #[cfg_attr(feature = "server", schema(value_type = Option<String>, example = "blue"))]
    pub team: Option<Team>,
    /// `pending` (default) or `free`. Ignored when pricing is supplied.
    #[serde(default)]
    #[cfg_attr(feature = "server", schema(value_type = Option<String>, example = "pending"))]
    pub payment_status: Option<PaymentStatus>,
    /// Regular ticket price of the event.
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub early_bird_price: Option<Decimal>,
}

impl From<CreateRegistrationRequest> for NewRegistration {
    fn from(req: CreateRegistrationRequest) -> Self {
        let pricing = (req.price.is_some() || req.early_bird_price.is_some())
            .then(|| EventPricing::new(req.price, req.early_bird_price));
        Self {
            event_id: req.event_id,
            full_name: req.full_name,
            email: req.email,
            phone: req.phone,
            team: req.team,
            payment_status: req.payment_status,
            pricing,
        }
    }
}

#[api_model]
/// A stored registration.
pub struct RegistrationResponse {
    pub id: String,
    pub event_id: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    #[cfg_attr(feature = "server", schema(value_type = Option<String>))]
    pub team: Option<Team>,
    #[cfg_attr(feature = "server", schema(value_type = String, example = "pending"))]
    pub payment_status: PaymentStatus,
    pub payment_reference: Option<String>,
    pub created_at: String,
}

impl From<Registration> for RegistrationResponse {
    fn from(r: Registration) -> Self {
        Self {
            id: r.id,
            event_id: r.event_id,
            full_name: r.full_name,
            email: r.email,
            phone: r.phone,
            team: r.team,
            payment_status: r.payment_status,
            payment_reference: r.payment_reference,
            created_at: r.created_at,
        }
    }
}

#[api_model]
/// Reference minted for a payment attempt.
pub struct RecordReferenceRequest {
    #[cfg_attr(feature = "server", schema(example = "GC-1700000000000-AB12CD"))]
    pub reference: String,
}

#[api_model]
/// Payment state of one registration.
pub struct PaymentStatusResponse {
    pub id: String,
    #[cfg_attr(feature = "server", schema(value_type = String, example = "completed"))]
    pub payment_status: PaymentStatus,
    pub payment_reference: Option<String>,
}

impl From<Registration> for PaymentStatusResponse {
    fn from(r: Registration) -> Self {
        Self { id: r.id, payment_status: r.payment_status, payment_reference: r.payment_reference }
    }
}

#[derive(Debug, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "server", into_params(parameter_in = Query))]
#[serde(rename_all = "camelCase")]
pub struct StatusQuery {
    /// Seconds to wait for a pending payment to settle (0-60).
    #[serde(default)]
    pub wait_secs: u64,
}
