use gc_derive::api_model;
use gc_domain::network::MobileNetwork;
use gc_domain::registration::{PaymentStatus, Registration};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[api_model(deny_unknown_fields = false)]
/// Mobile-money prompt requested by the checkout page.
pub struct InitiatePaymentRequest {
    /// Payer phone number, local or international format.
    #[serde(default)]
    #[cfg_attr(feature = "server", schema(example = "0241234567"))]
    pub account_number: Option<String>,
    #[serde(default)]
    #[cfg_attr(feature = "server", schema(value_type = Option<String>, example = "50.00"))]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub narration: Option<String>,
    /// `mtn`, `airteltigo` or `telecel`.
    #[serde(default)]
    #[cfg_attr(feature = "server", schema(example = "mtn"))]
    pub network: Option<String>,
    /// Registration to attach the minted reference to.
    #[serde(default)]
    pub registration_id: Option<String>,
}

#[api_model]
/// Result of an initiation attempt.
#[derive(Clone, PartialEq, Eq)]
pub struct InitiatePaymentResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Reference minted for this attempt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl InitiatePaymentResponse {
    #[must_use]
    pub fn accepted(message: String, transaction_id: Option<String>, reference: String) -> Self {
        Self {
            success: true,
            message: Some(message),
            transaction_id,
            error: None,
            reference: Some(reference),
        }
    }

    #[must_use]
    pub fn failure(error: impl Into<String>, reference: Option<String>) -> Self {
        Self {
            success: false,
            message: None,
            transaction_id: None,
            error: Some(error.into()),
            reference,
        }
    }
}

/// Cascade step that identified the registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub enum MatchStrategy {
    Reference,
    Phone,
    LatestPending,
}

impl MatchStrategy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reference => "reference",
            Self::Phone => "phone",
            Self::LatestPending => "latestPending",
        }
    }
}

#[api_model]
/// Acknowledgement returned to the gateway. Always sent with HTTP 200.
#[derive(Clone, PartialEq, Eq)]
pub struct WebhookAck {
    pub received: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "server", schema(value_type = Option<String>, example = "completed"))]
    pub status: Option<PaymentStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_id: Option<String>,
    pub matched: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<MatchStrategy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl WebhookAck {
    /// Acknowledgement for a payload that could not be processed.
    #[must_use]
    pub fn processing_error() -> Self {
        Self {
            received: true,
            reference: None,
            status: None,
            registration_id: None,
            matched: false,
            strategy: None,
            error: Some("Processing error".to_owned()),
        }
    }
}

/// Outcome of reconciling one callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    pub reference: Option<String>,
    pub status: PaymentStatus,
    /// Updated registration and the strategy that found it.
    pub matched: Option<(Registration, MatchStrategy)>,
}

impl From<Reconciliation> for WebhookAck {
    fn from(r: Reconciliation) -> Self {
        let (registration_id, strategy) = match r.matched {
            Some((registration, strategy)) => (Some(registration.id), Some(strategy)),
            None => (None, None),
        };
        Self {
            received: true,
            reference: r.reference,
            status: Some(r.status),
            matched: registration_id.is_some(),
            registration_id,
            strategy,
            error: None,
        }
    }
}

#[api_model]
/// Supported mobile-money network.
pub struct NetworkResponse {
    pub key: String,
    pub code: String,
    pub name: String,
    pub short_name: String,
}

impl From<MobileNetwork> for NetworkResponse {
    fn from(n: MobileNetwork) -> Self {
        Self {
            key: n.key().to_owned(),
            code: n.code().to_owned(),
            name: n.name().to_owned(),
            short_name: n.short_name().to_owned(),
        }
    }
}
