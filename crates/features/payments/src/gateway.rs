//! Outbound client for the mobile-money gateway.

use crate::error::PaymentError;
use crate::normalize::first_non_empty;
use gc_domain::config::GatewayConfig;
use gc_domain::network::MobileNetwork;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

pub const PARTNER_CODE_HEADER: &str = "X-Partner-Code";

const DEFAULT_MESSAGE: &str = "Payment initiated successfully";
const DEFAULT_FAILURE: &str = "Payment failed";
const UNAVAILABLE: &str = "Unable to process payment. Please try again.";

/// Body posted to the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayRequest {
    pub account_number: String,
    /// Decimal string, e.g. `"50.00"`.
    pub amount: String,
    pub narration: String,
    pub network: String,
}

/// The gateway's synchronous answer, already folded into accept/reject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayOutcome {
    Accepted { message: String, transaction_id: Option<String> },
    Rejected { error: String },
}

#[derive(Debug, Clone)]
pub struct GatewayClient {
    http: reqwest::Client,
    url: String,
    partner_code: String,
    default_narration: String,
}

impl GatewayClient {
    pub fn new(config: &GatewayConfig) -> Result<Self, PaymentError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            url: config.url.clone(),
            partner_code: config.partner_code.clone(),
            default_narration: config.default_narration.clone(),
        })
    }

    /// Builds the gateway body, substituting the default narration when none is given.
    #[must_use]
    pub fn request(
        &self,
        account_number: String,
        amount: Decimal,
        narration: Option<&str>,
        network: MobileNetwork,
    ) -> GatewayRequest {
        let narration = narration
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(self.default_narration.as_str())
            .to_owned();

        GatewayRequest {
            account_number,
            amount: amount.to_string(),
            narration,
            network: network.key().to_owned(),
        }
    }

    /// Sends one request. Never retried; every failure folds into [`GatewayOutcome::Rejected`].
    pub async fn initiate(&self, request: &GatewayRequest) -> GatewayOutcome {
        let response = match self
            .http
            .post(&self.url)
            .header(PARTNER_CODE_HEADER, &self.partner_code)
            .json(request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                warn!(error = %err, "Payment gateway unreachable");
                return GatewayOutcome::Rejected { error: UNAVAILABLE.to_owned() };
            },
        };

        let status = response.status();
        let body = match response.bytes().await {
            Ok(bytes) => serde_json::from_slice::<Value>(&bytes),
            Err(err) => {
                warn!(%status, error = %err, "Failed to read payment gateway response");
                return GatewayOutcome::Rejected { error: UNAVAILABLE.to_owned() };
            },
        };
        let body = match body {
            Ok(body) => body,
            Err(err) => {
                warn!(%status, error = %err, "Malformed payment gateway response");
                return GatewayOutcome::Rejected { error: UNAVAILABLE.to_owned() };
            },
        };

        debug!(%status, "Payment gateway responded");
        fold_response(status.is_success(), &body)
    }
}

/// Folds a parsed gateway answer into an outcome.
///
/// A 2xx answer is accepted unless its body says `success: false`.
#[must_use]
pub fn fold_response(http_ok: bool, body: &Value) -> GatewayOutcome {
    let declined = body.get("success").and_then(Value::as_bool) == Some(false);
    if http_ok && !declined {
        GatewayOutcome::Accepted {
            message: first_non_empty(body, &["message"]).unwrap_or_else(|| DEFAULT_MESSAGE.into()),
            transaction_id: first_non_empty(body, &["transactionId", "reference"]),
        }
    } else {
        GatewayOutcome::Rejected {
            error: first_non_empty(body, &["message", "error"])
                .unwrap_or_else(|| DEFAULT_FAILURE.into()),
        }
    }
}
