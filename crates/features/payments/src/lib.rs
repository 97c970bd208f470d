//! Payments feature slice.
//!
//! Two flows share this slice. Initiation relays a checkout request to the mobile-money
//! gateway, which prompts the payer's phone. Reconciliation accepts the gateway's
//! asynchronous callback and settles the matching registration through a
//! reference → phone → latest-pending cascade.

mod error;
pub mod gateway;
#[cfg(feature = "server")]
mod handlers;
mod initiate;
pub mod models;
pub mod normalize;
mod reconcile;

pub use crate::error::{PaymentError, PaymentErrorExt};
pub use crate::reconcile::MAX_ATTEMPTS;
#[cfg(feature = "server")]
pub use crate::handlers::{WEBHOOK_SECRET_HEADER, router};

use crate::gateway::GatewayClient;
use gc_domain::config::{PaymentsConfig, WebhookConfig};
use gc_kernel::domain::registry::InitializedSlice;
use gc_registrations::Registrations;

/// Payments feature state.
#[gc_derive::gc_slice]
pub struct Payments {
    registrations: Registrations,
    gateway: GatewayClient,
    webhook: WebhookConfig,
}

impl Payments {
    pub fn from_config(
        config: &PaymentsConfig,
        registrations: Registrations,
    ) -> Result<Self, PaymentError> {
        Ok(Self::new(PaymentsInner {
            registrations,
            gateway: GatewayClient::new(&config.gateway)?,
            webhook: config.webhook.clone(),
        }))
    }

    #[must_use]
    pub fn webhook(&self) -> &WebhookConfig {
        &self.webhook
    }
}

/// Initialize the payments slice on top of the registrations slice.
pub fn init(
    config: &PaymentsConfig,
    registrations: Registrations,
) -> Result<InitializedSlice, PaymentError> {
    let payments = Payments::from_config(config, registrations)?;
    tracing::info!(
        gateway = %config.gateway.url,
        secret = config.webhook.secret.is_some(),
        protect_terminal_status = config.webhook.protect_terminal_status,
        "Payments slice initialized"
    );
    Ok(InitializedSlice::new(payments))
}
