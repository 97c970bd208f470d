//! Registration persistence.
//!
//! [`RegistrationStore`] is the port used by the HTTP handlers and the payment reconciler.
//! [`SurrealRegistrationStore`] backs the server; [`InMemoryRegistrationStore`] backs tests
//! and local tooling. Both order "latest" by `created_at`.

mod memory;
mod surreal;

pub use memory::InMemoryRegistrationStore;
pub use surreal::SurrealRegistrationStore;

use crate::error::RegistrationError;
use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use gc_domain::registration::{NewRegistration, PaymentStatus, Registration};
use std::fmt::Debug;

#[async_trait]
pub trait RegistrationStore: Debug + Send + Sync {
    /// Inserts a registration in its initial state (`pending` or `free`).
    async fn create(&self, new: NewRegistration) -> Result<Registration, RegistrationError>;

    async fn get(&self, id: &str) -> Result<Option<Registration>, RegistrationError>;

    /// Every registration carrying exactly this payment reference.
    async fn find_by_reference(&self, reference: &str)
    -> Result<Vec<Registration>, RegistrationError>;

    /// Registrations for an event, newest first.
    async fn list_by_event(&self, event_id: &str) -> Result<Vec<Registration>, RegistrationError>;

    /// The `limit` newest registrations.
    async fn recent(&self, limit: usize) -> Result<Vec<Registration>, RegistrationError>;

    async fn count(&self) -> Result<u64, RegistrationError>;

    /// Returns `false` when nothing was deleted.
    async fn delete(&self, id: &str) -> Result<bool, RegistrationError>;

    /// Newest `pending` registration whose phone equals one of `variants`.
    async fn latest_pending_by_phone(
        &self,
        variants: &[String],
    ) -> Result<Option<Registration>, RegistrationError>;

    /// Newest `pending` registration in the table.
    async fn latest_pending(&self) -> Result<Option<Registration>, RegistrationError>;

    /// Compare-and-set on `payment_status`.
    ///
    /// Returns the updated row, or `None` when the row is missing or no longer in `from`.
    async fn transition(
        &self,
        id: &str,
        from: PaymentStatus,
        to: PaymentStatus,
    ) -> Result<Option<Registration>, RegistrationError>;

    /// Stores `reference` on a `pending` registration.
    ///
    /// Returns `None` when the row is missing or not `pending`.
    async fn record_reference(
        &self,
        id: &str,
        reference: &str,
    ) -> Result<Option<Registration>, RegistrationError>;
}

/// Validates a creation request and resolves its initial payment status.
///
/// Event pricing, when present, decides between `free` and `pending`. Otherwise the
/// requested status is used, defaulting to `pending`.
pub fn initial_status(new: &NewRegistration) -> Result<PaymentStatus, RegistrationError> {
    for (field, value) in
        [("eventId", &new.event_id), ("fullName", &new.full_name), ("email", &new.email)]
    {
        if value.trim().is_empty() {
            return Err(RegistrationError::Validation {
                message: format!("{field} is required").into(),
                context: None,
            });
        }
    }

    let status = match (&new.pricing, new.payment_status) {
        (Some(pricing), _) if pricing.is_free() => PaymentStatus::Free,
        (Some(_), _) => PaymentStatus::Pending,
        (None, requested) => requested.unwrap_or(PaymentStatus::Pending),
    };

    if !status.is_initial() {
        return Err(RegistrationError::Validation {
            message: format!("registrations cannot be created as '{status}'").into(),
            context: None,
        });
    }
    Ok(status)
}

/// Fixed-width RFC 3339 UTC timestamp with microseconds.
pub(crate) fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Random record key.
pub(crate) fn new_key() -> String {
    nanoid::nanoid!(20, &KEY_ALPHABET)
}

const KEY_ALPHABET: [char; 36] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i',
    'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

/// Drops empty optional strings so they are stored as absent.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
}
