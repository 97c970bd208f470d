//! Registrations feature slice.
//!
//! Owns the `registration` table: creation, lookups, payment status transitions and the
//! status long-poll used by the checkout page while the attendee approves the payment.

mod error;
mod events;
#[cfg(feature = "server")]
mod handlers;
#[cfg(feature = "server")]
mod models;
mod service;
pub mod store;

pub use crate::error::{RegistrationError, RegistrationErrorExt};
pub use crate::events::RegistrationChanged;
pub use crate::service::MAX_WAIT;
#[cfg(feature = "server")]
pub use crate::handlers::router;

use crate::store::RegistrationStore;
use gc_database::Migration;
use gc_event_bus::EventBus;
use gc_kernel::domain::registry::InitializedSlice;
use std::sync::Arc;

/// Schema owned by this slice.
pub const MIGRATIONS: [Migration; 1] = [Migration::new(
    "registrations",
    "0001",
    include_str!("../migrations/0001_registration.surql"),
)];

/// Registrations feature state.
#[gc_derive::gc_slice]
pub struct Registrations {
    store: Arc<dyn RegistrationStore>,
    events: EventBus,
}

impl Registrations {
    #[must_use]
    pub fn with_store(store: Arc<dyn RegistrationStore>, events: EventBus) -> Self {
        Self::new(RegistrationsInner { store, events })
    }
}

/// Initialize the registrations slice over the given store.
pub fn init(store: Arc<dyn RegistrationStore>, events: EventBus) -> InitializedSlice {
    tracing::info!("Registrations slice initialized");
    InitializedSlice::new(Registrations::with_store(store, events))
}
