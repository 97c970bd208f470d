//! Facade crate for the checkout features and shared modules.
//! Re-exports domain/kernel primitives and aggregates feature initialization.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Add `gc` with the `server` feature.
//! - Pass [`migrations`] to the database builder, then call [`init`] to build the feature
//!   slices and mount [`server::router::api_router`] under `/api`.

use gc_database::{Database, Migration};
pub use gc_domain as domain;
use gc_domain::config::ApiConfig;
use gc_event_bus::EventBus;
pub use gc_kernel as kernel;

#[cfg(feature = "server")]
pub mod server {
    pub mod router {
        use gc_kernel::server::state::ApiState;
        pub use gc_kernel::server::router::system_router;
        use utoipa_axum::router::OpenApiRouter;

        /// Every feature's routes, relative to the API root.
        #[must_use]
        pub fn api_router() -> OpenApiRouter<ApiState> {
            OpenApiRouter::new()
                .merge(gc_registrations::router())
                .merge(gc_payments::router())
        }
    }
}

/// Feature registry for runtime introspection.
pub mod features {
    pub use gc_payments as payments;
    pub use gc_registrations as registrations;

    /// Build-time enabled features (by Cargo feature).
    pub const ENABLED: &[&str] = &[
        #[cfg(feature = "server")]
        "server",
        "registrations",
        "payments",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

/// Schema migrations of every feature, in dependency order.
#[must_use]
pub fn migrations() -> Vec<Migration> {
    features::registrations::MIGRATIONS.to_vec()
}

/// Initialize all features over the given database.
///
/// # Errors
/// Returns an error if any feature initialization fails.
pub fn init(
    config: &ApiConfig,
    database: &Database,
    events: &EventBus,
) -> Result<Vec<domain::registry::InitializedSlice>, Box<dyn std::error::Error + Send + Sync>> {
    use features::registrations::store::SurrealRegistrationStore;

    let store = std::sync::Arc::new(SurrealRegistrationStore::new(database.clone()));
    let registrations = features::registrations::Registrations::with_store(store, events.clone());

    let mut slices = Vec::new();

    // Registrations
    slices.push(domain::registry::InitializedSlice::new(registrations.clone()));

    // Payments (reconciles against registrations)
    slices.push(features::payments::init(&config.payments, registrations)?);

    Ok(slices)
}
