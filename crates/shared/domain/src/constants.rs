//! Shared names used across slices.

/// `SurrealDB` table holding registrations.
pub const REGISTRATION_TABLE: &str = "registration";

/// Prefix of minted payment references.
pub const REFERENCE_PREFIX: &str = "GC";

// OpenAPI tags
pub const SYSTEM_TAG: &str = "System";
pub const PAYMENTS_TAG: &str = "Payments";
pub const REGISTRATIONS_TAG: &str = "Registrations";
