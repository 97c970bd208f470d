//! Kernel utilities shared across slices.
//! Keep this crate lightweight: config loading, payment references, id guards, and (with the
//! `server` feature) the shared Axum state and system routes.
//!
//! ## Payment references
//! ```rust
//! let reference = gc_kernel::reference::payment_reference();
//! assert!(reference.starts_with("GC-"));
//! ```
#[cfg(not(target_arch = "wasm32"))]
pub mod config;
pub mod reference;
pub mod security;
#[cfg(feature = "server")]
pub mod server;

pub use gc_domain as domain;
