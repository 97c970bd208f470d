//! # Domain Models
//!
//! Pure checkout types with minimal dependencies (`serde`, `rust_decimal`).
//! Keep it lean: no I/O, networking, or heavy logic. Data and small helpers only.

pub mod config;
pub mod constants;
pub mod network;
pub mod pricing;
pub mod registration;
pub mod registry;
