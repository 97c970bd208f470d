//! # Event Bus
//!
//! Typed fan-out channels shared across feature slices.
//!
//! Each event type gets one `tokio::sync::broadcast` channel, created lazily on first
//! subscribe or publish. Publishing with no subscribers is not an error.
//!
//! # Example
//!
//! ```rust
//! use gc_event_bus::{EventBus, EventReceiverExt, EventBusError};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct PaymentSettled { reference: String }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), EventBusError> {
//!     let bus = EventBus::new();
//!
//!     let mut rx = bus.subscribe::<PaymentSettled>()?;
//!     bus.publish(PaymentSettled { reference: "GC-1-ABCDEF".into() })?;
//!
//!     if let Some(event) = rx.recv_event().await {
//!         assert_eq!(event.reference, "GC-1-ABCDEF");
//!     }
//!     Ok(())
//! }
//! ```

mod bus;
mod error;
mod receiver;

pub use bus::{Event, EventBus};
pub use error::{EventBusError, EventBusErrorExt};
pub use receiver::EventReceiverExt;
