mod cors;
mod health;
pub mod router;
pub mod state;

pub use cors::cors_layer;
