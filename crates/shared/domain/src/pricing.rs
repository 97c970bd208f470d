//! Ticket price helpers.
//!
//! An event may carry a regular `price` and an `early_bird_price`. Both are optional.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPricing {
    pub price: Option<Decimal>,
    pub early_bird_price: Option<Decimal>,
}

impl EventPricing {
    #[must_use]
    pub const fn new(price: Option<Decimal>, early_bird_price: Option<Decimal>) -> Self {
        Self { price, early_bird_price }
    }

    #[must_use]
    pub fn is_free(&self) -> bool {
        is_event_free(self.price, self.early_bird_price)
    }

    #[must_use]
    pub fn effective_price(&self) -> Decimal {
        effective_price(self.price, self.early_bird_price)
    }
}

/// An event is free when the early-bird price (or, absent that, the regular price) is
/// missing or zero.
#[must_use]
pub fn is_event_free(price: Option<Decimal>, early_bird_price: Option<Decimal>) -> bool {
    early_bird_price.or(price).is_none_or(|p| p.is_zero())
}

/// The price charged at checkout: a positive early-bird price wins, then the regular price,
/// then zero.
#[must_use]
pub fn effective_price(price: Option<Decimal>, early_bird_price: Option<Decimal>) -> Decimal {
    match early_bird_price {
        Some(early) if early > Decimal::ZERO => early,
        _ => price.unwrap_or(Decimal::ZERO),
    }
}
