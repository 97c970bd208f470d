use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Payment state of a registration.
///
/// `Free` is only assigned at creation. `Completed` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
    Free,
}

impl PaymentStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Free => "free",
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// Whether a registration may be created in this state.
    #[must_use]
    pub const fn is_initial(self) -> bool {
        matches!(self, Self::Pending | Self::Free)
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant(pub String);

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown value '{}'", self.0)
    }
}

impl std::error::Error for UnknownVariant {}

impl FromStr for PaymentStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            "free" => Ok(Self::Free),
            other => Err(UnknownVariant(other.to_owned())),
        }
    }
}

/// Event team colour picked at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    Red,
    Yellow,
    Blue,
    Green,
}

impl Team {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Yellow => "yellow",
            Self::Blue => "blue",
            Self::Green => "green",
        }
    }
}

impl FromStr for Team {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "red" => Ok(Self::Red),
            "yellow" => Ok(Self::Yellow),
            "blue" => Ok(Self::Blue),
            "green" => Ok(Self::Green),
            other => Err(UnknownVariant(other.to_owned())),
        }
    }
}

/// An attendee's registration for an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    /// Record key without the table prefix.
    pub id: String,
    pub event_id: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub team: Option<Team>,
    pub payment_status: PaymentStatus,
    pub payment_reference: Option<String>,
    /// RFC 3339 UTC with microseconds; sorts lexically in creation order.
    pub created_at: String,
}

/// Input for creating a registration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRegistration {
    pub event_id: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub team: Option<Team>,
    /// Defaults to `pending`; ignored when `pricing` is given.
    pub payment_status: Option<PaymentStatus>,
    pub pricing: Option<crate::pricing::EventPricing>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_strings() {
        for status in [
            PaymentStatus::Pending,
            PaymentStatus::Completed,
            PaymentStatus::Failed,
            PaymentStatus::Free,
        ] {
            assert_eq!(status.as_str().parse::<PaymentStatus>(), Ok(status));
        }
        assert!("paid".parse::<PaymentStatus>().is_err());
    }

    #[test]
    fn only_completed_and_failed_are_terminal() {
        assert!(PaymentStatus::Completed.is_terminal());
        assert!(PaymentStatus::Failed.is_terminal());
        assert!(!PaymentStatus::Pending.is_terminal());
        assert!(!PaymentStatus::Free.is_terminal());
        assert!(PaymentStatus::Free.is_initial());
        assert!(!PaymentStatus::Failed.is_initial());
    }
}
