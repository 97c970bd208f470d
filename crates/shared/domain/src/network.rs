use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Mobile-money networks supported by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MobileNetwork {
    Mtn,
    AirtelTigo,
    Telecel,
}

impl MobileNetwork {
    pub const ALL: [Self; 3] = [Self::Mtn, Self::AirtelTigo, Self::Telecel];

    /// Identifier used by the checkout and sent to the gateway.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Mtn => "mtn",
            Self::AirtelTigo => "airteltigo",
            Self::Telecel => "telecel",
        }
    }

    /// Gateway network code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Mtn => "300591",
            Self::AirtelTigo => "300592",
            Self::Telecel => "300594",
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mtn => "MTN Mobile Money",
            Self::AirtelTigo => "AirtelTigo Money",
            Self::Telecel => "Telecel Cash",
        }
    }

    #[must_use]
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::Mtn => "MTN",
            Self::AirtelTigo => "AirtelTigo",
            Self::Telecel => "Telecel",
        }
    }
}

impl fmt::Display for MobileNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Accepts the key (any case) or the gateway code.
impl FromStr for MobileNetwork {
    type Err = crate::registration::UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|n| n.key().eq_ignore_ascii_case(trimmed) || n.code() == trimmed)
            .ok_or_else(|| crate::registration::UnknownVariant(s.to_owned()))
    }
}
