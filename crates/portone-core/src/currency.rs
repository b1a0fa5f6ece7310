//! # Currency
//!
//! Callers send amounts in rupees; the provider takes paise.

use serde::{Deserialize, Serialize};

/// The currency every intent is created in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    INR,
}

impl Currency {
    /// ISO 4217 code as the provider expects it
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::INR => "inr",
        }
    }

    /// Minor units per major unit
    pub fn minor_per_major(&self) -> i64 {
        match self {
            Currency::INR => 100,
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Amount in the smallest currency unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Price {
    pub amount: i64,
    pub currency: Currency,
}

impl Price {
    /// Convert a major-unit amount (`amount × 100` for INR), rounding to the nearest paisa
    pub fn new(major: f64, currency: Currency) -> Self {
        Self {
            amount: (major * currency.minor_per_major() as f64).round() as i64,
            currency,
        }
    }
}
