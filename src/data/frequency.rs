//! Sampling frequency of the exchange rate series

use crate::error::{Result, ValutaError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Data frequency enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Frequency {
    /// One observation per year, periods like `2020`
    Annual,
    /// One observation per month, periods like `2020-03`
    Monthly,
    /// One observation per business day, periods like `2020-03-17`
    Daily,
}

impl Frequency {
    pub const ALL: [Frequency; 3] = [Frequency::Annual, Frequency::Monthly, Frequency::Daily];

    /// Code used in the `EXR` query path
    pub fn code(&self) -> &'static str {
        match self {
            Frequency::Annual => "A",
            Frequency::Monthly => "M",
            Frequency::Daily => "B",
        }
    }

    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Annual => "annual",
            Frequency::Monthly => "monthly",
            Frequency::Daily => "daily",
        }
    }

    /// Parse an API code (`A`, `M`, `B`) or a spelled-out name
    pub fn from_code(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "a" | "annual" | "yearly" => Ok(Frequency::Annual),
            "m" | "monthly" => Ok(Frequency::Monthly),
            "b" | "d" | "daily" | "business" => Ok(Frequency::Daily),
            _ => Err(ValutaError::UnknownFrequency(s.to_string())),
        }
    }

    /// Parse a period label of this frequency to the first day it covers
    pub fn parse_period(&self, label: &str) -> Result<NaiveDate> {
        let full = match self {
            Frequency::Annual => format!("{}-01-01", label),
            Frequency::Monthly => format!("{}-01", label),
            Frequency::Daily => label.to_string(),
        };
        NaiveDate::parse_from_str(&full, "%Y-%m-%d").map_err(|e| {
            ValutaError::DataError(format!("Invalid {} period '{}': {}", self, label, e))
        })
    }
}

impl FromStr for Frequency {
    type Err = ValutaError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_code(s)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
