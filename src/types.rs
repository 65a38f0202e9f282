//! Core types shared by the extraction pipeline

use crate::currency::CurrencyCode;
use serde::{Deserialize, Serialize};

/// Period label as published by the API (`2020`, `2020-03`, `2020-03-17`)
pub type PeriodLabel = String;

/// Exchange rate in NOK per unit of the base currency
pub type Rate = f64;

/// Whether an observation carried a usable value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObservationStatus {
    /// Value parsed from the response
    Present,
    /// No value at this position
    Missing,
    /// A value was present but could not be read as a number
    Malformed,
}

/// One time period paired with its rate.
///
/// `value` is `0.0` whenever `status` is not [`ObservationStatus::Present`];
/// use the status to tell a real zero from a gap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub time_period: PeriodLabel,
    pub value: Rate,
    pub status: ObservationStatus,
}

impl Observation {
    pub fn present(time_period: PeriodLabel, value: Rate) -> Self {
        Self {
            time_period,
            value,
            status: ObservationStatus::Present,
        }
    }

    pub fn missing(time_period: PeriodLabel) -> Self {
        Self {
            time_period,
            value: 0.0,
            status: ObservationStatus::Missing,
        }
    }

    pub fn malformed(time_period: PeriodLabel) -> Self {
        Self {
            time_period,
            value: 0.0,
            status: ObservationStatus::Malformed,
        }
    }

    pub fn is_present(&self) -> bool {
        self.status == ObservationStatus::Present
    }

    /// The value, or `None` for a gap
    pub fn rate(&self) -> Option<Rate> {
        self.is_present().then_some(self.value)
    }
}

/// Dense, axis-aligned series for one currency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    pub currency: CurrencyCode,
    pub observations: Vec<Observation>,
}

impl TimeSeries {
    pub fn new(currency: CurrencyCode, observations: Vec<Observation>) -> Self {
        Self {
            currency,
            observations,
        }
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Values in axis order, gaps as `0.0`
    pub fn values(&self) -> Vec<Rate> {
        self.observations.iter().map(|obs| obs.value).collect()
    }

    /// Number of positions holding a parsed value
    pub fn present_count(&self) -> usize {
        self.observations.iter().filter(|obs| obs.is_present()).count()
    }

    /// Most recent parsed value
    pub fn latest(&self) -> Option<&Observation> {
        self.observations.iter().rev().find(|obs| obs.is_present())
    }
}
