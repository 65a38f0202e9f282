//! Time axis extraction from the observation dimension

use super::response::{find_dimension, Dimension, SdmxResponse};
use crate::data::frequency::Frequency;
use crate::error::{Result, ValutaError};
use crate::types::PeriodLabel;
use serde::{Deserialize, Serialize};

/// Id of the observation dimension that indexes every series positionally
pub const TIME_PERIOD: &str = "TIME_PERIOD";

/// Ordered period labels shared by every series of one response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeAxis {
    periods: Vec<PeriodLabel>,
}

impl TimeAxis {
    pub fn new(periods: Vec<PeriodLabel>) -> Self {
        Self { periods }
    }

    /// Build the axis from the observation dimensions, in the order the API
    /// lists them. Fails if there is no `TIME_PERIOD` dimension.
    pub fn extract(dimensions: &[Dimension]) -> Result<Self> {
        let time_dimension = find_dimension(dimensions, TIME_PERIOD)
            .ok_or_else(|| ValutaError::MissingDimension(TIME_PERIOD.to_string()))?;

        let periods = time_dimension
            .values
            .iter()
            .map(|value| {
                if value.name.is_empty() {
                    value.id.clone()
                } else {
                    value.name.clone()
                }
            })
            .collect();

        Ok(Self { periods })
    }

    pub fn from_response(response: &SdmxResponse) -> Result<Self> {
        Self::extract(response.observation_dimensions())
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.periods.get(index).map(String::as_str)
    }

    pub fn labels(&self) -> &[PeriodLabel] {
        &self.periods
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.periods.iter().map(String::as_str)
    }

    pub fn first(&self) -> Option<&str> {
        self.periods.first().map(String::as_str)
    }

    pub fn last(&self) -> Option<&str> {
        self.periods.last().map(String::as_str)
    }

    /// True if every label parses at `frequency` and the labels are strictly ascending
    pub fn is_chronological(&self, frequency: Frequency) -> bool {
        let mut previous = None;
        for label in &self.periods {
            let Ok(date) = frequency.parse_period(label) else {
                return false;
            };
            if previous.is_some_and(|prev| prev >= date) {
                return false;
            }
            previous = Some(date);
        }
        true
    }
}
