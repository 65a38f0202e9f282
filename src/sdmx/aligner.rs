//! Multi-series alignment onto a shared time axis

use super::time_axis::TimeAxis;
use crate::currency::CurrencyCode;
use crate::error::{Result, ValutaError};
use crate::types::{PeriodLabel, Rate, TimeSeries};
use serde::{Deserialize, Serialize};

/// Every series of one request on one shared axis.
///
/// Invariant: each series has exactly `axis.len()` observations and
/// `series[k].observations[i].time_period == axis[i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedDataset {
    axis: TimeAxis,
    series: Vec<TimeSeries>,
}

impl AlignedDataset {
    pub fn axis(&self) -> &TimeAxis {
        &self.axis
    }

    pub fn series(&self) -> &[TimeSeries] {
        &self.series
    }

    pub fn labels(&self) -> &[PeriodLabel] {
        self.axis.labels()
    }

    pub fn len(&self) -> usize {
        self.axis.len()
    }

    pub fn is_empty(&self) -> bool {
        self.axis.is_empty()
    }

    pub fn currencies(&self) -> Vec<&CurrencyCode> {
        self.series.iter().map(|s| &s.currency).collect()
    }

    pub fn series_for(&self, currency: &CurrencyCode) -> Option<&TimeSeries> {
        self.series.iter().find(|s| &s.currency == currency)
    }

    /// Values of one currency in axis order
    pub fn values(&self, currency: &CurrencyCode) -> Option<Vec<Rate>> {
        self.series_for(currency).map(TimeSeries::values)
    }

    pub fn into_parts(self) -> (TimeAxis, Vec<TimeSeries>) {
        (self.axis, self.series)
    }
}

/// Packages parsed series into an [`AlignedDataset`]
pub struct MultiSeriesAligner;

impl MultiSeriesAligner {
    /// Check every series against the axis and bundle them, keeping series order.
    ///
    /// A mismatch means the parser broke its contract and is reported as
    /// [`ValutaError::Alignment`].
    pub fn align(axis: TimeAxis, series: Vec<TimeSeries>) -> Result<AlignedDataset> {
        for s in &series {
            if s.len() != axis.len() {
                return Err(ValutaError::Alignment {
                    currency: s.currency.to_string(),
                    reason: format!("{} observations for a {}-period axis", s.len(), axis.len()),
                });
            }

            if let Some((i, obs)) = s
                .observations
                .iter()
                .enumerate()
                .find(|(i, obs)| axis.get(*i) != Some(obs.time_period.as_str()))
            {
                return Err(ValutaError::Alignment {
                    currency: s.currency.to_string(),
                    reason: format!(
                        "period '{}' at position {} does not match axis '{}'",
                        obs.time_period,
                        i,
                        axis.get(i).unwrap_or_default()
                    ),
                });
            }
        }

        Ok(AlignedDataset { axis, series })
    }
}
