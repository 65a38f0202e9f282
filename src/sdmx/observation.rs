//! Observation parsing: sparse index/value pairs to a dense series

use super::response::{RawObservations, SeriesMap};
use super::series_key::SeriesKey;
use super::time_axis::TimeAxis;
use crate::currency::CurrencyCode;
use crate::types::{Observation, TimeSeries};
use serde_json::Value;

/// Converts one series of a response into a [`TimeSeries`] aligned to the axis
pub struct ObservationParser;

impl ObservationParser {
    /// Parse the series stored under `key`.
    ///
    /// Never fails. Positions without a value, and values that are not
    /// numbers, become `0.0` with a `Missing`/`Malformed` status. A key that
    /// is absent from the series map yields a series of gaps.
    pub fn parse(
        axis: &TimeAxis,
        currency: &CurrencyCode,
        key: &SeriesKey,
        series: &SeriesMap,
    ) -> TimeSeries {
        let observations = match series.get(key.as_str()) {
            Some(entry) => Self::densify(axis, &entry.observations),
            None => {
                log::warn!(
                    "Series {} for {} not found in response, filling {} gaps",
                    key,
                    currency,
                    axis.len()
                );
                axis.iter()
                    .map(|period| Observation::missing(period.to_string()))
                    .collect()
            }
        };

        TimeSeries::new(currency.clone(), observations)
    }

    /// Positions are looked up by their exact decimal key (`"0"`, `"1"`, ...);
    /// keys such as `"01"` or `"+0"` match no position.
    fn densify(axis: &TimeAxis, raw: &RawObservations) -> Vec<Observation> {
        let mut matched = 0usize;

        let observations: Vec<Observation> = axis
            .iter()
            .enumerate()
            .map(|(i, period)| match raw.get(i.to_string().as_str()) {
                None => Observation::missing(period.to_string()),
                Some(values) => {
                    matched += 1;
                    Self::parse_value(period, values)
                }
            })
            .collect();

        if matched < raw.len() {
            log::debug!(
                "Ignored {} observations matching no position of the {}-period axis",
                raw.len() - matched,
                axis.len()
            );
        }

        observations
    }

    fn parse_value(period: &str, values: &[Value]) -> Observation {
        let parsed = match values.first() {
            None | Some(Value::Null) => return Observation::missing(period.to_string()),
            Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
            Some(Value::Number(number)) => number.as_f64(),
            Some(_) => None,
        };

        match parsed.filter(|value| value.is_finite()) {
            Some(value) => Observation::present(period.to_string(), value),
            None => {
                log::debug!("Unreadable value {:?} at {}", values.first(), period);
                Observation::malformed(period.to_string())
            }
        }
    }
}
