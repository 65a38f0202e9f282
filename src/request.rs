//! Exchange rate requests and staleness tracking

use crate::currency::{CurrencyCode, QUOTE_CURRENCY};
use crate::data::frequency::Frequency;
use crate::error::{Result, ValutaError};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Default API root
pub const DEFAULT_BASE_URL: &str = "https://data.norges-bank.no/api";

/// Exchange rate dataflow id
const DATAFLOW: &str = "EXR";

/// Spot rate tenor
const TENOR: &str = "SP";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// One (currencies, frequency, start, end) query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RateRequest {
    currencies: Vec<CurrencyCode>,
    frequency: Frequency,
    start: NaiveDate,
    end: NaiveDate,
}

/// Unchecked serde form of [`RateRequest`]
#[derive(Deserialize)]
struct RequestFields {
    currencies: Vec<CurrencyCode>,
    frequency: Frequency,
    start: NaiveDate,
    end: NaiveDate,
}

impl<'de> Deserialize<'de> for RateRequest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let fields = RequestFields::deserialize(deserializer)?;
        Self::new(fields.currencies, fields.frequency, fields.start, fields.end)
            .map_err(serde::de::Error::custom)
    }
}

impl RateRequest {
    /// Create a validated request.
    ///
    /// Needs at least one currency, no duplicates, and `start <= end`.
    pub fn new(
        currencies: Vec<CurrencyCode>,
        frequency: Frequency,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Self> {
        if currencies.is_empty() {
            return Err(ValutaError::InvalidRequest(
                "at least one currency is required".to_string(),
            ));
        }

        for (i, currency) in currencies.iter().enumerate() {
            if currencies[..i].contains(currency) {
                return Err(ValutaError::InvalidRequest(format!(
                    "currency {} requested twice",
                    currency
                )));
            }
        }

        if start > end {
            return Err(ValutaError::InvalidDateRange {
                start: start.format(DATE_FORMAT).to_string(),
                end: end.format(DATE_FORMAT).to_string(),
            });
        }

        Ok(Self {
            currencies,
            frequency,
            start,
            end,
        })
    }

    /// Build from user-facing strings: codes, frequency code, `YYYY-MM-DD` dates
    pub fn parse(currencies: &[&str], frequency: &str, start: &str, end: &str) -> Result<Self> {
        let currencies = currencies
            .iter()
            .map(|code| CurrencyCode::new(code))
            .collect::<Result<Vec<_>>>()?;
        Self::new(
            currencies,
            Frequency::from_code(frequency)?,
            parse_date(start)?,
            parse_date(end)?,
        )
    }

    pub fn currencies(&self) -> &[CurrencyCode] {
        &self.currencies
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Series key expression, e.g. `M.USD+EUR.NOK.SP`
    pub fn series_path(&self) -> String {
        let codes: Vec<&str> = self.currencies.iter().map(CurrencyCode::as_str).collect();
        format!(
            "{}.{}.{}.{}",
            self.frequency.code(),
            codes.join("+"),
            QUOTE_CURRENCY,
            TENOR
        )
    }

    /// Full query URL under `base_url`
    pub fn query_url(&self, base_url: &str) -> String {
        format!(
            "{}/data/{}/{}?format=sdmx-json&startPeriod={}&endPeriod={}&locale=no",
            base_url.trim_end_matches('/'),
            DATAFLOW,
            self.series_path(),
            self.start.format(DATE_FORMAT),
            self.end.format(DATE_FORMAT)
        )
    }
}

impl Default for RateRequest {
    /// USD, annual, 1994-04-15 to 2024-04-15
    fn default() -> Self {
        Self {
            currencies: vec![CurrencyCode::from_static("USD")],
            frequency: Frequency::Annual,
            start: NaiveDate::from_ymd_opt(1994, 4, 15).unwrap_or(NaiveDate::MIN),
            end: NaiveDate::from_ymd_opt(2024, 4, 15).unwrap_or(NaiveDate::MAX),
        }
    }
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|e| ValutaError::InvalidRequest(format!("invalid date '{}': {}", s, e)))
}

/// Generation number of one issued request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// Hands out monotonically increasing request tokens.
///
/// Call [`begin`](Self::begin) whenever the request parameters change and keep
/// a response only if [`is_current`](Self::is_current) still holds for its
/// token when it arrives. Clones share the same counter.
#[derive(Debug, Clone, Default)]
pub struct RequestTracker {
    latest: Arc<AtomicU64>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, superseding every earlier token
    pub fn begin(&self) -> RequestToken {
        RequestToken(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        self.latest.load(Ordering::Acquire) == token.0
    }

    pub fn latest(&self) -> Option<RequestToken> {
        match self.latest.load(Ordering::Acquire) {
            0 => None,
            generation => Some(RequestToken(generation)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_query_url() {
        let request = RateRequest::parse(&["usd", "eur"], "M", "2020-01-01", "2020-12-31").unwrap();

        assert_eq!(request.series_path(), "M.USD+EUR.NOK.SP");
        assert_eq!(
            request.query_url("https://data.norges-bank.no/api/"),
            "https://data.norges-bank.no/api/data/EXR/M.USD+EUR.NOK.SP?format=sdmx-json&startPeriod=2020-01-01&endPeriod=2020-12-31&locale=no"
        );
    }

    #[test]
    fn test_default_request() {
        let request = RateRequest::default();
        assert_eq!(request.currencies()[0].as_str(), "USD");
        assert_eq!(request.frequency(), Frequency::Annual);
        assert_eq!(request.start(), date(1994, 4, 15));
        assert_eq!(request.end(), date(2024, 4, 15));
        assert!(request.query_url(DEFAULT_BASE_URL).contains("/EXR/A.USD.NOK.SP?"));
    }

    #[test]
    fn test_validation() {
        assert!(matches!(
            RateRequest::new(vec![], Frequency::Annual, date(2020, 1, 1), date(2021, 1, 1)),
            Err(ValutaError::InvalidRequest(_))
        ));
        assert!(matches!(
            RateRequest::parse(&["USD", "usd"], "A", "2020-01-01", "2021-01-01"),
            Err(ValutaError::InvalidRequest(_))
        ));
        assert!(matches!(
            RateRequest::parse(&["USD"], "A", "2021-01-01", "2020-01-01"),
            Err(ValutaError::InvalidDateRange { .. })
        ));
        assert!(matches!(
            RateRequest::parse(&["USD"], "W", "2020-01-01", "2021-01-01"),
            Err(ValutaError::UnknownFrequency(_))
        ));
        assert!(RateRequest::parse(&["USD"], "A", "2020-13-01", "2021-01-01").is_err());
        assert!(RateRequest::parse(&["USD"], "B", "2020-01-01", "2020-01-01").is_ok());
    }

    #[test]
    fn test_deserialize_validates() {
        let request: RateRequest = serde_json::from_str(
            r#"{"currencies":["SEK","EUR"],"frequency":"Monthly","start":"2020-01-01","end":"2020-06-30"}"#,
        )
        .unwrap();
        assert_eq!(request.series_path(), "M.SEK+EUR.NOK.SP");

        let round_trip: RateRequest =
            serde_json::from_str(&serde_json::to_string(&request).unwrap()).unwrap();
        assert_eq!(round_trip, request);

        assert!(serde_json::from_str::<RateRequest>(
            r#"{"currencies":[],"frequency":"Annual","start":"2020-01-01","end":"2021-01-01"}"#
        )
        .is_err());
        assert!(serde_json::from_str::<RateRequest>(
            r#"{"currencies":["USD"],"frequency":"Annual","start":"2021-01-01","end":"2020-01-01"}"#
        )
        .is_err());
    }

    #[test]
    fn test_tracker_only_latest_is_current() {
        let tracker = RequestTracker::new();
        assert_eq!(tracker.latest(), None);

        let first = tracker.begin();
        assert!(tracker.is_current(first));

        let second = tracker.clone().begin();
        assert!(second > first);
        assert!(!tracker.is_current(first));
        assert!(tracker.is_current(second));
        assert_eq!(tracker.latest(), Some(second));
    }
}
