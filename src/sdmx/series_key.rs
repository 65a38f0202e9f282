//! Series key resolution
//!
//! The API numbers the currencies of a multi-currency response in its own sort
//! order, which is neither the request order nor stable across frequencies.
//! [`SeriesKeyTable`] records that order per frequency so that every requested
//! currency maps to exactly one series key.

use super::response::{find_dimension, Dimension};
use crate::currency::CurrencyCode;
use crate::data::frequency::Frequency;
use crate::error::{Result, ValutaError};
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Series dimension that carries the base currency
pub const BASE_CURRENCY_DIMENSION: &str = "BASE_CUR";

/// Key components in an `EXR` series key: FREQ, BASE_CUR, QUOTE_CUR, TENOR
const KEY_DIMENSIONS: usize = 4;

/// Component of the key holding the currency index
const CURRENCY_KEY_POSITION: usize = 1;

/// Composite key (`"0:1:0:0"`) of one series in the response's series map
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeriesKey(String);

impl SeriesKey {
    /// Key with `index` at `position` and zero in every other component
    pub fn with_index(dimensions: usize, position: usize, index: usize) -> Self {
        let key = (0..dimensions)
            .map(|component| {
                if component == position {
                    index.to_string()
                } else {
                    "0".to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(":");
        Self(key)
    }

    /// Key of the `index`-th currency in an `EXR` response
    pub fn for_currency_index(index: usize) -> Self {
        Self::with_index(KEY_DIMENSIONS, CURRENCY_KEY_POSITION, index)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-frequency currency order of the API's series numbering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesKeyTable {
    orders: HashMap<Frequency, Vec<CurrencyCode>>,
    key_dimensions: usize,
    currency_position: usize,
}

impl Default for SeriesKeyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SeriesKeyTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self {
            orders: HashMap::new(),
            key_dimensions: KEY_DIMENSIONS,
            currency_position: CURRENCY_KEY_POSITION,
        }
    }

    /// Orders recorded from live responses for USD, EUR, GBP and SEK
    pub fn observed() -> Self {
        let order = |codes: [&'static str; 4]| -> Vec<CurrencyCode> {
            codes.into_iter().map(CurrencyCode::from_static).collect()
        };

        Self::new()
            .with_order(Frequency::Annual, order(["USD", "EUR", "GBP", "SEK"]))
            .with_order(Frequency::Monthly, order(["SEK", "GBP", "USD", "EUR"]))
            .with_order(Frequency::Daily, order(["USD", "GBP", "EUR", "SEK"]))
    }

    /// Derive the order for `frequency` from the response's series dimensions.
    ///
    /// Returns `None` when the response does not describe a `BASE_CUR` dimension.
    pub fn from_structure(frequency: Frequency, series_dimensions: &[Dimension]) -> Option<Self> {
        let base = find_dimension(series_dimensions, BASE_CURRENCY_DIMENSION)?;
        let order: Vec<CurrencyCode> = base
            .values
            .iter()
            .filter_map(|value| match CurrencyCode::new(&value.id) {
                Ok(code) => Some(code),
                Err(e) => {
                    log::warn!("Skipping base currency value '{}': {}", value.id, e);
                    None
                }
            })
            .collect();

        if order.len() != base.values.len() {
            return None;
        }

        let position = base
            .key_position
            .or_else(|| series_dimensions.iter().position(|dim| dim.id == base.id))?;

        let mut table = Self::new();
        table.key_dimensions = series_dimensions.len().max(position + 1);
        table.currency_position = position;
        table.insert(frequency, order);
        Some(table)
    }

    pub fn with_order(mut self, frequency: Frequency, order: Vec<CurrencyCode>) -> Self {
        self.insert(frequency, order);
        self
    }

    pub fn insert(&mut self, frequency: Frequency, order: Vec<CurrencyCode>) {
        self.orders.insert(frequency, order);
    }

    /// Currency order for `frequency`
    pub fn order(&self, frequency: Frequency) -> Result<&[CurrencyCode]> {
        self.orders
            .get(&frequency)
            .map(Vec::as_slice)
            .ok_or_else(|| ValutaError::UnknownFrequency(frequency.to_string()))
    }

    pub fn contains_all(&self, frequency: Frequency, currencies: &[CurrencyCode]) -> bool {
        self.order(frequency)
            .map(|order| currencies.iter().all(|currency| order.contains(currency)))
            .unwrap_or(false)
    }

    /// Key of `currency` in a multi-currency response at `frequency`
    pub fn key_for(&self, frequency: Frequency, currency: &CurrencyCode) -> Result<SeriesKey> {
        let index = self
            .order(frequency)?
            .iter()
            .position(|code| code == currency)
            .ok_or_else(|| ValutaError::UnmappedCurrency {
                currency: currency.to_string(),
                frequency: frequency.to_string(),
            })?;

        Ok(SeriesKey::with_index(
            self.key_dimensions,
            self.currency_position,
            index,
        ))
    }

    /// Key of the only series in a single-currency response
    pub fn single_series_key(&self) -> SeriesKey {
        SeriesKey::with_index(self.key_dimensions, self.currency_position, 0)
    }
}

/// Maps requested currencies to their series keys
#[derive(Debug, Clone)]
pub struct SeriesKeyResolver {
    table: SeriesKeyTable,
}

impl Default for SeriesKeyResolver {
    fn default() -> Self {
        Self::new(SeriesKeyTable::observed())
    }
}

impl SeriesKeyResolver {
    pub fn new(table: SeriesKeyTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &SeriesKeyTable {
        &self.table
    }

    /// One key per requested currency, in request order.
    ///
    /// A single currency is always the only series in the response, so it
    /// resolves to the all-zero key whatever the frequency.
    pub fn resolve(
        &self,
        frequency: Frequency,
        currencies: &[CurrencyCode],
    ) -> Result<Vec<(CurrencyCode, SeriesKey)>> {
        if let [only] = currencies {
            return Ok(vec![(only.clone(), self.table.single_series_key())]);
        }

        currencies
            .iter()
            .map(|currency| {
                let key = self.table.key_for(frequency, currency)?;
                log::debug!("{} at {} frequency -> series {}", currency, frequency, key);
                Ok((currency.clone(), key))
            })
            .collect()
    }
}
