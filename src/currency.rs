//! Currency codes and the catalog of series quoted against NOK

use crate::error::{Result, ValutaError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Quote currency of every exchange rate series the API publishes
pub const QUOTE_CURRENCY: &str = "NOK";

/// Three-letter currency (or index) code, stored upper case
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Parse and normalise a code such as `"usd"` or `"I44"`
    pub fn new(code: &str) -> Result<Self> {
        let code = code.trim();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ValutaError::InvalidCurrency(code.to_string()));
        }
        Ok(Self(code.to_ascii_uppercase()))
    }

    /// Code known to be valid at compile time
    pub(crate) fn from_static(code: &'static str) -> Self {
        Self(code.to_string())
    }

    /// Get the code as string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for CurrencyCode {
    type Err = ValutaError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = ValutaError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(&value)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A currency offered for selection, with its Norwegian display name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyInfo {
    pub code: &'static str,
    pub name: &'static str,
}

impl CurrencyInfo {
    /// Selection label, e.g. `"USD - Amerikanske dollar"`
    pub fn label(&self) -> String {
        format!("{} - {}", self.code, self.name)
    }

    pub fn currency_code(&self) -> CurrencyCode {
        CurrencyCode::from_static(self.code)
    }
}

const CATALOG: &[CurrencyInfo] = &[
    CurrencyInfo { code: "USD", name: "Amerikanske dollar" },
    CurrencyInfo { code: "AUD", name: "Australske dollar" },
    CurrencyInfo { code: "BDT", name: "Bangladeshi taka" },
    CurrencyInfo { code: "BYN", name: "Belarusiske nye rubler" },
    CurrencyInfo { code: "BRL", name: "Brasilianske real" },
    CurrencyInfo { code: "GBP", name: "Britiske pund" },
    CurrencyInfo { code: "BGN", name: "Bulgarske lev" },
    CurrencyInfo { code: "DKK", name: "Danske kroner" },
    CurrencyInfo { code: "EUR", name: "Euro" },
    CurrencyInfo { code: "PHP", name: "Filippinske peso" },
    CurrencyInfo { code: "HKD", name: "Hong Kong dollar" },
    CurrencyInfo { code: "XDR", name: "IMF Spesielle trekkrettigheter" },
    CurrencyInfo { code: "I44", name: "Importveid kursindeks" },
    CurrencyInfo { code: "INR", name: "Indiske rupi" },
    CurrencyInfo { code: "IDR", name: "Indonesiske rupiah" },
    CurrencyInfo { code: "TWI", name: "Industriens effektive valutakurs" },
    CurrencyInfo { code: "ISK", name: "Islandske kroner" },
    CurrencyInfo { code: "JPY", name: "Japanske yen" },
    CurrencyInfo { code: "CAD", name: "Kanadiske dollar" },
    CurrencyInfo { code: "CNY", name: "Kinesiske yuan" },
    CurrencyInfo { code: "HRK", name: "Kroatiske kuna" },
    CurrencyInfo { code: "MYR", name: "Malaysiske ringgit" },
    CurrencyInfo { code: "MXN", name: "Meksikanske peso" },
    CurrencyInfo { code: "MMK", name: "Myanmar kyat" },
    CurrencyInfo { code: "NZD", name: "New Zealand dollar" },
    CurrencyInfo { code: "ILS", name: "Ny israelsk shekel" },
    CurrencyInfo { code: "RON", name: "Ny rumenske leu" },
    CurrencyInfo { code: "TWD", name: "Nye taiwanske dollar" },
    CurrencyInfo { code: "PKR", name: "Pakistanske rupi" },
    CurrencyInfo { code: "PLN", name: "Polske zloty" },
    CurrencyInfo { code: "RUB", name: "Russiske rubler" },
    CurrencyInfo { code: "SGD", name: "Singapore dollar" },
    CurrencyInfo { code: "CHF", name: "Sveitsiske franc" },
    CurrencyInfo { code: "SEK", name: "Svenske kroner" },
    CurrencyInfo { code: "ZAR", name: "Sørafrikanske rand" },
    CurrencyInfo { code: "KRW", name: "Sørkoreanske won" },
    CurrencyInfo { code: "THB", name: "Thailandske baht" },
    CurrencyInfo { code: "CZK", name: "Tsjekkiske koruna" },
    CurrencyInfo { code: "TRY", name: "Tyrkiske lira" },
    CurrencyInfo { code: "HUF", name: "Ungarske forinter" },
    CurrencyInfo { code: "VND", name: "Vietnamesiske dong" },
];

/// Catalog of currencies the exchange rate dataflow quotes against NOK
pub struct CurrencyCatalog;

impl CurrencyCatalog {
    /// All entries in display order
    pub fn all() -> &'static [CurrencyInfo] {
        CATALOG
    }

    /// Look up an entry by code (case-insensitive)
    pub fn find(code: &str) -> Option<&'static CurrencyInfo> {
        CATALOG.iter().find(|info| info.code.eq_ignore_ascii_case(code.trim()))
    }

    /// Case-insensitive substring match against `"CODE - name"`.
    /// An empty query matches nothing.
    pub fn search(query: &str) -> Vec<&'static CurrencyInfo> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }
        CATALOG
            .iter()
            .filter(|info| info.label().to_lowercase().contains(&query))
            .collect()
    }
}
