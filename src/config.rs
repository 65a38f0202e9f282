//! Engine configuration, loaded from TOML
//!
//! ```toml
//! prefer_response_structure = true
//!
//! [api]
//! base_url = "https://data.norges-bank.no/api"
//! timeout_secs = 30
//!
//! [[scale]]
//! currency = "SEK"
//! divisor = 10.0
//!
//! [key_order]
//! M = ["SEK", "GBP", "USD", "EUR"]
//! ```

use crate::chart::ScaleRule;
use crate::currency::CurrencyCode;
use crate::data::frequency::Frequency;
use crate::error::{Result, ValutaError};
use crate::request::DEFAULT_BASE_URL;
use crate::sdmx::SeriesKeyTable;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("valutakurs/{}", env!("CARGO_PKG_VERSION"))
}

fn default_true() -> bool {
    true
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Use the response's own `BASE_CUR` order when it is present
    #[serde(default = "default_true")]
    pub prefer_response_structure: bool,
    #[serde(default)]
    pub api: ApiConfig,
    /// Display rescaling applied by the chart adapter
    #[serde(default)]
    pub scale: Vec<ScaleRule>,
    /// Series key order overrides, frequency code to currency codes
    #[serde(default)]
    pub key_order: BTreeMap<String, Vec<String>>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            prefer_response_structure: true,
            api: ApiConfig::default(),
            scale: Vec::new(),
            key_order: BTreeMap::new(),
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)
            .map_err(|e| ValutaError::ConfigError(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`, or defaults when no path is given or the file does not exist
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(config_path) if config_path.exists() => {
                let contents = fs::read_to_string(config_path)?;
                log::debug!("Loaded config from {}", config_path.display());
                Self::from_toml_str(&contents)
            }
            Some(config_path) => {
                log::debug!("No config at {}, using defaults", config_path.display());
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| ValutaError::ConfigError(format!("Failed to serialize config: {}", e)))
    }

    fn validate(&self) -> Result<()> {
        if self.api.timeout_secs == 0 {
            return Err(ValutaError::ConfigError(
                "api.timeout_secs must be greater than zero".to_string(),
            ));
        }
        for rule in &self.scale {
            ScaleRule::new(rule.currency.clone(), rule.divisor)?;
        }
        self.key_table().map(|_| ())
    }

    /// Observed key table with the configured overrides applied
    pub fn key_table(&self) -> Result<SeriesKeyTable> {
        let mut table = SeriesKeyTable::observed();
        for (frequency, codes) in &self.key_order {
            let frequency = Frequency::from_code(frequency)?;
            let order = codes
                .iter()
                .map(|code| CurrencyCode::new(code))
                .collect::<Result<Vec<_>>>()?;
            table.insert(frequency, order);
        }
        Ok(table)
    }
}
