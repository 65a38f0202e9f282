//! Extraction engine: raw SDMX-JSON response to aligned dataset

use crate::config::EngineConfig;
use crate::currency::CurrencyCode;
use crate::error::Result;
use crate::request::RateRequest;
use crate::sdmx::{
    AlignedDataset, MultiSeriesAligner, ObservationParser, SdmxResponse, SeriesKey,
    SeriesKeyResolver, SeriesKeyTable, TimeAxis,
};

/// Runs the extraction pipeline for one request at a time.
///
/// Every call is a pure function of the response and the request, so a stale
/// response can be extracted and dropped at no cost.
#[derive(Debug, Clone)]
pub struct ExtractionEngine {
    resolver: SeriesKeyResolver,
    prefer_response_structure: bool,
}

impl Default for ExtractionEngine {
    fn default() -> Self {
        Self::new(SeriesKeyTable::observed())
    }
}

impl ExtractionEngine {
    pub fn new(table: SeriesKeyTable) -> Self {
        Self {
            resolver: SeriesKeyResolver::new(table),
            prefer_response_structure: true,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        Ok(Self::new(config.key_table()?)
            .with_response_structure(config.prefer_response_structure))
    }

    /// Whether to trust the response's `BASE_CUR` dimension over the static table
    pub fn with_response_structure(mut self, enabled: bool) -> Self {
        self.prefer_response_structure = enabled;
        self
    }

    pub fn resolver(&self) -> &SeriesKeyResolver {
        &self.resolver
    }

    /// Extract every requested series, in request order, onto the response's time axis
    pub fn extract(&self, response: &SdmxResponse, request: &RateRequest) -> Result<AlignedDataset> {
        let axis = TimeAxis::from_response(response)?;
        if !axis.is_chronological(request.frequency()) {
            log::warn!(
                "Time axis is not in ascending {} order ({} periods)",
                request.frequency(),
                axis.len()
            );
        }

        let data_set = response.first_data_set()?;
        let keys = self.resolve_keys(response, request)?;

        let series = keys
            .iter()
            .map(|(currency, key)| ObservationParser::parse(&axis, currency, key, &data_set.series))
            .collect();

        let dataset = MultiSeriesAligner::align(axis, series)?;
        log::debug!(
            "Extracted {} series x {} periods for {}",
            dataset.series().len(),
            dataset.len(),
            request.series_path()
        );
        Ok(dataset)
    }

    /// Parse a response body and extract it
    pub fn extract_str(&self, body: &str, request: &RateRequest) -> Result<AlignedDataset> {
        let response = SdmxResponse::from_json(body)?;
        self.extract(&response, request)
    }

    /// Series keys for the request, from the response's own structure when
    /// it describes every requested currency, else from the configured table
    pub fn resolve_keys(
        &self,
        response: &SdmxResponse,
        request: &RateRequest,
    ) -> Result<Vec<(CurrencyCode, SeriesKey)>> {
        let frequency = request.frequency();
        let currencies = request.currencies();

        if self.prefer_response_structure {
            if let Some(table) =
                SeriesKeyTable::from_structure(frequency, response.series_dimensions())
            {
                if table.contains_all(frequency, currencies) {
                    return SeriesKeyResolver::new(table).resolve(frequency, currencies);
                }
                log::warn!(
                    "Response structure does not list all of {}, using static key table",
                    request.series_path()
                );
            }
        }

        self.resolver.resolve(frequency, currencies)
    }
}
