//! Norges Bank exchange rate source
//!
//! Queries the `EXR` dataflow of the Norges Bank SDMX API for rates against NOK.

use super::SdmxSource;
use crate::config::ApiConfig;
use crate::engine::ExtractionEngine;
use crate::error::{Result, ValutaError};
use crate::request::RateRequest;
use crate::sdmx::{AlignedDataset, SdmxResponse};
use reqwest::Client;
use std::time::Duration;

/// Norges Bank data source (no API key required)
pub struct NorgesBankSource {
    base_url: String,
    client: Client,
}

impl NorgesBankSource {
    /// Create a new Norges Bank data source
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| ValutaError::DataError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: config.base_url.clone(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the raw SDMX-JSON response for a request
    pub async fn fetch_response(&self, request: &RateRequest) -> Result<SdmxResponse> {
        let url = request.query_url(&self.base_url);
        log::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ValutaError::DataError(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(ValutaError::DataError(format!(
                "Norges Bank returned error: {}",
                response.status()
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ValutaError::DataError(format!("Failed to read response: {}", e)))?;

        SdmxResponse::from_slice(&body)
    }

    /// Fetch and extract a request in one step
    pub async fn fetch_dataset(
        &self,
        request: &RateRequest,
        engine: &ExtractionEngine,
    ) -> Result<AlignedDataset> {
        let response = self.fetch_response(request).await?;
        engine.extract(&response, request)
    }
}

impl SdmxSource for NorgesBankSource {
    async fn fetch(&self, request: &RateRequest) -> Result<SdmxResponse> {
        self.fetch_response(request).await
    }

    fn name(&self) -> &str {
        "norges-bank"
    }
}
