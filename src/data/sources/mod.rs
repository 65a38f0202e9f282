//! Sources of SDMX-JSON exchange rate responses
//!
//! - Norges Bank: the live `EXR` dataflow over HTTP
//! - Static: a response body held in memory (saved files, tests)
//!
//! All sources are behind the `async` feature; the extraction engine itself
//! never performs I/O.

#[cfg(feature = "async")]
pub mod norges_bank;

#[cfg(feature = "async")]
pub use norges_bank::NorgesBankSource;

#[cfg(feature = "async")]
use crate::engine::ExtractionEngine;
#[cfg(feature = "async")]
use crate::error::Result;
#[cfg(feature = "async")]
use crate::request::{RateRequest, RequestTracker};
#[cfg(feature = "async")]
use crate::sdmx::{AlignedDataset, SdmxResponse};

/// Trait for SDMX-JSON sources
#[cfg(feature = "async")]
pub trait SdmxSource: Send + Sync {
    /// Fetch the raw response for a request
    fn fetch(
        &self,
        request: &RateRequest,
    ) -> impl std::future::Future<Output = Result<SdmxResponse>> + Send;

    /// Get the source name
    fn name(&self) -> &str;
}

/// Source that always answers with the same body
#[cfg(feature = "async")]
pub struct StaticSource {
    body: String,
}

#[cfg(feature = "async")]
impl StaticSource {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }
}

#[cfg(feature = "async")]
impl SdmxSource for StaticSource {
    async fn fetch(&self, _request: &RateRequest) -> Result<SdmxResponse> {
        SdmxResponse::from_json(&self.body)
    }

    fn name(&self) -> &str {
        "static"
    }
}

/// Fetch and extract `request`, unless a newer request was started meanwhile.
///
/// Takes a token from `tracker` before fetching and returns `Ok(None)` when
/// that token is no longer current once the response has arrived.
#[cfg(feature = "async")]
pub async fn fetch_latest<S: SdmxSource>(
    source: &S,
    tracker: &RequestTracker,
    engine: &ExtractionEngine,
    request: &RateRequest,
) -> Result<Option<AlignedDataset>> {
    let token = tracker.begin();
    let response = source.fetch(request).await?;

    if !tracker.is_current(token) {
        log::debug!(
            "Dropping stale {} response for {} (generation {})",
            source.name(),
            request.series_path(),
            token.generation()
        );
        return Ok(None);
    }

    engine.extract(&response, request).map(Some)
}

#[cfg(test)]
#[cfg(feature = "async")]
mod tests {
    use super::*;

    const BODY: &str = r#"{"data":{"dataSets":[{"series":{"0:0:0:0":{"observations":{"0":["9.41"]}}}}],
        "structure":{"dimensions":{"observation":[{"id":"TIME_PERIOD","values":[{"id":"2020","name":"2020"}]}]}}}}"#;

    #[tokio::test]
    async fn test_static_source() {
        let source = StaticSource::new(BODY);
        let response = source.fetch(&RateRequest::default()).await.unwrap();
        assert_eq!(response.first_data_set().unwrap().series.len(), 1);
        assert_eq!(source.name(), "static");
    }

    #[tokio::test]
    async fn test_fetch_latest_current() {
        let tracker = RequestTracker::new();
        let dataset = fetch_latest(
            &StaticSource::new(BODY),
            &tracker,
            &ExtractionEngine::default(),
            &RateRequest::default(),
        )
        .await
        .unwrap()
        .unwrap();

        assert_eq!(dataset.series()[0].values(), vec![9.41]);
    }

    struct SupersedingSource<'a> {
        tracker: &'a RequestTracker,
    }

    impl SdmxSource for SupersedingSource<'_> {
        async fn fetch(&self, _request: &RateRequest) -> Result<SdmxResponse> {
            // a newer request starts while this one is in flight
            self.tracker.begin();
            SdmxResponse::from_json(BODY)
        }

        fn name(&self) -> &str {
            "superseding"
        }
    }

    #[tokio::test]
    async fn test_fetch_latest_drops_stale() {
        let tracker = RequestTracker::new();
        let source = SupersedingSource { tracker: &tracker };

        let result = fetch_latest(&source, &tracker, &ExtractionEngine::default(), &RateRequest::default())
            .await
            .unwrap();
        assert!(result.is_none());
    }
}
