//! # valutakurs
//!
//! Historical NOK exchange rates from the Norges Bank SDMX-JSON API, turned
//! into uniform, chart-ready time series.
//!
//! The core is a pure extraction pipeline: the time axis comes from the
//! response's `TIME_PERIOD` dimension, each requested currency is mapped to its
//! series key (the API's per-frequency order, not the request order), each
//! series is densified onto the axis, and all series are aligned into one
//! [`AlignedDataset`](sdmx::AlignedDataset).
//!
//! ## Example
//!
//! ```rust
//! use valutakurs::prelude::*;
//!
//! let body = r#"{"data":{
//!     "dataSets":[{"series":{
//!         "0:0:0:0":{"observations":{"0":["1.02"],"1":["0.98"]}},
//!         "0:1:0:0":{"observations":{"0":["11.21"]}},
//!         "0:2:0:0":{"observations":{"0":["9.01"],"1":["10.10"]}},
//!         "0:3:0:0":{"observations":{"0":["10.72"],"1":["11.28"]}}}}],
//!     "structure":{"dimensions":{"observation":[{"id":"TIME_PERIOD","values":[
//!         {"id":"2022-01","name":"2022-01"},{"id":"2022-02","name":"2022-02"}]}]}}}}"#;
//!
//! let request = RateRequest::parse(&["USD", "EUR"], "M", "2022-01-01", "2022-02-28").unwrap();
//! let dataset = ExtractionEngine::default().extract_str(body, &request).unwrap();
//!
//! assert_eq!(dataset.series()[0].values(), vec![9.01, 10.10]);
//! assert_eq!(dataset.series()[1].values(), vec![10.72, 11.28]);
//! ```

pub mod chart;
pub mod config;
pub mod currency;
pub mod data;
pub mod engine;
pub mod error;
pub mod request;
pub mod sdmx;
pub mod types;

pub mod prelude {
    //! Commonly used types and traits
    pub use crate::chart::{ChartData, ScaleRule};
    pub use crate::config::EngineConfig;
    pub use crate::currency::{CurrencyCatalog, CurrencyCode};
    pub use crate::data::frequency::Frequency;
    pub use crate::engine::ExtractionEngine;
    pub use crate::error::{Result, ValutaError};
    pub use crate::request::{RateRequest, RequestToken, RequestTracker};
    pub use crate::sdmx::{AlignedDataset, SdmxResponse, SeriesKey, SeriesKeyTable, TimeAxis};
    pub use crate::types::*;
}
