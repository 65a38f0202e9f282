//! SDMX-JSON extraction and alignment
//!
//! Turns a dimension-indexed SDMX-JSON data message into chart-ready series.
//!
//! # Components
//!
//! - **response**: serde model of the data message
//! - **time_axis**: period labels from the `TIME_PERIOD` dimension
//! - **series_key**: per-frequency mapping from currency to series key
//! - **observation**: sparse observations to dense, axis-aligned values
//! - **aligner**: all series on one axis, invariants checked
//!
//! # Example
//!
//! ```rust
//! use valutakurs::sdmx::{ObservationParser, SdmxResponse, SeriesKeyResolver, TimeAxis, MultiSeriesAligner};
//! use valutakurs::currency::CurrencyCode;
//! use valutakurs::data::frequency::Frequency;
//!
//! let body = r#"{"data":{
//!     "dataSets":[{"series":{"0:0:0:0":{"observations":{"0":["9.41"],"1":["8.60"]}}}}],
//!     "structure":{"dimensions":{"observation":[{"id":"TIME_PERIOD","values":[
//!         {"id":"2020","name":"2020"},{"id":"2021","name":"2021"}]}]}}}}"#;
//!
//! let response = SdmxResponse::from_json(body).unwrap();
//! let axis = TimeAxis::from_response(&response).unwrap();
//! let usd = CurrencyCode::new("USD").unwrap();
//! let keys = SeriesKeyResolver::default().resolve(Frequency::Annual, &[usd]).unwrap();
//! let data_set = response.first_data_set().unwrap();
//!
//! let series = keys
//!     .iter()
//!     .map(|(currency, key)| ObservationParser::parse(&axis, currency, key, &data_set.series))
//!     .collect();
//! let dataset = MultiSeriesAligner::align(axis, series).unwrap();
//! assert_eq!(dataset.series()[0].values(), vec![9.41, 8.60]);
//! ```

pub mod aligner;
pub mod observation;
pub mod response;
pub mod series_key;
pub mod time_axis;

pub use aligner::{AlignedDataset, MultiSeriesAligner};
pub use observation::ObservationParser;
pub use response::{DataSet, Dimension, DimensionValue, SdmxResponse, SeriesEntry, SeriesMap};
pub use series_key::{SeriesKey, SeriesKeyResolver, SeriesKeyTable};
pub use time_axis::{TimeAxis, TIME_PERIOD};
