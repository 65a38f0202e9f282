//! Typed model of an SDMX-JSON data message
//!
//! Only the parts the extraction pipeline reads are modelled; every other
//! field of the message (attributes, annotations, header) is ignored.

use crate::error::{Result, ValutaError};
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

/// Sparse positional index (as string) to a single-element value array
pub type RawObservations = HashMap<String, Vec<serde_json::Value>>;

/// Series key to series payload
pub type SeriesMap = HashMap<String, SeriesEntry>;

/// Top-level SDMX-JSON document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SdmxResponse {
    pub data: SdmxData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SdmxData {
    #[serde(rename = "dataSets", default)]
    pub data_sets: Vec<DataSet>,
    pub structure: Structure,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataSet {
    #[serde(default)]
    pub series: SeriesMap,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeriesEntry {
    #[serde(default)]
    pub observations: RawObservations,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Structure {
    pub dimensions: Dimensions,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dimensions {
    #[serde(default)]
    pub observation: Vec<Dimension>,
    #[serde(default)]
    pub series: Vec<Dimension>,
}

/// Dimension descriptor with its ordered values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dimension {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "keyPosition", default)]
    pub key_position: Option<usize>,
    #[serde(default)]
    pub values: Vec<DimensionValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DimensionValue {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

impl SdmxResponse {
    /// Parse a response body
    pub fn from_json(body: &str) -> Result<Self> {
        Ok(serde_json::from_str(body)?)
    }

    pub fn from_slice(body: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(body)?)
    }

    /// The data set the pipeline reads; the API returns exactly one
    pub fn first_data_set(&self) -> Result<&DataSet> {
        self.data
            .data_sets
            .first()
            .ok_or_else(|| ValutaError::DataError("No data set in response".to_string()))
    }

    pub fn observation_dimensions(&self) -> &[Dimension] {
        &self.data.structure.dimensions.observation
    }

    pub fn series_dimensions(&self) -> &[Dimension] {
        &self.data.structure.dimensions.series
    }
}

/// Find a dimension by id
pub fn find_dimension<'a>(dimensions: &'a [Dimension], id: &str) -> Option<&'a Dimension> {
    dimensions.iter().find(|dim| dim.id == id)
}
