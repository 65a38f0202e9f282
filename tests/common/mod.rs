//! Synthetic SDMX-JSON responses for integration tests

#![allow(dead_code)]

use serde_json::{json, Map, Value};
use valutakurs::sdmx::SdmxResponse;

pub const MONTHLY_4: &str = include_str!("../fixtures/exr_monthly_4.json");
pub const ANNUAL_USD: &str = include_str!("../fixtures/exr_annual_usd.json");

/// Build a response with the given period labels and series.
///
/// Each series is `(key, [(position, value)])`; positions not listed are absent.
pub fn response(periods: &[&str], series: &[(&str, Vec<(usize, &str)>)]) -> SdmxResponse {
    serde_json::from_value(response_json(periods, series)).expect("valid synthetic response")
}

pub fn response_json(periods: &[&str], series: &[(&str, Vec<(usize, &str)>)]) -> Value {
    let mut series_map = Map::new();
    for (key, observations) in series {
        let mut obs = Map::new();
        for (position, value) in observations {
            obs.insert(position.to_string(), json!([value]));
        }
        series_map.insert(key.to_string(), json!({ "observations": obs }));
    }

    let values: Vec<Value> = periods
        .iter()
        .map(|p| json!({ "id": p, "name": p }))
        .collect();

    json!({
        "data": {
            "dataSets": [{ "series": series_map }],
            "structure": { "dimensions": {
                "observation": [{ "id": "TIME_PERIOD", "values": values }]
            }}
        }
    })
}
