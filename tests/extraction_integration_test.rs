//! Integration tests for the extraction pipeline
//!
//! Raw SDMX-JSON in, aligned dataset out, across modules.

mod common;

use valutakurs::chart::{write_csv, ChartData, ScaleRule};
use valutakurs::prelude::*;

fn request(currencies: &[&str], frequency: &str) -> RateRequest {
    RateRequest::parse(currencies, frequency, "2018-01-01", "2022-12-31").unwrap()
}

#[test]
fn test_round_trip_five_periods() {
    let periods = ["2018", "2019", "2020", "2021", "2022"];
    let values = ["8.1338", "8.8011", "9.4146", "8.5990", "9.6141"];
    let resp = common::response(
        &periods,
        &[("0:0:0:0", values.iter().copied().enumerate().collect())],
    );

    let dataset = ExtractionEngine::default()
        .extract(&resp, &request(&["USD"], "A"))
        .unwrap();
    let series = &dataset.series()[0];

    assert_eq!(series.len(), 5);
    for (i, obs) in series.observations.iter().enumerate() {
        assert_eq!(obs.time_period, periods[i]);
        assert_eq!(obs.value, values[i].parse::<f64>().unwrap());
        assert!(obs.is_present());
    }
}

#[test]
fn test_annual_fixture() {
    let dataset = ExtractionEngine::default()
        .extract_str(common::ANNUAL_USD, &request(&["USD"], "A"))
        .unwrap();

    assert_eq!(dataset.labels(), &["2018", "2019", "2020", "2021", "2022"]);
    assert_eq!(
        dataset.series()[0].values(),
        vec![8.1338, 8.8011, 9.4146, 8.5990, 9.6141]
    );
}

#[test]
fn test_absent_observation_is_zero_in_place() {
    let resp = common::response(
        &["2020-01", "2020-02", "2020-03", "2020-04"],
        &[("0:0:0:0", vec![(0, "9.0"), (1, "9.1"), (3, "9.3")])],
    );

    let dataset = ExtractionEngine::default()
        .extract(&resp, &request(&["USD"], "M"))
        .unwrap();
    let series = &dataset.series()[0];

    assert_eq!(series.values(), vec![9.0, 9.1, 0.0, 9.3]);
    assert_eq!(series.observations[2].time_period, "2020-03");
    assert_eq!(series.observations[2].status, ObservationStatus::Missing);
    assert_eq!(series.observations[3].time_period, "2020-04");
}

#[test]
fn test_monthly_four_currencies_in_caller_order() {
    // Monthly keys: SEK 0, GBP 1, USD 2, EUR 3
    let resp = common::response(
        &["2022-01", "2022-02"],
        &[
            ("0:0:0:0", vec![(0, "96.8"), (1, "95.4")]),
            ("0:1:0:0", vec![(0, "11.99"), (1, "12.07")]),
            ("0:2:0:0", vec![(0, "8.82"), (1, "8.92")]),
            ("0:3:0:0", vec![(0, "9.97"), (1, "10.11")]),
        ],
    );

    let dataset = ExtractionEngine::default()
        .extract(&resp, &request(&["USD", "EUR", "GBP", "SEK"], "M"))
        .unwrap();

    let codes: Vec<&str> = dataset.currencies().iter().map(|c| c.as_str()).collect();
    assert_eq!(codes, vec!["USD", "EUR", "GBP", "SEK"]);
    assert_eq!(dataset.series()[0].values(), vec![8.82, 8.92]);
    assert_eq!(dataset.series()[1].values(), vec![9.97, 10.11]);
    assert_eq!(dataset.series()[2].values(), vec![11.99, 12.07]);
    assert_eq!(dataset.series()[3].values(), vec![96.8, 95.4]);
}

#[test]
fn test_monthly_fixture_with_structure() {
    let request = request(&["EUR", "USD", "SEK", "GBP"], "M");

    for prefer_structure in [true, false] {
        let engine = ExtractionEngine::default().with_response_structure(prefer_structure);
        let dataset = engine.extract_str(common::MONTHLY_4, &request).unwrap();

        let eur = CurrencyCode::new("EUR").unwrap();
        let usd = CurrencyCode::new("USD").unwrap();
        assert_eq!(
            dataset.values(&eur),
            Some(vec![9.9713, 10.1129, 9.7893, 9.5209])
        );
        assert_eq!(dataset.values(&usd), Some(vec![8.8275, 8.9264, 0.0, 8.8017]));
        assert_eq!(dataset.series_for(&usd).unwrap().present_count(), 3);
        assert_eq!(dataset.series()[2].currency.as_str(), "SEK");
    }
}

#[test]
fn test_invariants_hold_for_every_series() {
    let dataset = ExtractionEngine::default()
        .extract_str(common::MONTHLY_4, &request(&["SEK", "GBP", "USD", "EUR"], "M"))
        .unwrap();

    for series in dataset.series() {
        assert_eq!(series.len(), dataset.axis().len());
        for (i, obs) in series.observations.iter().enumerate() {
            assert_eq!(Some(obs.time_period.as_str()), dataset.axis().get(i));
        }
    }
}

#[test]
fn test_missing_time_period_never_partial() {
    let mut body = common::response_json(&["2020"], &[("0:0:0:0", vec![(0, "1.0")])]);
    body["data"]["structure"]["dimensions"]["observation"][0]["id"] = "PERIOD".into();
    let resp: SdmxResponse = serde_json::from_value(body).unwrap();

    let result = ExtractionEngine::default().extract(&resp, &request(&["USD"], "A"));
    assert!(matches!(result, Err(ValutaError::MissingDimension(ref id)) if id == "TIME_PERIOD"));
}

#[test]
fn test_daily_unmapped_currency_fails_whole_request() {
    let resp = common::response(&["2020-03-17"], &[("0:0:0:0", vec![(0, "10.9")])]);
    let result = ExtractionEngine::default().extract(&resp, &request(&["USD", "JPY"], "B"));
    assert!(matches!(result, Err(ValutaError::UnmappedCurrency { .. })));
}

#[test]
fn test_chart_output_from_fixture() {
    let dataset = ExtractionEngine::default()
        .extract_str(common::MONTHLY_4, &request(&["USD", "SEK"], "M"))
        .unwrap();
    let rules = vec![ScaleRule::new(CurrencyCode::new("SEK").unwrap(), 10.0).unwrap()];
    let chart = ChartData::from_dataset(&dataset, &rules);

    assert_eq!(chart.labels.len(), 4);
    assert!(chart.datasets.iter().all(|d| d.values.len() == chart.labels.len()));
    assert_eq!(chart.datasets[1].label, "10 SEK to NOK Exchange Rate");
    approx::assert_relative_eq!(chart.datasets[1].values[0], 9.6813, epsilon = 1e-9);

    let mut csv = Vec::new();
    write_csv(&dataset, &mut csv).unwrap();
    let csv = String::from_utf8(csv).unwrap();
    assert!(csv.starts_with("period,USD,SEK\n2022-01,8.8275,96.813\n"));
    assert!(csv.contains("2022-03,,93.871\n"));
}

#[test]
fn test_reextracting_is_side_effect_free() {
    let engine = ExtractionEngine::default();
    let req = request(&["GBP", "EUR"], "M");

    let first = engine.extract_str(common::MONTHLY_4, &req).unwrap();
    let _other = engine.extract_str(common::ANNUAL_USD, &request(&["USD"], "A")).unwrap();
    let again = engine.extract_str(common::MONTHLY_4, &req).unwrap();

    assert_eq!(first, again);
}
