//! Property tests for densification and alignment

mod common;

use proptest::prelude::*;
use valutakurs::prelude::*;

fn labels(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("{}", 1900 + i)).collect()
}

/// Sparse observations: each slot is absent or carries a small positive rate
fn sparse_series(n: usize) -> impl Strategy<Value = Vec<Option<u32>>> {
    prop::collection::vec(prop::option::of(1u32..100_000), n)
}

fn build(n: usize, series: &[Vec<Option<u32>>]) -> (Vec<String>, SdmxResponse) {
    let periods = labels(n);
    let period_refs: Vec<&str> = periods.iter().map(String::as_str).collect();

    let values: Vec<Vec<(usize, String)>> = series
        .iter()
        .map(|slots| {
            slots
                .iter()
                .enumerate()
                .filter_map(|(i, v)| v.map(|v| (i, format!("{}.{:04}", v / 10_000, v % 10_000))))
                .collect()
        })
        .collect();
    let keys: Vec<String> = (0..series.len()).map(|i| format!("0:{}:0:0", i)).collect();
    let entries: Vec<(&str, Vec<(usize, &str)>)> = keys
        .iter()
        .zip(&values)
        .map(|(key, obs)| {
            (
                key.as_str(),
                obs.iter().map(|(i, v)| (*i, v.as_str())).collect(),
            )
        })
        .collect();

    let response = common::response(&period_refs, &entries);
    (periods, response)
}

proptest! {
    #[test]
    fn prop_every_series_matches_axis(
        (n, series) in (1usize..40).prop_flat_map(|n| (Just(n), prop::collection::vec(sparse_series(n), 4)))
    ) {
        let (periods, resp) = build(n, &series);
        let request = RateRequest::parse(&["USD", "EUR", "GBP", "SEK"], "A", "1900-01-01", "1999-12-31").unwrap();
        let dataset = ExtractionEngine::default().extract(&resp, &request).unwrap();

        prop_assert_eq!(dataset.len(), n);
        prop_assert_eq!(dataset.series().len(), 4);
        for ts in dataset.series() {
            prop_assert_eq!(ts.len(), n);
            for (i, obs) in ts.observations.iter().enumerate() {
                prop_assert_eq!(&obs.time_period, &periods[i]);
            }
        }
    }

    #[test]
    fn prop_absent_slots_are_zero_and_missing(
        (n, slots) in (1usize..60).prop_flat_map(|n| (Just(n), sparse_series(n)))
    ) {
        let (_, resp) = build(n, std::slice::from_ref(&slots));
        let request = RateRequest::parse(&["USD"], "A", "1900-01-01", "1999-12-31").unwrap();
        let dataset = ExtractionEngine::default().extract(&resp, &request).unwrap();
        let ts = &dataset.series()[0];

        for (slot, obs) in slots.iter().zip(&ts.observations) {
            match slot {
                Some(v) => {
                    prop_assert!(obs.is_present());
                    prop_assert!((obs.value - f64::from(*v) / 10_000.0).abs() < 1e-9);
                }
                None => {
                    prop_assert_eq!(obs.status, ObservationStatus::Missing);
                    prop_assert_eq!(obs.value, 0.0);
                }
            }
        }
        prop_assert_eq!(ts.present_count(), slots.iter().filter(|s| s.is_some()).count());
    }
}
