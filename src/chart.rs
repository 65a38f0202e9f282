//! Chart-ready output: one label list plus one value array per series

use crate::currency::{CurrencyCode, QUOTE_CURRENCY};
use crate::error::{Result, ValutaError};
use crate::sdmx::AlignedDataset;
use crate::types::Rate;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Display rescaling of one currency, e.g. SEK shown per 10 units of NOK
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleRule {
    pub currency: CurrencyCode,
    pub divisor: f64,
}

impl ScaleRule {
    pub fn new(currency: CurrencyCode, divisor: f64) -> Result<Self> {
        if !divisor.is_finite() || divisor <= 0.0 {
            return Err(ValutaError::ConfigError(format!(
                "scale divisor for {} must be positive, got {}",
                currency, divisor
            )));
        }
        Ok(Self { currency, divisor })
    }
}

/// Series label and values as a line chart consumes them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub label: String,
    pub currency: CurrencyCode,
    pub values: Vec<Rate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartSeries>,
}

impl ChartData {
    /// Convert a dataset, applying the first matching scale rule per series
    pub fn from_dataset(dataset: &AlignedDataset, rules: &[ScaleRule]) -> Self {
        let datasets = dataset
            .series()
            .iter()
            .map(|series| {
                let rule = rules.iter().find(|rule| rule.currency == series.currency);
                let (label, values) = match rule {
                    Some(rule) => (
                        format!(
                            "{} {} to {} Exchange Rate",
                            rule.divisor, series.currency, QUOTE_CURRENCY
                        ),
                        series.values().iter().map(|v| v / rule.divisor).collect(),
                    ),
                    None => (
                        format!("{} to {} Exchange Rate", series.currency, QUOTE_CURRENCY),
                        series.values(),
                    ),
                };
                ChartSeries {
                    label,
                    currency: series.currency.clone(),
                    values,
                }
            })
            .collect();

        Self {
            labels: dataset.labels().to_vec(),
            datasets,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Write `period,CUR1,CUR2,...` rows; gaps are left empty
pub fn write_csv<W: Write>(dataset: &AlignedDataset, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let csv_err = |e: csv::Error| ValutaError::DataError(format!("CSV write error: {}", e));

    let mut header = vec!["period".to_string()];
    header.extend(dataset.currencies().iter().map(|c| c.to_string()));
    csv_writer.write_record(&header).map_err(csv_err)?;

    for (i, period) in dataset.axis().iter().enumerate() {
        let mut row = vec![period.to_string()];
        row.extend(dataset.series().iter().map(|series| {
            series.observations[i]
                .rate()
                .map(|v| v.to_string())
                .unwrap_or_default()
        }));
        csv_writer.write_record(&row).map_err(csv_err)?;
    }

    csv_writer.flush()?;
    Ok(())
}
