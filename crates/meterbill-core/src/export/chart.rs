//! Chart-ready series built from a list of bills.
//!
//! Series are plain data; chart styling is left to the renderer.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::format_date;
use crate::error::ExportError;
use crate::models::bill::BillRecord;

/// One labelled series with a value per bill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub label: String,
    /// `None` marks a gap where the bill had no value.
    pub values: Vec<Option<f64>>,
}

/// Everything needed to draw the usage, tier breakdown and charge charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSet {
    /// X-axis labels, one per bill.
    pub labels: Vec<String>,
    pub total_consumption: ChartSeries,
    pub daily_average: ChartSeries,
    pub total_charge: ChartSeries,
    /// One series per tier index, up to the largest tier count of any bill.
    pub tiers: Vec<ChartSeries>,
}

impl ChartSet {
    /// Number of bills plotted.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

fn to_point(value: Option<Decimal>) -> Option<f64> {
    value.and_then(|v| v.to_f64())
}

/// Build chart series for bills in the given order.
///
/// Labels are the formatted period start, or the bill name when the period is
/// unknown. A bill with fewer tiers than the widest bill plots 0 for the
/// missing tiers; the records themselves are not touched.
pub fn build_series(records: &[BillRecord], date_format: &str) -> Result<ChartSet, ExportError> {
    let labels = records
        .iter()
        .map(|r| match r.period_start {
            Some(date) => format_date(date, date_format),
            None => Ok(r.name.clone()),
        })
        .collect::<Result<Vec<_>, _>>()?;

    let series = |label: &str, value: fn(&BillRecord) -> Option<Decimal>| ChartSeries {
        label: label.to_string(),
        values: records.iter().map(|r| to_point(value(r))).collect(),
    };

    let max_tiers = records.iter().map(|r| r.tiers.len()).max().unwrap_or(0);
    let tiers = (0..max_tiers)
        .map(|index| ChartSeries {
            label: format!("Tier {} usage (kWh)", index + 1),
            values: records
                .iter()
                .map(|r| Some(r.tier(index).and_then(|t| t.kwh.to_f64()).unwrap_or(0.0)))
                .collect(),
        })
        .collect();

    Ok(ChartSet {
        labels,
        total_consumption: series("Total Consumption (kWh)", |r| r.total_consumption),
        daily_average: series("Daily Average (kWh)", |r| r.daily_average),
        total_charge: series("Total Charge (R)", |r| r.total_charge),
        tiers,
    })
}
