//! Fixed 12-column CSV export.
//!
//! Every field is double-quoted, missing values are `""` and rows are joined
//! by `\n` without a trailing newline. Only the first three tiers have
//! columns; further tiers are dropped here and nowhere else.

use std::path::Path;

use ::csv::{QuoteStyle, Terminator, WriterBuilder};
use tracing::debug;

use super::{format_date, format_decimal};
use crate::error::ExportError;
use crate::models::bill::BillRecord;
use crate::models::config::ExportConfig;

/// Header row, in column order.
pub const CSV_HEADERS: [&str; 12] = [
    "filename",
    "start_date",
    "end_date",
    "total_consumption_kwh",
    "daily_average_kwh",
    "total_charge",
    "tier_1_kwh",
    "tier_1_rate",
    "tier_2_kwh",
    "tier_2_rate",
    "tier_3_kwh",
    "tier_3_rate",
];

/// Number of tiers that get their own columns.
pub const CSV_TIER_COLUMNS: usize = 3;

/// Project a bill into its 12 CSV cells.
pub fn record_row(record: &BillRecord, date_format: &str) -> Result<Vec<String>, ExportError> {
    let date = |d: Option<chrono::NaiveDate>| -> Result<String, ExportError> {
        d.map(|d| format_date(d, date_format)).transpose().map(Option::unwrap_or_default)
    };
    let number = |v: Option<rust_decimal::Decimal>| v.map(format_decimal).unwrap_or_default();

    let mut row = Vec::with_capacity(CSV_HEADERS.len());
    row.push(record.name.clone());
    row.push(date(record.period_start)?);
    row.push(date(record.period_end)?);
    row.push(number(record.total_consumption));
    row.push(number(record.daily_average));
    row.push(number(record.total_charge));

    for index in 0..CSV_TIER_COLUMNS {
        let tier = record.tier(index);
        row.push(number(tier.map(|t| t.kwh)));
        row.push(number(tier.map(|t| t.rate)));
    }

    Ok(row)
}

/// Render bills as CSV text.
pub fn to_csv(records: &[BillRecord], config: &ExportConfig) -> Result<String, ExportError> {
    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(vec![]);

    wtr.write_record(CSV_HEADERS)?;

    for record in records {
        if record.tiers.len() > CSV_TIER_COLUMNS {
            debug!(
                "{} has {} tiers, only the first {} are exported",
                record.name,
                record.tiers.len(),
                CSV_TIER_COLUMNS
            );
        }
        wtr.write_record(record_row(record, &config.date_format)?)?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| ExportError::IntoInner(e.to_string()))?;
    let mut data = String::from_utf8(bytes)?;

    // Rows are joined, not terminated.
    if data.ends_with('\n') {
        data.pop();
    }

    Ok(data)
}

/// Write bills as CSV to a file.
pub fn write_csv(path: &Path, records: &[BillRecord], config: &ExportConfig) -> crate::Result<()> {
    let data = to_csv(records, config)?;
    std::fs::write(path, data)?;
    debug!("Wrote {} rows to {}", records.len(), path.display());
    Ok(())
}
