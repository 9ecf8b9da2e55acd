//! Export of extracted bills to CSV and chart series.

pub mod chart;
pub mod csv;

use std::fmt::Write;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::ExportError;

/// Format a date with a strftime pattern, rejecting invalid patterns instead
/// of panicking.
pub fn format_date(date: NaiveDate, format: &str) -> Result<String, ExportError> {
    let mut out = String::new();
    write!(out, "{}", date.format(format))
        .map_err(|_| ExportError::DateFormat(format.to_string()))?;
    Ok(out)
}

/// Render a decimal without trailing zeros (`670.6850` -> `670.685`).
pub fn format_decimal(value: Decimal) -> String {
    value.normalize().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 18).unwrap();
        assert_eq!(format_date(date, "%Y-%m-%d").unwrap(), "2025-01-18");
        assert_eq!(format_date(date, "%d/%m/%Y").unwrap(), "18/01/2025");
    }

    #[test]
    fn test_invalid_date_format() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 18).unwrap();
        assert!(matches!(format_date(date, "%Q"), Err(ExportError::DateFormat(_))));
    }

    #[test]
    fn test_format_decimal() {
        assert_eq!(format_decimal(Decimal::from_str("1203.000").unwrap()), "1203");
        assert_eq!(format_decimal(Decimal::from_str("4203.82").unwrap()), "4203.82");
    }
}
