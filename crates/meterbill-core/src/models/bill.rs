//! Electricity bill record extracted from statement text.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Normalized figures extracted from a single bill.
///
/// Every field except `name` and `tiers` is optional: a pattern that did not
/// match leaves its field unset rather than defaulting to zero or a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillRecord {
    /// Source identifier (file name or label).
    pub name: String,

    /// First day of the electricity billing period.
    pub period_start: Option<NaiveDate>,

    /// Last day of the electricity billing period.
    pub period_end: Option<NaiveDate>,

    /// Total kWh consumed in the period.
    pub total_consumption: Option<Decimal>,

    /// Average kWh per day.
    pub daily_average: Option<Decimal>,

    /// Total of the tiered consumption charge line.
    pub total_charge: Option<Decimal>,

    /// Tiered breakdown, in the order the tiers appear in the text.
    #[serde(default)]
    pub tiers: Vec<Tier>,
}

/// One consumption bracket and the rate it was billed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tier {
    /// kWh billed in this bracket.
    pub kwh: Decimal,

    /// Rate per kWh.
    pub rate: Decimal,
}

impl Tier {
    pub fn new(kwh: Decimal, rate: Decimal) -> Self {
        Self { kwh, rate }
    }
}

impl BillRecord {
    /// Create a record with only the name set.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            period_start: None,
            period_end: None,
            total_consumption: None,
            daily_average: None,
            total_charge: None,
            tiers: Vec::new(),
        }
    }

    /// True when consumption or at least one tier was found.
    pub fn has_usage(&self) -> bool {
        self.total_consumption.is_some() || !self.tiers.is_empty()
    }

    /// Tier at a zero-based position, if the bill has that many.
    pub fn tier(&self, index: usize) -> Option<&Tier> {
        self.tiers.get(index)
    }

    /// Names of the fields that were left unset.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.period_start.is_none() {
            missing.push("period_start");
        }
        if self.period_end.is_none() {
            missing.push("period_end");
        }
        if self.total_consumption.is_none() {
            missing.push("total_consumption");
        }
        if self.daily_average.is_none() {
            missing.push("daily_average");
        }
        if self.total_charge.is_none() {
            missing.push("total_charge");
        }
        if self.tiers.is_empty() {
            missing.push("tiers");
        }
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_new_record_is_unset() {
        let record = BillRecord::new("empty.pdf");
        assert_eq!(record.name, "empty.pdf");
        assert!(!record.has_usage());
        assert_eq!(record.missing_fields().len(), 6);
    }

    #[test]
    fn test_tiers_count_as_usage() {
        let mut record = BillRecord::new("bill.pdf");
        record.tiers.push(Tier::new(dec("631.233"), dec("2.987")));

        assert!(record.has_usage());
        assert!(!record.missing_fields().contains(&"tiers"));
    }

    #[test]
    fn test_serialized_shape() {
        let mut record = BillRecord::new("bill.pdf");
        record.period_start = NaiveDate::from_ymd_opt(2025, 1, 18);
        record.tiers.push(Tier::new(dec("1.5"), dec("2")));

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["name"], "bill.pdf");
        assert_eq!(json["period_start"], "2025-01-18");
        assert!(json["period_end"].is_null());
        assert!(json["total_charge"].is_null());
        assert_eq!(json["tiers"][0]["kwh"], "1.5");
    }
}
