//! Rule-based electricity bill parser.

use std::time::Instant;

use tracing::{debug, info};

use crate::models::bill::BillRecord;

use super::rules::{
    period::extract_period,
    tiers::extract_tiers,
    ChargeExtractor, ConsumptionExtractor, DailyAverageExtractor, FieldExtractor,
};
use super::BillParser;

/// Result of bill extraction.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Extracted bill record.
    pub record: BillRecord,
    /// Names of fields that were left unset.
    pub missing_fields: Vec<&'static str>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Extracts a [`BillRecord`] from flattened statement text.
///
/// Holds no state beyond its settings; the compiled patterns are shared and
/// immutable, so one extractor can serve many threads.
#[derive(Debug, Clone)]
pub struct BillTextExtractor {
    /// Whether to log the full record at debug level.
    log_records: bool,
}

impl BillTextExtractor {
    /// Create a new extractor with default settings.
    pub fn new() -> Self {
        Self { log_records: true }
    }

    /// Set record logging.
    pub fn with_record_logging(mut self, enabled: bool) -> Self {
        self.log_records = enabled;
        self
    }

    /// Extract a bill record. Never fails; unmatched fields stay unset.
    pub fn extract(&self, name: &str, text: &str) -> BillRecord {
        let period = extract_period(text);

        let record = BillRecord {
            name: name.to_string(),
            period_start: period.start,
            period_end: period.end,
            total_consumption: ConsumptionExtractor::new().extract(text).map(|m| m.value),
            daily_average: DailyAverageExtractor::new().extract(text).map(|m| m.value),
            total_charge: ChargeExtractor::new().extract(text).map(|m| m.value),
            tiers: extract_tiers(text),
        };

        if self.log_records {
            debug!("Extracted data: {:?}", record);
        }

        record
    }

    /// Extract a bill record along with a report of what was not found.
    pub fn extract_with_report(&self, name: &str, text: &str) -> ExtractionResult {
        let start = Instant::now();

        info!("Parsing bill {} from {} characters of text", name, text.len());

        let record = self.extract(name, text);
        let missing_fields = record.missing_fields();

        if !record.has_usage() {
            info!("No consumption or tier data found in {}", name);
        } else if !missing_fields.is_empty() {
            debug!("{}: missing {}", name, missing_fields.join(", "));
        }

        ExtractionResult {
            record,
            missing_fields,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}

impl Default for BillTextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl BillParser for BillTextExtractor {
    fn parse(&self, name: &str, text: &str) -> ExtractionResult {
        self.extract_with_report(name, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::bill::Tier;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    const REAL_BILL: &str = include_str!("../../testdata/real_bill.txt");

    const SIMPLE_BILL: &str = "\nMeter no: 959439 / Consumption 1203.000 kWh / Daily average 35.382 kWh\n\
        (1) 670.6850 kWh @ R 2.9870 (2) 532.3150 kWh @ R 4.1338    4203.82 &   Home User Charge \n";

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_simple_bill() {
        let record = BillTextExtractor::new().extract("dummy.pdf", SIMPLE_BILL);

        assert_eq!(
            record,
            BillRecord {
                name: "dummy.pdf".to_string(),
                period_start: None,
                period_end: None,
                total_consumption: Some(dec("1203")),
                daily_average: Some(dec("35.382")),
                total_charge: Some(dec("4203.82")),
                tiers: vec![
                    Tier::new(dec("670.685"), dec("2.987")),
                    Tier::new(dec("532.315"), dec("4.1338")),
                ],
            }
        );
    }

    #[test]
    fn test_real_bill() {
        let record = BillTextExtractor::new().extract("real_bill.pdf", REAL_BILL);

        assert_eq!(record.period_start, NaiveDate::from_ymd_opt(2025, 1, 18));
        assert_eq!(record.period_end, NaiveDate::from_ymd_opt(2025, 2, 18));
        assert_eq!(record.total_consumption, Some(dec("889")));
        assert_eq!(record.daily_average, Some(dec("27.781")));
        assert_eq!(record.total_charge, Some(dec("2951.05")));
        assert_eq!(
            record.tiers,
            vec![
                Tier::new(dec("631.233"), dec("2.987")),
                Tier::new(dec("257.767"), dec("4.1338")),
            ]
        );
    }

    #[test]
    fn test_empty_text() {
        let result = BillTextExtractor::new().extract_with_report("empty.pdf", "");

        assert_eq!(result.record, BillRecord::new("empty.pdf"));
        assert!(result.record.tiers.is_empty());
        assert_eq!(result.missing_fields.len(), 6);
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let extractor = BillTextExtractor::new();
        assert_eq!(
            extractor.extract("real_bill.pdf", REAL_BILL),
            extractor.extract("real_bill.pdf", REAL_BILL)
        );
    }

    #[test]
    fn test_fields_are_independent() {
        // Charge without any of the other fields.
        let record = BillTextExtractor::new().extract("partial.pdf", "12.50 & Home User Charge");

        assert_eq!(record.total_charge, Some(dec("12.5")));
        assert_eq!(record.total_consumption, None);
        assert_eq!(record.daily_average, None);
        assert!(record.tiers.is_empty());
    }

    #[test]
    fn test_no_anchor_no_period() {
        let text = "WATER ( Period 17/01/2025 to 17/02/2025 -  32 Days ) Consumption 889.000 kWh";
        let record = BillTextExtractor::new().extract("water.pdf", text);

        assert_eq!(record.period_start, None);
        assert_eq!(record.period_end, None);
        assert_eq!(record.total_consumption, Some(dec("889")));
    }

    #[test]
    fn test_report_lists_missing_fields() {
        let result = BillTextExtractor::new()
            .with_record_logging(false)
            .parse("dummy.pdf", SIMPLE_BILL);

        assert_eq!(result.missing_fields, vec!["period_start", "period_end"]);
    }

    #[test]
    fn test_concurrent_extraction() {
        let extractor = BillTextExtractor::new();
        let records: Vec<BillRecord> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|i| {
                    let extractor = &extractor;
                    scope.spawn(move || extractor.extract(&format!("bill_{i}.pdf"), REAL_BILL))
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        for record in &records {
            assert_eq!(record.total_charge, Some(dec("2951.05")));
        }
    }
}
