//! Electricity billing period extraction.

use chrono::NaiveDate;
use regex::Captures;
use tracing::{trace, warn};

use super::patterns::ELECTRICITY_PERIOD;
use super::{ExtractionMatch, FieldExtractor};

/// Start and end of the electricity billing period.
///
/// Either date is `None` when the header matched but the digits do not form a
/// real calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BillingPeriod {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

/// Extracts the period header of the ELECTRICITY section.
pub struct PeriodExtractor;

impl PeriodExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PeriodExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for PeriodExtractor {
    type Output = ExtractionMatch<BillingPeriod>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        ELECTRICITY_PERIOD
            .captures(text)
            .and_then(|caps| period_from_captures(&caps))
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        ELECTRICITY_PERIOD
            .captures_iter(text)
            .filter_map(|caps| period_from_captures(&caps))
            .collect()
    }
}

fn period_from_captures(caps: &Captures<'_>) -> Option<ExtractionMatch<BillingPeriod>> {
    let full_match = caps.get(0)?;
    trace!("Period header matched: {:?}", full_match.as_str());

    let start = parse_dmy(&caps[1], &caps[2], &caps[3]);
    let end = parse_dmy(&caps[4], &caps[5], &caps[6]);

    if start.is_none() || end.is_none() {
        warn!("Period header {:?} contains an invalid date", full_match.as_str());
    }

    Some(ExtractionMatch::from_match(BillingPeriod { start, end }, full_match))
}

/// Build a date from day, month (1-12) and four-digit year strings.
fn parse_dmy(day: &str, month: &str, year: &str) -> Option<NaiveDate> {
    let day: u32 = day.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    let year: i32 = year.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Extract the electricity billing period, or an unset period if the
/// `ELECTRICITY … Period` header is absent.
pub fn extract_period(text: &str) -> BillingPeriod {
    PeriodExtractor::new()
        .extract(text)
        .map(|m| m.value)
        .unwrap_or_default()
}
