//! Total consumption and daily average extraction.

use regex::Regex;
use rust_decimal::Decimal;

use super::numbers::parse_decimal;
use super::patterns::{CONSUMPTION, DAILY_AVERAGE};
use super::{ExtractionMatch, FieldExtractor};

/// Total kWh for the period ("Consumption 889.000 kWh").
pub struct ConsumptionExtractor;

impl ConsumptionExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsumptionExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for ConsumptionExtractor {
    type Output = ExtractionMatch<Decimal>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        first_kwh(&CONSUMPTION, text)
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        all_kwh(&CONSUMPTION, text)
    }
}

/// Average kWh per day ("Daily average 27.781 kWh").
pub struct DailyAverageExtractor;

impl DailyAverageExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DailyAverageExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DailyAverageExtractor {
    type Output = ExtractionMatch<Decimal>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        first_kwh(&DAILY_AVERAGE, text)
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        all_kwh(&DAILY_AVERAGE, text)
    }
}

// Only the first regex match is considered; a later match is never used as a
// fallback when the first one fails to parse.
fn first_kwh(pattern: &Regex, text: &str) -> Option<ExtractionMatch<Decimal>> {
    let caps = pattern.captures(text)?;
    let value = parse_decimal(&caps[1])?;
    Some(ExtractionMatch::from_match(value, caps.get(0)?))
}

fn all_kwh(pattern: &Regex, text: &str) -> Vec<ExtractionMatch<Decimal>> {
    pattern
        .captures_iter(text)
        .filter_map(|caps| {
            let value = parse_decimal(&caps[1])?;
            Some(ExtractionMatch::from_match(value, caps.get(0)?))
        })
        .collect()
}
