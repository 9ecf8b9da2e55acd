//! Consumption charge extraction.

use rust_decimal::Decimal;

use super::numbers::parse_decimal;
use super::patterns::CONSUMPTION_CHARGE;
use super::{ExtractionMatch, FieldExtractor};

/// Extracts the amount printed right before the `& Home User Charge` (or
/// `& Service and wires charge`) marker that closes the tiered block.
///
/// Property rates, water, refuse and sewerage totals are followed by other
/// text and are never picked up.
pub struct ChargeExtractor;

impl ChargeExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ChargeExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for ChargeExtractor {
    type Output = ExtractionMatch<Decimal>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let caps = CONSUMPTION_CHARGE.captures(text)?;
        let value = parse_decimal(&caps[1])?;
        Some(ExtractionMatch::from_match(value, caps.get(0)?))
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        CONSUMPTION_CHARGE
            .captures_iter(text)
            .filter_map(|caps| {
                let value = parse_decimal(&caps[1])?;
                Some(ExtractionMatch::from_match(value, caps.get(0)?))
            })
            .collect()
    }
}
