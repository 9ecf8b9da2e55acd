//! Tiered consumption/rate extraction.

use tracing::trace;

use super::numbers::parse_decimal;
use super::patterns::TIER;
use super::{ExtractionMatch, FieldExtractor};
use crate::models::bill::Tier;

/// Extracts `(N) <kwh> kWh @ R <rate>` brackets.
///
/// The bracket label `N` is ignored; a tier's index is its position in the
/// text.
pub struct TierExtractor;

impl TierExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TierExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for TierExtractor {
    type Output = ExtractionMatch<Tier>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results = Vec::new();

        for caps in TIER.captures_iter(text) {
            let (Some(kwh), Some(rate)) = (parse_decimal(&caps[1]), parse_decimal(&caps[2])) else {
                continue;
            };

            if let Some(full_match) = caps.get(0) {
                trace!("Tier {} matched: {:?}", results.len() + 1, full_match.as_str());
                results.push(ExtractionMatch::from_match(Tier::new(kwh, rate), full_match));
            }
        }

        results
    }
}

/// Extract every tier in text order.
pub fn extract_tiers(text: &str) -> Vec<Tier> {
    TierExtractor::new()
        .extract_all(text)
        .into_iter()
        .map(|m| m.value)
        .collect()
}
