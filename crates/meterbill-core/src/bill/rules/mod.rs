//! Rule-based field extractors for electricity bills.

pub mod patterns;
pub mod numbers;
pub mod period;
pub mod usage;
pub mod tiers;
pub mod charge;

pub use numbers::parse_decimal;
pub use period::{extract_period, BillingPeriod, PeriodExtractor};
pub use usage::{ConsumptionExtractor, DailyAverageExtractor};
pub use tiers::{extract_tiers, TierExtractor};
pub use charge::ChargeExtractor;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the first occurrence of the field.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field, left to right.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A value located in the source text.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Byte span in source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, source: impl Into<String>) -> Self {
        Self {
            value,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }

    /// Wrap the whole regex match, span included.
    pub(crate) fn from_match(value: T, m: regex::Match<'_>) -> Self {
        Self::new(value, m.as_str()).with_position(m.start(), m.end())
    }
}
