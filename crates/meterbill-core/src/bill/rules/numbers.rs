//! Decimal parsing for bill figures.

use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::warn;

/// Parse a plain base-10 number such as `"670.6850"` or `"35"`.
///
/// No thousands separators are accepted. The result is normalized, so
/// trailing zeros in the fraction are dropped (`"1203.000"` becomes `1203`).
/// Returns `None` for anything that is not a number or does not fit.
pub fn parse_decimal(s: &str) -> Option<Decimal> {
    let s = s.trim();
    if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }

    match Decimal::from_str(s) {
        Ok(value) => Some(value.normalize()),
        Err(e) => {
            warn!("Could not parse number {:?}: {}", s, e);
            None
        }
    }
}
