//! Compiled regex patterns for electricity bill extraction.
//!
//! Whitespace between tokens is matched with `\s+`/`\s*` because the text
//! comes from a flattened PDF text layer with variable-width gaps. Digits are
//! `[0-9]`: Unicode digits never match, since they would not parse as numbers.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // "ELECTRICITY ( Period 18/01/2025 to 18/02/2025 -  32 Days )"
    // Other sections (WATER, SEWERAGE, REFUSE, PROPERTY RATES) carry their own
    // period headers, so the anchor word is required.
    pub static ref ELECTRICITY_PERIOD: Regex = Regex::new(
        r"ELECTRICITY[\s[:punct:]]*Period\s*([0-9]{1,2})/([0-9]{1,2})/([0-9]{4})\s*to\s*([0-9]{1,2})/([0-9]{1,2})/([0-9]{4})"
    ).unwrap();

    // "Consumption 889.000 kWh"
    pub static ref CONSUMPTION: Regex = Regex::new(
        r"(?i)Consumption\s+([0-9]+\.[0-9]+)\s+kWh"
    ).unwrap();

    // "Daily average 27.781 kWh" (integer values allowed)
    pub static ref DAILY_AVERAGE: Regex = Regex::new(
        r"(?i)Daily\s+average\s+([0-9]+(?:\.[0-9]+)?)\s+kWh"
    ).unwrap();

    // "(1) 631.2330 kWh @ R 2.9870"
    pub static ref TIER: Regex = Regex::new(
        r"(?i)\([0-9]+\)\s+([0-9]+\.[0-9]+)\s+kWh\s+@\s+R\s+([0-9]+\.[0-9]+)"
    ).unwrap();

    // "2951.05 &   Home User Charge" or "1234.56 & Service and wires charge"
    pub static ref CONSUMPTION_CHARGE: Regex = Regex::new(
        r"(?i)([0-9]+(?:\.[0-9]+)?)\s*&\s*(?:Home\s+User\s+Charge|Service\s+and\s+wires\s+charge)"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_requires_electricity_anchor() {
        assert!(ELECTRICITY_PERIOD.is_match("ELECTRICITY ( Period 18/01/2025 to 18/02/2025"));
        assert!(!ELECTRICITY_PERIOD.is_match("WATER ( Period 17/01/2025 to 17/02/2025"));
    }

    #[test]
    fn test_consumption_needs_fraction() {
        assert!(CONSUMPTION.is_match("Consumption 889.000 kWh"));
        assert!(CONSUMPTION.is_match("consumption   889.000   KWH"));
        assert!(!CONSUMPTION.is_match("Consumption 889 kWh"));
        assert!(!CONSUMPTION.is_match("Consumption 34.000 kl"));
    }

    #[test]
    fn test_daily_average_allows_integer() {
        let caps = DAILY_AVERAGE.captures("Daily average 35 kWh").unwrap();
        assert_eq!(&caps[1], "35");
    }

    #[test]
    fn test_non_ascii_digits_do_not_match() {
        assert!(!CONSUMPTION.is_match("Consumption ١٢.٥ kWh"));
        assert!(!TIER.is_match("(١) ٦٣١.٢ kWh @ R ٢.٩"));
        assert!(!ELECTRICITY_PERIOD.is_match("ELECTRICITY Period ١٨/01/2025 to 18/02/2025"));
    }

    #[test]
    fn test_charge_markers() {
        assert!(CONSUMPTION_CHARGE.is_match("2951.05 &   Home User Charge"));
        assert!(CONSUMPTION_CHARGE.is_match("2951.05 & SERVICE AND WIRES CHARGE"));
        assert!(!CONSUMPTION_CHARGE.is_match("1090.74 &   Fixed Basic Charge"));
    }
}
