//! Ordering of extracted bills.

use std::cmp::Ordering;

use crate::models::bill::BillRecord;

/// Compare two bills by period start. Bills without a start date sort after
/// every dated bill.
pub fn compare_by_period(a: &BillRecord, b: &BillRecord) -> Ordering {
    match (a.period_start, b.period_start) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Sort bills ascending by period start, in place.
///
/// The sort is stable: bills with equal or missing start dates keep their
/// input order.
pub fn sort_by_period(records: &mut [BillRecord]) {
    records.sort_by(compare_by_period);
}

/// Owned variant of [`sort_by_period`].
pub fn sorted_by_period(mut records: Vec<BillRecord>) -> Vec<BillRecord> {
    sort_by_period(&mut records);
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn bill(name: &str, start: Option<(i32, u32, u32)>) -> BillRecord {
        let mut record = BillRecord::new(name);
        record.period_start = start.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d));
        record
    }

    fn names(records: &[BillRecord]) -> Vec<&str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_sort_ascending() {
        let records = sorted_by_period(vec![
            bill("mar", Some((2025, 3, 1))),
            bill("jan", Some((2025, 1, 1))),
            bill("feb", Some((2025, 2, 1))),
        ]);
        assert_eq!(names(&records), vec!["jan", "feb", "mar"]);
    }

    #[test]
    fn test_undated_sort_last_in_input_order() {
        let records = sorted_by_period(vec![
            bill("undated-a", None),
            bill("feb", Some((2025, 2, 1))),
            bill("undated-b", None),
            bill("jan", Some((2025, 1, 1))),
        ]);
        assert_eq!(names(&records), vec!["jan", "feb", "undated-a", "undated-b"]);
    }

    #[test]
    fn test_equal_dates_are_stable() {
        let records = sorted_by_period(vec![
            bill("second", Some((2025, 1, 1))),
            bill("first", Some((2024, 12, 1))),
            bill("third", Some((2025, 1, 1))),
        ]);
        assert_eq!(names(&records), vec!["first", "second", "third"]);
    }
}
