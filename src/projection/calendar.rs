//! Calendar-month arithmetic for projection labels
//!
//! Every label the projection emits is normalized to the first of its month;
//! the day component is never anything but 1.

use chrono::{Datelike, Months, NaiveDate};

/// Truncate a date to the first of its month
pub fn first_of_month(d: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(d.year(), d.month(), 1).expect("day 1 exists in every month")
}

/// First of the month following `today`; the anchor for month 0's label
pub fn first_of_next_month(today: NaiveDate) -> NaiveDate {
    add_months(today, 1)
}

/// Advance `d` by `n` calendar months, normalized to the first of the month
pub fn add_months(d: NaiveDate, n: u32) -> NaiveDate {
    first_of_month(d)
        .checked_add_months(Months::new(n))
        .expect("projection horizon stays within the calendar range")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_first_of_next_month_mid_month() {
        assert_eq!(first_of_next_month(d(2026, 8, 7)), d(2026, 9, 1));
    }

    #[test]
    fn test_first_of_next_month_year_rollover() {
        assert_eq!(first_of_next_month(d(2026, 12, 31)), d(2027, 1, 1));
    }

    #[test]
    fn test_add_months_normalizes_to_first() {
        assert_eq!(add_months(d(2026, 1, 31), 1), d(2026, 2, 1));
    }

    #[test]
    fn test_add_months_spans_years() {
        // 780 months = 65 years
        assert_eq!(add_months(d(2026, 9, 1), 779), d(2091, 8, 1));
    }

    #[test]
    fn test_add_zero_months() {
        assert_eq!(add_months(d(2026, 9, 1), 0), d(2026, 9, 1));
    }
}
