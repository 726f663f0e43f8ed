use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};

use crate::constants::BUDGET_MONTH_FORMAT;

/// Adds whole years to an instant, clamping Feb 29 to Feb 28 when needed.
pub fn add_years(instant: DateTime<Utc>, years: i32) -> DateTime<Utc> {
    let months = Months::new((years.max(0) as u32) * 12);
    instant.checked_add_months(months).unwrap_or(instant)
}

/// Month label (`YYYY-MM`) for the given instant.
pub fn month_label(instant: DateTime<Utc>) -> String {
    instant.format(BUDGET_MONTH_FORMAT).to_string()
}

/// Returns true when `label` is a well-formed `YYYY-MM` month.
pub fn is_valid_month_label(label: &str) -> bool {
    if label.len() != 7 {
        return false;
    }
    NaiveDate::parse_from_str(&format!("{}-01", label), "%Y-%m-%d")
        .map(|d| d.year() >= 1)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_add_years_regular_date() {
        let start = Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap();
        let end = add_years(start, 1);
        assert_eq!(end, Utc.with_ymd_and_hms(2025, 3, 15, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_add_years_leap_day_clamps() {
        let start = Utc.with_ymd_and_hms(2024, 2, 29, 0, 0, 0).unwrap();
        let end = add_years(start, 1);
        assert_eq!(end, Utc.with_ymd_and_hms(2025, 2, 28, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_month_label() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 31, 23, 59, 0).unwrap();
        assert_eq!(month_label(instant), "2024-01");
    }

    #[test]
    fn test_month_label_validation() {
        assert!(is_valid_month_label("2024-01"));
        assert!(is_valid_month_label("1999-12"));
        assert!(!is_valid_month_label("2024-13"));
        assert!(!is_valid_month_label("2024-1"));
        assert!(!is_valid_month_label("24-01"));
        assert!(!is_valid_month_label("2024/01"));
        assert!(!is_valid_month_label("January"));
        assert!(!is_valid_month_label(""));
    }
}
