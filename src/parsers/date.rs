//! Date key parsing and weekday lookup

use chrono::{Datelike, NaiveDate};

use crate::types::{Result, WeekgridError};

/// Date key format: "05 Mar 2024"
pub const DATE_FORMAT: &str = "%d %b %Y";

/// Parse a "DD Mon YYYY" date key
pub fn parse_date(key: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(key.trim(), DATE_FORMAT).map_err(|_| {
        WeekgridError::MalformedDate {
            key: key.to_string(),
        }
    })
}

/// Weekday row for a date, Monday = 0 .. Sunday = 6
pub fn weekday(date: NaiveDate) -> usize {
    date.weekday().num_days_from_monday() as usize
}

/// Monday of the week containing `date`
pub fn week_monday(date: NaiveDate) -> NaiveDate {
    date - chrono::Duration::days(weekday(date) as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        let date = parse_date("05 Mar 2024").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
    }

    #[test]
    fn test_parse_date_malformed() {
        for key in ["2024-03-05", "05 March 2024x", "31 Feb 2024", ""] {
            let err = parse_date(key).unwrap_err();
            assert!(matches!(err, WeekgridError::MalformedDate { .. }), "{}", key);
        }
    }

    #[test]
    fn test_weekday_monday_is_zero() {
        // 2024-01-01 was a Monday
        let monday = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(weekday(monday), 0);
        assert_eq!(weekday(monday + chrono::Duration::days(2)), 2);
        assert_eq!(weekday(monday + chrono::Duration::days(6)), 6);
    }

    #[test]
    fn test_week_monday() {
        let thursday = NaiveDate::from_ymd_opt(2024, 1, 4).unwrap();
        assert_eq!(
            week_monday(thursday),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
        let monday = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();
        assert_eq!(week_monday(monday), monday);
    }
}
