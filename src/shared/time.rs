use chrono::{DateTime, NaiveDate, Utc};

use super::errors::DomainError;

/// Parse a `yyyy-mm-dd` path parameter as midnight UTC.
pub fn parse_date(raw: &str) -> Result<DateTime<Utc>, DomainError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| DomainError::Validation(format!("Invalid date '{}', expected yyyy-mm-dd", raw)))
}

/// First instant of `month` in `year`, UTC. Months are zero-based
/// (0 = January), as clients of the hours endpoint send them.
pub fn month_start(year: i32, month: u32) -> Option<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(year, month.checked_add(1)?, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn parses_iso_date_at_midnight() {
        let dt = parse_date("2023-09-12").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2023, 9, 12));
        assert_eq!(dt.hour(), 0);
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(parse_date("12/09/2023"), Err(DomainError::Validation(_))));
        assert!(parse_date("2023-13-01").is_err());
    }

    #[test]
    fn month_start_is_zero_based() {
        let january = month_start(2024, 0).unwrap();
        assert_eq!((january.month(), january.day()), (1, 1));
        assert_eq!(month_start(2024, 11).unwrap().month(), 12);
        assert!(month_start(2024, 12).is_none());
        assert!(month_start(2024, u32::MAX).is_none());
    }
}
