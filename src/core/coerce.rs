//! Cell value coercion: US-style short dates → `YYYY-MM-DD HH:MM:SS`

use chrono::{NaiveDate, NaiveDateTime};
use std::ops::RangeInclusive;

/// Canonical output layout for every recognised date or date-time
pub const CANONICAL_DATETIME: &str = "%Y-%m-%d %H:%M:%S";

/// Dash dates are fully zero-padded (`01-02-06`); slash dates may drop the
/// leading zero of month and day (`1/2/06`). Years always have two digits.
const DASH_FIELD: RangeInclusive<usize> = 2..=2;
const SLASH_FIELD: RangeInclusive<usize> = 1..=2;
const YEAR_DIGITS: RangeInclusive<usize> = 2..=2;
const HOUR_DIGITS: RangeInclusive<usize> = 1..=2;
const CLOCK_DIGITS: RangeInclusive<usize> = 2..=2;

/// Two-digit years below this land in the 2000s, the rest in the 1900s
const CENTURY_PIVOT: i32 = 69;

/// Reformat a date-like cell value, or return it unchanged.
///
/// Total and idempotent: canonical output starts with a four-digit year,
/// which none of the month-first shapes accept.
pub fn coerce_value(value: &str) -> String {
    parse_short_date(value)
        .map(|dt| format_canonical(&dt))
        .unwrap_or_else(|| value.to_string())
}

/// Parse a month-day-year value with a two-digit year and an optional
/// `H:MM` or `H:MM:SS` time. The whole string must match.
pub fn parse_short_date(value: &str) -> Option<NaiveDateTime> {
    let (date, time) = match value.split_once(' ') {
        Some((date, time)) => (date, Some(time)),
        None => (value, None),
    };

    let (separator, field_digits) = if date.contains('-') {
        ('-', DASH_FIELD)
    } else {
        ('/', SLASH_FIELD)
    };

    let mut parts = date.split(separator);
    let month = number(parts.next()?, &field_digits)?;
    let day = number(parts.next()?, &field_digits)?;
    let year = number(parts.next()?, &YEAR_DIGITS)? as i32;
    if parts.next().is_some() {
        return None;
    }
    let year = if year < CENTURY_PIVOT {
        2000 + year
    } else {
        1900 + year
    };

    let (hour, minute, second) = match time {
        Some(time) => parse_time(time)?,
        None => (0, 0, 0),
    };

    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, second)
}

fn parse_time(time: &str) -> Option<(u32, u32, u32)> {
    let mut parts = time.split(':');
    let hour = number(parts.next()?, &HOUR_DIGITS)?;
    let minute = number(parts.next()?, &CLOCK_DIGITS)?;
    let second = match parts.next() {
        Some(second) => number(second, &CLOCK_DIGITS)?,
        None => 0,
    };
    if parts.next().is_some() {
        return None;
    }
    Some((hour, minute, second))
}

// ASCII digits only; `str::parse` alone would accept a leading `+`
fn number(field: &str, digits: &RangeInclusive<usize>) -> Option<u32> {
    if !digits.contains(&field.len()) || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

pub fn format_canonical(dt: &NaiveDateTime) -> String {
    dt.format(CANONICAL_DATETIME).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dash_date() {
        assert_eq!(coerce_value("01-02-06"), "2006-01-02 00:00:00");
    }

    #[test]
    fn test_dash_date_with_minutes() {
        assert_eq!(coerce_value("12-31-23 15:04"), "2023-12-31 15:04:00");
    }

    #[test]
    fn test_slash_date_with_seconds() {
        assert_eq!(coerce_value("01/02/06 15:04:05"), "2006-01-02 15:04:05");
    }

    #[test]
    fn test_single_digit_month() {
        assert_eq!(coerce_value("1/02/06"), "2006-01-02 00:00:00");
        assert_eq!(coerce_value("7/04/21 09:30"), "2021-07-04 09:30:00");
    }

    #[test]
    fn test_non_dates_pass_through() {
        for value in [
            "hello",
            "",
            "42",
            "3.14",
            "2006-01-02",
            "1/2/06 3:04 PM",
            "13-01-06",
            "1-2-6",
            "01-02-6",
            "1-02-06",
            "3-4-5",
            " 01-02-06",
            "01-02-06 ",
            "01-02-06  15:04",
            "1/2/6",
            "1/02/2006",
            "01/02/06 15:4",
            "01/02/06 15:04:5",
            "01/02/06 15:04:05:00",
            "+1/02/06",
            "01-02/06",
        ] {
            assert_eq!(coerce_value(value), value, "value {value:?} should be unchanged");
        }
    }

    #[test]
    fn test_impossible_calendar_day_passes_through() {
        assert_eq!(coerce_value("02-30-21"), "02-30-21");
        assert_eq!(coerce_value("01-02-06 24:00"), "01-02-06 24:00");
    }

    #[test]
    fn test_century_pivot() {
        assert_eq!(coerce_value("01/02/68"), "2068-01-02 00:00:00");
        assert_eq!(coerce_value("01/02/69"), "1969-01-02 00:00:00");
    }

    #[test]
    fn test_single_digit_hour() {
        assert_eq!(coerce_value("01-02-06 3:04"), "2006-01-02 03:04:00");
    }

    #[test]
    fn test_idempotent() {
        for value in [
            "01-02-06",
            "12/31/99 23:59:59",
            "6/15/10 08:00",
            "not a date",
            "2006-01-02 15:04:05",
        ] {
            let once = coerce_value(value);
            assert_eq!(coerce_value(&once), once, "coercing {value:?} twice changed it");
        }
    }

    #[test]
    fn test_parse_short_date_returns_none_for_text() {
        assert!(parse_short_date("Sheet1").is_none());
    }
}
