//! Day-boundary clock.
//!
//! An accounting day runs from 03:00 UTC to the next 03:00 UTC, so activity
//! done late at night in UTC+3 still counts toward the day a person
//! considers "today" until about 6 a.m. local time.

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};

use crate::types::DayNumber;

/// Hours after UTC midnight at which a new accounting day begins.
pub const DAY_START_OFFSET_HOURS: i64 = 3;

/// Converts a timestamp to its accounting day number.
///
/// Day numbers count days from 0001-01-01 (day 1). Only differences between
/// them are meaningful.
pub fn day_number<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> DayNumber {
    let shifted = timestamp.with_timezone(&Utc) - Duration::hours(DAY_START_OFFSET_HOURS);
    i64::from(shifted.date_naive().num_days_from_ce())
}

/// Returns the calendar date a day number stands for, if representable.
pub fn date_for_day_number(day: DayNumber) -> Option<NaiveDate> {
    i32::try_from(day)
        .ok()
        .and_then(NaiveDate::from_num_days_from_ce_opt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn at(rfc3339: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(rfc3339).unwrap()
    }

    #[test]
    fn day_starts_at_three_utc() {
        let before = day_number(&at("2025-03-10T02:59:59Z"));
        let after = day_number(&at("2025-03-10T03:00:00Z"));

        assert_eq!(after - before, 1);
        assert_eq!(
            date_for_day_number(after),
            NaiveDate::from_ymd_opt(2025, 3, 10)
        );
        assert_eq!(
            date_for_day_number(before),
            NaiveDate::from_ymd_opt(2025, 3, 9)
        );
    }

    #[test]
    fn late_night_in_utc_plus_three_counts_for_previous_day() {
        // 05:30 local on the 11th is 02:30Z, still the 10th.
        let late = day_number(&at("2025-03-11T05:30:00+03:00"));
        let evening = day_number(&at("2025-03-10T21:00:00+03:00"));
        assert_eq!(late, evening);

        // 06:00 local is 03:00Z: a new day.
        let morning = day_number(&at("2025-03-11T06:00:00+03:00"));
        assert_eq!(morning - evening, 1);
    }

    #[test]
    fn offset_is_irrelevant_for_the_same_instant() {
        let utc = day_number(&at("2025-03-10T12:00:00Z"));
        let west = day_number(&at("2025-03-10T07:00:00-05:00"));
        let east = day_number(&at("2025-03-10T21:00:00+09:00"));

        assert_eq!(utc, west);
        assert_eq!(utc, east);
    }

    #[test]
    fn day_numbers_are_gap_free_across_month_boundaries() {
        let feb_end = day_number(&at("2024-02-29T12:00:00Z"));
        let mar_start = day_number(&at("2024-03-01T12:00:00Z"));
        assert_eq!(mar_start - feb_end, 1);
    }

    #[test]
    fn date_for_day_number_rejects_out_of_range() {
        assert_eq!(date_for_day_number(i64::MAX), None);
    }
}
