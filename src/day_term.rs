//! Relative day phrases ("today", "3 days ago, last Tuesday, October 13th")
//!
//! Both moments are reduced to their calendar day in the reference timezone
//! before comparing, so the time of day never changes the label.

use chrono::{DateTime, Datelike, NaiveDate};
use chrono_tz::Tz;

/// Calendar buckets, mirroring a typical "calendar time" formatter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayBucket {
    SameDay,
    NextDay,
    NextWeek,
    LastDay,
    LastWeek,
    SameElse,
}

impl DayBucket {
    pub fn from_distance(days: i64) -> Self {
        match days {
            d if d < -6 => DayBucket::SameElse,
            d if d < -1 => DayBucket::LastWeek,
            -1 => DayBucket::LastDay,
            0 => DayBucket::SameDay,
            1 => DayBucket::NextDay,
            d if d < 7 => DayBucket::NextWeek,
            _ => DayBucket::SameElse,
        }
    }
}

/// Whole days from `reference` to `target` (negative when `target` is earlier)
pub fn day_distance(reference: NaiveDate, target: NaiveDate) -> i64 {
    target.signed_duration_since(reference).num_days()
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

fn weekday_month_day(date: NaiveDate) -> String {
    let day = date.day();
    format!("{}, {} {}{}", date.format("%A"), date.format("%B"), day, ordinal_suffix(day))
}

/// The calendar label alone: "today", "tomorrow", "on Friday, October 19th", ...
pub fn calendar_label(reference: NaiveDate, target: NaiveDate) -> String {
    match DayBucket::from_distance(day_distance(reference, target)) {
        DayBucket::SameDay => "today".to_string(),
        DayBucket::NextDay => "tomorrow".to_string(),
        DayBucket::LastDay => "yesterday".to_string(),
        DayBucket::NextWeek => format!("on {}", weekday_month_day(target)),
        DayBucket::LastWeek => format!("last {}", weekday_month_day(target)),
        DayBucket::SameElse if target.year() != reference.year() => {
            format!("on {} {}", weekday_month_day(target), target.year())
        }
        DayBucket::SameElse => format!("on {}", weekday_month_day(target)),
    }
}

/// Calendar label with an exact day count in front once the gap exceeds a day
pub fn counted_label(reference: NaiveDate, target: NaiveDate) -> String {
    let distance = day_distance(reference, target);
    let label = calendar_label(reference, target);
    match distance {
        d if d > 1 => format!("in {} days, {}", d, label),
        d if d < -1 => format!("{} days ago, {}", -d, label),
        _ => label,
    }
}

/// Relative phrase for `target` as seen from `reference`, in the reference timezone
pub fn day_term(reference: &DateTime<Tz>, target: &DateTime<Tz>) -> String {
    let zone = reference.timezone();
    let target_day = target.with_timezone(&zone).date_naive();
    counted_label(reference.date_naive(), target_day)
}

/// Same as [`day_term`] for a target given as a plain calendar date
pub fn day_term_for_date(reference: &DateTime<Tz>, target: NaiveDate) -> String {
    counted_label(reference.date_naive(), target)
}

/// Calendar label without a count, for a plain calendar date
pub fn plain_day_term(reference: &DateTime<Tz>, target: NaiveDate) -> String {
    calendar_label(reference.date_naive(), target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use chrono_tz::America::Los_Angeles;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn la(y: i32, m: u32, d: u32, h: u32) -> DateTime<Tz> {
        Los_Angeles.with_ymd_and_hms(y, m, d, h, 0, 0).single().unwrap()
    }

    #[test_case(1, "st"; "first")]
    #[test_case(2, "nd"; "second")]
    #[test_case(3, "rd"; "third")]
    #[test_case(4, "th"; "fourth")]
    #[test_case(11, "th"; "eleventh")]
    #[test_case(12, "th"; "twelfth")]
    #[test_case(13, "th"; "thirteenth")]
    #[test_case(21, "st"; "twenty first")]
    #[test_case(22, "nd"; "twenty second")]
    #[test_case(31, "st"; "thirty first")]
    fn test_ordinal_suffix(day: u32, expected: &str) {
        assert_eq!(ordinal_suffix(day), expected);
    }

    #[test]
    fn test_same_moment_is_today() {
        let now = la(2026, 10, 16, 9);
        assert_eq!(day_term(&now, &now), "today");
    }

    #[test]
    fn test_next_day_is_tomorrow() {
        let now = la(2026, 10, 16, 9);
        assert_eq!(day_term(&now, &(now + Duration::days(1))), "tomorrow");
        assert_eq!(day_term(&now, &(now - Duration::days(1))), "yesterday");
    }

    #[test]
    fn test_three_days_ago() {
        let now = la(2026, 10, 16, 9);
        assert_eq!(
            day_term(&now, &(now - Duration::days(3))),
            "3 days ago, last Tuesday, October 13th"
        );
    }

    #[test]
    fn test_later_this_week() {
        let now = la(2026, 10, 16, 9);
        assert_eq!(
            day_term(&now, &(now + Duration::days(3))),
            "in 3 days, on Monday, October 19th"
        );
    }

    #[test]
    fn test_far_dates_include_year_only_when_different() {
        let now = la(2026, 10, 16, 9);
        let later = NaiveDate::from_ymd_opt(2026, 11, 22).unwrap();
        assert_eq!(day_term_for_date(&now, later), "in 37 days, on Sunday, November 22nd");

        let earlier = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        assert_eq!(
            day_term_for_date(&now, earlier),
            "289 days ago, on Wednesday, December 31st 2025"
        );
    }

    #[test]
    fn test_time_of_day_is_ignored() {
        let late = la(2026, 10, 16, 23);
        let early_next = la(2026, 10, 17, 0);
        assert_eq!(day_term(&late, &early_next), "tomorrow");
    }

    #[test]
    fn test_target_converted_into_reference_zone() {
        let now = la(2026, 10, 16, 20);
        // 03:00 UTC on the 17th is still the evening of the 16th in Los Angeles
        let target = chrono_tz::UTC.with_ymd_and_hms(2026, 10, 17, 3, 0, 0).unwrap();
        assert_eq!(day_term(&now, &target), "today");
    }

    #[test]
    fn test_plain_label_has_no_count() {
        let now = la(2026, 10, 16, 9);
        let date = NaiveDate::from_ymd_opt(2026, 10, 20).unwrap();
        assert_eq!(plain_day_term(&now, date), "on Tuesday, October 20th");
    }

    #[test]
    fn test_buckets() {
        assert_eq!(DayBucket::from_distance(-7), DayBucket::SameElse);
        assert_eq!(DayBucket::from_distance(-6), DayBucket::LastWeek);
        assert_eq!(DayBucket::from_distance(6), DayBucket::NextWeek);
        assert_eq!(DayBucket::from_distance(7), DayBucket::SameElse);
    }
}
