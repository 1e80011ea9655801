// Time utility functions
// Minute-of-day resolution and the unit conversions used by the layout pass

use chrono::{TimeZone, Timelike, Utc};
use chrono_tz::Tz;

pub const MINUTES_PER_DAY: i32 = 24 * 60;
pub const MILLIS_PER_MINUTE: i64 = 60_000;

/// Number of minutes represented by one `standard_height` step.
pub const TIME_DIVISOR: i32 = 5;

/// Minute of the day (0..1440) of an absolute millisecond timestamp, seen in `tz`.
///
/// Returns `None` when the timestamp is outside the range chrono can represent.
pub fn minute_of_day(date_utc: i64, tz: Tz) -> Option<i32> {
    let instant = Utc.timestamp_millis_opt(date_utc).single()?;
    let local = instant.with_timezone(&tz);
    Some((local.hour() * 60 + local.minute()) as i32)
}

/// Whole minutes between two millisecond timestamps, truncated toward zero.
pub fn minutes_between(start_utc: i64, end_utc: i64) -> i32 {
    let minutes = (end_utc - start_utc) / MILLIS_PER_MINUTE;
    minutes.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

/// Absolute end timestamp of something starting at `start_utc` and lasting `duration` minutes.
pub fn end_timestamp(start_utc: i64, duration: i32) -> i64 {
    start_utc + duration as i64 * MILLIS_PER_MINUTE
}

/// Scale a span of minutes into layout units.
///
/// Returns `None` when the result does not fit into an `i32`.
pub fn scale_minutes(standard_height: i32, minutes: i32) -> Option<i32> {
    let units = standard_height as i64 * minutes as i64 / TIME_DIVISOR as i64;
    i32::try_from(units).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use test_case::test_case;

    fn millis(hour: u32, minute: u32) -> i64 {
        Utc.with_ymd_and_hms(2025, 12, 27, hour, minute, 0)
            .unwrap()
            .timestamp_millis()
    }

    #[test_case(0, 0 => 0; "midnight")]
    #[test_case(10, 30 => 630; "mid morning")]
    #[test_case(23, 59 => 1439; "last minute")]
    fn test_minute_of_day_utc(hour: u32, minute: u32) -> i32 {
        minute_of_day(millis(hour, minute), Tz::UTC).unwrap()
    }

    #[test]
    fn test_minute_of_day_respects_time_zone() {
        // 10:00 UTC is 11:00 in Berlin during winter time
        let minute = minute_of_day(millis(10, 0), chrono_tz::Europe::Berlin).unwrap();
        assert_eq!(minute, 660);
    }

    #[test]
    fn test_minute_of_day_out_of_range() {
        assert_eq!(minute_of_day(i64::MAX, Tz::UTC), None);
    }

    #[test]
    fn test_minutes_between_truncates() {
        let start = millis(10, 0);
        assert_eq!(minutes_between(start, start + 90 * 1000), 1);
        assert_eq!(minutes_between(start, millis(10, 45)), 45);
    }

    #[test]
    fn test_end_timestamp() {
        assert_eq!(end_timestamp(millis(10, 0), 30), millis(10, 30));
    }

    #[test_case(34, 30 => Some(204); "half hour")]
    #[test_case(34, 3 => Some(20); "integer division after multiply")]
    #[test_case(34, 0 => Some(0); "empty")]
    #[test_case(34, 100_000_000 => None; "too tall")]
    #[test_case(5, i32::MAX => Some(i32::MAX); "product wider than i32")]
    fn test_scale_minutes(standard_height: i32, minutes: i32) -> Option<i32> {
        scale_minutes(standard_height, minutes)
    }
}
