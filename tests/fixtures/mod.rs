// Test fixtures - reusable test data
// Provides consistent schedule data across all test files
#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use timetable_layout::models::lecture::Lecture;

pub const STANDARD_HEIGHT: i32 = 34;

/// Sample timestamps for testing
pub mod dates {
    use super::*;

    /// Milliseconds of the given time on Dec `day`, 2025 (UTC)
    pub fn dec_2025(day: u32, hour: u32, minute: u32) -> i64 {
        Utc.with_ymd_and_hms(2025, 12, day, hour, minute, 0)
            .unwrap()
            .timestamp_millis()
    }

    /// Dec 27, 2025 at the given time, first day of the sample congress
    pub fn day_one(hour: u32, minute: u32) -> i64 {
        dec_2025(27, hour, minute)
    }
}

/// Sample lectures for testing
pub mod lectures {
    use super::*;

    pub fn absolute(id: &str, room: i32, date_utc: i64, duration: i32) -> Lecture {
        Lecture::builder()
            .id(id)
            .title(id)
            .room(room)
            .date_utc(date_utc)
            .duration(duration)
            .build()
            .unwrap()
    }

    pub fn relative(id: &str, room: i32, start: i32, duration: i32) -> Lecture {
        Lecture::new(id, id, room, start, duration)
    }

    /// Two rooms, interleaved chronologically, with one collision in room 0
    /// and a run past midnight in room 1.
    pub fn congress_day() -> Vec<Lecture> {
        vec![
            absolute("opening", 0, dates::day_one(11, 0), 30),
            absolute("workshop", 1, dates::day_one(11, 0), 120),
            absolute("keynote", 0, dates::day_one(11, 30), 75),
            absolute("lightning", 0, dates::day_one(12, 30), 60),
            absolute("late-show", 1, dates::day_one(23, 0), 90),
            absolute("night-owl", 1, dates::dec_2025(28, 1, 0), 60),
        ]
    }
}
