// Conference module
// Time frame of a schedule day, used as the origin of every room column

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, LayoutResult};
use crate::models::lecture::Lecture;
use crate::utils::time::{minute_of_day, minutes_between};

/// Minutes since the day start at which the first lecture begins and the last one ends.
///
/// `last_event_ends_at` may exceed 1440 when the day runs past midnight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conference {
    pub first_event_starts_at: i32,
    pub last_event_ends_at: i32,
}

impl Conference {
    pub fn new(first_event_starts_at: i32, last_event_ends_at: i32) -> Self {
        Self {
            first_event_starts_at,
            last_event_ends_at,
        }
    }

    /// Derive the time frame from one day's lectures, given in chronological order.
    ///
    /// Absolute starts are measured from the first lecture carrying a timestamp, so a day
    /// that crosses midnight keeps growing instead of wrapping back to zero. An empty
    /// schedule yields the zero frame.
    pub fn calculate_time_frame(lectures: &[Lecture], tz: Tz) -> LayoutResult<Self> {
        let mut first: Option<i32> = None;
        let mut last: Option<i32> = None;
        // (timestamp, minute of day) of the first lecture with an absolute start
        let mut anchor: Option<(i64, i32)> = None;

        for lecture in lectures {
            let start = if lecture.has_absolute_start() {
                let (anchor_utc, anchor_minute) = match anchor {
                    Some(anchor) => anchor,
                    None => {
                        let minute = minute_of_day(lecture.date_utc, tz).ok_or_else(|| {
                            LayoutError::InvalidTimestamp {
                                lecture_id: lecture.lecture_id.clone(),
                                date_utc: lecture.date_utc,
                            }
                        })?;
                        anchor = Some((lecture.date_utc, minute));
                        (lecture.date_utc, minute)
                    }
                };
                let elapsed = minutes_between(anchor_utc, lecture.date_utc);
                anchor_minute.checked_add(elapsed).ok_or_else(|| {
                    LayoutError::StartOutOfRange {
                        lecture_id: lecture.lecture_id.clone(),
                        start: elapsed.saturating_add(anchor_minute),
                    }
                })?
            } else if lecture.rel_start_time >= 0 {
                lecture.rel_start_time
            } else {
                return Err(LayoutError::MissingStartTime {
                    lecture_id: lecture.lecture_id.clone(),
                });
            };

            let end = start.checked_add(lecture.duration).ok_or_else(|| {
                LayoutError::DurationOutOfRange {
                    lecture_id: lecture.lecture_id.clone(),
                    duration: lecture.duration,
                }
            })?;
            first = Some(first.map_or(start, |first| first.min(start)));
            last = Some(last.map_or(end, |last| last.max(end)));
        }

        Ok(Self {
            first_event_starts_at: first.unwrap_or_default(),
            last_event_ends_at: last.unwrap_or_default(),
        })
    }

    /// Length of the day in minutes
    pub fn span_minutes(&self) -> i32 {
        (self.last_event_ends_at - self.first_event_starts_at).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn at(day: u32, hour: u32, minute: u32) -> i64 {
        Utc.with_ymd_and_hms(2025, 12, day, hour, minute, 0)
            .unwrap()
            .timestamp_millis()
    }

    fn absolute(id: &str, date_utc: i64, duration: i32) -> Lecture {
        Lecture::builder()
            .id(id)
            .room(0)
            .date_utc(date_utc)
            .duration(duration)
            .build()
            .unwrap()
    }

    #[test]
    fn test_empty_schedule() {
        let conference = Conference::calculate_time_frame(&[], Tz::UTC).unwrap();
        assert_eq!(conference, Conference::default());
        assert_eq!(conference.span_minutes(), 0);
    }

    #[test]
    fn test_relative_lectures() {
        let lectures = vec![
            Lecture::new("1", "A", 0, 660, 30),
            Lecture::new("2", "B", 1, 600, 60),
            Lecture::new("3", "C", 0, 720, 90),
        ];
        let conference = Conference::calculate_time_frame(&lectures, Tz::UTC).unwrap();
        assert_eq!(conference, Conference::new(600, 810));
    }

    #[test]
    fn test_absolute_lectures_crossing_midnight() {
        let lectures = vec![
            absolute("1", at(27, 22, 0), 60),
            absolute("2", at(27, 23, 30), 60),
            absolute("3", at(28, 0, 45), 45),
        ];
        let conference = Conference::calculate_time_frame(&lectures, Tz::UTC).unwrap();
        assert_eq!(conference.first_event_starts_at, 22 * 60);
        assert_eq!(conference.last_event_ends_at, 24 * 60 + 90);
        assert_eq!(conference.span_minutes(), 210);
    }

    #[test]
    fn test_time_zone_shifts_frame() {
        let lectures = vec![absolute("1", at(27, 10, 0), 30)];
        let conference =
            Conference::calculate_time_frame(&lectures, chrono_tz::Europe::Berlin).unwrap();
        assert_eq!(conference, Conference::new(660, 690));
    }

    #[test]
    fn test_missing_start_time_fails() {
        let mut lecture = Lecture::new("9", "Broken", 0, 0, 30);
        lecture.rel_start_time = -1;
        let err = Conference::calculate_time_frame(&[lecture], Tz::UTC).unwrap_err();
        assert_eq!(
            err,
            LayoutError::MissingStartTime {
                lecture_id: "9".into()
            }
        );
    }

    #[test]
    fn test_oversized_duration_fails() {
        let lectures = vec![
            absolute("1", at(27, 10, 0), 30),
            absolute("2", at(27, 11, 0), i32::MAX),
        ];
        let err = Conference::calculate_time_frame(&lectures, Tz::UTC).unwrap_err();
        assert_eq!(
            err,
            LayoutError::DurationOutOfRange {
                lecture_id: "2".into(),
                duration: i32::MAX
            }
        );
    }

    #[test]
    fn test_start_too_far_from_first_lecture_fails() {
        // the clamped elapsed minutes plus the anchor's minute of day overflow
        let lectures = vec![
            absolute("1", at(27, 10, 0), 30),
            absolute("2", i64::MAX / 2, 30),
        ];
        let err = Conference::calculate_time_frame(&lectures, Tz::UTC).unwrap_err();
        assert_eq!(
            err,
            LayoutError::StartOutOfRange {
                lecture_id: "2".into(),
                start: i32::MAX
            }
        );
    }
}
