// Lecture module
// A single schedule entry placed in a room column

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identity of a lecture within a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LectureId(pub String);

impl LectureId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LectureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LectureId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Conference lecture as delivered by the schedule data source.
///
/// Start time comes from `date_utc` (milliseconds since the epoch) when it is set,
/// otherwise from `rel_start_time` (minutes since the schedule's day start).
/// `duration` may be shortened by the layout pass when the lecture collides with
/// the next one in the same room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lecture {
    pub lecture_id: LectureId,
    #[serde(default)]
    pub title: String,
    pub room_index: i32,
    #[serde(default)]
    pub room_name: String,
    #[serde(default)]
    pub day: i32,
    #[serde(rename = "dateUTC", default)]
    pub date_utc: i64,
    #[serde(default = "unset_rel_start_time")]
    pub rel_start_time: i32,
    pub duration: i32,
}

fn unset_rel_start_time() -> i32 {
    -1
}

impl Lecture {
    /// Create a lecture with a relative start time (minutes since day start).
    ///
    /// # Examples
    /// ```
    /// use timetable_layout::models::lecture::Lecture;
    ///
    /// let lecture = Lecture::new("42", "Opening", 0, 600, 30);
    /// assert!(!lecture.has_absolute_start());
    /// assert_eq!(lecture.rel_start_time, 600);
    /// ```
    pub fn new(
        lecture_id: impl Into<String>,
        title: impl Into<String>,
        room_index: i32,
        rel_start_time: i32,
        duration: i32,
    ) -> Self {
        Self {
            lecture_id: LectureId::new(lecture_id),
            title: title.into(),
            room_index,
            room_name: String::new(),
            day: 0,
            date_utc: 0,
            rel_start_time,
            duration,
        }
    }

    /// Create a builder for constructing lectures with optional fields
    pub fn builder() -> LectureBuilder {
        LectureBuilder::new()
    }

    /// Whether the lecture carries an absolute start timestamp
    pub fn has_absolute_start(&self) -> bool {
        self.date_utc > 0
    }

    /// Whether the lecture has at least one usable start time source
    pub fn has_start_time(&self) -> bool {
        self.has_absolute_start() || self.rel_start_time >= 0
    }
}

/// Builder for creating lectures with optional fields
pub struct LectureBuilder {
    lecture_id: Option<String>,
    title: String,
    room_index: Option<i32>,
    room_name: String,
    day: i32,
    date_utc: i64,
    rel_start_time: i32,
    duration: Option<i32>,
}

impl LectureBuilder {
    pub fn new() -> Self {
        Self {
            lecture_id: None,
            title: String::new(),
            room_index: None,
            room_name: String::new(),
            day: 0,
            date_utc: 0,
            rel_start_time: unset_rel_start_time(),
            duration: None,
        }
    }

    pub fn id(mut self, lecture_id: impl Into<String>) -> Self {
        self.lecture_id = Some(lecture_id.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn room(mut self, room_index: i32) -> Self {
        self.room_index = Some(room_index);
        self
    }

    pub fn room_name(mut self, room_name: impl Into<String>) -> Self {
        self.room_name = room_name.into();
        self
    }

    pub fn day(mut self, day: i32) -> Self {
        self.day = day;
        self
    }

    /// Set the absolute start (milliseconds since the epoch)
    pub fn date_utc(mut self, date_utc: i64) -> Self {
        self.date_utc = date_utc;
        self
    }

    /// Set the relative start (minutes since the schedule's day start)
    pub fn rel_start_time(mut self, minutes: i32) -> Self {
        self.rel_start_time = minutes;
        self
    }

    /// Set the duration in minutes
    pub fn duration(mut self, minutes: i32) -> Self {
        self.duration = Some(minutes);
        self
    }

    pub fn build(self) -> Result<Lecture, String> {
        let lecture_id = self.lecture_id.ok_or("Lecture id is required")?;
        let room_index = self.room_index.ok_or("Lecture room is required")?;
        let duration = self.duration.ok_or("Lecture duration is required")?;

        if lecture_id.trim().is_empty() {
            return Err("Lecture id cannot be empty".to_string());
        }
        if duration < 0 {
            return Err("Lecture duration cannot be negative".to_string());
        }

        let lecture = Lecture {
            lecture_id: LectureId(lecture_id),
            title: self.title,
            room_index,
            room_name: self.room_name,
            day: self.day,
            date_utc: self.date_utc,
            rel_start_time: self.rel_start_time,
            duration,
        };

        if !lecture.has_start_time() {
            return Err("Lecture needs an absolute or relative start time".to_string());
        }

        Ok(lecture)
    }
}

impl Default for LectureBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builder_success() {
        let lecture = Lecture::builder()
            .id("101")
            .title("Keynote")
            .room(2)
            .room_name("Saal 1")
            .date_utc(1_766_829_600_000)
            .duration(45)
            .build()
            .unwrap();

        assert_eq!(lecture.lecture_id, LectureId::from("101"));
        assert_eq!(lecture.room_index, 2);
        assert!(lecture.has_absolute_start());
        assert_eq!(lecture.rel_start_time, -1);
    }

    #[test]
    fn test_builder_requires_start_time() {
        let result = Lecture::builder().id("1").room(0).duration(30).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_rejects_negative_duration() {
        let result = Lecture::builder()
            .id("1")
            .room(0)
            .rel_start_time(600)
            .duration(-5)
            .build();
        assert_eq!(result, Err("Lecture duration cannot be negative".to_string()));
    }

    #[test]
    fn test_builder_requires_room() {
        let result = Lecture::builder().id("1").rel_start_time(0).duration(5).build();
        assert_eq!(result, Err("Lecture room is required".to_string()));
    }

    #[test]
    fn test_relative_start_zero_is_usable() {
        let lecture = Lecture::new("1", "Early", 0, 0, 30);
        assert!(lecture.has_start_time());
        assert!(!lecture.has_absolute_start());
    }

    #[test]
    fn test_deserialize_camel_case() {
        let json = r#"{
            "lectureId": "7",
            "title": "Talk",
            "roomIndex": 1,
            "dateUTC": 1766829600000,
            "duration": 30
        }"#;
        let lecture: Lecture = serde_json::from_str(json).unwrap();

        assert_eq!(lecture.lecture_id.as_str(), "7");
        assert_eq!(lecture.room_index, 1);
        assert_eq!(lecture.date_utc, 1_766_829_600_000);
        assert_eq!(lecture.rel_start_time, -1);
        assert_eq!(lecture.day, 0);
    }
}
