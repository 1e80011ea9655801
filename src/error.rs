//! Precondition failures reported by the layout pass.

use thiserror::Error;

use crate::models::lecture::LectureId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("standard height must be positive, got {0}")]
    InvalidStandardHeight(i32),

    #[error("lecture {lecture_id} has neither an absolute nor a relative start time")]
    MissingStartTime { lecture_id: LectureId },

    #[error("lecture {lecture_id} has an unrepresentable timestamp {date_utc}")]
    InvalidTimestamp { lecture_id: LectureId, date_utc: i64 },

    #[error("lecture {lecture_id} has negative duration {duration}")]
    NegativeDuration { lecture_id: LectureId, duration: i32 },

    #[error("lecture {lecture_id} duration {duration} is too long to lay out")]
    DurationOutOfRange { lecture_id: LectureId, duration: i32 },

    #[error("lecture {lecture_id} start {start} is too late to lay out")]
    StartOutOfRange { lecture_id: LectureId, start: i32 },

    #[error("lecture {lecture_id} appears more than once in room {room_index}")]
    DuplicateLecture { lecture_id: LectureId, room_index: i32 },
}

pub type LayoutResult<T> = Result<T, LayoutError>;
