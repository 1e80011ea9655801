// Layout service
// Places the lectures of a room column on a vertical time axis

use chrono_tz::Tz;
use std::collections::{BTreeMap, HashSet};

use crate::error::{LayoutError, LayoutResult};
use crate::models::conference::Conference;
use crate::models::layout::{Collision, LayoutParams, RoomLayout, ScheduleLayout};
use crate::models::lecture::{Lecture, LectureId};
use crate::services::collision::CollisionSink;
use crate::utils::time::{
    end_timestamp, minute_of_day, minutes_between, scale_minutes, MINUTES_PER_DAY,
};

/// Computes the vertical geometry of lecture blocks.
///
/// Every `standard_height` units of height represent `TIME_DIVISOR` minutes.
/// Absolute start timestamps are converted to a minute of the day in `time_zone`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutEngine {
    standard_height: i32,
    time_zone: Tz,
}

impl LayoutEngine {
    pub fn new(standard_height: i32) -> LayoutResult<Self> {
        if standard_height <= 0 {
            return Err(LayoutError::InvalidStandardHeight(standard_height));
        }
        Ok(Self {
            standard_height,
            time_zone: Tz::UTC,
        })
    }

    pub fn with_time_zone(mut self, time_zone: Tz) -> Self {
        self.time_zone = time_zone;
        self
    }

    pub fn standard_height(&self) -> i32 {
        self.standard_height
    }

    pub fn time_zone(&self) -> Tz {
        self.time_zone
    }

    /// Lay out the lectures of `room_index`, in the order they appear in `lectures`.
    ///
    /// Lectures of other rooms are ignored entirely. When a lecture with an absolute
    /// start runs past the absolute start of the next lecture in its room, its duration is
    /// cut to end at that start; the cut is reported to `sink`, recorded in
    /// [`RoomLayout::collisions`] and reflected in [`LayoutParams::duration`]. The records
    /// in `lectures` are left untouched, see [`Self::calculate_layout_params_in_place`].
    ///
    /// The whole room is validated before anything is computed, so a failing call
    /// never yields a partial layout.
    pub fn calculate_layout_params<S: CollisionSink>(
        &self,
        room_index: i32,
        lectures: &[Lecture],
        conference: &Conference,
        mut sink: S,
    ) -> LayoutResult<RoomLayout> {
        let room: Vec<usize> = lectures
            .iter()
            .enumerate()
            .filter(|(_, lecture)| lecture.room_index == room_index)
            .map(|(index, _)| index)
            .collect();

        self.validate_room(room_index, lectures, &room)?;
        self.layout_room(
            room_index,
            lectures,
            &room,
            conference.first_event_starts_at,
            &mut sink,
        )
    }

    /// Same as [`Self::calculate_layout_params`], then writes truncated durations back
    /// into `lectures`.
    pub fn calculate_layout_params_in_place<S: CollisionSink>(
        &self,
        room_index: i32,
        lectures: &mut [Lecture],
        conference: &Conference,
        sink: S,
    ) -> LayoutResult<RoomLayout> {
        let layout = self.calculate_layout_params(room_index, lectures, conference, sink)?;
        layout.apply_truncations(lectures);
        Ok(layout)
    }

    /// Lay out every room present in `lectures`.
    ///
    /// Lectures are partitioned by room once up front. All rooms are validated before
    /// the first one is laid out.
    pub fn layout_schedule<S: CollisionSink>(
        &self,
        lectures: &[Lecture],
        conference: &Conference,
        mut sink: S,
    ) -> LayoutResult<ScheduleLayout> {
        let mut rooms: BTreeMap<i32, Vec<usize>> = BTreeMap::new();
        for (index, lecture) in lectures.iter().enumerate() {
            rooms.entry(lecture.room_index).or_default().push(index);
        }

        for (&room_index, room) in &rooms {
            self.validate_room(room_index, lectures, room)?;
        }

        let mut schedule = ScheduleLayout::default();
        for (&room_index, room) in &rooms {
            let layout = self.layout_room(
                room_index,
                lectures,
                room,
                conference.first_event_starts_at,
                &mut sink,
            )?;
            schedule.insert(layout);
        }

        log::debug!(
            "Laid out {} lectures in {} rooms",
            lectures.len(),
            schedule.room_count()
        );
        Ok(schedule)
    }

    /// `room` holds the indices into `lectures` of one room's lectures, in input order.
    fn layout_room(
        &self,
        room_index: i32,
        lectures: &[Lecture],
        room: &[usize],
        reference_start: i32,
        sink: &mut dyn CollisionSink,
    ) -> LayoutResult<RoomLayout> {
        let mut layout = RoomLayout::new(room_index);
        let mut end_time_previous_lecture = reference_start;
        let mut previous_lecture: Option<&LectureId> = None;

        for (position, &index) in room.iter().enumerate() {
            let lecture = &lectures[index];

            let mut start_time = self.start_minute(lecture)?;
            if start_time < end_time_previous_lecture {
                // Earlier time of day than where the column stands: it belongs to the next day
                start_time = start_time
                    .checked_add(MINUTES_PER_DAY)
                    .ok_or_else(|| start_out_of_range(lecture, start_time))?;
            }

            if start_time > end_time_previous_lecture {
                let margin = start_time
                    .checked_sub(end_time_previous_lecture)
                    .and_then(|idle| scale_minutes(self.standard_height, idle))
                    .ok_or_else(|| start_out_of_range(lecture, start_time))?;
                match previous_lecture.and_then(|id| layout.get_mut(id)) {
                    Some(previous) => previous.bottom_margin = margin,
                    None => layout.set_leading_margin(margin),
                }
            }

            let mut duration = lecture.duration;
            if let Some(next) = room.get(position + 1).map(|&next| &lectures[next]) {
                if lecture.has_absolute_start() && next.has_absolute_start() {
                    let end = end_timestamp(lecture.date_utc, duration);
                    // next starts before current ends
                    if end > next.date_utc {
                        duration = minutes_between(lecture.date_utc, next.date_utc);
                        let collision = Collision {
                            room_index,
                            lecture_id: lecture.lecture_id.clone(),
                            title: lecture.title.clone(),
                            next_lecture_id: next.lecture_id.clone(),
                            next_title: next.title.clone(),
                            original_duration: lecture.duration,
                            truncated_duration: duration,
                        };
                        sink.record_collision(&collision);
                        layout.push_collision(collision);
                    }
                }
            }

            let height = scale_minutes(self.standard_height, duration)
                .ok_or_else(|| duration_out_of_range(lecture))?;
            layout.insert(
                lecture.lecture_id.clone(),
                LayoutParams {
                    height,
                    top_margin: 0,
                    bottom_margin: 0,
                    duration,
                },
            );

            end_time_previous_lecture = start_time
                .checked_add(duration)
                .ok_or_else(|| duration_out_of_range(lecture))?;
            previous_lecture = Some(&lecture.lecture_id);
        }

        Ok(layout)
    }

    fn validate_room(
        &self,
        room_index: i32,
        lectures: &[Lecture],
        room: &[usize],
    ) -> LayoutResult<()> {
        let mut seen: HashSet<&LectureId> = HashSet::with_capacity(room.len());
        for &index in room {
            let lecture = &lectures[index];
            let start = self.start_minute(lecture)?;
            if lecture.duration < 0 {
                return Err(LayoutError::NegativeDuration {
                    lecture_id: lecture.lecture_id.clone(),
                    duration: lecture.duration,
                });
            }
            // the latest a lecture can end is one day after its start minute
            let latest_start = start
                .checked_add(MINUTES_PER_DAY)
                .ok_or_else(|| start_out_of_range(lecture, start))?;
            if latest_start.checked_add(lecture.duration).is_none()
                || scale_minutes(self.standard_height, lecture.duration).is_none()
            {
                return Err(duration_out_of_range(lecture));
            }
            if !seen.insert(&lecture.lecture_id) {
                return Err(LayoutError::DuplicateLecture {
                    lecture_id: lecture.lecture_id.clone(),
                    room_index,
                });
            }
        }
        Ok(())
    }

    /// Start of `lecture` in minutes since the day start, before any day correction.
    fn start_minute(&self, lecture: &Lecture) -> LayoutResult<i32> {
        if lecture.has_absolute_start() {
            minute_of_day(lecture.date_utc, self.time_zone).ok_or_else(|| {
                LayoutError::InvalidTimestamp {
                    lecture_id: lecture.lecture_id.clone(),
                    date_utc: lecture.date_utc,
                }
            })
        } else if lecture.rel_start_time >= 0 {
            Ok(lecture.rel_start_time)
        } else {
            Err(LayoutError::MissingStartTime {
                lecture_id: lecture.lecture_id.clone(),
            })
        }
    }
}

fn start_out_of_range(lecture: &Lecture, start: i32) -> LayoutError {
    LayoutError::StartOutOfRange {
        lecture_id: lecture.lecture_id.clone(),
        start,
    }
}

fn duration_out_of_range(lecture: &Lecture) -> LayoutError {
    LayoutError::DurationOutOfRange {
        lecture_id: lecture.lecture_id.clone(),
        duration: lecture.duration,
    }
}
