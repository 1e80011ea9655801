// Layout module
// Geometry produced by the layout pass for each lecture of a room column

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::models::lecture::{Lecture, LectureId};

/// Vertical geometry of one lecture block, in layout units.
///
/// Idle time between two lectures is attributed to the earlier block's
/// `bottom_margin`, so `top_margin` stays zero for every block the pass emits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutParams {
    pub height: i32,
    pub top_margin: i32,
    pub bottom_margin: i32,
    /// Duration in minutes the height was computed from, after collision truncation
    pub duration: i32,
}

impl LayoutParams {
    /// Height plus both margins, widened so tall blocks cannot overflow
    pub fn outer_height(&self) -> i64 {
        self.top_margin as i64 + self.height as i64 + self.bottom_margin as i64
    }
}

/// A lecture that ran into the start of the next lecture in its room and was cut short.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collision {
    pub room_index: i32,
    pub lecture_id: LectureId,
    pub title: String,
    pub next_lecture_id: LectureId,
    pub next_title: String,
    pub original_duration: i32,
    pub truncated_duration: i32,
}

impl Collision {
    pub fn message(&self) -> String {
        format!("{} collides with {}", self.title, self.next_title)
    }
}

/// Serializable view of a single entry, in column order.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutEntry<'a> {
    pub lecture_id: &'a LectureId,
    #[serde(flatten)]
    pub params: &'a LayoutParams,
}

/// Result of laying out one room column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomLayout {
    room_index: i32,
    leading_margin: i32,
    order: Vec<LectureId>,
    params: HashMap<LectureId, LayoutParams>,
    collisions: Vec<Collision>,
}

impl RoomLayout {
    pub(crate) fn new(room_index: i32) -> Self {
        Self {
            room_index,
            ..Self::default()
        }
    }

    pub(crate) fn insert(&mut self, lecture_id: LectureId, params: LayoutParams) {
        if self.params.insert(lecture_id.clone(), params).is_none() {
            self.order.push(lecture_id);
        }
    }

    pub(crate) fn get_mut(&mut self, lecture_id: &LectureId) -> Option<&mut LayoutParams> {
        self.params.get_mut(lecture_id)
    }

    pub(crate) fn set_leading_margin(&mut self, margin: i32) {
        self.leading_margin = margin;
    }

    pub(crate) fn push_collision(&mut self, collision: Collision) {
        self.collisions.push(collision);
    }

    pub fn room_index(&self) -> i32 {
        self.room_index
    }

    /// Idle space between the conference start and the first block of the column.
    ///
    /// Kept apart from the blocks themselves; renderers that align columns to a common
    /// origin add it above the first block.
    pub fn leading_margin(&self) -> i32 {
        self.leading_margin
    }

    pub fn get(&self, lecture_id: &LectureId) -> Option<&LayoutParams> {
        self.params.get(lecture_id)
    }

    pub fn contains(&self, lecture_id: &LectureId) -> bool {
        self.params.contains_key(lecture_id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Lecture ids in the order they appear in the column
    pub fn lecture_ids(&self) -> &[LectureId] {
        &self.order
    }

    /// Entries in column order
    pub fn iter(&self) -> impl Iterator<Item = (&LectureId, &LayoutParams)> + '_ {
        self.order
            .iter()
            .filter_map(move |id| self.params.get(id).map(|params| (id, params)))
    }

    pub fn entries(&self) -> Vec<LayoutEntry<'_>> {
        self.iter()
            .map(|(lecture_id, params)| LayoutEntry { lecture_id, params })
            .collect()
    }

    pub fn collisions(&self) -> &[Collision] {
        &self.collisions
    }

    /// Total height of the column, leading margin and block margins included
    pub fn total_height(&self) -> i64 {
        let blocks: i64 = self.params.values().map(LayoutParams::outer_height).sum();
        self.leading_margin as i64 + blocks
    }

    /// Write truncated durations back into the lecture records of this room.
    ///
    /// Returns the number of records changed.
    pub fn apply_truncations(&self, lectures: &mut [Lecture]) -> usize {
        let mut changed = 0;
        for collision in &self.collisions {
            let target = lectures.iter_mut().find(|lecture| {
                lecture.room_index == self.room_index && lecture.lecture_id == collision.lecture_id
            });
            if let Some(lecture) = target {
                if lecture.duration != collision.truncated_duration {
                    lecture.duration = collision.truncated_duration;
                    changed += 1;
                }
            }
        }
        changed
    }
}

/// Layout of every room column of a schedule, keyed by room index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleLayout {
    rooms: BTreeMap<i32, RoomLayout>,
}

impl ScheduleLayout {
    pub(crate) fn insert(&mut self, layout: RoomLayout) {
        self.rooms.insert(layout.room_index(), layout);
    }

    pub fn room(&self, room_index: i32) -> Option<&RoomLayout> {
        self.rooms.get(&room_index)
    }

    pub fn rooms(&self) -> impl Iterator<Item = &RoomLayout> + '_ {
        self.rooms.values()
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn collisions(&self) -> impl Iterator<Item = &Collision> + '_ {
        self.rooms.values().flat_map(|room| room.collisions().iter())
    }

    pub fn apply_truncations(&self, lectures: &mut [Lecture]) -> usize {
        self.rooms
            .values()
            .map(|room| room.apply_truncations(lectures))
            .sum()
    }
}
