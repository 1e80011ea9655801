// Collision reporting
// Sinks receiving one record per overlap resolved by the layout pass

use crate::models::layout::Collision;

/// Receives a record for every lecture the layout pass truncates.
///
/// Collisions are informational; a sink can never abort the pass.
#[cfg_attr(test, mockall::automock)]
pub trait CollisionSink {
    fn record_collision(&mut self, collision: &Collision);
}

/// Logs every collision at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogCollisionSink;

impl CollisionSink for LogCollisionSink {
    fn record_collision(&mut self, collision: &Collision) {
        log::debug!(
            "{} (room {}, {} -> {} min)",
            collision.message(),
            collision.room_index,
            collision.original_duration,
            collision.truncated_duration
        );
    }
}

/// Keeps every collision it receives, in order.
#[derive(Debug, Default, Clone)]
pub struct CollectingCollisionSink {
    pub collisions: Vec<Collision>,
}

impl CollectingCollisionSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.collisions.iter().map(Collision::message).collect()
    }
}

impl CollisionSink for CollectingCollisionSink {
    fn record_collision(&mut self, collision: &Collision) {
        self.collisions.push(collision.clone());
    }
}

impl<S: CollisionSink + ?Sized> CollisionSink for &mut S {
    fn record_collision(&mut self, collision: &Collision) {
        (**self).record_collision(collision);
    }
}
