use std::collections::VecDeque;

use hsp_types::Point;

use crate::error::DriverError;

/// Number of cursor positions kept when no capacity is configured.
pub const DEFAULT_TRACE_CAPACITY: usize = 100;

/// Bounded history of cursor positions, newest first.
///
/// Once full, recording a new position drops the oldest one, so the
/// trace always holds the last `capacity` moves.
#[derive(Clone, Debug)]
pub struct CursorTrace {
    points: VecDeque<Point>,
    capacity: usize,
}

impl Default for CursorTrace {
    fn default() -> Self {
        Self {
            points: VecDeque::with_capacity(DEFAULT_TRACE_CAPACITY),
            capacity: DEFAULT_TRACE_CAPACITY,
        }
    }
}

impl CursorTrace {
    /// # Errors
    ///
    /// Returns [`DriverError::ZeroTraceCapacity`] if `capacity` is 0.
    pub fn with_capacity(capacity: usize) -> Result<Self, DriverError> {
        if capacity == 0 {
            return Err(DriverError::ZeroTraceCapacity);
        }
        Ok(Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        })
    }

    pub fn record(&mut self, point: Point) {
        if self.points.len() == self.capacity {
            self.points.pop_back();
        }
        self.points.push_front(point);
    }

    pub fn latest(&self) -> Option<Point> {
        self.points.front().copied()
    }

    /// Positions from newest to oldest.
    pub fn iter(&self) -> impl Iterator<Item = Point> + '_ {
        self.points.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}
