//! Touch gesture tracking and gesture-to-impulse translation

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Impulse for a drag from `start` to `end`: `scale * (end - start)`
#[inline]
pub fn compute_impulse(start: Vec2, end: Vec2, scale: f32) -> Vec2 {
    (end - start) * scale
}

/// A completed drag
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchGesture {
    pub start: Vec2,
    pub end: Vec2,
    pub start_time: f64,
    pub end_time: f64,
}

impl TouchGesture {
    pub fn impulse(&self, scale: f32) -> Vec2 {
        compute_impulse(self.start, self.end, scale)
    }
}

/// Raw touch input, in arena coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TouchEvent {
    Begin(Vec2),
    Move(Vec2),
    End(Vec2),
    Cancel(Vec2),
}

/// Tracks the in-flight drag between touch-begin and touch-end
#[derive(Debug, Clone, Default)]
pub struct GestureTracker {
    start: Option<(Vec2, f64)>,
    /// Endpoints of the last drag (zeroed when the ball resets)
    pub last_start: Vec2,
    pub last_end: Vec2,
}

impl GestureTracker {
    pub fn begin(&mut self, point: Vec2, now: f64) {
        self.start = Some((point, now));
        self.last_start = point;
    }

    pub fn is_tracking(&self) -> bool {
        self.start.is_some()
    }

    /// Finish the drag
    ///
    /// An end without a begin is treated as a zero-length drag at `point`.
    pub fn end(&mut self, point: Vec2, now: f64) -> TouchGesture {
        let (start, start_time) = self.start.take().unwrap_or_else(|| {
            log::warn!("Touch end at {:?} without touch begin", point);
            (point, now)
        });
        self.last_start = start;
        self.last_end = point;
        TouchGesture {
            start,
            end: point,
            start_time,
            end_time: now,
        }
    }

    /// Drop the in-flight drag; no impulse is produced
    pub fn cancel(&mut self) {
        self.start = None;
    }

    /// Forget everything (ball reset)
    pub fn reset(&mut self) {
        self.start = None;
        self.last_start = Vec2::ZERO;
        self.last_end = Vec2::ZERO;
    }
}
