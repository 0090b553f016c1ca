//! Cursor probe
//!
//! The cursor can shove circles around by acting as a transient circle that
//! collides with the world for one tick and is then thrown away.

use glam::Vec2;

use super::state::Circle;
use crate::geom::{Rgba, velocity_from_displacement};
use crate::settings::ProbeSettings;

/// Turns successive cursor positions into a cursor velocity (px/s)
#[derive(Debug, Clone, Default)]
pub struct CursorTracker {
    prev: Option<Vec2>,
    vel: Vec2,
}

impl CursorTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a cursor position `dt` seconds after the previous one
    pub fn sample(&mut self, pos: Vec2, dt: f32) -> Vec2 {
        self.vel = match self.prev {
            Some(prev) => velocity_from_displacement(prev, pos, dt),
            None => Vec2::ZERO,
        };
        self.prev = Some(pos);
        self.vel
    }

    pub fn velocity(&self) -> Vec2 {
        self.vel
    }

    pub fn position(&self) -> Option<Vec2> {
        self.prev
    }

    /// Forget history (e.g. when the button is released)
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// A one-tick collider at the cursor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Probe {
    pub pos: Vec2,
    /// px/tick
    pub vel: Vec2,
    pub radius: f32,
    pub mass: f32,
}

impl Probe {
    /// Probe at `pos` moving with a cursor velocity given in px/s
    pub fn from_cursor(pos: Vec2, cursor_vel: Vec2, settings: &ProbeSettings) -> Self {
        Self {
            pos,
            vel: cursor_vel * settings.velocity_scale,
            radius: settings.radius,
            mass: settings.mass,
        }
    }

    /// Probe built from the tracker's latest sample, if it has one
    pub fn from_tracker(tracker: &CursorTracker, settings: &ProbeSettings) -> Option<Self> {
        tracker
            .position()
            .map(|pos| Self::from_cursor(pos, tracker.velocity(), settings))
    }

    pub(crate) fn as_circle(&self) -> Circle {
        Circle {
            pos: self.pos,
            vel: self.vel,
            mass: self.mass,
            radius: self.radius,
            color: Rgba::TRANSPARENT,
        }
    }
}
