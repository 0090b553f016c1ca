//! Shared vector and geometry helpers
//!
//! Small math used by both engines: colors, screen/grid mapping and the
//! circle-pair queries the collision code is built on.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Squared distances below this are treated as coincident centers
pub const DEGENERATE_DIST_SQ: f32 = 1e-8;

/// 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Pack as 0xRRGGBBAA
    pub fn to_u32(self) -> u32 {
        u32::from_be_bytes([self.r, self.g, self.b, self.a])
    }
}

/// Map a screen pixel to the grid cell containing it
///
/// Negative pixels map to negative cells so the caller's bounds check rejects them.
#[inline]
pub fn screen_to_cell(px: i32, py: i32, cell_size: u32) -> (i32, i32) {
    let size = cell_size.max(1) as i32;
    (px.div_euclid(size), py.div_euclid(size))
}

/// Depth by which two circles interpenetrate (positive = overlapping)
#[inline]
pub fn overlap_depth(p1: Vec2, r1: f32, p2: Vec2, r2: f32) -> f32 {
    (r1 + r2) - p1.distance(p2)
}

/// Whether two circles touch or overlap
#[inline]
pub fn circles_overlap(p1: Vec2, r1: f32, p2: Vec2, r2: f32) -> bool {
    let reach = r1 + r2;
    p1.distance_squared(p2) <= reach * reach
}

/// Unit vector pointing from `from` to `to`, or `None` for coincident points
#[inline]
pub fn contact_normal(from: Vec2, to: Vec2) -> Option<Vec2> {
    let delta = to - from;
    let dist_sq = delta.length_squared();
    if dist_sq < DEGENERATE_DIST_SQ {
        return None;
    }
    Some(delta / dist_sq.sqrt())
}

/// Velocity implied by moving from `prev` to `curr` over `dt` seconds
#[inline]
pub fn velocity_from_displacement(prev: Vec2, curr: Vec2, dt: f32) -> Vec2 {
    if dt <= 0.0 {
        return Vec2::ZERO;
    }
    (curr - prev) / dt
}

/// Momentum of a body
#[inline]
pub fn momentum(mass: f32, vel: Vec2) -> Vec2 {
    vel * mass
}

/// Kinetic energy of a body
#[inline]
pub fn kinetic_energy(mass: f32, vel: Vec2) -> f32 {
    0.5 * mass * vel.length_squared()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_to_cell() {
        assert_eq!(screen_to_cell(0, 0, 4), (0, 0));
        assert_eq!(screen_to_cell(7, 9, 4), (1, 2));
        assert_eq!(screen_to_cell(-1, 3, 4), (-1, 0));
    }

    #[test]
    fn test_overlap() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(30.0, 0.0);
        assert!(circles_overlap(a, 20.0, b, 20.0));
        assert!((overlap_depth(a, 20.0, b, 20.0) - 10.0).abs() < 1e-5);

        // Touching counts as overlap
        assert!(circles_overlap(a, 15.0, b, 15.0));
        assert!(!circles_overlap(a, 10.0, b, 10.0));
    }

    #[test]
    fn test_contact_normal_degenerate() {
        let p = Vec2::new(5.0, 5.0);
        assert!(contact_normal(p, p).is_none());

        let n = contact_normal(Vec2::ZERO, Vec2::new(0.0, 3.0)).unwrap();
        assert!((n - Vec2::Y).length() < 1e-6);
    }

    #[test]
    fn test_velocity_from_displacement() {
        let v = velocity_from_displacement(Vec2::ZERO, Vec2::new(1.0, -2.0), 0.5);
        assert_eq!(v, Vec2::new(2.0, -4.0));
        assert_eq!(velocity_from_displacement(Vec2::ZERO, Vec2::ONE, 0.0), Vec2::ZERO);
    }

    #[test]
    fn test_rgba_pack() {
        assert_eq!(Rgba::new(1, 2, 3, 4).to_u32(), 0x01020304);
    }
}
