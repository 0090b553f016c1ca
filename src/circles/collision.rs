//! Circle-circle collision detection and response
//!
//! Response is the standard 2D elastic impulse along the line of centers.
//! Position correction runs as a separate pass so the velocity math always
//! sees the positions the overlap was detected at.

use glam::Vec2;

use super::state::Circle;
use crate::geom::{DEGENERATE_DIST_SQ, circles_overlap, contact_normal};

/// Contact between two overlapping circles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit vector from the first circle's center toward the second's
    pub normal: Vec2,
    /// Overlap depth (for position correction)
    pub penetration: f32,
}

/// Contact info if `a` and `b` touch, `None` when apart or coincident
pub fn circle_contact(a: &Circle, b: &Circle) -> Option<Contact> {
    if !circles_overlap(a.pos, a.radius, b.pos, b.radius) {
        return None;
    }
    let normal = contact_normal(a.pos, b.pos)?;
    Some(Contact {
        normal,
        penetration: (a.radius + b.radius) - a.pos.distance(b.pos),
    })
}

/// Post-collision velocities for two bodies.
///
/// `v1' = v1 - 2·m2/(m1+m2) · ((v1-v2)·(p1-p2)) / |p1-p2|² · (p1-p2)`, and
/// symmetrically for `v2'`. Both results use the pre-collision velocities.
/// Returns `None` for coincident centers.
pub fn elastic_response(
    m1: f32,
    p1: Vec2,
    v1: Vec2,
    m2: f32,
    p2: Vec2,
    v2: Vec2,
) -> Option<(Vec2, Vec2)> {
    let d = p1 - p2;
    let dist_sq = d.length_squared();
    let total_mass = m1 + m2;
    if dist_sq < DEGENERATE_DIST_SQ || total_mass <= 0.0 {
        return None;
    }
    let k = (v1 - v2).dot(d) / dist_sq;
    let v1_new = v1 - (2.0 * m2 / total_mass) * k * d;
    let v2_new = v2 + (2.0 * m1 / total_mass) * k * d;
    Some((v1_new, v2_new))
}

/// Resolve an overlapping, approaching pair in place.
///
/// Separating pairs are left alone so a pair still touching after position
/// correction does not bounce back into itself next tick. Returns true if
/// velocities changed.
pub fn resolve_pair(a: &mut Circle, b: &mut Circle) -> bool {
    if !circles_overlap(a.pos, a.radius, b.pos, b.radius) {
        return false;
    }
    if (a.vel - b.vel).dot(a.pos - b.pos) >= 0.0 {
        return false;
    }
    match elastic_response(a.mass, a.pos, a.vel, b.mass, b.pos, b.vel) {
        Some((va, vb)) => {
            a.vel = va;
            b.vel = vb;
            true
        }
        None => false,
    }
}

/// Push an overlapping pair apart along the line of centers.
///
/// The overlap is split by inverse mass, so equal masses each move half of it.
pub fn separate_pair(a: &mut Circle, b: &mut Circle) -> bool {
    let Some(contact) = circle_contact(a, b) else {
        return false;
    };
    if contact.penetration <= 0.0 {
        return false;
    }
    let total_mass = a.mass + b.mass;
    let (share_a, share_b) = if total_mass > 0.0 {
        (b.mass / total_mass, a.mass / total_mass)
    } else {
        (0.5, 0.5)
    };
    a.pos -= contact.normal * contact.penetration * share_a;
    b.pos += contact.normal * contact.penetration * share_b;
    true
}

/// Mutable references to two distinct circles
pub(crate) fn pair_mut(circles: &mut [Circle], i: usize, j: usize) -> (&mut Circle, &mut Circle) {
    debug_assert!(i < j);
    let (head, tail) = circles.split_at_mut(j);
    (&mut head[i], &mut tail[0])
}

/// Elastic response for every overlapping pair `i < j`
pub fn resolve_collisions(circles: &mut [Circle]) -> usize {
    let mut hits = 0;
    for i in 0..circles.len() {
        for j in (i + 1)..circles.len() {
            let (a, b) = pair_mut(circles, i, j);
            if resolve_pair(a, b) {
                hits += 1;
            }
        }
    }
    hits
}

/// Positional correction for every overlapping pair `i < j`
pub fn correct_positions(circles: &mut [Circle]) {
    for i in 0..circles.len() {
        for j in (i + 1)..circles.len() {
            let (a, b) = pair_mut(circles, i, j);
            separate_pair(a, b);
        }
    }
}

/// Keep a circle inside `[0, width] × [0, height]`.
///
/// A circle past an edge is clamped onto it and its velocity component is
/// pointed back inward. Returns true if it touched a wall.
pub fn bounce_off_walls(circle: &mut Circle, width: f32, height: f32) -> bool {
    let hit_x = bounce_axis(&mut circle.pos.x, &mut circle.vel.x, circle.radius, width);
    let hit_y = bounce_axis(&mut circle.pos.y, &mut circle.vel.y, circle.radius, height);
    hit_x || hit_y
}

fn bounce_axis(pos: &mut f32, vel: &mut f32, radius: f32, extent: f32) -> bool {
    let (lo, hi) = (radius, extent - radius);
    if lo > hi {
        // Wider than the screen: pin to the middle
        *pos = extent / 2.0;
        *vel = 0.0;
        return true;
    }
    if *pos > hi {
        *pos = hi;
        *vel = -vel.abs();
        true
    } else if *pos < lo {
        *pos = lo;
        *vel = vel.abs();
        true
    } else {
        false
    }
}
