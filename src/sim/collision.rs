//! Circle-circle overlap tests
//!
//! Everything in the arena is a circle. Tests are discrete (no sweeping), so a
//! fast shot can skip past a small target on a long frame.

use glam::Vec2;

use super::state::{Body, Projectile};

/// Two circles collide iff the distance between centers is less than the sum of radii
#[inline]
pub fn circles_overlap(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> bool {
    a_pos.distance(b_pos) < a_radius + b_radius
}

/// Check a projectile against a combatant body
#[inline]
pub fn projectile_hits(projectile: &Projectile, body: &Body) -> bool {
    circles_overlap(projectile.pos, projectile.radius, body.pos, body.radius)
}
