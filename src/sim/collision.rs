//! Collision response rules
//!
//! Detection is the engine's job. This module decides which reported pairs
//! matter and how a ball's velocity responds to an impact.

use glam::Vec2;

use super::scene::SceneObject;
use super::state::PaddleKind;

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n. The sign of `normal` does not matter.
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    let n = normal.normalize_or_zero();
    velocity - 2.0 * velocity.dot(n) * n
}

/// Whether a reported overlap between `a` and `b` should be handled at all.
///
/// Hearts only interact with the primary paddle; everything else collides
/// with everything.
pub fn should_collide(a: &SceneObject, b: &SceneObject) -> bool {
    match (a, b) {
        (SceneObject::Heart(_), other) | (other, SceneObject::Heart(_)) => {
            matches!(other, SceneObject::Paddle(p) if p.kind == PaddleKind::Primary)
        }
        _ => true,
    }
}
