//! Axis-aligned rectangle geometry for bricks, paddles, balls and hearts
//!
//! Screen space: origin at the top-left corner, y grows downward, so
//! "below the playfield" means `center.y > window.y`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle defined by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub top_left: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(top_left: Vec2, size: Vec2) -> Self {
        Self { top_left, size }
    }

    /// Build a rectangle of the given size centered on `center`
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self {
            top_left: center - size / 2.0,
            size,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.top_left + self.size / 2.0
    }

    /// Move the rectangle so its center lands on `center`
    pub fn set_center(&mut self, center: Vec2) {
        self.top_left = center - self.size / 2.0;
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.top_left.x + self.size.x
    }

    /// Translate by `delta`
    pub fn translate(&mut self, delta: Vec2) {
        self.top_left += delta;
    }

    /// Keep the rectangle horizontally within `[min_x, max_x]`
    pub fn clamp_x(&mut self, min_x: f32, max_x: f32) {
        if self.top_left.x < min_x {
            self.top_left.x = min_x;
        }
        if self.right() > max_x {
            self.top_left.x = max_x - self.size.x;
        }
    }

    /// True once the center has dropped past the lower bound
    pub fn is_below(&self, lower_bound: f32) -> bool {
        self.center().y > lower_bound
    }

    /// Contact normal pointing from `other` toward `self` along the axis of
    /// least penetration, or `None` when the rectangles do not overlap.
    pub fn contact_normal(&self, other: &Rect) -> Option<Vec2> {
        let delta = self.center() - other.center();
        let overlap = (self.size + other.size) / 2.0 - delta.abs();
        if overlap.x <= 0.0 || overlap.y <= 0.0 {
            return None;
        }
        if overlap.x < overlap.y {
            Some(Vec2::new(delta.x.signum(), 0.0))
        } else {
            Some(Vec2::new(0.0, delta.y.signum()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_round_trip() {
        let rect = Rect::centered(Vec2::new(50.0, 40.0), Vec2::new(20.0, 10.0));
        assert_eq!(rect.top_left, Vec2::new(40.0, 35.0));
        assert_eq!(rect.center(), Vec2::new(50.0, 40.0));
    }

    #[test]
    fn test_clamp_x_both_edges() {
        let mut rect = Rect::new(Vec2::new(-10.0, 0.0), Vec2::new(100.0, 15.0));
        rect.clamp_x(7.0, 693.0);
        assert_eq!(rect.top_left.x, 7.0);

        rect.top_left.x = 650.0;
        rect.clamp_x(7.0, 693.0);
        assert_eq!(rect.top_left.x, 593.0);
    }

    #[test]
    fn test_is_below_uses_center() {
        let rect = Rect::centered(Vec2::new(0.0, 495.0), Vec2::splat(20.0));
        // Bottom edge is past 500 but the center is not
        assert!(!rect.is_below(500.0));
        let rect = Rect::centered(Vec2::new(0.0, 501.0), Vec2::splat(20.0));
        assert!(rect.is_below(500.0));
    }

    #[test]
    fn test_contact_normal_least_penetration() {
        let paddle = Rect::new(Vec2::new(0.0, 100.0), Vec2::new(100.0, 15.0));
        // Ball sinking into the paddle's top face
        let ball = Rect::centered(Vec2::new(50.0, 95.0), Vec2::splat(20.0));
        assert_eq!(ball.contact_normal(&paddle), Some(Vec2::new(0.0, -1.0)));

        let apart = Rect::centered(Vec2::new(50.0, 50.0), Vec2::splat(20.0));
        assert_eq!(apart.contact_normal(&paddle), None);
    }
}
