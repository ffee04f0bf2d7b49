//! Axis-aligned box collision
//!
//! Everything in the game is a rectangle with a top-left origin, so a single
//! strict overlap test covers player/projectile and player/collectible hits.

use glam::Vec2;

/// Axis-aligned bounding box (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }
}

/// Strict overlap: boxes sharing only an edge or a corner do not collide
#[inline]
pub fn overlaps(a: &Aabb, b: &Aabb) -> bool {
    let (a_max, b_max) = (a.max(), b.max());
    a.min.x < b_max.x && a_max.x > b.min.x && a.min.y < b_max.y && a_max.y > b.min.y
}
