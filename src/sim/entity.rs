//! Moving sprites: the player, falling tasks and falling saves

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;

/// Unique per-session entity identity (never reused)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u64);

/// Which falling task a projectile is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileVariant {
    /// Regular homework, slow fall
    Assignment,
    /// A failing grade, falls faster
    FailingGrade,
}

/// Entity role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Projectile(ProjectileVariant),
    Collectible,
}

/// Any moving sprite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: EntityKind,
    /// Per-tick displacement
    pub vel: Vec2,
}

impl Entity {
    pub fn new(id: EntityId, kind: EntityKind, pos: Vec2, size: Vec2, vel: Vec2) -> Self {
        debug_assert!(size.x > 0.0 && size.y > 0.0, "entity size must be positive");
        Self {
            id,
            pos,
            size,
            kind,
            vel,
        }
    }

    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Advance one tick along the velocity
    #[inline]
    pub fn integrate(&mut self) {
        self.pos += self.vel;
    }

    /// True once the top edge has reached the bottom of the surface
    #[inline]
    pub fn is_below(&self, surface_height: f32) -> bool {
        self.pos.y >= surface_height
    }
}
