//! Session state and entity store
//!
//! Everything the simulation step mutates lives in one owned aggregate.
//! Renderer and HUD only ever borrow it immutably.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bounds::Bounds;
use super::entity::{Entity, EntityId, EntityKind};
use crate::tuning::Tuning;

/// Complete state of one play session (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    /// The student
    pub player: Entity,
    /// Falling tasks (insertion order)
    pub projectiles: Vec<Entity>,
    /// Falling saves (insertion order)
    pub collectibles: Vec<Entity>,
    /// Ticks completed this session
    pub frame: u64,
    pub score: u64,
    /// Raw upload progress; only the HUD clamps it
    pub upload_progress: u32,
    /// Decorative professor centre x (no collision)
    pub professor_x: f32,
    /// False once a terminal condition fired
    pub running: bool,
    /// Next entity ID
    next_id: u64,
}

impl SessionState {
    /// Fresh session: counters zeroed, no falling entities, player at bottom centre
    pub fn new(bounds: Bounds, tuning: &Tuning) -> Self {
        let size = Vec2::splat(tuning.player_size);
        let player = Entity::new(
            EntityId(0),
            EntityKind::Player,
            Vec2::ZERO,
            size,
            Vec2::ZERO,
        );
        let mut state = Self {
            player,
            projectiles: Vec::new(),
            collectibles: Vec::new(),
            frame: 0,
            score: 0,
            upload_progress: 0,
            professor_x: bounds.width() / 2.0,
            running: true,
            next_id: 1,
        };
        state.place_player(bounds, tuning);
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Move the player to the bottom-centre spawn point, inside the legal region
    pub fn place_player(&mut self, bounds: Bounds, tuning: &Tuning) {
        let size = self.player.size;
        self.player.pos = Vec2::new(
            (bounds.width() - size.x) / 2.0,
            bounds.height() - tuning.player_bottom_offset,
        );
        self.clamp_player(bounds);
    }

    /// Keep the player box inside [0, w - pw] x [h/2, h - ph]
    ///
    /// When the surface is smaller than the player the lower limit wins.
    pub fn clamp_player(&mut self, bounds: Bounds) {
        let size = self.player.size;
        let pos = &mut self.player.pos;
        pos.x = clamp_axis(pos.x, 0.0, bounds.width() - size.x);
        pos.y = clamp_axis(pos.y, bounds.height() / 2.0, bounds.height() - size.y);
    }

    /// Number of live falling entities
    pub fn falling_count(&self) -> usize {
        self.projectiles.len() + self.collectibles.len()
    }
}

#[inline]
fn clamp_axis(v: f32, lo: f32, hi: f32) -> f32 {
    v.min(hi.max(lo)).max(lo)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_zeroed() {
        let bounds = Bounds::new(800, 600).unwrap();
        let state = SessionState::new(bounds, &Tuning::default());
        assert_eq!(state.frame, 0);
        assert_eq!(state.score, 0);
        assert_eq!(state.upload_progress, 0);
        assert!(state.running);
        assert_eq!(state.falling_count(), 0);
        assert_eq!(state.player.kind, EntityKind::Player);
    }

    #[test]
    fn test_player_starts_bottom_centre() {
        let bounds = Bounds::new(800, 600).unwrap();
        let state = SessionState::new(bounds, &Tuning::default());
        assert_eq!(state.player.pos, Vec2::new(380.0, 500.0));
    }

    #[test]
    fn test_short_surface_clamps_spawn_point() {
        // h - 100 would be above the midpoint
        let bounds = Bounds::new(300, 150).unwrap();
        let state = SessionState::new(bounds, &Tuning::default());
        assert_eq!(state.player.pos.y, 75.0);
    }

    #[test]
    fn test_tiny_surface_pins_to_lower_limit() {
        let bounds = Bounds::new(10, 10).unwrap();
        let mut state = SessionState::new(bounds, &Tuning::default());
        state.player.pos = Vec2::new(-30.0, 99.0);
        state.clamp_player(bounds);
        assert_eq!(state.player.pos, Vec2::new(0.0, 5.0));
    }

    #[test]
    fn test_entity_ids_never_repeat() {
        let bounds = Bounds::new(800, 600).unwrap();
        let mut state = SessionState::new(bounds, &Tuning::default());
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert_ne!(a, b);
        assert_ne!(a, state.player.id);
        assert!(b > a);
    }
}
