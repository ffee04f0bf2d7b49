//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One call to `tick` per displayed frame
//! - Injected RNG only
//! - No rendering or platform dependencies

pub mod bounds;
pub mod collision;
pub mod entity;
pub mod state;
pub mod tick;

use thiserror::Error;

pub use bounds::Bounds;
pub use collision::{Aabb, overlaps};
pub use entity::{Entity, EntityId, EntityKind, ProjectileVariant};
pub use state::SessionState;
pub use tick::{TickStatus, spawn_collectible, spawn_projectile, tick};

/// Precondition failures the simulation refuses to work with
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("surface bounds must be positive, got {width}x{height}")]
    InvalidBounds { width: f64, height: f64 },
    #[error("player box has non-positive size {width}x{height}")]
    DegeneratePlayer { width: f32, height: f32 },
}
