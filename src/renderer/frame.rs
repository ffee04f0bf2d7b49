//! Scene assembly
//!
//! Turns a session snapshot into one triangle list. Pure: the same state
//! and style always produce the same vertices.

use glam::Vec2;

use super::shapes::{grid, line, pixel_sprite, rect};
use super::sprite::{PROFESSOR, PROFESSOR_PALETTE};
use super::vertex::{Vertex, colors};
use crate::sim::{Bounds, Entity, EntityKind, ProjectileVariant, SessionState};

/// Fixed presentation parameters
#[derive(Debug, Clone, PartialEq)]
pub struct FrameStyle {
    pub background: [f32; 4],
    pub grid_color: [f32; 4],
    /// Grid cell size in pixels
    pub grid_cell: f32,
    pub grid_thickness: f32,
    /// Screen pixels per sprite cell
    pub sprite_scale: f32,
    /// Top edge of the professor sprite
    pub professor_top: f32,
}

impl Default for FrameStyle {
    fn default() -> Self {
        Self {
            background: colors::BACKGROUND,
            grid_color: colors::GRID,
            grid_cell: 50.0,
            grid_thickness: 1.0,
            sprite_scale: 6.0,
            professor_top: 40.0,
        }
    }
}

/// Build every vertex for one frame, back to front
pub fn build_frame(state: &SessionState, bounds: Bounds, style: &FrameStyle) -> Vec<Vertex> {
    let surface = Vec2::new(bounds.width(), bounds.height());
    let mut vertices = Vec::with_capacity(2048);

    vertices.extend(rect(Vec2::ZERO, surface, style.background));
    vertices.extend(grid(
        surface,
        style.grid_cell,
        style.grid_thickness,
        style.grid_color,
    ));

    let sprite_width = PROFESSOR[0].len() as f32 * style.sprite_scale;
    let origin = Vec2::new(state.professor_x - sprite_width / 2.0, style.professor_top);
    vertices.extend(pixel_sprite(
        origin,
        style.sprite_scale,
        &PROFESSOR,
        &PROFESSOR_PALETTE,
    ));

    push_glyph(&mut vertices, &state.player);
    for entity in state.projectiles.iter().chain(state.collectibles.iter()) {
        push_glyph(&mut vertices, entity);
    }

    vertices
}

fn push_glyph(out: &mut Vec<Vertex>, entity: &Entity) {
    let min = entity.pos;
    let s = entity.size;
    // Offsets below are fractions of the box so glyphs scale with tuning
    let at = |fx: f32, fy: f32| min + Vec2::new(fx * s.x, fy * s.y);
    let span = |fx: f32, fy: f32| Vec2::new(fx * s.x, fy * s.y);

    match entity.kind {
        EntityKind::Player => {
            // Mortarboard: flat top, crown, tassel
            out.extend(rect(at(0.0, 0.25), span(1.0, 0.15), colors::CAP));
            out.extend(rect(at(0.25, 0.4), span(0.5, 0.3), colors::CAP));
            out.extend(line(at(0.9, 0.32), at(0.9, 0.75), s.x * 0.05, colors::TASSEL));
        }
        EntityKind::Projectile(ProjectileVariant::Assignment) => {
            out.extend(rect(at(0.15, 0.05), span(0.7, 0.9), colors::PAPER));
            for i in 0..3 {
                let y = 0.25 + i as f32 * 0.2;
                out.extend(rect(at(0.25, y), span(0.5, 0.06), colors::INK));
            }
        }
        EntityKind::Projectile(ProjectileVariant::FailingGrade) => {
            let w = s.x * 0.18;
            out.extend(line(at(0.15, 0.15), at(0.85, 0.85), w, colors::FAIL_MARK));
            out.extend(line(at(0.85, 0.15), at(0.15, 0.85), w, colors::FAIL_MARK));
        }
        EntityKind::Collectible => {
            out.extend(rect(at(0.07, 0.07), span(0.86, 0.86), colors::DISK));
            out.extend(rect(at(0.3, 0.07), span(0.4, 0.3), colors::DISK_SHUTTER));
            out.extend(rect(at(0.2, 0.55), span(0.6, 0.38), colors::DISK_LABEL));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::sprite::professor_pixel_count;
    use crate::sim::{EntityId, SessionState};
    use crate::tuning::Tuning;

    fn bounds() -> Bounds {
        Bounds::new(800, 600).unwrap()
    }

    fn busy_state() -> SessionState {
        let mut state = SessionState::new(bounds(), &Tuning::default());
        state.professor_x = 250.0;
        for (i, kind) in [
            EntityKind::Projectile(ProjectileVariant::Assignment),
            EntityKind::Projectile(ProjectileVariant::FailingGrade),
        ]
        .into_iter()
        .enumerate()
        {
            state.projectiles.push(Entity::new(
                EntityId(100 + i as u64),
                kind,
                Vec2::new(100.0 * i as f32, 120.0),
                Vec2::splat(30.0),
                Vec2::new(0.0, 3.0),
            ));
        }
        state.collectibles.push(Entity::new(
            EntityId(200),
            EntityKind::Collectible,
            Vec2::new(400.0, 80.0),
            Vec2::splat(30.0),
            Vec2::new(0.0, 4.0),
        ));
        state
    }

    #[test]
    fn test_render_is_idempotent() {
        let state = busy_state();
        let before = state.clone();
        let style = FrameStyle::default();

        let a = build_frame(&state, bounds(), &style);
        let b = build_frame(&state, bounds(), &style);
        assert_eq!(a, b);
        assert_eq!(state, before);
    }

    #[test]
    fn test_layer_order_and_counts() {
        let state = SessionState::new(bounds(), &Tuning::default());
        let v = build_frame(&state, bounds(), &FrameStyle::default());

        // Background first
        assert_eq!(v[0].color, colors::BACKGROUND);
        let background = 6;
        let grid = (16 + 12) * 6;
        let professor = professor_pixel_count() * 6;
        let player = 3 * 6;
        assert_eq!(v.len(), background + grid + professor + player);
        // Player drawn last
        assert_eq!(v.last().unwrap().color, colors::TASSEL);
    }

    #[test]
    fn test_professor_centred_on_locus() {
        let mut state = SessionState::new(bounds(), &Tuning::default());
        state.professor_x = 300.0;
        let v = build_frame(&state, bounds(), &FrameStyle::default());

        let start = 6 + (16 + 12) * 6;
        let end = start + professor_pixel_count() * 6;
        let xs: Vec<f32> = v[start..end].iter().map(|v| v.position[0]).collect();
        let min = xs.iter().cloned().fold(f32::MAX, f32::min);
        let max = xs.iter().cloned().fold(f32::MIN, f32::max);
        assert_eq!(min, 300.0 - 36.0);
        assert_eq!(max, 300.0 + 36.0);
    }

    #[test]
    fn test_every_falling_entity_drawn() {
        let state = busy_state();
        let empty = SessionState::new(bounds(), &Tuning::default());
        let style = FrameStyle::default();
        let extra = build_frame(&state, bounds(), &style).len()
            - build_frame(&empty, bounds(), &style).len();
        // paper: 1 + 3 lines, cross: 2 strokes, disk: 3 parts
        assert_eq!(extra, (4 + 2 + 3) * 6);
    }
}
