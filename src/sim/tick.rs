//! Per-frame simulation step
//!
//! Core game loop that advances a session by exactly one frame. The phase
//! order inside `tick` is fixed; later phases read what earlier ones wrote.

use glam::Vec2;
use rand::Rng;

use super::SimError;
use super::bounds::Bounds;
use super::collision::overlaps;
use super::entity::{Entity, EntityKind, ProjectileVariant};
use super::state::SessionState;
use crate::driver::Outcome;
use crate::input::{Direction, InputSampler};
use crate::tuning::Tuning;

/// What a tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickStatus {
    /// Session still in progress
    Running,
    /// A terminal condition fired during this tick
    Finished(Outcome),
    /// Session was already over; nothing was touched
    Halted,
}

impl TickStatus {
    /// Only a running tick gets drawn and schedules another frame
    pub fn is_running(&self) -> bool {
        matches!(self, TickStatus::Running)
    }

    /// Outcome carried by a finishing tick
    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            TickStatus::Finished(outcome) => Some(*outcome),
            _ => None,
        }
    }
}

/// Advance the session by one frame
pub fn tick<R: Rng + ?Sized>(
    state: &mut SessionState,
    input: &InputSampler,
    bounds: Bounds,
    tuning: &Tuning,
    rng: &mut R,
) -> Result<TickStatus, SimError> {
    if !state.running {
        return Ok(TickStatus::Halted);
    }
    let size = state.player.size;
    if !(size.x > 0.0 && size.y > 0.0) {
        return Err(SimError::DegeneratePlayer {
            width: size.x,
            height: size.y,
        });
    }

    // Player movement
    let speed = tuning.player_speed;
    let mut step = Vec2::ZERO;
    if input.is_held(Direction::Left) {
        step.x -= speed;
    }
    if input.is_held(Direction::Right) {
        step.x += speed;
    }
    if input.is_held(Direction::Up) {
        step.y -= speed;
    }
    if input.is_held(Direction::Down) {
        step.y += speed;
    }
    state.player.pos += step;
    state.clamp_player(bounds);

    // Professor patrol (cosmetic)
    let phase = state.frame as f32 * tuning.professor_phase_rate;
    state.professor_x =
        bounds.width() / 2.0 + phase.sin() * bounds.width() * tuning.professor_amplitude;

    // Spawning
    if state.frame % tuning.projectile_interval == 0 {
        spawn_projectile(state, bounds, tuning, rng);
    }
    if state.frame % tuning.collectible_interval == 0 {
        spawn_collectible(state, bounds, tuning, rng);
    }

    // Integration
    for entity in state.projectiles.iter_mut().chain(state.collectibles.iter_mut()) {
        entity.integrate();
    }

    // Despawn anything whose top edge left the surface
    let floor = bounds.height();
    state.projectiles.retain(|p| !p.is_below(floor));
    state.collectibles.retain(|c| !c.is_below(floor));

    // Player vs tasks: first hit ends the run
    let player_box = state.player.aabb();
    if state
        .projectiles
        .iter()
        .any(|p| overlaps(&player_box, &p.aabb()))
    {
        return Ok(finish(state, false));
    }

    // Player vs saves, back to front so removal never skips an entry
    for i in (0..state.collectibles.len()).rev() {
        if !overlaps(&player_box, &state.collectibles[i].aabb()) {
            continue;
        }
        let collected = state.collectibles.remove(i);
        state.score += tuning.collect_reward;
        state.upload_progress = state.upload_progress.saturating_add(tuning.progress_step);
        log::debug!(
            "Collected save {:?}: score={} progress={}",
            collected.id,
            state.score,
            state.upload_progress
        );

        if state.upload_progress >= tuning.progress_goal {
            return Ok(finish(state, true));
        }
    }

    state.frame += 1;
    Ok(TickStatus::Running)
}

fn finish(state: &mut SessionState, won: bool) -> TickStatus {
    state.running = false;
    let outcome = Outcome {
        won,
        score: state.score,
    };
    log::info!(
        "Session finished at frame {}: {} (score {})",
        state.frame,
        if won { "uploaded" } else { "caught" },
        state.score
    );
    TickStatus::Finished(outcome)
}

/// Random x such that the whole box fits horizontally
fn spawn_x<R: Rng + ?Sized>(bounds: Bounds, size: f32, rng: &mut R) -> f32 {
    let max_x = (bounds.width() - size).max(0.0);
    rng.random_range(0.0..=max_x)
}

/// Drop a new task from above the top edge
pub fn spawn_projectile<R: Rng + ?Sized>(
    state: &mut SessionState,
    bounds: Bounds,
    tuning: &Tuning,
    rng: &mut R,
) {
    let (variant, speed) = if rng.random_bool(tuning.fast_projectile_chance) {
        (ProjectileVariant::FailingGrade, tuning.fast_projectile_speed)
    } else {
        (ProjectileVariant::Assignment, tuning.slow_projectile_speed)
    };
    let size = tuning.falling_size;
    let x = spawn_x(bounds, size, rng);
    let id = state.next_entity_id();
    log::trace!("Spawn projectile {:?} ({:?}) at x={:.1}", id, variant, x);
    state.projectiles.push(Entity::new(
        id,
        EntityKind::Projectile(variant),
        Vec2::new(x, tuning.spawn_y),
        Vec2::splat(size),
        Vec2::new(0.0, speed),
    ));
}

/// Drop a new save from above the top edge
pub fn spawn_collectible<R: Rng + ?Sized>(
    state: &mut SessionState,
    bounds: Bounds,
    tuning: &Tuning,
    rng: &mut R,
) {
    let size = tuning.falling_size;
    let x = spawn_x(bounds, size, rng);
    let id = state.next_entity_id();
    log::trace!("Spawn collectible {:?} at x={:.1}", id, x);
    state.collectibles.push(Entity::new(
        id,
        EntityKind::Collectible,
        Vec2::new(x, tuning.spawn_y),
        Vec2::splat(size),
        Vec2::new(0.0, tuning.collectible_speed),
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use crate::sim::entity::EntityId;

    fn bounds() -> Bounds {
        Bounds::new(800, 600).unwrap()
    }

    fn falling(kind: EntityKind, x: f32, y: f32) -> Entity {
        Entity::new(
            EntityId(10_000),
            kind,
            Vec2::new(x, y),
            Vec2::splat(30.0),
            Vec2::ZERO,
        )
    }

    /// State at frame 1 so nothing spawns on the next tick
    fn quiet_state() -> SessionState {
        let mut state = SessionState::new(bounds(), &Tuning::default());
        state.frame = 1;
        state
    }

    #[test]
    fn test_win_on_final_collectible() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut state = quiet_state();
        state.upload_progress = 90;
        state.score = 900;
        let p = state.player.pos;
        state.collectibles.push(falling(EntityKind::Collectible, p.x, p.y));

        let status = tick(&mut state, &InputSampler::default(), bounds(), &tuning, &mut rng).unwrap();

        assert_eq!(
            status,
            TickStatus::Finished(Outcome {
                won: true,
                score: 1000
            })
        );
        assert!(!status.is_running());
        assert_eq!(state.upload_progress, 100);
        assert!(!state.running);
        assert!(state.collectibles.is_empty());
        // Terminal tick does not advance the frame counter
        assert_eq!(state.frame, 1);
    }

    #[test]
    fn test_progress_saturates_at_max() {
        let tuning = Tuning {
            progress_goal: u32::MAX,
            ..Tuning::default()
        };
        let mut rng = Pcg32::seed_from_u64(11);
        let mut state = quiet_state();
        state.upload_progress = u32::MAX - 5;
        let p = state.player.pos;
        state.collectibles.push(falling(EntityKind::Collectible, p.x, p.y));

        let status = tick(&mut state, &InputSampler::default(), bounds(), &tuning, &mut rng).unwrap();
        assert_eq!(status.outcome().map(|o| o.won), Some(true));
        assert_eq!(state.upload_progress, u32::MAX);
    }

    #[test]
    fn test_loss_on_projectile_hit() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(2);
        let mut state = quiet_state();
        state.score = 300;
        let p = state.player.pos;
        state.projectiles.push(falling(
            EntityKind::Projectile(ProjectileVariant::Assignment),
            p.x + 5.0,
            p.y + 5.0,
        ));
        // A save in reach must not be collected once the run is lost
        state.collectibles.push(falling(EntityKind::Collectible, p.x, p.y));

        let status = tick(&mut state, &InputSampler::default(), bounds(), &tuning, &mut rng).unwrap();
        assert_eq!(status.outcome(), Some(Outcome { won: false, score: 300 }));
        assert!(!state.running);
        assert_eq!(state.score, 300);
        assert_eq!(state.upload_progress, 0);
        assert_eq!(state.collectibles.len(), 1);

        // Further ticks leave the state alone
        let snapshot = state.clone();
        let status = tick(&mut state, &InputSampler::default(), bounds(), &tuning, &mut rng).unwrap();
        assert_eq!(status, TickStatus::Halted);
        assert!(!status.is_running());
        assert_eq!(state, snapshot);
    }

    #[test]
    fn test_loss_wins_over_simultaneous_collect() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut state = quiet_state();
        state.upload_progress = 90;
        let p = state.player.pos;
        state.projectiles.push(falling(
            EntityKind::Projectile(ProjectileVariant::FailingGrade),
            p.x,
            p.y,
        ));
        state.collectibles.push(falling(EntityKind::Collectible, p.x, p.y));

        let status = tick(&mut state, &InputSampler::default(), bounds(), &tuning, &mut rng).unwrap();
        assert_eq!(status.outcome().map(|o| o.won), Some(false));
        assert_eq!(state.upload_progress, 90);
    }

    #[test]
    fn test_multiple_collectibles_in_one_tick() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(4);
        let mut state = quiet_state();
        let p = state.player.pos;
        state.collectibles.push(falling(EntityKind::Collectible, p.x, p.y));
        state.collectibles.push(falling(EntityKind::Collectible, 5.0, 0.0));
        state.collectibles.push(falling(EntityKind::Collectible, p.x + 10.0, p.y + 10.0));

        let status = tick(&mut state, &InputSampler::default(), bounds(), &tuning, &mut rng).unwrap();
        assert_eq!(status, TickStatus::Running);
        assert!(status.is_running());
        assert_eq!(state.score, 200);
        assert_eq!(state.upload_progress, 20);
        assert_eq!(state.collectibles.len(), 1);
        assert_eq!(state.collectibles[0].pos.x, 5.0);
    }

    #[test]
    fn test_spawn_cadence() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(5);
        // Tall surface so nothing despawns, player parked far below the spawns
        let bounds = Bounds::new(800, 100_000).unwrap();
        let mut state = SessionState::new(bounds, &tuning);
        let input = InputSampler::default();

        let mut projectiles = 0;
        let mut collectibles = 0;
        for _ in 0..400 {
            let before = (state.projectiles.len(), state.collectibles.len());
            tick(&mut state, &input, bounds, &tuning, &mut rng).unwrap();
            projectiles += state.projectiles.len() - before.0;
            collectibles += state.collectibles.len() - before.1;
        }

        assert_eq!(state.frame, 400);
        assert_eq!(projectiles, 10);
        assert_eq!(collectibles, 5);
    }

    #[test]
    fn test_spawned_entities_start_above_screen() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(6);
        let mut state = SessionState::new(bounds(), &tuning);
        spawn_projectile(&mut state, bounds(), &tuning, &mut rng);
        spawn_collectible(&mut state, bounds(), &tuning, &mut rng);

        let p = &state.projectiles[0];
        assert_eq!(p.pos.y, -50.0);
        assert!(p.pos.x >= 0.0 && p.pos.x <= 770.0);
        let expected_speed = match p.kind {
            EntityKind::Projectile(ProjectileVariant::FailingGrade) => 5.0,
            EntityKind::Projectile(ProjectileVariant::Assignment) => 3.0,
            _ => unreachable!(),
        };
        assert_eq!(p.vel, Vec2::new(0.0, expected_speed));

        let c = &state.collectibles[0];
        assert_eq!(c.vel, Vec2::new(0.0, 4.0));
        assert_ne!(p.id, c.id);
    }

    #[test]
    fn test_fast_variant_ratio() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut state = SessionState::new(bounds(), &tuning);
        for _ in 0..2000 {
            spawn_projectile(&mut state, bounds(), &tuning, &mut rng);
        }
        let fast = state
            .projectiles
            .iter()
            .filter(|p| p.kind == EntityKind::Projectile(ProjectileVariant::FailingGrade))
            .count();
        // 20% of 2000 = 400, generous band
        assert!((300..500).contains(&fast), "fast count {}", fast);
    }

    #[test]
    fn test_narrow_surface_spawns_at_zero() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(8);
        let narrow = Bounds::new(20, 600).unwrap();
        let mut state = SessionState::new(narrow, &tuning);
        spawn_collectible(&mut state, narrow, &tuning, &mut rng);
        assert_eq!(state.collectibles[0].pos.x, 0.0);
    }

    #[test]
    fn test_despawn_past_bottom() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(9);
        let mut state = quiet_state();
        let mut leaving = falling(EntityKind::Projectile(ProjectileVariant::Assignment), 0.0, 598.0);
        leaving.vel = Vec2::new(0.0, 3.0);
        let mut staying = falling(EntityKind::Collectible, 0.0, 500.0);
        staying.vel = Vec2::new(0.0, 4.0);
        state.projectiles.push(leaving);
        state.collectibles.push(staying);

        tick(&mut state, &InputSampler::default(), bounds(), &tuning, &mut rng).unwrap();
        assert!(state.projectiles.is_empty());
        assert_eq!(state.collectibles.len(), 1);
        assert_eq!(state.collectibles[0].pos.y, 504.0);
    }

    #[test]
    fn test_despawned_projectile_cannot_hit() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(10);
        let mut state = quiet_state();
        // Park the player on the floor
        state.player.pos.y = 560.0;
        // Overlaps the player, but its top edge leaves the surface this tick
        let mut p = falling(
            EntityKind::Projectile(ProjectileVariant::FailingGrade),
            state.player.pos.x,
            596.0,
        );
        p.vel = Vec2::new(0.0, 5.0);
        state.projectiles.push(p);

        let status = tick(&mut state, &InputSampler::default(), bounds(), &tuning, &mut rng).unwrap();
        assert_eq!(status, TickStatus::Running);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_player_cannot_climb_above_midpoint() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(11);
        let mut state = quiet_state();
        let mut input = InputSampler::default();
        input.press("ArrowUp");
        input.press("ArrowLeft");
        for _ in 0..200 {
            state.projectiles.clear();
            state.collectibles.clear();
            tick(&mut state, &input, bounds(), &tuning, &mut rng).unwrap();
        }
        assert_eq!(state.player.pos, Vec2::new(0.0, 300.0));
    }

    #[test]
    fn test_professor_follows_sine_patrol() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(12);
        let mut state = quiet_state();
        state.frame = 314;
        tick(&mut state, &InputSampler::default(), bounds(), &tuning, &mut rng).unwrap();
        let expected = 400.0 + (314.0f32 * 0.005).sin() * 320.0;
        assert!((state.professor_x - expected).abs() < 1e-3);
    }

    #[test]
    fn test_degenerate_player_rejected() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(13);
        let mut state = quiet_state();
        state.player.size = Vec2::new(0.0, 40.0);
        let result = tick(&mut state, &InputSampler::default(), bounds(), &tuning, &mut rng);
        assert!(matches!(result, Err(SimError::DegeneratePlayer { .. })));
    }

    #[test]
    fn test_determinism() {
        let tuning = Tuning::default();
        let mut input = InputSampler::default();
        input.press("ArrowRight");

        let mut a = SessionState::new(bounds(), &tuning);
        let mut b = SessionState::new(bounds(), &tuning);
        let mut rng_a = Pcg32::seed_from_u64(99999);
        let mut rng_b = Pcg32::seed_from_u64(99999);

        for _ in 0..250 {
            let sa = tick(&mut a, &input, bounds(), &tuning, &mut rng_a).unwrap();
            let sb = tick(&mut b, &input, bounds(), &tuning, &mut rng_b).unwrap();
            assert_eq!(sa, sb);
        }
        assert_eq!(a, b);
    }

    fn direction_set() -> impl Strategy<Value = Vec<(bool, bool, bool, bool)>> {
        prop::collection::vec(any::<(bool, bool, bool, bool)>(), 1..120)
    }

    proptest! {
        #[test]
        fn prop_player_stays_in_lower_half(
            frames in direction_set(),
            width in 50u32..1600,
            height in 100u32..1200,
            seed in any::<u64>(),
        ) {
            let tuning = Tuning::default();
            let bounds = Bounds::new(width, height).unwrap();
            let mut state = SessionState::new(bounds, &tuning);
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut input = InputSampler::default();

            for (up, down, left, right) in frames {
                input.set(Direction::Up, up);
                input.set(Direction::Down, down);
                input.set(Direction::Left, left);
                input.set(Direction::Right, right);
                // Only movement matters here
                state.projectiles.clear();
                state.collectibles.clear();
                tick(&mut state, &input, bounds, &tuning, &mut rng).unwrap();

                let p = state.player.pos;
                let size = state.player.size;
                prop_assert!(p.x >= 0.0 && p.x <= bounds.width() - size.x);
                prop_assert!(p.y >= bounds.height() / 2.0 && p.y <= bounds.height() - size.y);
            }
        }
    }
}
