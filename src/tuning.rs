//! Data-driven game balance
//!
//! Every gameplay constant the simulation reads lives here. Defaults match
//! `crate::consts`; overrides are stored as JSON in LocalStorage.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading tuning overrides
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value for `{0}`")]
    Invalid(&'static str),
}

/// Gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    pub player_size: f32,
    pub player_speed: f32,
    pub player_bottom_offset: f32,

    // === Falling entities ===
    pub falling_size: f32,
    pub spawn_y: f32,
    pub projectile_interval: u64,
    pub fast_projectile_chance: f64,
    pub slow_projectile_speed: f32,
    pub fast_projectile_speed: f32,
    pub collectible_interval: u64,
    pub collectible_speed: f32,

    // === Scoring ===
    pub collect_reward: u64,
    pub progress_step: u32,
    pub progress_goal: u32,

    // === Professor ===
    pub professor_phase_rate: f32,
    pub professor_amplitude: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_size: PLAYER_SIZE,
            player_speed: PLAYER_SPEED,
            player_bottom_offset: PLAYER_BOTTOM_OFFSET,

            falling_size: FALLING_SIZE,
            spawn_y: SPAWN_Y,
            projectile_interval: PROJECTILE_INTERVAL,
            fast_projectile_chance: FAST_PROJECTILE_CHANCE,
            slow_projectile_speed: SLOW_PROJECTILE_SPEED,
            fast_projectile_speed: FAST_PROJECTILE_SPEED,
            collectible_interval: COLLECTIBLE_INTERVAL,
            collectible_speed: COLLECTIBLE_SPEED,

            collect_reward: COLLECT_REWARD,
            progress_step: PROGRESS_STEP,
            progress_goal: PROGRESS_GOAL,

            professor_phase_rate: PROFESSOR_PHASE_RATE,
            professor_amplitude: PROFESSOR_AMPLITUDE,
        }
    }
}

impl Tuning {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "ppt_attack_tuning";

    /// Parse overrides; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would make the simulation meaningless
    pub fn validate(&self) -> Result<(), TuningError> {
        if !(self.player_size > 0.0) {
            return Err(TuningError::Invalid("player_size"));
        }
        if !(self.player_speed.is_finite() && self.player_speed >= 0.0) {
            return Err(TuningError::Invalid("player_speed"));
        }
        if !(self.falling_size > 0.0) {
            return Err(TuningError::Invalid("falling_size"));
        }
        if !self.spawn_y.is_finite() {
            return Err(TuningError::Invalid("spawn_y"));
        }
        // Anything that does not fall never despawns
        for (name, speed) in [
            ("slow_projectile_speed", self.slow_projectile_speed),
            ("fast_projectile_speed", self.fast_projectile_speed),
            ("collectible_speed", self.collectible_speed),
        ] {
            if !(speed.is_finite() && speed > 0.0) {
                return Err(TuningError::Invalid(name));
            }
        }
        if self.projectile_interval == 0 {
            return Err(TuningError::Invalid("projectile_interval"));
        }
        if self.collectible_interval == 0 {
            return Err(TuningError::Invalid("collectible_interval"));
        }
        if !(0.0..=1.0).contains(&self.fast_projectile_chance) {
            return Err(TuningError::Invalid("fast_projectile_chance"));
        }
        if self.progress_goal == 0 {
            return Err(TuningError::Invalid("progress_goal"));
        }
        if self.progress_step == 0 {
            return Err(TuningError::Invalid("progress_step"));
        }
        Ok(())
    }

    /// Load tuning overrides from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(tuning) => {
                        log::info!("Loaded tuning overrides from LocalStorage");
                        return tuning;
                    }
                    Err(e) => log::warn!("Ignoring stored tuning: {}", e),
                }
            }
        }

        log::info!("Using default tuning");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
