//! PPT Attack - dodge the homework, save the slides
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, collisions, session state)
//! - `input`: Directional key sampler
//! - `driver`: Frame loop lifecycle and outcome reporting
//! - `flow`: Login / playing / game over / victory screens
//! - `hud`: Score and upload progress projection
//! - `quotes`: Professor quote bubble cycle
//! - `renderer`: Vertex generation and WebGPU pipeline
//! - `tuning`: Data-driven game balance
//! - `app`: Everything the browser glue talks to

pub mod app;
pub mod driver;
pub mod flow;
pub mod hud;
pub mod input;
pub mod quotes;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use app::App;
pub use driver::{Driver, FrameToken, Outcome, OutcomeReporter};
pub use flow::{FlowError, Screen, ScreenFlow};
pub use input::{Direction, InputSampler};
pub use sim::{Bounds, SessionState, SimError, TickStatus};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Player box size (square, pixels)
    pub const PLAYER_SIZE: f32 = 40.0;
    /// Player displacement per held direction per tick
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Distance from the bottom edge the player is placed at on start/resize
    pub const PLAYER_BOTTOM_OFFSET: f32 = 100.0;

    /// Falling entity box size (square, pixels)
    pub const FALLING_SIZE: f32 = 30.0;
    /// Spawn height (above the top boundary)
    pub const SPAWN_Y: f32 = -50.0;

    /// Frames between projectile spawns
    pub const PROJECTILE_INTERVAL: u64 = 40;
    /// Chance a projectile is the fast variant
    pub const FAST_PROJECTILE_CHANCE: f64 = 0.2;
    pub const SLOW_PROJECTILE_SPEED: f32 = 3.0;
    pub const FAST_PROJECTILE_SPEED: f32 = 5.0;

    /// Frames between collectible spawns
    pub const COLLECTIBLE_INTERVAL: u64 = 90;
    pub const COLLECTIBLE_SPEED: f32 = 4.0;

    /// Score awarded per collectible
    pub const COLLECT_REWARD: u64 = 100;
    /// Upload progress per collectible
    pub const PROGRESS_STEP: u32 = 10;
    /// Upload progress that wins the session
    pub const PROGRESS_GOAL: u32 = 100;

    /// Professor patrol: radians per frame, and amplitude as a fraction of width
    pub const PROFESSOR_PHASE_RATE: f32 = 0.005;
    pub const PROFESSOR_AMPLITUDE: f32 = 0.4;
}
