//! Dino Dash - an endless side-scrolling runner
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (actor physics, obstacles, difficulty, collisions)
//! - `game`: Session state machine driven by frames and input events
//! - `platform`: Frame clock and input queue
//! - `renderer`: Geometry handed to whatever draws the frame
//! - `persistence`: Game reports and where they get sent
//! - `tuning`: Data-driven game balance
//! - `highscore`: Best score kept across sessions

pub mod game;
pub mod highscore;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use game::{Game, GamePhase};
pub use highscore::HighScore;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// World dimensions (canvas space, y grows downward)
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 300.0;
    /// Ground line sits 50px above the bottom edge
    pub const GROUND_Y: f32 = WORLD_HEIGHT - 50.0;
    /// Background image width (scroll wraps here)
    pub const BACKGROUND_WIDTH: f32 = 800.0;
    /// Background scrolls at speed / 8
    pub const BACKGROUND_PARALLAX: f32 = 8.0;

    /// Actor defaults
    pub const ACTOR_X: f32 = 50.0;
    pub const ACTOR_WIDTH: f32 = 88.0;
    pub const ACTOR_HEIGHT: f32 = 94.0;
    pub const ACTOR_DUCK_HEIGHT: f32 = 60.0;
    /// Applied once per tick, not scaled by deltaTime
    pub const GRAVITY: f32 = 0.45;
    pub const JUMP_IMPULSE: f32 = -15.0;
    pub const RUN_FRAME_INTERVAL_MS: f64 = 100.0;
    pub const RUN_FRAME_COUNT: usize = 2;

    /// World speed (pixels per tick)
    pub const BASE_SPEED: f32 = 5.0;
    pub const SPEED_STEP: f32 = 0.5;
    pub const MAX_SPEED: f32 = 20.0;
    pub const SPEED_STEP_INTERVAL_MS: f64 = 5000.0;

    /// Spawn interval bounds (ms)
    pub const INITIAL_SPAWN_INTERVAL_MS: f64 = 1500.0;
    pub const INITIAL_MIN_SPAWN_INTERVAL_MS: f64 = 800.0;
    pub const INITIAL_MAX_SPAWN_INTERVAL_MS: f64 = 2000.0;
    pub const MIN_SPAWN_FLOOR_MS: f64 = 500.0;
    pub const MAX_SPAWN_FLOOR_MS: f64 = 1200.0;
    /// Bounds shrink by this many ms per elapsed ms
    pub const SPAWN_INTERVAL_DECAY: f64 = 0.005;

    /// Minimum spacing = SPACING_BASE + SPACING_SPEED_FACTOR / speed
    pub const SPACING_BASE: f32 = 50.0;
    pub const SPACING_SPEED_FACTOR: f32 = 50.0;

    /// Aerial obstacles share one size
    pub const AERIAL_WIDTH: f32 = 97.0;
    pub const AERIAL_HEIGHT: f32 = 68.0;
    pub const AERIAL_FRAME_INTERVAL_MS: f64 = 200.0;
    pub const AERIAL_FRAME_COUNT: usize = 2;

    /// Score per elapsed millisecond (~10 points/second)
    pub const SCORE_RATE: f64 = 0.01;

    /// Fraction trimmed from each side of a hitbox before overlap tests
    pub const ACTOR_MARGIN: f32 = 0.1;
    pub const OBSTACLE_MARGIN: f32 = 0.1;
}
