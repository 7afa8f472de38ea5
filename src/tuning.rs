//! Data-driven game balance
//!
//! Every gameplay constant can be overridden from JSON. Missing fields fall
//! back to the defaults in `consts`. Player overrides are read from storage
//! (LocalStorage on the web).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::platform::storage;

#[derive(Debug, Error)]
pub enum TuningError {
    #[error("invalid tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid tuning value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

fn invalid(field: &'static str, reason: impl Into<String>) -> TuningError {
    TuningError::Invalid {
        field,
        reason: reason.into(),
    }
}

/// Gameplay tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World ===
    pub world_width: f32,
    pub world_height: f32,
    /// Distance from the bottom edge to the ground line
    pub ground_offset: f32,
    pub background_width: f32,
    pub background_parallax: f32,

    // === Actor ===
    pub actor_x: f32,
    pub actor_width: f32,
    pub actor_height: f32,
    pub actor_duck_height: f32,
    pub gravity: f32,
    pub jump_impulse: f32,
    pub run_frame_interval_ms: f64,
    pub run_frame_count: usize,

    // === Speed ===
    pub base_speed: f32,
    pub speed_step: f32,
    pub max_speed: f32,
    pub speed_step_interval_ms: f64,

    // === Spawning ===
    pub initial_spawn_interval_ms: f64,
    pub initial_min_spawn_interval_ms: f64,
    pub initial_max_spawn_interval_ms: f64,
    pub min_spawn_floor_ms: f64,
    pub max_spawn_floor_ms: f64,
    pub spawn_interval_decay: f64,
    pub spacing_base: f32,
    pub spacing_speed_factor: f32,
    pub aerial_frame_interval_ms: f64,
    pub aerial_frame_count: usize,

    // === Scoring / collisions ===
    pub score_rate: f64,
    pub actor_margin: f32,
    pub obstacle_margin: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            ground_offset: WORLD_HEIGHT - GROUND_Y,
            background_width: BACKGROUND_WIDTH,
            background_parallax: BACKGROUND_PARALLAX,

            actor_x: ACTOR_X,
            actor_width: ACTOR_WIDTH,
            actor_height: ACTOR_HEIGHT,
            actor_duck_height: ACTOR_DUCK_HEIGHT,
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            run_frame_interval_ms: RUN_FRAME_INTERVAL_MS,
            run_frame_count: RUN_FRAME_COUNT,

            base_speed: BASE_SPEED,
            speed_step: SPEED_STEP,
            max_speed: MAX_SPEED,
            speed_step_interval_ms: SPEED_STEP_INTERVAL_MS,

            initial_spawn_interval_ms: INITIAL_SPAWN_INTERVAL_MS,
            initial_min_spawn_interval_ms: INITIAL_MIN_SPAWN_INTERVAL_MS,
            initial_max_spawn_interval_ms: INITIAL_MAX_SPAWN_INTERVAL_MS,
            min_spawn_floor_ms: MIN_SPAWN_FLOOR_MS,
            max_spawn_floor_ms: MAX_SPAWN_FLOOR_MS,
            spawn_interval_decay: SPAWN_INTERVAL_DECAY,
            spacing_base: SPACING_BASE,
            spacing_speed_factor: SPACING_SPEED_FACTOR,
            aerial_frame_interval_ms: AERIAL_FRAME_INTERVAL_MS,
            aerial_frame_count: AERIAL_FRAME_COUNT,

            score_rate: SCORE_RATE,
            actor_margin: ACTOR_MARGIN,
            obstacle_margin: OBSTACLE_MARGIN,
        }
    }
}

impl Tuning {
    /// Ground line y (largest y the actor can reach)
    pub fn ground_y(&self) -> f32 {
        self.world_height - self.ground_offset
    }

    /// Parse and validate a (possibly partial) JSON document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values that would break simulation invariants
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.world_width <= 0.0 {
            return Err(invalid("world_width", "must be positive"));
        }
        if self.ground_y() <= 0.0 {
            return Err(invalid("ground_offset", "ground line must be on screen"));
        }
        if self.background_parallax <= 0.0 {
            return Err(invalid("background_parallax", "must be positive"));
        }
        for (field, margin) in [
            ("actor_margin", self.actor_margin),
            ("obstacle_margin", self.obstacle_margin),
        ] {
            if !(0.0..0.5).contains(&margin) {
                return Err(invalid(field, format!("{} not in [0, 0.5)", margin)));
            }
        }
        if self.base_speed <= 0.0 {
            return Err(invalid("base_speed", "must be positive"));
        }
        if self.max_speed < self.base_speed {
            return Err(invalid("max_speed", "below base_speed"));
        }
        if self.speed_step_interval_ms <= 0.0 {
            return Err(invalid("speed_step_interval_ms", "must be positive"));
        }
        if self.min_spawn_floor_ms > self.initial_min_spawn_interval_ms {
            return Err(invalid("min_spawn_floor_ms", "above initial minimum"));
        }
        if self.max_spawn_floor_ms > self.initial_max_spawn_interval_ms {
            return Err(invalid("max_spawn_floor_ms", "above initial maximum"));
        }
        if self.min_spawn_floor_ms > self.max_spawn_floor_ms {
            return Err(invalid("min_spawn_floor_ms", "above max_spawn_floor_ms"));
        }
        if self.initial_min_spawn_interval_ms > self.initial_max_spawn_interval_ms {
            return Err(invalid(
                "initial_min_spawn_interval_ms",
                "above initial_max_spawn_interval_ms",
            ));
        }
        if self.run_frame_count == 0 {
            return Err(invalid("run_frame_count", "must be at least 1"));
        }
        if self.aerial_frame_count == 0 {
            return Err(invalid("aerial_frame_count", "must be at least 1"));
        }
        Ok(())
    }

    /// Storage key for player overrides
    const STORAGE_KEY: &'static str = "dino_dash_tuning";

    /// Stored overrides, or defaults when none are stored or they are invalid
    pub fn load() -> Self {
        let Some(json) = storage::read(Self::STORAGE_KEY) else {
            log::info!("Using default tuning");
            return Self::default();
        };
        match Self::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded stored tuning");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring stored tuning: {}", e);
                Self::default()
            }
        }
    }

    /// Read a JSON tuning file
    pub fn load_from_path(path: impl AsRef<std::path::Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning file");
        Ok(tuning)
    }
}
