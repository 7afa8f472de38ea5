//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of platform
//! and rendering dependencies:
//! - Driven by variable `dt` (milliseconds) from the frame clock
//! - Seeded RNG owned by the session
//! - Obstacles kept in spawn order

pub mod actor;
pub mod autopilot;
pub mod collision;
pub mod difficulty;
pub mod obstacle;
pub mod score;
pub mod state;
pub mod tick;

pub use actor::{Actor, ActorParams};
pub use collision::{Collision, Hitbox, Margins, boxes_collide, first_collision};
pub use difficulty::Difficulty;
pub use obstacle::{
    AerialVariant, GroundVariant, Obstacle, ObstacleField, ObstacleKind, ObstacleVariant,
    SpawnAttempt,
};
pub use score::ScoreKeeper;
pub use state::{FrameCycle, GameEvent, PassCounts, Session};
pub use tick::{InputEvent, apply_input, tick};
