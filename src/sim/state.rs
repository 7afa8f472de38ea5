//! Session state and shared simulation types
//!
//! A `Session` is one run from start to collision. It is rebuilt whole on
//! restart; nothing in it is reset field by field.

use std::collections::BTreeMap;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorParams};
use super::collision::Margins;
use super::difficulty::Difficulty;
use super::obstacle::{FieldParams, ObstacleField, ObstacleVariant};
use super::score::ScoreKeeper;
use crate::tuning::Tuning;

/// Looping sprite animation driven by elapsed milliseconds
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameCycle {
    pub frame: usize,
    pub elapsed_ms: f64,
}

impl FrameCycle {
    /// Step to the next frame once more than `interval_ms` has accumulated
    pub fn advance(&mut self, dt: f64, interval_ms: f64, frames: usize) {
        self.elapsed_ms += dt;
        if self.elapsed_ms > interval_ms {
            self.elapsed_ms = 0.0;
            self.frame = (self.frame + 1) % frames.max(1);
        }
    }
}

/// Obstacles passed per variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PassCounts(BTreeMap<ObstacleVariant, u32>);

impl PassCounts {
    /// All known variants at zero
    pub fn new() -> Self {
        Self(ObstacleVariant::ALL.into_iter().map(|v| (v, 0)).collect())
    }

    /// Count one pass; variants without a slot are ignored
    pub fn record(&mut self, variant: ObstacleVariant) {
        if let Some(count) = self.0.get_mut(&variant) {
            *count += 1;
        }
    }

    /// Count one pass by report name; unknown names are ignored
    pub fn record_named(&mut self, name: &str) {
        if let Some(variant) = ObstacleVariant::from_name(name) {
            self.record(variant);
        }
    }

    pub fn get(&self, variant: ObstacleVariant) -> u32 {
        self.0.get(&variant).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObstacleVariant, u32)> + '_ {
        self.0.iter().map(|(v, c)| (*v, *c))
    }
}

impl Default for PassCounts {
    fn default() -> Self {
        Self::new()
    }
}

/// Things that happened during a tick, for HUD and audio hooks
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// World speed stepped up to the given value
    SpeedUp(f32),
    Spawned(ObstacleVariant),
    /// Spawn timer expired but the last obstacle was too close
    SpawnBlocked,
    /// An obstacle scrolled fully off the left edge
    Passed(ObstacleVariant),
    Jumped,
    Collision(ObstacleVariant),
}

/// One run of the game
#[derive(Debug, Clone)]
pub struct Session {
    /// Seed this session's RNG was built from
    pub seed: u64,
    pub rng: Pcg32,
    pub actor: Actor,
    pub field: ObstacleField,
    pub difficulty: Difficulty,
    pub score: ScoreKeeper,
    pub margins: Margins,
    /// Background scroll offset (0 down to -background_width)
    pub background_x: f32,
    pub background_width: f32,
    pub background_parallax: f32,
    /// Total simulated milliseconds
    pub elapsed_ms: f64,
    pub ticks: u64,
    /// Set once a collision ends the run
    pub killed_by: Option<ObstacleVariant>,
    /// Events from the most recent ticks, drained by the host
    pub events: Vec<GameEvent>,
}

impl Session {
    /// Build a fresh session; `high_score` carries the running best across restarts
    pub fn new(tuning: &Tuning, seed: u64, high_score: f64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            actor: Actor::new(ActorParams::from_tuning(tuning)),
            field: ObstacleField::new(
                FieldParams::from_tuning(tuning),
                tuning.initial_spawn_interval_ms,
            ),
            difficulty: Difficulty::from_tuning(tuning),
            score: ScoreKeeper::new(tuning.score_rate, high_score),
            margins: Margins {
                actor: tuning.actor_margin,
                obstacle: tuning.obstacle_margin,
            },
            background_x: 0.0,
            background_width: tuning.background_width,
            background_parallax: tuning.background_parallax,
            elapsed_ms: 0.0,
            ticks: 0,
            killed_by: None,
            events: Vec::new(),
        }
    }

    pub fn is_over(&self) -> bool {
        self.killed_by.is_some()
    }

    /// Scroll the background by a fraction of world speed, wrapping at its width
    pub fn scroll_background(&mut self, speed: f32) {
        self.background_x -= speed / self.background_parallax;
        if self.background_x <= -self.background_width {
            self.background_x = 0.0;
        }
    }

    /// Take the events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    #[test]
    fn test_frame_cycle_wraps() {
        let mut cycle = FrameCycle::default();
        cycle.advance(101.0, 100.0, 2);
        assert_eq!(cycle.frame, 1);
        assert_eq!(cycle.elapsed_ms, 0.0);
        cycle.advance(100.0, 100.0, 2);
        assert_eq!(cycle.frame, 1);
        cycle.advance(1.0, 100.0, 2);
        assert_eq!(cycle.frame, 0);
    }

    #[test]
    fn test_pass_counts_ignore_unknown_names() {
        let mut counts = PassCounts::new();
        counts.record_named("cactus_tall");
        counts.record_named("cactus_tall");
        counts.record_named("meteor");
        assert_eq!(counts.get(ObstacleVariant::CactusTall), 2);
        assert_eq!(counts.total(), 2);
    }

    #[test]
    fn test_pass_counts_missing_slot_is_noop() {
        // Reports from older builds may lack a variant entirely
        let mut counts: PassCounts = serde_json::from_str(r#"{"cactus_standard": 3}"#).unwrap();
        counts.record(ObstacleVariant::BirdHigh);
        assert_eq!(counts.get(ObstacleVariant::BirdHigh), 0);
        counts.record(ObstacleVariant::CactusStandard);
        assert_eq!(counts.get(ObstacleVariant::CactusStandard), 4);
    }

    #[test]
    fn test_pass_counts_serialize_every_variant() {
        let json = serde_json::to_value(PassCounts::new()).unwrap();
        let map = json.as_object().unwrap();
        assert_eq!(map.len(), 7);
        assert_eq!(map["bird_mid"], 0);
    }

    #[test]
    fn test_new_session_defaults() {
        let session = Session::new(&Tuning::default(), 42, 17.0);
        assert!(session.field.is_empty());
        assert_eq!(session.difficulty.speed(), BASE_SPEED);
        assert_eq!(session.score.score(), 0.0);
        assert_eq!(session.score.high_score(), 17.0);
        assert!(!session.is_over());
        assert_eq!(session.actor.pos.y, GROUND_Y);
    }

    #[test]
    fn test_background_wraps() {
        let mut session = Session::new(&Tuning::default(), 1, 0.0);
        session.scroll_background(8.0);
        assert_eq!(session.background_x, -1.0);
        session.background_x = -BACKGROUND_WIDTH + 0.5;
        session.scroll_background(8.0);
        assert_eq!(session.background_x, 0.0);
    }
}
