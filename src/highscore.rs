//! Best score across sessions
//!
//! A single floored score kept in storage under `highScore`. The host loads
//! it at start-up, seeds the `Game` with it and writes it back when a run
//! beats it or the page unloads.

use crate::persistence::PersistenceError;
use crate::platform::storage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighScore {
    best: u64,
}

impl HighScore {
    pub const STORAGE_KEY: &'static str = "highScore";

    pub fn new(best: u64) -> Self {
        Self { best }
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    /// Keep `score` (floored) if it beats the best; returns whether it did
    pub fn record(&mut self, score: f64) -> bool {
        if !score.is_finite() || score <= 0.0 {
            return false;
        }
        let floored = score.floor() as u64;
        if floored <= self.best {
            return false;
        }
        self.best = floored;
        true
    }

    /// Stored best, or zero when missing or unreadable
    pub fn load() -> Self {
        let Some(raw) = storage::read(Self::STORAGE_KEY) else {
            log::info!("No stored high score, starting at 0");
            return Self::default();
        };
        match raw.trim().parse::<f64>() {
            Ok(value) if value.is_finite() && value >= 0.0 => {
                let high_score = Self::new(value.floor() as u64);
                log::info!("Loaded high score {}", high_score.best);
                high_score
            }
            _ => {
                log::warn!("Ignoring stored high score {:?}", raw);
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<(), PersistenceError> {
        storage::write(Self::STORAGE_KEY, &self.best.to_string())?;
        log::debug!("High score {} saved", self.best);
        Ok(())
    }
}
