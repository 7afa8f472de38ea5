//! Difficulty curve: world speed steps up on a timer while the spawn
//! interval bounds shrink continuously toward their floors.

use crate::tuning::Tuning;

#[derive(Debug, Clone, PartialEq)]
pub struct Difficulty {
    speed: f32,
    /// Milliseconds accumulated toward the next speed step
    step_timer_ms: f64,
    min_spawn_interval_ms: f64,
    max_spawn_interval_ms: f64,

    speed_step: f32,
    max_speed: f32,
    step_interval_ms: f64,
    min_floor_ms: f64,
    max_floor_ms: f64,
    decay: f64,
}

impl Difficulty {
    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self {
            speed: tuning.base_speed,
            step_timer_ms: 0.0,
            min_spawn_interval_ms: tuning.initial_min_spawn_interval_ms,
            max_spawn_interval_ms: tuning.initial_max_spawn_interval_ms,
            speed_step: tuning.speed_step,
            max_speed: tuning.max_speed,
            step_interval_ms: tuning.speed_step_interval_ms,
            min_floor_ms: tuning.min_spawn_floor_ms,
            max_floor_ms: tuning.max_spawn_floor_ms,
            decay: tuning.spawn_interval_decay,
        }
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Current (min, max) spawn interval in milliseconds
    pub fn spawn_bounds(&self) -> (f64, f64) {
        (self.min_spawn_interval_ms, self.max_spawn_interval_ms)
    }

    /// Advance by `dt` milliseconds; returns how many speed steps were taken
    ///
    /// Once the step timer passes the interval, one step is taken per whole
    /// interval accumulated (a long stall can take several) and the timer
    /// restarts from zero.
    pub fn update(&mut self, dt: f64) -> u32 {
        let mut steps = 0;
        self.step_timer_ms += dt;
        if self.step_timer_ms > self.step_interval_ms {
            steps = (self.step_timer_ms / self.step_interval_ms).floor() as u32;
            self.speed = (self.speed + self.speed_step * steps as f32).min(self.max_speed);
            self.step_timer_ms = 0.0;
        }

        if self.min_spawn_interval_ms > self.min_floor_ms {
            self.min_spawn_interval_ms =
                (self.min_spawn_interval_ms - self.decay * dt).max(self.min_floor_ms);
        }
        if self.max_spawn_interval_ms > self.max_floor_ms {
            self.max_spawn_interval_ms =
                (self.max_spawn_interval_ms - self.decay * dt).max(self.max_floor_ms);
        }

        steps
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::from_tuning(&Tuning::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use proptest::prelude::*;

    #[test]
    fn test_speed_steps_after_interval() {
        let mut d = Difficulty::default();
        assert_eq!(d.update(5000.0), 0);
        assert_eq!(d.speed(), BASE_SPEED);
        assert_eq!(d.update(1.0), 1);
        assert_eq!(d.speed(), BASE_SPEED + SPEED_STEP);
        // Timer restarted from zero
        assert_eq!(d.update(4999.0), 0);
    }

    #[test]
    fn test_large_delta_takes_several_steps() {
        let mut d = Difficulty::default();
        assert_eq!(d.update(16_000.0), 3);
        assert_eq!(d.speed(), BASE_SPEED + 3.0 * SPEED_STEP);
    }

    #[test]
    fn test_speed_capped() {
        let mut d = Difficulty::default();
        for _ in 0..100 {
            d.update(5001.0);
        }
        assert_eq!(d.speed(), MAX_SPEED);
        d.update(1e7);
        assert_eq!(d.speed(), MAX_SPEED);
    }

    #[test]
    fn test_spawn_bounds_decay_to_floors() {
        let mut d = Difficulty::default();
        d.update(1000.0);
        let (min, max) = d.spawn_bounds();
        assert!((min - 795.0).abs() < 1e-9);
        assert!((max - 1995.0).abs() < 1e-9);

        d.update(1e6);
        assert_eq!(d.spawn_bounds(), (MIN_SPAWN_FLOOR_MS, MAX_SPAWN_FLOOR_MS));
    }

    proptest! {
        #[test]
        fn prop_monotonic_and_floored(dts in prop::collection::vec(0.0f64..200_000.0, 1..200)) {
            let mut d = Difficulty::default();
            let mut last_speed = d.speed();
            let (mut last_min, mut last_max) = d.spawn_bounds();
            for dt in dts {
                d.update(dt);
                let (min, max) = d.spawn_bounds();
                prop_assert!(d.speed() >= last_speed);
                prop_assert!(d.speed() <= MAX_SPEED);
                prop_assert!(min <= last_min && min >= MIN_SPAWN_FLOOR_MS);
                prop_assert!(max <= last_max && max >= MAX_SPAWN_FLOOR_MS);
                last_speed = d.speed();
                last_min = min;
                last_max = max;
            }
        }
    }
}
