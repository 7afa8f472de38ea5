//! Survival-time score

/// Integrates survival time into a score and tracks the running best
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreKeeper {
    score: f64,
    high_score: f64,
    /// Points per millisecond
    rate: f64,
}

impl ScoreKeeper {
    /// Start at zero; `high_score` is the best carried in from earlier runs
    pub fn new(rate: f64, high_score: f64) -> Self {
        Self {
            score: 0.0,
            high_score: high_score.max(0.0),
            rate,
        }
    }

    pub fn update(&mut self, dt: f64) {
        self.score += dt.max(0.0) * self.rate;
        self.high_score = self.high_score.max(self.score);
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn high_score(&self) -> f64 {
        self.high_score
    }

    /// Floored score for display
    pub fn display_score(&self) -> u64 {
        self.score.floor() as u64
    }

    /// Floored high score for display
    pub fn display_high_score(&self) -> u64 {
        self.high_score.floor() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SCORE_RATE;
    use proptest::prelude::*;

    #[test]
    fn test_ten_points_per_second() {
        let mut s = ScoreKeeper::new(SCORE_RATE, 0.0);
        s.update(1000.0);
        assert!((s.score() - 10.0).abs() < 1e-9);
        assert_eq!(s.display_score(), 10);
    }

    #[test]
    fn test_high_score_carried_until_beaten() {
        let mut s = ScoreKeeper::new(SCORE_RATE, 25.0);
        s.update(2000.0);
        assert_eq!(s.display_score(), 20);
        assert_eq!(s.display_high_score(), 25);
        s.update(1000.0);
        assert_eq!(s.display_high_score(), 30);
    }

    #[test]
    fn test_display_floors() {
        let mut s = ScoreKeeper::new(SCORE_RATE, 0.0);
        s.update(199.0);
        assert_eq!(s.display_score(), 1);
    }

    proptest! {
        #[test]
        fn prop_score_monotonic(dts in prop::collection::vec(-50.0f64..500.0, 1..200), carried in 0.0f64..500.0) {
            let mut s = ScoreKeeper::new(SCORE_RATE, carried);
            let mut observed_max = carried;
            let mut last = s.score();
            for dt in dts {
                s.update(dt);
                prop_assert!(s.score() >= last);
                observed_max = observed_max.max(s.score());
                prop_assert_eq!(s.high_score(), observed_max);
                last = s.score();
            }
        }
    }
}
