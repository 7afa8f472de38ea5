//! Frame clock
//!
//! Turns monotonic frame timestamps (milliseconds) into per-frame deltas.

/// Measures time between rendered frames
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Forget the previous timestamp; the next `delta` returns 0
    pub fn reset(&mut self) {
        self.last = None;
    }

    /// Milliseconds since the previous call
    ///
    /// The first call after construction or `reset` seeds the clock and
    /// returns 0. Timestamps that go backwards yield 0.
    pub fn delta(&mut self, now: f64) -> f64 {
        let Some(last) = self.last.replace(now) else {
            return 0.0;
        };
        let dt = now - last;
        if dt < 0.0 {
            log::warn!("Frame timestamp went backwards by {:.3}ms", -dt);
            return 0.0;
        }
        dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_delta_is_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.delta(1234.5), 0.0);
        assert_eq!(clock.delta(1250.5), 16.0);
    }

    #[test]
    fn test_reset_reseeds() {
        let mut clock = FrameClock::new();
        clock.delta(100.0);
        clock.delta(116.0);
        clock.reset();
        assert_eq!(clock.delta(5000.0), 0.0);
        assert_eq!(clock.delta(5010.0), 10.0);
    }

    #[test]
    fn test_backwards_time_clamps() {
        let mut clock = FrameClock::new();
        clock.delta(200.0);
        assert_eq!(clock.delta(150.0), 0.0);
        // Measures from the latest timestamp afterwards
        assert_eq!(clock.delta(166.0), 16.0);
    }
}
