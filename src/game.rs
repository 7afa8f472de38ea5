//! Game loop state machine
//!
//! Owns the live `Session` and everything around it: frame clock, queued
//! inputs, player identity and the report sink. Hosts call `push_input` from
//! their event handlers and `frame` once per rendered frame.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::persistence::{GameReport, LogSink, ReportSink, SessionIdentity};
use crate::platform::{self, FrameClock, InputQueue};
use crate::sim::{Collision, GameEvent, InputEvent, Session, apply_input, tick};
use crate::tuning::Tuning;

/// Game phase state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first press
    #[default]
    NotStarted,
    Running,
    /// A collision ended the run; waiting for a press to restart
    Terminated,
}

pub struct Game {
    tuning: Tuning,
    phase: GamePhase,
    session: Session,
    clock: FrameClock,
    inputs: InputQueue,
    /// Seeds sessions and game ids
    rng: Pcg32,
    identity: SessionIdentity,
    sink: Box<dyn ReportSink>,
    /// Start/restart presses are ignored until the host is ready
    ready: bool,
    last_report: Option<GameReport>,
}

impl Game {
    pub fn new(tuning: Tuning, seed: u64, username: impl Into<String>) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let identity = SessionIdentity::new(username, &mut rng);
        let session = Session::new(&tuning, rng.random(), 0.0);
        Self {
            tuning,
            phase: GamePhase::NotStarted,
            session,
            clock: FrameClock::new(),
            inputs: InputQueue::new(),
            rng,
            identity,
            sink: Box::new(LogSink),
            ready: true,
            last_report: None,
        }
    }

    pub fn with_sink(mut self, sink: Box<dyn ReportSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Carry a best score in from storage
    pub fn with_high_score(mut self, high_score: f64) -> Self {
        self.session = Session::new(&self.tuning, self.session.seed, high_score);
        self
    }

    pub fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Queue an input; it takes effect on the next `frame`
    pub fn push_input(&mut self, input: InputEvent) {
        self.inputs.push(input);
    }

    /// Run one rendered frame at monotonic time `now` (milliseconds)
    ///
    /// Queued inputs are applied first, then the session ticks if running.
    /// Returns the report when this frame ended the run.
    pub fn frame(&mut self, now: f64) -> Option<GameReport> {
        let inputs: Vec<InputEvent> = self.inputs.drain().collect();
        for input in inputs {
            match self.phase {
                GamePhase::Running => apply_input(&mut self.session, input),
                GamePhase::NotStarted | GamePhase::Terminated => {
                    if input.is_press() && self.ready {
                        self.restart();
                    }
                }
            }
        }

        if self.phase != GamePhase::Running {
            return None;
        }

        let dt = self.clock.delta(now);
        let hit = tick(&mut self.session, dt)?;
        Some(self.finish(hit))
    }

    /// Replace the session with a fresh one and start running
    ///
    /// The running high score carries over; everything else is rebuilt.
    pub fn restart(&mut self) {
        let high_score = self.session.score.high_score();
        self.session = Session::new(&self.tuning, self.rng.random(), high_score);
        self.clock.reset();
        self.identity.regenerate(&mut self.rng);
        let from = self.phase;
        self.phase = GamePhase::Running;
        log::info!(
            "{} game {} for {}",
            if from == GamePhase::NotStarted { "Starting" } else { "Restarting" },
            self.identity.game_id,
            self.identity.username
        );
    }

    fn finish(&mut self, hit: Collision) -> GameReport {
        self.phase = GamePhase::Terminated;
        let report = GameReport::from_session(&self.session, &self.identity, platform::now_ms());
        log::info!(
            "Game over: score {} (killed by {})",
            report.score,
            hit.variant.as_str()
        );
        if let Err(e) = self.sink.submit(&report) {
            log::warn!("Failed to submit game report: {}", e);
        }
        self.last_report = Some(report.clone());
        report
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn identity(&self) -> &SessionIdentity {
        &self.identity
    }

    pub fn high_score(&self) -> f64 {
        self.session.score.high_score()
    }

    pub fn last_report(&self) -> Option<&GameReport> {
        self.last_report.as_ref()
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.session.drain_events()
    }
}
