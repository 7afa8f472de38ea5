//! Variable-timestep simulation tick
//!
//! Advances a session by one rendered frame in a fixed order:
//! difficulty, obstacles, actor, background, score, collisions.

use super::collision::{Collision, first_collision};
use super::obstacle::SpawnAttempt;
use super::state::{GameEvent, Session};

/// Discrete control actions delivered by the input collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Jump, or start/restart when no run is active
    Primary,
    DuckBegin,
    DuckEnd,
    /// Any other key press: starts or restarts a run, no effect while running
    Start,
}

impl InputEvent {
    /// Presses (not releases) start and restart a run
    pub fn is_press(&self) -> bool {
        !matches!(self, InputEvent::DuckEnd)
    }
}

/// Apply a control action to a running session's actor
pub fn apply_input(session: &mut Session, input: InputEvent) {
    match input {
        InputEvent::Primary => {
            if session.actor.jump() {
                session.events.push(GameEvent::Jumped);
            }
        }
        InputEvent::DuckBegin => {
            session.actor.duck();
        }
        InputEvent::DuckEnd => session.actor.stand_up(),
        InputEvent::Start => {}
    }
}

/// Advance the session by `dt` milliseconds
///
/// Returns the collision that ended the run, if one happened this tick.
/// A finished session is left untouched.
pub fn tick(session: &mut Session, dt: f64) -> Option<Collision> {
    if session.is_over() {
        return None;
    }

    session.ticks += 1;
    session.elapsed_ms += dt;

    let steps = session.difficulty.update(dt);
    let speed = session.difficulty.speed();
    if steps > 0 {
        log::debug!("Speed up x{} -> {:.1}", steps, speed);
        session.events.push(GameEvent::SpeedUp(speed));
    }

    let bounds = session.difficulty.spawn_bounds();
    let update = session.field.update(dt, speed, bounds, &mut session.rng);
    match update.attempt {
        Some(SpawnAttempt::Spawned { variant, .. }) => {
            session.events.push(GameEvent::Spawned(variant));
        }
        Some(SpawnAttempt::Blocked { .. }) => session.events.push(GameEvent::SpawnBlocked),
        None => {}
    }
    session
        .events
        .extend(update.passed.into_iter().map(GameEvent::Passed));

    session.actor.update(dt);
    session.scroll_background(speed);
    session.score.update(dt);

    let hit = first_collision(
        &session.actor.hitbox(),
        &session.field.obstacles,
        session.margins,
    )?;
    session.killed_by = Some(hit.variant);
    session.events.push(GameEvent::Collision(hit.variant));
    log::info!(
        "Hit {} after {:.0}ms, score {}",
        hit.variant.as_str(),
        session.elapsed_ms,
        session.score.display_score()
    );
    Some(hit)
}
