//! Demo/idle mode: a simple bot that plays the game
//!
//! Looks at the nearest obstacle still ahead of the actor and decides
//! whether to jump it, duck under it, or stand back up.

use super::collision::{Hitbox, boxes_collide};
use super::obstacle::Obstacle;
use super::state::Session;
use super::tick::InputEvent;

/// Ticks of lead time before an obstacle reaches the actor's front edge
const JUMP_LEAD_TICKS: f32 = 14.0;
const DUCK_LEAD_TICKS: f32 = 6.0;

/// Suggest the next input for the session, if any
pub fn suggest(session: &Session) -> Option<InputEvent> {
    let actor = &session.actor;
    let speed = session.difficulty.speed();
    let front = actor.pos.x + actor.width;

    let threat = session
        .field
        .obstacles
        .iter()
        .filter(|o| o.pos.x + o.size.x > actor.pos.x)
        .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x));

    let Some(obstacle) = threat else {
        return actor.ducking.then_some(InputEvent::DuckEnd);
    };
    let distance = obstacle.pos.x - front;

    if ducking_clears(session, obstacle) {
        if !actor.ducking && actor.on_ground && distance < speed * DUCK_LEAD_TICKS {
            return Some(InputEvent::DuckBegin);
        }
        return None;
    }

    if actor.ducking {
        return Some(InputEvent::DuckEnd);
    }
    if actor.can_jump() && distance > 0.0 && distance < speed * JUMP_LEAD_TICKS {
        return Some(InputEvent::Primary);
    }
    None
}

/// Would a grounded, ducking actor pass under this obstacle?
fn ducking_clears(session: &Session, obstacle: &Obstacle) -> bool {
    let params = session.actor.params();
    let ducked = Hitbox::new(
        params.spawn_x,
        params.ground_y,
        params.width,
        params.ducking_height,
    );
    let mut aligned = obstacle.hitbox();
    aligned.pos.x = params.spawn_x;
    let margins = session.margins;
    !boxes_collide(&ducked, margins.actor, &aligned, margins.obstacle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::obstacle::{AerialVariant, GroundVariant, ObstacleKind};
    use crate::sim::tick::{apply_input, tick};
    use crate::tuning::Tuning;

    fn session() -> Session {
        Session::new(&Tuning::default(), 9, 0.0)
    }

    fn place(s: &mut Session, kind: ObstacleKind, x: f32) {
        s.field.spawn(kind);
        s.field.obstacles.last_mut().unwrap().pos.x = x;
    }

    #[test]
    fn test_idle_when_clear() {
        assert_eq!(suggest(&session()), None);
    }

    #[test]
    fn test_jumps_approaching_cactus() {
        let mut s = session();
        place(&mut s, ObstacleKind::Ground(GroundVariant::Wide), ACTOR_X + ACTOR_WIDTH + 40.0);
        assert_eq!(suggest(&s), Some(InputEvent::Primary));
    }

    #[test]
    fn test_waits_for_distant_cactus() {
        let mut s = session();
        place(&mut s, ObstacleKind::Ground(GroundVariant::Wide), 700.0);
        assert_eq!(suggest(&s), None);
    }

    #[test]
    fn test_ducks_under_mid_bird() {
        let mut s = session();
        place(&mut s, ObstacleKind::aerial(AerialVariant::Mid), ACTOR_X + ACTOR_WIDTH + 10.0);
        assert_eq!(suggest(&s), Some(InputEvent::DuckBegin));
    }

    #[test]
    fn test_stands_once_clear() {
        let mut s = session();
        s.actor.duck();
        assert_eq!(suggest(&s), Some(InputEvent::DuckEnd));
    }

    #[test]
    fn test_drives_a_session() {
        let mut s = session();
        for _ in 0..600 {
            if let Some(input) = suggest(&s) {
                apply_input(&mut s, input);
            }
            tick(&mut s, 16.0);
        }
        assert!(s.ticks > 0);
        assert!(s.score.score() > 0.0);
    }
}
